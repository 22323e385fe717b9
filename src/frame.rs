use crate::error::{TintmixError, TintmixResult};

/// Output dimensions in pixels. Sources are stretched to these when loaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> TintmixResult<Self> {
        if width == 0 || height == 0 {
            return Err(TintmixError::validation("Canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }
}

/// Rendered output pixels: tightly packed straight-alpha RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRgba {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRgba {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}
