use std::{path::Path, sync::Arc};

use anyhow::Context;

use crate::{
    error::{TintmixError, TintmixResult},
    frame::Canvas,
};

/// The immutable original pixels a session renders from.
///
/// Every recomputation starts from these bytes; nothing in the crate writes
/// back into them. Cloning is cheap, the buffer is shared.
#[derive(Clone)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8: Arc<Vec<u8>>,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba8_len", &self.rgba8.len())
            .finish()
    }
}

impl SourceImage {
    /// Wrap a raw straight-alpha RGBA8 buffer.
    ///
    /// The buffer length must be exactly `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> TintmixResult<Self> {
        if width == 0 || height == 0 {
            return Err(TintmixError::validation(
                "source dimensions must be > 0",
            ));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| TintmixError::validation("source dimensions overflow"))?;
        if rgba8.len() != expected {
            return Err(TintmixError::validation(format!(
                "source buffer must be width*height*4 = {expected} bytes, got {}",
                rgba8.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8: Arc::new(rgba8),
        })
    }

    /// Decode encoded image bytes (PNG, JPEG, ...) and stretch the result to
    /// exactly the canvas dimensions, ignoring aspect ratio.
    pub fn decode(bytes: &[u8], canvas: Canvas) -> TintmixResult<Self> {
        if canvas.width == 0 || canvas.height == 0 {
            return Err(TintmixError::validation("Canvas dimensions must be > 0"));
        }

        let decoded = image::load_from_memory(bytes).context("decode image from memory")?;
        let rgba = if decoded.width() == canvas.width && decoded.height() == canvas.height {
            decoded.to_rgba8()
        } else {
            decoded
                .resize_exact(
                    canvas.width,
                    canvas.height,
                    image::imageops::FilterType::Triangle,
                )
                .to_rgba8()
        };

        let (width, height) = rgba.dimensions();
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Read a file and decode it onto the canvas.
    pub fn open(path: impl AsRef<Path>, canvas: Canvas) -> TintmixResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image bytes from '{}'", path.display()))?;
        Self::decode(&bytes, canvas)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    pub fn rgba8(&self) -> &[u8] {
        &self.rgba8
    }
}
