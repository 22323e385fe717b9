use crate::error::{TintmixError, TintmixResult};

/// Row-major 4x5 color transform over straight RGBA8 pixels.
///
/// Each row `[cR, cG, cB, cA, offset]` produces one output channel as
/// `cR*r + cG*g + cB*b + cA*a + offset`, with channel values and offsets in
/// 0..=255 space. Indices 4, 9, 14, 19 are the additive offsets. The alpha
/// column (indices 3, 8, 13) and the alpha row (indices 15..=19) are carried
/// in the data model but never applied by the renderer; alpha always passes
/// through.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorMatrix([f32; 20]);

impl ColorMatrix {
    /// Coefficient count every matrix must have.
    pub const COEFF_COUNT: usize = 20;

    /// The no-op transform.
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]);

    pub const fn new(coeffs: [f32; 20]) -> Self {
        Self(coeffs)
    }

    /// Build from a runtime slice; anything but exactly 20 coefficients is
    /// rejected. Coefficient values themselves are not validated.
    pub fn from_slice(coeffs: &[f32]) -> TintmixResult<Self> {
        let coeffs: [f32; 20] = coeffs.try_into().map_err(|_| {
            TintmixError::validation(format!(
                "color matrix needs exactly {} coefficients, got {}",
                Self::COEFF_COUNT,
                coeffs.len()
            ))
        })?;
        Ok(Self(coeffs))
    }

    pub fn coeffs(&self) -> &[f32; 20] {
        &self.0
    }
}
