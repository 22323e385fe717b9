use crate::{
    error::{TintmixError, TintmixResult},
    frame::FrameRgba,
    matrix::ColorMatrix,
    source::SourceImage,
};

/// Apply `matrix` to every pixel of a tightly packed straight-alpha RGBA8
/// buffer.
///
/// Channel math runs in f32 over 0..=255 values. Each result is rounded to
/// the nearest integer and saturated to [0, 255], the behavior of a
/// `Uint8ClampedArray` store. The alpha byte of every pixel is left
/// untouched, and the matrix's alpha column is never read.
pub fn apply_matrix_in_place(rgba: &mut [u8], matrix: &ColorMatrix) -> TintmixResult<()> {
    if !rgba.len().is_multiple_of(4) {
        return Err(TintmixError::render(
            "apply_matrix_in_place expects a tightly packed rgba8 buffer",
        ));
    }
    transform_pixels(rgba, matrix);
    Ok(())
}

/// Render the source through an optional composed matrix.
///
/// `None` is the pass-through case: the output is a byte-exact copy of the
/// source. The source itself is never written to.
#[tracing::instrument(skip(source, blend))]
pub fn render_frame(source: &SourceImage, blend: Option<&ColorMatrix>) -> FrameRgba {
    let mut data = source.rgba8().to_vec();
    if let Some(matrix) = blend {
        transform_pixels(&mut data, matrix);
    }
    FrameRgba {
        width: source.width(),
        height: source.height(),
        data,
    }
}

fn transform_pixels(rgba: &mut [u8], matrix: &ColorMatrix) {
    let m = matrix.coeffs();
    for px in rgba.chunks_exact_mut(4) {
        let r = f32::from(px[0]);
        let g = f32::from(px[1]);
        let b = f32::from(px[2]);

        px[0] = quantize(r * m[0] + g * m[1] + b * m[2] + m[4]);
        px[1] = quantize(r * m[5] + g * m[6] + b * m[7] + m[9]);
        px[2] = quantize(r * m[10] + g * m[11] + b * m[12] + m[14]);
    }
}

fn quantize(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
