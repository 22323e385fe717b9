use crate::matrix::ColorMatrix;

/// Even channel mix; every output channel becomes the same weighted sum.
pub const GRAYSCALE: ColorMatrix = ColorMatrix::new([
    0.33, 0.34, 0.33, 0.0, 0.0, //
    0.33, 0.34, 0.33, 0.0, 0.0, //
    0.33, 0.34, 0.33, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

/// Classic warm brown remap.
pub const SEPIA: ColorMatrix = ColorMatrix::new([
    0.393, 0.769, 0.189, 0.0, 0.0, //
    0.349, 0.686, 0.168, 0.0, 0.0, //
    0.272, 0.534, 0.131, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

/// Negates every color channel around the 255 offset.
pub const INVERT: ColorMatrix = ColorMatrix::new([
    -1.0, 0.0, 0.0, 0.0, 255.0, //
    0.0, -1.0, 0.0, 0.0, 255.0, //
    0.0, 0.0, -1.0, 0.0, 255.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

/// Multiplicative gain plus a flat lift on all channels.
pub const BRIGHTEN: ColorMatrix = ColorMatrix::new([
    1.2, 0.0, 0.0, 0.0, 20.0, //
    0.0, 1.2, 0.0, 0.0, 20.0, //
    0.0, 0.0, 1.2, 0.0, 20.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

/// Steepens the channel slope around a darkened midpoint.
pub const CONTRAST: ColorMatrix = ColorMatrix::new([
    1.5, 0.0, 0.0, 0.0, -40.0, //
    0.0, 1.5, 0.0, 0.0, -40.0, //
    0.0, 0.0, 1.5, 0.0, -40.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

/// Blue boost for a colder cast.
pub const COOL: ColorMatrix = ColorMatrix::new([
    1.0, 0.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, 0.0, //
    0.0, 0.0, 1.3, 0.0, 10.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

/// Red/green boost and blue cut for a warmer cast.
pub const WARM: ColorMatrix = ColorMatrix::new([
    1.2, 0.0, 0.0, 0.0, 10.0, //
    0.0, 1.1, 0.0, 0.0, 0.0, //
    0.0, 0.0, 0.9, 0.0, 0.0, //
    0.0, 0.0, 0.0, 1.0, 0.0,
]);

/// Built-in filters in their canonical registration order.
pub fn builtin_filters() -> [(&'static str, ColorMatrix); 7] {
    [
        ("Grayscale", GRAYSCALE),
        ("Sepia", SEPIA),
        ("Invert", INVERT),
        ("Brighten", BRIGHTEN),
        ("Contrast", CONTRAST),
        ("Cool", COOL),
        ("Warm", WARM),
    ]
}
