//! Weighted color-matrix image filtering.
//!
//! tintmix turns a list of named filters, each a fixed 4x5 color matrix with
//! an adjustable intensity, into pixels:
//!
//! 1. **Register**: named [`ColorMatrix`] definitions live in a
//!    [`FilterRegistry`], seeded with seven built-ins and extendable at
//!    runtime by saving custom blends.
//! 2. **Compose**: the active list folds into one matrix by an
//!    intensity-weighted elementwise mean ([`compose`]), or to pass-through
//!    when nothing carries weight.
//! 3. **Render**: the composed matrix is applied per pixel to the immutable
//!    source ([`render_frame`]); alpha always passes through.
//!
//! A [`Composer`] session owns all of that state and exposes the list
//! operations (add, set intensity, remove, combine, save, reset) plus a
//! [`Command`] dispatch surface for UI layers. [`SharedComposer`] wraps a
//! session in a single lock for concurrent callers.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Non-destructive**: every render starts from the original source
//!   pixels; filters are never applied cumulatively.
//! - **Straight RGBA8**: buffers are tightly packed and non-premultiplied,
//!   with channel math in 0..=255 space and saturating quantization.
#![forbid(unsafe_code)]

mod blend;
mod command;
mod error;
mod filters;
mod frame;
mod matrix;
mod registry;
mod render_cpu;
mod session;
mod source;

pub use blend::{ActiveFilter, CUSTOM_BLEND_NAME, combine_matrix, compose};
pub use command::{Command, CommandOutcome};
pub use error::{TintmixError, TintmixResult};
pub use filters::{
    BRIGHTEN, CONTRAST, COOL, GRAYSCALE, INVERT, SEPIA, WARM, builtin_filters,
};
pub use frame::{Canvas, FrameRgba};
pub use matrix::ColorMatrix;
pub use registry::FilterRegistry;
pub use render_cpu::{apply_matrix_in_place, render_frame};
pub use session::{Composer, SharedComposer};
pub use source::SourceImage;
