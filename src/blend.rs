use crate::{
    error::{TintmixError, TintmixResult},
    matrix::ColorMatrix,
};

/// Name of the single entry that `combine` leaves behind, and the entry
/// `save_as_filter` looks for.
pub const CUSTOM_BLEND_NAME: &str = "Custom Blend";

/// One entry in a session's active list.
///
/// The matrix is a copy taken from the registry at activation time, so
/// overwriting that name later leaves existing entries alone.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ActiveFilter {
    pub name: String,
    pub matrix: ColorMatrix,
    pub intensity: f32,
}

impl ActiveFilter {
    /// Entry at the default intensity of 1.0.
    pub fn new(name: impl Into<String>, matrix: ColorMatrix) -> Self {
        Self {
            name: name.into(),
            matrix,
            intensity: 1.0,
        }
    }
}

/// Fold the active list into one matrix by intensity-weighted elementwise
/// mean.
///
/// Each entry weighs `max(intensity, 0)`: negative and NaN intensities
/// contribute nothing. Returns `None` when the list is empty or no entry
/// carries positive weight; callers must treat that as pass-through rather
/// than dividing by the zero total.
pub fn compose(filters: &[ActiveFilter]) -> Option<ColorMatrix> {
    weighted_mean(filters.iter().map(|f| (f, f.intensity.max(0.0))))
}

/// Weighted mean backing the combine operation.
///
/// Weights are the raw intensities, except 0.0 and NaN fall back to 1.0: a
/// zeroed slider still counts as a full participant here, unlike in
/// [`compose`]. Needs at least two entries, and the weights must sum to a
/// positive total (only negative intensities can break that).
pub fn combine_matrix(filters: &[ActiveFilter]) -> TintmixResult<ColorMatrix> {
    if filters.len() < 2 {
        return Err(TintmixError::validation(
            "need at least 2 active filters to combine",
        ));
    }

    let entries = filters.iter().map(|f| {
        let w = f.intensity;
        if w == 0.0 || w.is_nan() {
            (f, 1.0)
        } else {
            (f, w)
        }
    });
    weighted_mean(entries).ok_or_else(|| {
        TintmixError::validation("combine weights must sum to a positive total")
    })
}

fn weighted_mean<'a, I>(entries: I) -> Option<ColorMatrix>
where
    I: Iterator<Item = (&'a ActiveFilter, f32)>,
{
    let mut acc = [0.0f32; 20];
    let mut total = 0.0f32;

    for (filter, weight) in entries {
        if weight == 0.0 {
            continue;
        }
        total += weight;
        for (slot, coeff) in acc.iter_mut().zip(filter.matrix.coeffs()) {
            *slot += coeff * weight;
        }
    }

    if !(total > 0.0) {
        return None;
    }
    for slot in &mut acc {
        *slot /= total;
    }
    Some(ColorMatrix::new(acc))
}
