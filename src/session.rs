use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    blend::{self, ActiveFilter, CUSTOM_BLEND_NAME},
    command::{Command, CommandOutcome},
    error::{TintmixError, TintmixResult},
    frame::{Canvas, FrameRgba},
    matrix::ColorMatrix,
    registry::FilterRegistry,
    render_cpu,
    source::SourceImage,
};

/// A composing session: the output canvas, the filter registry, the ordered
/// active list, and the immutable source pixels.
///
/// Nothing here is global; one surface owns one `Composer`. Every render
/// recomputes the blended matrix from the active list and applies it to the
/// original source, so edits never stack destructively.
#[derive(Clone, Debug)]
pub struct Composer {
    canvas: Canvas,
    registry: FilterRegistry,
    active: Vec<ActiveFilter>,
    source: Option<SourceImage>,
}

impl Composer {
    /// Session seeded with the built-in filter set.
    pub fn new(canvas: Canvas) -> Self {
        Self::with_registry(canvas, FilterRegistry::with_builtins())
    }

    pub fn with_registry(canvas: Canvas, registry: FilterRegistry) -> Self {
        Self {
            canvas,
            registry,
            active: Vec::new(),
            source: None,
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut FilterRegistry {
        &mut self.registry
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn active_filters(&self) -> &[ActiveFilter] {
        &self.active
    }

    /// Decode encoded image bytes and install them as the session source,
    /// stretched to the canvas.
    ///
    /// The active list is kept across source swaps; the next render applies
    /// it to the new pixels.
    pub fn load_source(&mut self, bytes: &[u8]) -> TintmixResult<()> {
        let source = SourceImage::decode(bytes, self.canvas)?;
        self.set_source(source)
    }

    /// Install pre-decoded source pixels. Dimensions must match the canvas.
    pub fn set_source(&mut self, source: SourceImage) -> TintmixResult<()> {
        if source.canvas() != self.canvas {
            return Err(TintmixError::validation(format!(
                "source is {}x{} but the canvas is {}x{}",
                source.width(),
                source.height(),
                self.canvas.width,
                self.canvas.height
            )));
        }
        tracing::debug!(
            width = source.width(),
            height = source.height(),
            "source installed"
        );
        self.source = Some(source);
        Ok(())
    }

    /// Activate a registered filter at intensity 1.0.
    ///
    /// Duplicates are allowed and independent. The matrix is copied now, so
    /// overwriting `name` in the registry later does not retouch this entry.
    pub fn add_filter(&mut self, name: &str) -> TintmixResult<()> {
        let matrix = *self.registry.get(name)?;
        self.active.push(ActiveFilter::new(name, matrix));
        tracing::debug!(name, active = self.active.len(), "filter added");
        Ok(())
    }

    /// Replace the intensity of the entry at `index`.
    ///
    /// The value is stored as given; only non-finite values and bad indices
    /// are rejected, and rejection leaves the list untouched.
    pub fn set_intensity(&mut self, index: usize, intensity: f32) -> TintmixResult<()> {
        if !intensity.is_finite() {
            return Err(TintmixError::validation("intensity must be finite"));
        }
        let len = self.active.len();
        let entry = self.active.get_mut(index).ok_or_else(|| {
            TintmixError::validation(format!("filter index {index} out of range (len {len})"))
        })?;
        entry.intensity = intensity;
        Ok(())
    }

    /// Deactivate the entry at `index`; later entries shift down one slot.
    pub fn remove_filter(&mut self, index: usize) -> TintmixResult<ActiveFilter> {
        if index >= self.active.len() {
            return Err(TintmixError::validation(format!(
                "filter index {index} out of range (len {})",
                self.active.len()
            )));
        }
        let removed = self.active.remove(index);
        tracing::debug!(name = %removed.name, "filter removed");
        Ok(removed)
    }

    /// Collapse the active list into a single "Custom Blend" entry at
    /// intensity 1.0.
    ///
    /// Needs at least two active entries; on error the list is unchanged.
    /// Weighting follows [`blend::combine_matrix`], where a zero intensity
    /// still counts as a full participant.
    pub fn combine(&mut self) -> TintmixResult<()> {
        let combined = blend::combine_matrix(&self.active)?;
        self.active.clear();
        self.active.push(ActiveFilter {
            name: CUSTOM_BLEND_NAME.to_string(),
            matrix: combined,
            intensity: 1.0,
        });
        tracing::debug!("active filters combined into custom blend");
        Ok(())
    }

    /// Store the current "Custom Blend" matrix in the registry under `name`.
    ///
    /// Fails when no custom blend is active or the name is blank. Overwriting
    /// an existing name, built-ins included, is allowed and silent. The
    /// active list is not modified.
    pub fn save_as_filter(&mut self, name: &str) -> TintmixResult<()> {
        let saved = self
            .active
            .iter()
            .find(|f| f.name == CUSTOM_BLEND_NAME)
            .ok_or_else(|| {
                TintmixError::validation("no custom blend to save; combine filters first")
            })?;
        if name.trim().is_empty() {
            return Err(TintmixError::validation("filter name must be non-empty"));
        }
        self.registry.register_matrix(name, saved.matrix);
        tracing::info!(name, "custom blend saved as filter");
        Ok(())
    }

    /// Clear the active list. The source stays, so the next render shows the
    /// unfiltered original.
    pub fn reset(&mut self) {
        self.active.clear();
    }

    /// The single matrix the active list folds down to, `None` when it
    /// composes to pass-through.
    pub fn composed(&self) -> Option<ColorMatrix> {
        blend::compose(&self.active)
    }

    /// Re-render from the original source. `None` until a source is loaded.
    pub fn render(&self) -> Option<FrameRgba> {
        let source = self.source.as_ref()?;
        Some(render_cpu::render_frame(source, self.composed().as_ref()))
    }
}

/// Cloneable handle that serializes all session access on one lock.
///
/// Registry and active-list mutations stay atomic relative to renders from
/// other threads; there is deliberately no finer-grained locking.
#[derive(Clone)]
pub struct SharedComposer {
    inner: Arc<Mutex<Composer>>,
}

impl SharedComposer {
    pub fn new(composer: Composer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(composer)),
        }
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut Composer) -> R) -> R {
        // A poisoned lock still yields the guard; session ops keep the state
        // consistent even when a panicking caller held it.
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn dispatch(&self, command: Command) -> TintmixResult<CommandOutcome> {
        self.with(|composer| composer.dispatch(command))
    }

    pub fn render(&self) -> Option<FrameRgba> {
        self.with(|composer| composer.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::{GRAYSCALE, SEPIA, WARM};

    fn test_canvas() -> Canvas {
        Canvas::new(2, 2).unwrap()
    }

    fn test_pixels() -> Vec<u8> {
        vec![
            10, 20, 30, 255, //
            200, 150, 100, 128, //
            0, 0, 0, 0, //
            255, 255, 255, 255,
        ]
    }

    fn session_with_source() -> Composer {
        let mut composer = Composer::new(test_canvas());
        let source = SourceImage::from_rgba8(2, 2, test_pixels()).unwrap();
        composer.set_source(source).unwrap();
        composer
    }

    #[test]
    fn render_without_source_is_a_no_op() {
        let composer = Composer::new(test_canvas());
        assert!(composer.render().is_none());
    }

    #[test]
    fn set_source_rejects_canvas_mismatch() {
        let mut composer = Composer::new(test_canvas());
        let wrong = SourceImage::from_rgba8(1, 1, vec![0, 0, 0, 0]).unwrap();
        let err = composer.set_source(wrong).unwrap_err();
        assert!(err.to_string().contains("1x1"));
        assert!(composer.source().is_none());
    }

    #[test]
    fn add_filter_copies_the_matrix_at_activation_time() {
        let mut composer = session_with_source();
        composer.add_filter("Grayscale").unwrap();

        composer
            .registry_mut()
            .register_matrix("Grayscale", ColorMatrix::IDENTITY);

        assert_eq!(composer.active_filters()[0].matrix, GRAYSCALE);
        assert_eq!(composer.active_filters()[0].intensity, 1.0);
    }

    #[test]
    fn add_unknown_filter_is_a_registry_error() {
        let mut composer = session_with_source();
        assert!(matches!(
            composer.add_filter("Solarize"),
            Err(TintmixError::Registry(_))
        ));
        assert!(composer.active_filters().is_empty());
    }

    #[test]
    fn duplicate_activations_are_independent() {
        let mut composer = session_with_source();
        composer.add_filter("Sepia").unwrap();
        composer.add_filter("Sepia").unwrap();
        composer.set_intensity(0, 0.2).unwrap();

        assert_eq!(composer.active_filters()[0].intensity, 0.2);
        assert_eq!(composer.active_filters()[1].intensity, 1.0);
    }

    #[test]
    fn set_intensity_validates_index_and_value() {
        let mut composer = session_with_source();
        composer.add_filter("Warm").unwrap();

        assert!(composer.set_intensity(1, 0.5).is_err());
        assert!(composer.set_intensity(0, f32::NAN).is_err());
        assert!(composer.set_intensity(0, f32::INFINITY).is_err());
        assert_eq!(composer.active_filters()[0].intensity, 1.0);

        composer.set_intensity(0, 1.7).unwrap();
        assert_eq!(composer.active_filters()[0].intensity, 1.7);
    }

    #[test]
    fn remove_shifts_later_indices_down() {
        let mut composer = session_with_source();
        composer.add_filter("Grayscale").unwrap();
        composer.add_filter("Sepia").unwrap();

        let removed = composer.remove_filter(0).unwrap();
        assert_eq!(removed.name, "Grayscale");

        composer.set_intensity(0, 0.4).unwrap();
        assert_eq!(composer.active_filters()[0].name, "Sepia");
        assert_eq!(composer.active_filters()[0].intensity, 0.4);
    }

    #[test]
    fn remove_out_of_range_leaves_state_alone() {
        let mut composer = session_with_source();
        composer.add_filter("Cool").unwrap();
        assert!(composer.remove_filter(1).is_err());
        assert_eq!(composer.active_filters().len(), 1);
    }

    #[test]
    fn combine_replaces_the_list_with_a_custom_blend() {
        let mut composer = session_with_source();
        composer.add_filter("Grayscale").unwrap();
        composer.add_filter("Sepia").unwrap();

        composer.combine().unwrap();

        let active = composer.active_filters();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, CUSTOM_BLEND_NAME);
        assert_eq!(active[0].intensity, 1.0);

        let expected = blend::compose(&[
            ActiveFilter::new("Grayscale", GRAYSCALE),
            ActiveFilter::new("Sepia", SEPIA),
        ])
        .unwrap();
        assert_eq!(active[0].matrix, expected);
    }

    #[test]
    fn combine_with_one_filter_fails_and_changes_nothing() {
        let mut composer = session_with_source();
        composer.add_filter("Warm").unwrap();

        assert!(composer.combine().is_err());
        assert_eq!(composer.active_filters().len(), 1);
        assert_eq!(composer.active_filters()[0].name, "Warm");
    }

    #[test]
    fn save_requires_a_custom_blend() {
        let mut composer = session_with_source();
        composer.add_filter("Warm").unwrap();

        let err = composer.save_as_filter("Evening").unwrap_err();
        assert!(err.to_string().contains("no custom blend"));
        assert!(!composer.registry().contains("Evening"));
    }

    #[test]
    fn save_rejects_blank_names() {
        let mut composer = session_with_source();
        composer.add_filter("Warm").unwrap();
        composer.add_filter("Contrast").unwrap();
        composer.combine().unwrap();

        assert!(composer.save_as_filter("").is_err());
        assert!(composer.save_as_filter("   ").is_err());
    }

    #[test]
    fn save_checks_for_a_blend_before_the_name() {
        let mut composer = session_with_source();
        composer.add_filter("Warm").unwrap();

        // With no blend and a blank name, the missing blend is reported.
        let err = composer.save_as_filter("").unwrap_err();
        assert!(err.to_string().contains("no custom blend"));
    }

    #[test]
    fn save_registers_the_blend_and_keeps_the_active_list() {
        let mut composer = session_with_source();
        composer.add_filter("Warm").unwrap();
        composer.add_filter("Contrast").unwrap();
        composer.combine().unwrap();
        let blend_matrix = composer.active_filters()[0].matrix;

        composer.save_as_filter("Evening").unwrap();

        assert_eq!(*composer.registry().get("Evening").unwrap(), blend_matrix);
        assert_eq!(composer.active_filters().len(), 1);
        assert_eq!(composer.active_filters()[0].name, CUSTOM_BLEND_NAME);
    }

    #[test]
    fn saving_over_a_builtin_changes_what_add_activates() {
        let mut composer = session_with_source();
        composer.add_filter("Grayscale").unwrap();
        composer.add_filter("Sepia").unwrap();
        composer.combine().unwrap();
        let blend_matrix = composer.active_filters()[0].matrix;

        composer.save_as_filter("Grayscale").unwrap();
        composer.reset();
        composer.add_filter("Grayscale").unwrap();

        assert_eq!(composer.active_filters()[0].matrix, blend_matrix);
        assert_ne!(composer.active_filters()[0].matrix, GRAYSCALE);
    }

    #[test]
    fn reset_then_render_reproduces_the_source() {
        let mut composer = session_with_source();
        composer.add_filter("Invert").unwrap();
        let filtered = composer.render().unwrap();
        assert_ne!(filtered.data, test_pixels());

        composer.reset();
        let frame = composer.render().unwrap();
        assert_eq!(frame.data, test_pixels());
    }

    #[test]
    fn render_applies_the_composed_blend() {
        let mut composer = session_with_source();
        composer.add_filter("Warm").unwrap();
        composer.set_intensity(0, 2.0).unwrap();

        // One positively weighted entry composes to its own matrix.
        assert_eq!(composer.composed(), Some(WARM));

        let frame = composer.render().unwrap();
        // First pixel: (10, 20, 30) through Warm.
        assert_eq!(frame.data[0], 22); // 10*1.2 + 10
        assert_eq!(frame.data[1], 22); // 20*1.1
        assert_eq!(frame.data[2], 27); // 30*0.9
        assert_eq!(frame.data[3], 255);
    }

    #[test]
    fn zero_total_weight_renders_pass_through() {
        let mut composer = session_with_source();
        composer.add_filter("Invert").unwrap();
        composer.set_intensity(0, 0.0).unwrap();

        assert_eq!(composer.composed(), None);
        assert_eq!(composer.render().unwrap().data, test_pixels());
    }

    #[test]
    fn new_source_keeps_the_active_list() {
        let mut composer = session_with_source();
        composer.add_filter("Sepia").unwrap();

        let replacement = SourceImage::from_rgba8(2, 2, vec![50; 16]).unwrap();
        composer.set_source(replacement).unwrap();

        assert_eq!(composer.active_filters().len(), 1);
        let frame = composer.render().unwrap();
        assert_ne!(frame.data, vec![50; 16]);
    }

    #[test]
    fn shared_handle_clones_see_the_same_state() {
        let shared = SharedComposer::new(session_with_source());
        let other = shared.clone();

        shared.with(|c| c.add_filter("Cool")).unwrap();
        assert_eq!(other.with(|c| c.active_filters().len()), 1);

        other.with(|c| c.reset());
        assert_eq!(shared.with(|c| c.active_filters().len()), 0);
    }
}
