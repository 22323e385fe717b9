use std::collections::HashMap;

use crate::{
    error::{TintmixError, TintmixResult},
    filters,
    matrix::ColorMatrix,
};

/// Named filter definitions, iterated in first-insertion order.
///
/// Registering an existing name replaces its matrix in place and keeps its
/// position in [`FilterRegistry::names`]; entries active in a session are
/// unaffected because they copied the matrix at activation time.
#[derive(Clone, Debug, Default)]
pub struct FilterRegistry {
    matrices: HashMap<String, ColorMatrix>,
    order: Vec<String>,
}

impl FilterRegistry {
    /// Registry with no definitions at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry seeded with the seven built-in filters.
    pub fn with_builtins() -> Self {
        let mut registry = Self::default();
        for (name, matrix) in filters::builtin_filters() {
            registry.insert(name.to_string(), matrix);
        }
        registry
    }

    /// Insert or overwrite a definition from raw coefficients.
    ///
    /// The slice must hold exactly 20 values; nothing else about them is
    /// checked.
    pub fn register(&mut self, name: impl Into<String>, coeffs: &[f32]) -> TintmixResult<()> {
        let matrix = ColorMatrix::from_slice(coeffs)?;
        self.insert(name.into(), matrix);
        Ok(())
    }

    /// Insert or overwrite an already-built matrix.
    pub fn register_matrix(&mut self, name: impl Into<String>, matrix: ColorMatrix) {
        self.insert(name.into(), matrix);
    }

    pub fn get(&self, name: &str) -> TintmixResult<&ColorMatrix> {
        self.matrices
            .get(name)
            .ok_or_else(|| TintmixError::registry(format!("unknown filter '{name}'")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.matrices.contains_key(name)
    }

    /// Registered names in first-insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn insert(&mut self, name: String, matrix: ColorMatrix) {
        if self.matrices.insert(name.clone(), matrix).is_none() {
            self.order.push(name);
        }
    }
}
