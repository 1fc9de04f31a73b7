use crate::domain::error::DomainError;
use crate::domain::values::flavor_preset::FlavorPreset;
use crate::domain::values::flavor_vector::{FlavorDimension, FlavorVector};

/// Keeps a valid flavor profile under slider and preset edits. Purely
/// local; nothing here talks to the network.
#[derive(Debug, Clone, Default)]
pub struct FlavorProfileEditor {
    vector: FlavorVector,
}

impl FlavorProfileEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vector(&self) -> FlavorVector {
        self.vector
    }

    pub fn get(&self, dim: FlavorDimension) -> f64 {
        self.vector.get(dim)
    }

    pub fn apply_preset(&mut self, preset: FlavorPreset) {
        self.vector = preset.vector();
    }

    pub fn apply_preset_named(&mut self, name: &str) -> Result<FlavorPreset, DomainError> {
        let preset: FlavorPreset = name.parse().map_err(DomainError::Validation)?;
        self.apply_preset(preset);
        Ok(preset)
    }

    /// Parses `raw` and writes it to one axis. Non-numeric or out-of-range
    /// input is rejected and the old value stays; nothing is clamped.
    pub fn set_dimension(&mut self, dim: FlavorDimension, raw: &str) -> Result<f64, DomainError> {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| DomainError::Validation(format!("Not a number for {dim}: {raw:?}")))?;
        self.vector = self
            .vector
            .with_dimension(dim, value)
            .map_err(DomainError::Validation)?;
        Ok(value)
    }

    pub fn set_dimension_by_key(&mut self, key: &str, raw: &str) -> Result<f64, DomainError> {
        let dim: FlavorDimension = key.parse().map_err(DomainError::Validation)?;
        self.set_dimension(dim, raw)
    }

    pub fn reset(&mut self) {
        self.vector = FlavorVector::default();
    }
}
