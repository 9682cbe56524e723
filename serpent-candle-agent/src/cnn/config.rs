use anyhow::Result;
use serde::{Deserialize, Serialize};
use serpent_core::error::SerpentError;

#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
/// Configuration of [`Cnn`](super::Cnn) and [`DuelingCnn`](super::DuelingCnn).
pub struct CnnConfig {
    /// Side length of the input observation.
    pub size_resize: usize,

    /// Widths of the hidden fully connected layers.
    pub units: Vec<usize>,

    /// Number of actions.
    pub out_dim: usize,
}

impl Default for CnnConfig {
    fn default() -> Self {
        Self {
            size_resize: 12,
            units: vec![128, 128, 128],
            out_dim: 4,
        }
    }
}

impl CnnConfig {
    /// Sets the side length of the input observation.
    pub fn size_resize(mut self, v: usize) -> Self {
        self.size_resize = v;
        self
    }

    /// Sets the widths of the hidden layers.
    pub fn units(mut self, v: Vec<usize>) -> Self {
        self.units = v;
        self
    }

    /// Sets the number of actions.
    pub fn out_dim(mut self, v: usize) -> Self {
        self.out_dim = v;
        self
    }

    /// Length of the flattened output of the feature extractor.
    ///
    /// Fails if the observation is too small to survive the convolutions.
    pub fn feature_dim(&self) -> Result<usize> {
        let side = self
            .size_resize
            .checked_sub(6)
            .map(|s| s / 2)
            .and_then(|s| s.checked_sub(2))
            .filter(|&s| s > 0)
            .ok_or_else(|| {
                SerpentError::Configuration(format!(
                    "observation of size {} is too small for the network, the minimum is 12",
                    self.size_resize
                ))
            })?;
        Ok(64 * side * side)
    }
}
