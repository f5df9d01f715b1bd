//! Beat grid: ordered beat boundaries of a score in quarter lengths

use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Strictly increasing beat offsets starting at 0
///
/// The last entry is the score's final beat boundary, so a grid of
/// `n` offsets spans `n - 1` beats.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeatGrid {
    offsets: Vec<f64>,
}

impl BeatGrid {
    /// Validate and wrap a sequence of beat offsets
    pub fn new(offsets: Vec<f64>) -> Result<Self> {
        match offsets.first() {
            None => return Err(AnalysisError::InvalidBeatGrid("grid is empty".into())),
            Some(&first) if first != 0.0 => {
                return Err(AnalysisError::InvalidBeatGrid(format!(
                    "grid must start at 0 (starts at {})",
                    first
                )))
            }
            _ => {}
        }

        if let Some(pair) = offsets.windows(2).find(|pair| pair[1] <= pair[0] || pair[1].is_nan()) {
            return Err(AnalysisError::InvalidBeatGrid(format!(
                "offsets must be strictly increasing ({} followed by {})",
                pair[0], pair[1]
            )));
        }

        Ok(Self { offsets })
    }

    /// Evenly spaced grid of `beats` one-quarter beats: [0, 1, ..., beats]
    pub fn uniform(beats: usize) -> Self {
        Self {
            offsets: (0..=beats).map(|b| b as f64).collect(),
        }
    }

    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Final beat boundary
    pub fn last(&self) -> f64 {
        self.offsets[self.offsets.len() - 1]
    }

    /// Number of windows of `window_size` beats that fit on this grid
    pub fn window_count(&self, window_size: usize) -> usize {
        self.offsets.len().saturating_sub(window_size)
    }
}
