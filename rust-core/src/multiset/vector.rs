//! 12-bin pitch-class multiset vector

use crate::error::{AnalysisError, Result};
use crate::score::{NoteLike, PITCH_CLASSES};
use super::strategy::CountingStrategy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pitch-class counts of one window, index = pitch class
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PitchClassVector {
    bins: [f64; PITCH_CLASSES],
}

impl PitchClassVector {
    pub fn zeros() -> Self {
        Self::default()
    }

    pub fn from_bins(bins: [f64; PITCH_CLASSES]) -> Self {
        Self { bins }
    }

    /// Build from an untyped slice, which must hold exactly 12 bins
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        let bins: [f64; PITCH_CLASSES] = values
            .try_into()
            .map_err(|_| AnalysisError::UndefinedSpectrum { len: values.len() })?;
        Ok(Self { bins })
    }

    /// Count every constituent of `event` under `strategy`
    pub fn add<E: NoteLike + ?Sized>(&mut self, event: &E, strategy: CountingStrategy) {
        for (pitch_class, quarter_length) in event.constituents() {
            strategy.update(&mut self.bins[pitch_class.index()], quarter_length);
        }
    }

    pub fn bins(&self) -> &[f64; PITCH_CLASSES] {
        &self.bins
    }

    pub fn sum(&self) -> f64 {
        self.bins.iter().sum()
    }

    /// Bins rounded to `decimals` places, for display
    pub fn rounded(&self, decimals: i32) -> [f64; PITCH_CLASSES] {
        round_bins(&self.bins, decimals)
    }
}

pub(crate) fn round_bins(bins: &[f64; PITCH_CLASSES], decimals: i32) -> [f64; PITCH_CLASSES] {
    let scale = 10f64.powi(decimals);
    bins.map(|b| (b * scale).round() / scale)
}

impl fmt::Display for PitchClassVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?}>", self.rounded(2))
    }
}
