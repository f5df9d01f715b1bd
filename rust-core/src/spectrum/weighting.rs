//! Log weighting of pitch-class counts before the transform
//!
//! Counts are compressed with log2(x + 1): zero stays zero and a single
//! occurrence maps to 1.

use crate::score::PITCH_CLASSES;

/// Log-weight one count
pub fn log_weight(count: f64) -> f64 {
    (count + 1.0).log2()
}

/// Log-weight every bin
pub fn log_weight_bins(bins: &[f64; PITCH_CLASSES]) -> [f64; PITCH_CLASSES] {
    bins.map(log_weight)
}

/// Analysis input for a vector: log-weighted or raw counts
pub fn analysis_bins(bins: &[f64; PITCH_CLASSES], log_weighted: bool) -> [f64; PITCH_CLASSES] {
    if log_weighted {
        log_weight_bins(bins)
    } else {
        *bins
    }
}
