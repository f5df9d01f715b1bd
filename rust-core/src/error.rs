//! Error types for pitch-class spectrum analysis

use thiserror::Error;

/// Errors raised while building windows or analyzing their spectra
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Unknown counting strategy '{0}' (expected Onset, Duration or Flat)")]
    InvalidStrategy(String),

    #[error("Spectrum undefined for a vector of length {len} (expected 12)")]
    UndefinedSpectrum { len: usize },

    #[error("Window size must be at least one beat (got {0})")]
    InvalidWindowSize(usize),

    #[error("Quantization needs at least one node (got {0})")]
    InvalidQuantization(usize),

    #[error("Invalid beat grid: {0}")]
    InvalidBeatGrid(String),

    #[error("Invalid excerpt: measures {start}..{end}")]
    InvalidExcerpt { start: i64, end: i64 },

    #[error("Pitch class {0} is outside 0..=11")]
    InvalidPitchClass(i64),

    #[error("Invalid note event: {0}")]
    InvalidEvent(String),

    #[error("Invalid time signature: {0}")]
    InvalidTimeSignature(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, AnalysisError>;
