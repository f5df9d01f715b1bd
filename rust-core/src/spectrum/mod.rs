//! Spectral analysis of pitch-class vectors with a 12-point DFT

pub mod analysis;
pub mod fft;
pub mod quantize;
pub mod weighting;

pub use analysis::{harmonic_index, AnalyzerConfig, SpectralResult, SpectrumAnalyzer, HARMONICS};
pub use fft::FftEngine;
pub use quantize::{PhaseQuantizer, DEFAULT_QUANTIZATION_NODES};
pub use weighting::{analysis_bins, log_weight, log_weight_bins};
