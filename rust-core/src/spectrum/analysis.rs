//! Spectral analysis of pitch-class windows
//!
//! Combines optional log weighting, the 12-point DFT and phase
//! quantization. Only harmonics 1..=6 are reported: bin 0 is the DC term
//! and bins 7..=11 mirror 5..=1 for real input.

use super::fft::FftEngine;
use super::quantize::{wrap_degrees, PhaseQuantizer};
use super::weighting::analysis_bins;
use crate::error::Result;
use crate::multiset::{PitchClassVector, WindowResult};
use crate::score::PITCH_CLASSES;
use num_complex::Complex;
use serde::{Deserialize, Serialize};

/// Number of reported harmonics (f1..f6)
pub const HARMONICS: usize = PITCH_CLASSES / 2;

/// Relative floor for vanishing bins
///
/// Bins below `ZERO_MAGNITUDE * max(|X[0]|, 1)` are treated as zero, with
/// phase 0. Round-off grows with the total count, so the floor follows
/// the DC term.
pub const ZERO_MAGNITUDE: f64 = 1e-9;

/// Spectrum of one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralResult {
    /// Input to the transform (log-weighted or raw counts)
    pub analyzed: [f64; PITCH_CLASSES],

    /// Full 12-bin complex spectrum, index 0 = DC
    #[serde(skip)]
    pub spectrum: Vec<Complex<f64>>,

    /// |X[k]| for k = 1..=6
    pub magnitudes: [f64; HARMONICS],

    /// arg X[k] in degrees, in (-180, 180], for k = 1..=6
    pub phases: [f64; HARMONICS],

    /// Phases snapped to the quantizer's nodes
    pub quantized_phases: [f64; HARMONICS],
}

impl SpectralResult {
    /// Magnitude of harmonic `k` (1..=6)
    pub fn magnitude(&self, harmonic: usize) -> Option<f64> {
        harmonic_index(harmonic).map(|i| self.magnitudes[i])
    }

    /// Phase of harmonic `k` (1..=6) in degrees
    pub fn phase(&self, harmonic: usize) -> Option<f64> {
        harmonic_index(harmonic).map(|i| self.phases[i])
    }

    /// Quantized phase of harmonic `k` (1..=6) in degrees
    pub fn quantized_phase(&self, harmonic: usize) -> Option<f64> {
        harmonic_index(harmonic).map(|i| self.quantized_phases[i])
    }
}

/// Map harmonic number 1..=6 to an array index
pub fn harmonic_index(harmonic: usize) -> Option<usize> {
    (1..=HARMONICS).contains(&harmonic).then(|| harmonic - 1)
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerConfig {
    /// Nodes around the circle for phase quantization
    pub quantization_nodes: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            quantization_nodes: super::quantize::DEFAULT_QUANTIZATION_NODES,
        }
    }
}

/// Pitch-class spectrum analyzer
///
/// Holds reusable DFT buffers, so one analyzer serves one thread.
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft_engine: FftEngine,
    quantizer: PhaseQuantizer,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        let quantizer = PhaseQuantizer::new(config.quantization_nodes)?;
        Ok(Self::with_quantizer(quantizer))
    }

    /// Create analyzer around an already validated quantizer
    pub fn with_quantizer(quantizer: PhaseQuantizer) -> Self {
        Self {
            config: AnalyzerConfig {
                quantization_nodes: quantizer.nodes(),
            },
            fft_engine: FftEngine::new(PITCH_CLASSES),
            quantizer,
        }
    }

    /// Analyze one window, honouring its log-weighting flag
    pub fn analyze(&mut self, window: &WindowResult) -> Result<SpectralResult> {
        self.analyze_vector(window.vector(), window.log_weighted())
    }

    /// Analyze a pitch-class vector
    pub fn analyze_vector(
        &mut self,
        vector: &PitchClassVector,
        log_weighted: bool,
    ) -> Result<SpectralResult> {
        let analyzed = analysis_bins(vector.bins(), log_weighted);
        let spectrum = self.fft_engine.compute_spectrum(&analyzed)?;

        let mut magnitudes = [0.0; HARMONICS];
        let mut phases = [0.0; HARMONICS];
        let mut quantized_phases = [0.0; HARMONICS];

        let floor = ZERO_MAGNITUDE * spectrum[0].norm().max(1.0);
        for (i, bin) in spectrum[1..=HARMONICS].iter().enumerate() {
            let (magnitude, phase) = polar_degrees(*bin, floor);
            magnitudes[i] = magnitude;
            phases[i] = phase;
            quantized_phases[i] = self.quantizer.quantize(phase);
        }

        Ok(SpectralResult {
            analyzed,
            spectrum,
            magnitudes,
            phases,
            quantized_phases,
        })
    }

    /// Analyze raw bins; fails unless exactly 12 values are given
    pub fn analyze_slice(&mut self, values: &[f64], log_weighted: bool) -> Result<SpectralResult> {
        let vector = PitchClassVector::from_slice(values)?;
        self.analyze_vector(&vector, log_weighted)
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn quantizer(&self) -> &PhaseQuantizer {
        &self.quantizer
    }
}

/// Modulus and argument in degrees of one bin
///
/// Bins under `floor` report (0, 0); the argument is wrapped into (-180, 180].
fn polar_degrees(bin: Complex<f64>, floor: f64) -> (f64, f64) {
    let magnitude = bin.norm();
    if magnitude < floor {
        return (0.0, 0.0);
    }
    (magnitude, wrap_degrees(bin.arg().to_degrees()))
}
