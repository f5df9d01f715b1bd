//! DFT engine using realfft for real-valued vectors
//!
//! Pitch-class vectors are real, so only bins 0..=N/2 are computed; the
//! upper half is filled in by conjugate symmetry when the full spectrum
//! is requested.

use crate::error::{AnalysisError, Result};
use num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// DFT engine for real-valued vectors of a fixed length
pub struct FftEngine {
    /// Transform size (number of input values)
    fft_size: usize,

    /// Real FFT processor
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Reusable input buffer
    input_buffer: Vec<f64>,

    /// Reusable output buffer (bins 0..=fft_size/2)
    output_buffer: Vec<Complex<f64>>,
}

impl FftEngine {
    /// Create new DFT engine
    ///
    /// # Arguments
    /// * `fft_size` - Transform size (number of input values)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(fft_size);

        let input_buffer = r2c.make_input_vec();
        let output_buffer = r2c.make_output_vec();

        Self {
            fft_size,
            r2c,
            input_buffer,
            output_buffer,
        }
    }

    /// Compute the non-redundant half spectrum X[0..=N/2]
    ///
    /// # Arguments
    /// * `signal` - Input values; must be exactly `fft_size` long
    pub fn compute_half_spectrum(&mut self, signal: &[f64]) -> Result<&[Complex<f64>]> {
        if signal.len() != self.fft_size {
            return Err(AnalysisError::UndefinedSpectrum { len: signal.len() });
        }

        // Input buffer is used as scratch by realfft, refill every call
        self.input_buffer.copy_from_slice(signal);
        self.r2c
            .process(&mut self.input_buffer, &mut self.output_buffer)
            .map_err(|_| AnalysisError::UndefinedSpectrum { len: signal.len() })?;

        Ok(&self.output_buffer)
    }

    /// Compute the full N-point spectrum X[0..N]
    pub fn compute_spectrum(&mut self, signal: &[f64]) -> Result<Vec<Complex<f64>>> {
        let n = self.fft_size;
        let half = self.compute_half_spectrum(signal)?;

        let mut spectrum = Vec::with_capacity(n);
        spectrum.extend_from_slice(half);
        for k in half.len()..n {
            spectrum.push(half[n - k].conj());
        }

        Ok(spectrum)
    }
}
