//! Analysis table: one row per window, in window order

use super::labels::{array_label, measure_range_label};
use crate::error::{AnalysisError, Result};
use crate::multiset::{MeasureRange, WindowResult};
use crate::score::PITCH_CLASSES;
use crate::spectrum::{
    harmonic_index, log_weight_bins, AnalyzerConfig, PhaseQuantizer, SpectralResult,
    SpectrumAnalyzer, HARMONICS,
};
use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One analyzed window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    /// 1-based position in the window sequence
    pub window_number: usize,

    /// Raw pitch-class counts
    pub original: [f64; PITCH_CLASSES],

    /// log2(count + 1) of every bin
    pub weighted: [f64; PITCH_CLASSES],

    pub measure_range: MeasureRange,

    /// f1..f6
    pub magnitudes: [f64; HARMONICS],
    pub phases: [f64; HARMONICS],
    pub quantized_phases: [f64; HARMONICS],
}

impl AnalysisRow {
    fn from_parts(position: usize, window: &WindowResult, spectral: SpectralResult) -> Self {
        let bins = window.vector().bins();
        Self {
            window_number: position + 1,
            original: *bins,
            weighted: log_weight_bins(bins),
            measure_range: window.measure_range(),
            magnitudes: spectral.magnitudes,
            phases: spectral.phases,
            quantized_phases: spectral.quantized_phases,
        }
    }

    /// Original array rounded for display, e.g. "[1.0, 0.0, ...]"
    pub fn original_label(&self) -> String {
        array_label(&self.original)
    }

    /// Weighted array rounded for display
    pub fn weighted_label(&self) -> String {
        array_label(&self.weighted)
    }

    /// e.g. "Measures 3–5"
    pub fn measure_range_label(&self) -> String {
        measure_range_label(self.measure_range)
    }
}

/// Per-window spectra in chronological order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTable {
    rows: Vec<AnalysisRow>,
}

impl AnalysisTable {
    pub fn rows(&self) -> &[AnalysisRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a 1-based window number
    pub fn row(&self, window_number: usize) -> Option<&AnalysisRow> {
        window_number
            .checked_sub(1)
            .and_then(|idx| self.rows.get(idx))
    }

    pub fn original_vectors(&self) -> Vec<[f64; PITCH_CLASSES]> {
        self.rows.iter().map(|r| r.original).collect()
    }

    /// Magnitude series of harmonic 1..=6 across all windows
    pub fn magnitudes(&self, harmonic: usize) -> Option<Vec<f64>> {
        self.series(harmonic, |r| &r.magnitudes)
    }

    /// Phase series of harmonic 1..=6 across all windows
    pub fn phases(&self, harmonic: usize) -> Option<Vec<f64>> {
        self.series(harmonic, |r| &r.phases)
    }

    /// Quantized phase series of harmonic 1..=6 across all windows
    pub fn quantized_phases(&self, harmonic: usize) -> Option<Vec<f64>> {
        self.series(harmonic, |r| &r.quantized_phases)
    }

    fn series<F>(&self, harmonic: usize, column: F) -> Option<Vec<f64>>
    where
        F: Fn(&AnalysisRow) -> &[f64; HARMONICS],
    {
        let idx = harmonic_index(harmonic)?;
        Some(self.rows.iter().map(|r| column(r)[idx]).collect())
    }

    /// Windows × 12 matrix of original counts
    pub fn original_matrix(&self) -> Array2<f64> {
        Array2::from_shape_fn((self.rows.len(), PITCH_CLASSES), |(i, j)| self.rows[i].original[j])
    }

    /// Windows × 6 matrix of magnitudes (column j = harmonic j + 1)
    pub fn magnitude_matrix(&self) -> Array2<f64> {
        self.matrix(|r| &r.magnitudes)
    }

    pub fn phase_matrix(&self) -> Array2<f64> {
        self.matrix(|r| &r.phases)
    }

    pub fn quantized_phase_matrix(&self) -> Array2<f64> {
        self.matrix(|r| &r.quantized_phases)
    }

    fn matrix<F>(&self, column: F) -> Array2<f64>
    where
        F: Fn(&AnalysisRow) -> &[f64; HARMONICS],
    {
        Array2::from_shape_fn((self.rows.len(), HARMONICS), |(i, j)| column(&self.rows[i])[j])
    }

    /// Serialize all rows as JSON for the charting layer
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| AnalysisError::Export(e.to_string()))
    }
}

/// Analyze every window and collect the rows in input order
pub fn assemble(windows: &[WindowResult], config: &AnalyzerConfig) -> Result<AnalysisTable> {
    let mut analyzer = SpectrumAnalyzer::new(*config)?;

    let rows = windows
        .iter()
        .enumerate()
        .map(|(position, window)| -> Result<AnalysisRow> {
            let spectral = analyzer.analyze(window)?;
            Ok(AnalysisRow::from_parts(position, window, spectral))
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Assembled analysis table with {} rows", rows.len());
    Ok(AnalysisTable { rows })
}

/// Parallel [`assemble`]; one analyzer per worker, rows keep input order
pub fn assemble_par(windows: &[WindowResult], config: &AnalyzerConfig) -> Result<AnalysisTable> {
    let quantizer = PhaseQuantizer::new(config.quantization_nodes)?;

    let rows = windows
        .par_iter()
        .enumerate()
        .map_init(
            || SpectrumAnalyzer::with_quantizer(quantizer),
            |analyzer, (position, window)| -> Result<AnalysisRow> {
                let spectral = analyzer.analyze(window)?;
                Ok(AnalysisRow::from_parts(position, window, spectral))
            },
        )
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Assembled analysis table with {} rows", rows.len());
    Ok(AnalysisTable { rows })
}
