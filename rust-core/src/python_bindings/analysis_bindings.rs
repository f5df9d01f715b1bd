//! Python bindings for whole-score analysis

use numpy::{PyArray1, PyArray2};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::score_bindings::PyScore;
use crate::config::RunConfig;
use crate::multiset::CountingStrategy;
use crate::pipeline::{analyze_score, analyze_score_par};
use crate::spectrum::HARMONICS;
use crate::table::labels::{
    magnitude_column, phase_column, quantized_phase_column, GROUP_GENERAL, GROUP_MAGNITUDES,
    GROUP_PHASES, GROUP_QUANTIZED_PHASES, MEASURE_RANGE, ORIGINAL_ARRAY, WEIGHTED_ARRAY,
    WINDOW_NUMBER,
};
use crate::table::{AnalysisTable, HarmonicPalette};

/// Counting strategy enum exposed to Python
#[pyclass(name = "CountingStrategy")]
#[derive(Clone)]
pub enum PyCountingStrategy {
    Onset,
    Duration,
    Flat,
}

impl From<PyCountingStrategy> for CountingStrategy {
    fn from(py_strategy: PyCountingStrategy) -> Self {
        match py_strategy {
            PyCountingStrategy::Onset => CountingStrategy::Onset,
            PyCountingStrategy::Duration => CountingStrategy::Duration,
            PyCountingStrategy::Flat => CountingStrategy::Flat,
        }
    }
}

/// Analyze a score with a sliding beat window
/// 
/// Args:
///     score: Score built from music21 measures and notes
///     window_size: Window length in beats
///     strategy: Pitch-class counting strategy
///     log_weight: Apply log2(x + 1) weighting before the DFT
///     quantization_nodes: Phase quantization nodes
///     excerpt: Optional (start, end) measure numbers
///     parallel: Spread windows over worker threads
/// 
/// Returns:
///     Nested dictionary: 'General', 'Magnitudes', 'Phases',
///     'QuantizedPhases' groups of columns, plus 'original_vectors'
///     as a windows x 12 numpy array
#[pyfunction]
#[pyo3(signature = (
    score,
    window_size=16,
    strategy=PyCountingStrategy::Duration,
    log_weight=true,
    quantization_nodes=12,
    excerpt=None,
    parallel=false,
))]
#[allow(clippy::too_many_arguments)]
pub fn analyze<'py>(
    py: Python<'py>,
    score: PyRef<'_, PyScore>,
    window_size: usize,
    strategy: PyCountingStrategy,
    log_weight: bool,
    quantization_nodes: usize,
    excerpt: Option<(i64, i64)>,
    parallel: bool,
) -> PyResult<&'py PyDict> {
    let config = RunConfig {
        window_size,
        strategy: strategy.into(),
        log_weight,
        quantization_nodes,
        excerpt,
        ..RunConfig::default()
    };
    config.validate()?;

    let excerpted;
    let source = match excerpt {
        Some((start, end)) => {
            excerpted = score.score.excerpt(start, end)?;
            &excerpted
        }
        None => &score.score,
    };

    // Rust-only work runs without the GIL
    let table = py.allow_threads(|| {
        if parallel {
            analyze_score_par(source, &config)
        } else {
            analyze_score(source, &config)
        }
    })?;

    table_to_dict(py, &table)
}

/// Default chart colours: list of (magnitude fill, phase line, quantized line)
#[pyfunction]
pub fn default_palette() -> Vec<(String, String, String)> {
    let palette = HarmonicPalette::default();
    (1..=HARMONICS)
        .filter_map(|k| palette.colors(k))
        .map(|c| (c.magnitude_fill.clone(), c.phase_line.clone(), c.quantized_line.clone()))
        .collect()
}

fn table_to_dict<'py>(py: Python<'py>, table: &AnalysisTable) -> PyResult<&'py PyDict> {
    let rows = table.rows();

    let general = PyDict::new(py);
    let numbers: Vec<usize> = rows.iter().map(|r| r.window_number).collect();
    general.set_item(WINDOW_NUMBER, PyArray1::from_vec(py, numbers))?;
    general.set_item(
        WEIGHTED_ARRAY,
        rows.iter().map(|r| r.weighted_label()).collect::<Vec<_>>(),
    )?;
    general.set_item(
        ORIGINAL_ARRAY,
        rows.iter().map(|r| r.original_label()).collect::<Vec<_>>(),
    )?;
    general.set_item(
        MEASURE_RANGE,
        rows.iter().map(|r| r.measure_range_label()).collect::<Vec<_>>(),
    )?;

    let magnitudes = PyDict::new(py);
    let phases = PyDict::new(py);
    let quantized = PyDict::new(py);
    for k in 1..=HARMONICS {
        if let (Some(m), Some(p), Some(q)) = (
            table.magnitudes(k),
            table.phases(k),
            table.quantized_phases(k),
        ) {
            magnitudes.set_item(magnitude_column(k), PyArray1::from_vec(py, m))?;
            phases.set_item(phase_column(k), PyArray1::from_vec(py, p))?;
            quantized.set_item(quantized_phase_column(k), PyArray1::from_vec(py, q))?;
        }
    }

    let dict = PyDict::new(py);
    dict.set_item(GROUP_GENERAL, general)?;
    dict.set_item(GROUP_MAGNITUDES, magnitudes)?;
    dict.set_item(GROUP_PHASES, phases)?;
    dict.set_item(GROUP_QUANTIZED_PHASES, quantized)?;
    dict.set_item(
        "original_vectors",
        PyArray2::from_owned_array(py, table.original_matrix()),
    )?;

    Ok(dict)
}
