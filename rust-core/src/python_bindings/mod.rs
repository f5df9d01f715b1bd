//! PyO3 bindings for Python integration
//!
//! music21 parses the score on the Python side; these bindings take the
//! measures and notes it produces and return numpy arrays for charting.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::AnalysisError;

mod analysis_bindings;
mod score_bindings;
mod spectrum_bindings;

impl From<AnalysisError> for PyErr {
    fn from(err: AnalysisError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn pitch_spectrum(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<score_bindings::PyScore>()?;
    m.add_class::<spectrum_bindings::PySpectrumAnalyzer>()?;

    // Add CountingStrategy enum
    m.add_class::<analysis_bindings::PyCountingStrategy>()?;

    m.add_function(wrap_pyfunction!(analysis_bindings::analyze, m)?)?;
    m.add_function(wrap_pyfunction!(analysis_bindings::default_palette, m)?)?;
    m.add_function(wrap_pyfunction!(score_bindings::beat_grid, m)?)?;

    Ok(())
}
