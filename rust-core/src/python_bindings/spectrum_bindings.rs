//! Python bindings for single-vector spectrum analysis

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::spectrum::{analysis::AnalyzerConfig, SpectrumAnalyzer};

/// Spectrum analyzer exposed to Python
#[pyclass(name = "SpectrumAnalyzer")]
pub struct PySpectrumAnalyzer {
    analyzer: SpectrumAnalyzer,
}

#[pymethods]
impl PySpectrumAnalyzer {
    /// Create a new spectrum analyzer
    /// 
    /// Args:
    ///     quantization_nodes: Equally spaced phase nodes around the circle
    #[new]
    #[pyo3(signature = (quantization_nodes=12))]
    fn new(quantization_nodes: usize) -> PyResult<Self> {
        let config = AnalyzerConfig { quantization_nodes };
        Ok(Self {
            analyzer: SpectrumAnalyzer::new(config)?,
        })
    }

    /// Analyze a 12-bin pitch-class vector
    /// 
    /// Args:
    ///     vector: Pitch-class counts as numpy array (length 12)
    ///     log_weighted: Apply log2(x + 1) before the transform
    /// 
    /// Returns:
    ///     Dictionary with keys 'magnitudes', 'phases', 'quantized_phases'
    ///     (numpy arrays for harmonics 1-6) and 'analyzed' (transform input)
    #[pyo3(signature = (vector, log_weighted=false))]
    fn analyze<'py>(
        &mut self,
        py: Python<'py>,
        vector: PyReadonlyArray1<f64>,
        log_weighted: bool,
    ) -> PyResult<&'py PyDict> {
        let values = vector
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let result = self.analyzer.analyze_slice(values, log_weighted)?;

        let dict = PyDict::new(py);
        dict.set_item("analyzed", PyArray1::from_slice(py, &result.analyzed))?;
        dict.set_item("magnitudes", PyArray1::from_slice(py, &result.magnitudes))?;
        dict.set_item("phases", PyArray1::from_slice(py, &result.phases))?;
        dict.set_item("quantized_phases", PyArray1::from_slice(py, &result.quantized_phases))?;
        Ok(dict)
    }

    /// Quantize a phase in degrees with this analyzer's nodes
    fn quantize(&self, phase: f64) -> f64 {
        self.analyzer.quantizer().quantize(phase)
    }

    /// Get current number of quantization nodes
    fn get_quantization_nodes(&self) -> usize {
        self.analyzer.config().quantization_nodes
    }
}
