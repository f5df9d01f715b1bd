//! Python bindings for score construction

use numpy::PyArray1;
use pyo3::prelude::*;

use crate::score::{layout_measures, InMemoryScore, NoteEvent, PitchClass, ScoreSource, TimeSignature};

/// Parse optional "n/d" strings into time signatures
fn parse_signatures(measures: Vec<(i64, Option<String>)>) -> PyResult<Vec<(i64, Option<TimeSignature>)>> {
    measures
        .into_iter()
        .map(|(number, ts)| -> PyResult<(i64, Option<TimeSignature>)> {
            let ts = ts.map(|s| s.parse::<TimeSignature>()).transpose()?;
            Ok((number, ts))
        })
        .collect()
}

/// In-memory score exposed to Python
#[pyclass(name = "Score")]
#[derive(Clone)]
pub struct PyScore {
    pub(crate) score: InMemoryScore,
}

#[pymethods]
impl PyScore {
    /// Create a score from its measures
    /// 
    /// Args:
    ///     measures: List of (measure number, time signature) pairs, e.g.
    ///         [(1, "3/4"), (2, None)]; None keeps the previous signature
    #[new]
    fn new(measures: Vec<(i64, Option<String>)>) -> PyResult<Self> {
        let signatures = parse_signatures(measures)?;
        Ok(Self {
            score: InMemoryScore::from_time_signatures(&signatures)?,
        })
    }

    /// Add a single note
    /// 
    /// Args:
    ///     offset: Onset in quarter lengths from the start of the score
    ///     pitch_class: Pitch class 0-11
    ///     quarter_length: Duration in quarter lengths (>= 0)
    ///     tied: Continues a tie from the previous note of this pitch class
    #[pyo3(signature = (offset, pitch_class, quarter_length, tied=false))]
    fn add_note(&mut self, offset: f64, pitch_class: i64, quarter_length: f64, tied: bool) -> PyResult<()> {
        let pc = PitchClass::new(pitch_class)?;
        let mut event = NoteEvent::note(offset, pc, quarter_length);
        event.tied = tied;
        self.score.add_event(event)?;
        Ok(())
    }

    /// Add a chord
    /// 
    /// Args:
    ///     offset: Onset in quarter lengths
    ///     notes: List of (pitch class, quarter length) pairs
    ///     tied: Continues a tie from the previous chord with these pitch classes
    #[pyo3(signature = (offset, notes, tied=false))]
    fn add_chord(&mut self, offset: f64, notes: Vec<(i64, f64)>, tied: bool) -> PyResult<()> {
        let notes = notes
            .into_iter()
            .map(|(pc, ql)| -> PyResult<(PitchClass, f64)> { Ok((PitchClass::new(pc)?, ql)) })
            .collect::<PyResult<Vec<_>>>()?;
        let mut event = NoteEvent::chord(offset, notes);
        event.tied = tied;
        self.score.add_event(event)?;
        Ok(())
    }

    /// Keep only measures start..=end, shifted to offset 0
    fn excerpt(&self, start: i64, end: i64) -> PyResult<Self> {
        Ok(Self {
            score: self.score.excerpt(start, end)?,
        })
    }

    /// Measure number containing an offset
    fn measure_number(&self, offset: f64) -> i64 {
        self.score.measure_number(offset)
    }

    /// Beat offsets as numpy array
    fn beat_offsets<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.score.beat_grid().offsets().to_vec())
    }

    /// Number of note and chord events
    fn num_events(&self) -> usize {
        self.score.events().len()
    }
}

/// Beat offsets for a sequence of measures
/// 
/// Args:
///     measures: List of (measure number, time signature) pairs
/// 
/// Returns:
///     Beat offsets in quarter lengths as numpy array
#[pyfunction]
pub fn beat_grid<'py>(py: Python<'py>, measures: Vec<(i64, Option<String>)>) -> PyResult<&'py PyArray1<f64>> {
    let signatures = parse_signatures(measures)?;
    let (_, grid) = layout_measures(&signatures)?;
    Ok(PyArray1::from_vec(py, grid.offsets().to_vec()))
}
