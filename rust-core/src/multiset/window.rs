//! Sliding beat windows over a score
//!
//! Window `i` spans beats `i..i + window_size` of the grid and counts
//! every event whose offset lies in `[grid[i], grid[i + window_size])`.

use super::strategy::CountingStrategy;
use super::vector::PitchClassVector;
use crate::error::{AnalysisError, Result};
use crate::score::{BeatGrid, ScoreSource};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Inclusive range of measure numbers covered by a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasureRange {
    pub start: i64,
    pub end: i64,
}

/// Pitch-class content of one window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowResult {
    vector: PitchClassVector,
    measure_range: MeasureRange,
    log_weighted: bool,
}

impl WindowResult {
    /// Wrap a finished vector; the range is ordered so that start <= end
    pub fn new(vector: PitchClassVector, measures: (i64, i64), log_weighted: bool) -> Self {
        let (a, b) = measures;
        Self {
            vector,
            measure_range: MeasureRange {
                start: a.min(b),
                end: a.max(b),
            },
            log_weighted,
        }
    }

    pub fn vector(&self) -> &PitchClassVector {
        &self.vector
    }

    pub fn measure_range(&self) -> MeasureRange {
        self.measure_range
    }

    pub fn log_weighted(&self) -> bool {
        self.log_weighted
    }
}

/// Window traversal parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    /// Window length in beats
    pub window_size: usize,

    /// How notes update the bins
    pub strategy: CountingStrategy,

    /// Whether spectra of these windows use log weighting
    pub log_weight: bool,
}

impl WindowSpec {
    pub fn new(window_size: usize, strategy: CountingStrategy, log_weight: bool) -> Result<Self> {
        if window_size == 0 {
            return Err(AnalysisError::InvalidWindowSize(window_size));
        }
        Ok(Self {
            window_size,
            strategy,
            log_weight,
        })
    }
}

/// Build the window starting at grid index `index`
///
/// Pure in its inputs; callers guarantee `index + window_size < grid.len()`.
pub fn vectorize_window<S: ScoreSource + ?Sized>(
    score: &S,
    grid: &BeatGrid,
    spec: &WindowSpec,
    index: usize,
) -> WindowResult {
    let offsets = grid.offsets();
    let window_start = offsets[index];
    let end_index = index + spec.window_size;
    let window_end = offsets[end_index];

    let mut vector = PitchClassVector::zeros();
    for event in score.notes_in_range(window_start, window_end) {
        vector.add(event, spec.strategy);
    }

    let start_measure = score.measure_number(window_start);
    // The final boundary belongs to no real measure; report the one holding the last beat
    let end_measure = if end_index == offsets.len() - 1 {
        score.measure_number(offsets[end_index - 1])
    } else {
        score.measure_number(window_end)
    };

    WindowResult::new(vector, (start_measure, end_measure), spec.log_weight)
}

/// Slide a window across the grid, one result per start beat
///
/// # Returns
/// `grid.len() - window_size` windows in chronological order, or none if
/// the window does not fit on the grid
pub fn slide_window<S: ScoreSource + ?Sized>(
    score: &S,
    grid: &BeatGrid,
    spec: &WindowSpec,
) -> Vec<WindowResult> {
    let count = grid.window_count(spec.window_size);
    log_traversal(grid, spec, count);

    (0..count)
        .map(|index| vectorize_window(score, grid, spec, index))
        .collect()
}

/// Parallel [`slide_window`]; output order matches the sequential version
pub fn slide_window_par<S: ScoreSource + Sync + ?Sized>(
    score: &S,
    grid: &BeatGrid,
    spec: &WindowSpec,
) -> Vec<WindowResult> {
    let count = grid.window_count(spec.window_size);
    log_traversal(grid, spec, count);

    (0..count)
        .into_par_iter()
        .map(|index| vectorize_window(score, grid, spec, index))
        .collect()
}

fn log_traversal(grid: &BeatGrid, spec: &WindowSpec, count: usize) {
    if count == 0 {
        log::debug!(
            "Window of {} beats does not fit a grid of {} offsets; no windows",
            spec.window_size,
            grid.len()
        );
    } else {
        log::debug!(
            "Sliding {}-beat {} window over {} offsets: {} windows",
            spec.window_size,
            spec.strategy,
            grid.len(),
            count
        );
    }
}
