//! Score to analysis table, end to end
//!
//! beat grid → sliding windows → per-window spectrum → table
//!
//! Duration counting runs on the beat-sliced score, so a held note counts
//! in every window it sounds in. Onset and Flat counting run on the
//! tie-stripped score, so a tied note counts once.

use crate::config::RunConfig;
use crate::corpus::is_builtin;
use crate::error::Result;
use crate::multiset::{slide_window, slide_window_par, CountingStrategy};
use crate::score::{InMemoryScore, ScoreSource};
use crate::table::{assemble, assemble_par, AnalysisTable};

/// Analyze a whole score on the calling thread
pub fn analyze_score(score: &InMemoryScore, config: &RunConfig) -> Result<AnalysisTable> {
    config.validate()?;
    analyze_source(&prepare(score, config.strategy), config)
}

/// Analyze a whole score, spreading windows over the rayon pool
///
/// Produces the same table as [`analyze_score`].
pub fn analyze_score_par(score: &InMemoryScore, config: &RunConfig) -> Result<AnalysisTable> {
    config.validate()?;
    let prepared = prepare(score, config.strategy);

    let spec = config.window_spec()?;
    log_start(config);

    let grid = prepared.beat_grid();
    let windows = slide_window_par(&prepared, &grid, &spec);
    let table = assemble_par(&windows, &config.analyzer_config())?;

    log::info!("Analysis finished: {} windows", table.len());
    Ok(table)
}

/// Analyze any score source as it is
///
/// The source is expected to be sliced by beat already for Duration
/// counting, and tie-stripped for Onset and Flat.
pub fn analyze_source<S: ScoreSource + ?Sized>(score: &S, config: &RunConfig) -> Result<AnalysisTable> {
    config.validate()?;
    let spec = config.window_spec()?;
    log_start(config);

    let grid = score.beat_grid();
    let windows = slide_window(score, &grid, &spec);
    let table = assemble(&windows, &config.analyzer_config())?;

    log::info!("Analysis finished: {} windows", table.len());
    Ok(table)
}

/// Apply the configured excerpt, then analyze
pub fn run(score: &InMemoryScore, config: &RunConfig) -> Result<AnalysisTable> {
    config.validate()?;
    match config.excerpt {
        Some((start, end)) => {
            log::debug!("Restricting analysis to measures {}..={}", start, end);
            analyze_score(&score.excerpt(start, end)?, config)
        }
        None => analyze_score(score, config),
    }
}

/// Shape the score the way the counting strategy reads it
fn prepare(score: &InMemoryScore, strategy: CountingStrategy) -> InMemoryScore {
    match strategy {
        CountingStrategy::Duration => score.slice_by_beat(),
        CountingStrategy::Onset | CountingStrategy::Flat => score.strip_ties(),
    }
}

fn log_start(config: &RunConfig) {
    if !is_builtin(&config.repertoire) {
        log::debug!("{} is not in the built-in corpus", config.repertoire);
    }
    log::info!(
        "Analyzing {}: {}-beat windows, {} counting, log weighting {}",
        config.repertoire,
        config.window_size,
        config.strategy,
        if config.log_weight { "on" } else { "off" }
    );
}
