//! Pitch Spectrum - Pitch-Class DFT Analysis Core
//! 
//! Slides a beat window across a score, counts pitch classes per window and
//! tracks the magnitude and phase of the six DFT harmonics over time, with
//! optional Python bindings.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod config;
pub mod corpus;
pub mod error;
pub mod multiset;
pub mod pipeline;
pub mod score;
pub mod spectrum;
pub mod table;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use config::RunConfig;
pub use error::{AnalysisError, Result};
pub use multiset::{slide_window, CountingStrategy, PitchClassVector, WindowResult, WindowSpec};
pub use pipeline::{analyze_score, analyze_score_par, analyze_source, run};
pub use score::{BeatGrid, InMemoryScore, NoteEvent, NoteLike, PitchClass, ScoreSource, TimeSignature};
pub use spectrum::{SpectralResult, SpectrumAnalyzer};
pub use table::{assemble, AnalysisTable};
