//! Score-side inputs: note events, beat grid and measure layout

pub mod events;
pub mod grid;
pub mod meter;
pub mod source;

pub use events::{EventKind, NoteEvent, NoteLike, PitchClass, PITCH_CLASSES};
pub use grid::BeatGrid;
pub use meter::{layout_measures, Measure, TimeSignature};
pub use source::{InMemoryScore, ScoreSource};
