//! Pitch-class multisets over sliding beat windows

pub mod strategy;
pub mod vector;
pub mod window;

pub use strategy::CountingStrategy;
pub use vector::PitchClassVector;
pub use window::{slide_window, slide_window_par, vectorize_window, MeasureRange, WindowResult, WindowSpec};
