//! Analysis table assembly and export

pub mod assembler;
pub mod labels;
pub mod palette;

pub use assembler::{assemble, assemble_par, AnalysisRow, AnalysisTable};
pub use palette::{HarmonicColors, HarmonicPalette};
