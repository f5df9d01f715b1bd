//! Per-harmonic colours for charts
//!
//! Passed to the charting layer as a value; nothing here is global state.

use crate::spectrum::{harmonic_index, HARMONICS};
use serde::{Deserialize, Serialize};

/// Colours for one harmonic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonicColors {
    /// Area fill under the magnitude curve
    pub magnitude_fill: String,
    /// Phase line
    pub phase_line: String,
    /// Quantized phase line
    pub quantized_line: String,
}

/// Colours for harmonics f1..f6
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarmonicPalette {
    harmonics: Vec<HarmonicColors>,
}

const DEFAULT_RGBA: [[&str; 3]; HARMONICS] = [
    ["rgba(130,202,252,0.4)", "rgba(61,122,253,0.6)", "rgba(30,72,143,1)"],
    ["rgba(255,223,34,0.4)", "rgba(242,171,21,0.6)", "rgba(127,78,30,1)"],
    ["rgba(99,171,21,0.4)", "rgba(105,131,57,0.6)", "rgba(5,71,42,1)"],
    ["rgba(207,98,117,0.4)", "rgba(212,106,126,0.6)", "rgba(117,8,81,1)"],
    ["rgba(196,142,253,0.4)", "rgba(133,103,152,0.6)", "rgba(67,5,65,1)"],
    ["rgba(211,182,131,0.4)", "rgba(127,104,78,0.6)", "rgba(65,2,0,1)"],
];

impl HarmonicPalette {
    /// Build from exactly six entries, f1 first
    pub fn new(harmonics: Vec<HarmonicColors>) -> Option<Self> {
        (harmonics.len() == HARMONICS).then(|| Self { harmonics })
    }

    /// Colours for harmonic 1..=6
    pub fn colors(&self, harmonic: usize) -> Option<&HarmonicColors> {
        harmonic_index(harmonic).map(|idx| &self.harmonics[idx])
    }
}

impl Default for HarmonicPalette {
    fn default() -> Self {
        let harmonics = DEFAULT_RGBA
            .iter()
            .map(|[fill, phase, quantized]| HarmonicColors {
                magnitude_fill: fill.to_string(),
                phase_line: phase.to_string(),
                quantized_line: quantized.to_string(),
            })
            .collect();
        Self { harmonics }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette_covers_all_harmonics() {
        let palette = HarmonicPalette::default();
        for k in 1..=HARMONICS {
            assert!(palette.colors(k).is_some());
        }
        assert!(palette.colors(0).is_none());
        assert!(palette.colors(7).is_none());
        assert_eq!(palette.colors(1).unwrap().phase_line, "rgba(61,122,253,0.6)");
    }

    #[test]
    fn test_custom_palette_needs_six_entries() {
        let one = HarmonicColors {
            magnitude_fill: "red".into(),
            phase_line: "green".into(),
            quantized_line: "blue".into(),
        };
        assert!(HarmonicPalette::new(vec![one.clone(); 5]).is_none());
        assert!(HarmonicPalette::new(vec![one; 6]).is_some());
    }
}
