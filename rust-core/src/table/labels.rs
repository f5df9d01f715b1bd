//! Column names and display strings read by the charting layer

use crate::multiset::MeasureRange;
use crate::score::PITCH_CLASSES;

pub const GROUP_GENERAL: &str = "General";
pub const GROUP_MAGNITUDES: &str = "Magnitudes";
pub const GROUP_PHASES: &str = "Phases";
pub const GROUP_QUANTIZED_PHASES: &str = "QuantizedPhases";

pub const WINDOW_NUMBER: &str = "Window Number";
pub const WEIGHTED_ARRAY: &str = "Weighted Array";
pub const ORIGINAL_ARRAY: &str = "Original Array";
pub const MEASURE_RANGE: &str = "Measure Range";

/// Top-level column groups in table order
pub const GROUPS: [&str; 4] = [
    GROUP_GENERAL,
    GROUP_MAGNITUDES,
    GROUP_PHASES,
    GROUP_QUANTIZED_PHASES,
];

pub fn magnitude_column(harmonic: usize) -> String {
    format!("f{} Magnitude", harmonic)
}

pub fn phase_column(harmonic: usize) -> String {
    format!("f{} Phase", harmonic)
}

pub fn quantized_phase_column(harmonic: usize) -> String {
    format!("f{} Quantized Phase", harmonic)
}

/// "Measures a–b" (en dash)
pub fn measure_range_label(range: MeasureRange) -> String {
    format!("Measures {}\u{2013}{}", range.start, range.end)
}

/// Bins rounded to two decimals, list style
pub fn array_label(bins: &[f64; PITCH_CLASSES]) -> String {
    let rounded = crate::multiset::vector::round_bins(bins, 2);
    format!("{:?}", rounded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_names() {
        assert_eq!(magnitude_column(1), "f1 Magnitude");
        assert_eq!(phase_column(6), "f6 Phase");
        assert_eq!(quantized_phase_column(3), "f3 Quantized Phase");
    }

    #[test]
    fn test_measure_range_label() {
        assert_eq!(
            measure_range_label(MeasureRange { start: 3, end: 5 }),
            "Measures 3–5"
        );
    }

    #[test]
    fn test_array_label_rounds() {
        let mut bins = [0.0; 12];
        bins[0] = 1.0;
        bins[2] = 1.58496;
        let label = array_label(&bins);
        assert!(label.starts_with("[1.0, 0.0, 1.58, 0.0"));
        assert!(label.ends_with("0.0]"));
    }
}
