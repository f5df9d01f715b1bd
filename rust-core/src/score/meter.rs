//! Beat grid construction from time signatures
//!
//! Simple meters (2, 3 or 4 beats) get one beat per numerator unit.
//! Other numerators are grouped into beats of three, closing with a
//! beat of two or one: 5 → [3, 2], 7 → [3, 2, 2], 8 → [3, 3, 2].

use super::grid::BeatGrid;
use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Time signature such as 3/4 or 6/8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSignature {
    pub numerator: u32,
    pub denominator: u32,
}

impl TimeSignature {
    pub fn new(numerator: u32, denominator: u32) -> Result<Self> {
        if numerator == 0 || denominator == 0 {
            return Err(AnalysisError::InvalidTimeSignature(format!(
                "{}/{}",
                numerator, denominator
            )));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Length of one numerator unit in quarter lengths
    pub fn unit_length(&self) -> f64 {
        4.0 / self.denominator as f64
    }

    /// Bar length in quarter lengths
    pub fn bar_length(&self) -> f64 {
        self.numerator as f64 * self.unit_length()
    }

    /// Numerator units per beat, in order
    pub fn beat_groups(&self) -> Vec<u32> {
        match self.numerator {
            2..=4 => vec![1; self.numerator as usize],
            n => split_numerator(n),
        }
    }

    /// Beat lengths in quarter lengths, in order
    pub fn beat_lengths(&self) -> Vec<f64> {
        let unit = self.unit_length();
        self.beat_groups()
            .into_iter()
            .map(|group| group as f64 * unit)
            .collect()
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            numerator: 4,
            denominator: 4,
        }
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

impl FromStr for TimeSignature {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || AnalysisError::InvalidTimeSignature(s.to_string());
        let (num, den) = s.trim().split_once('/').ok_or_else(invalid)?;
        let numerator = num.trim().parse().map_err(|_| invalid())?;
        let denominator = den.trim().parse().map_err(|_| invalid())?;
        Self::new(numerator, denominator)
    }
}

/// Group an irregular numerator into beats of three, two or one units
pub fn split_numerator(numerator: u32) -> Vec<u32> {
    match numerator {
        0 => vec![],
        n if n < 4 => vec![n],
        4 => vec![2, 2],
        n => {
            let mut groups = vec![3];
            groups.extend(split_numerator(n - 3));
            groups
        }
    }
}

/// One bar of the score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    /// Measure number as printed in the score
    pub number: i64,

    /// Start offset in quarter lengths
    pub offset: f64,

    /// Duration in quarter lengths
    pub length: f64,
}

impl Measure {
    pub fn end(&self) -> f64 {
        self.offset + self.length
    }
}

/// Lay out measures back to back and collect their beat boundaries
///
/// # Arguments
/// * `signatures` - (measure number, time signature) per measure; `None`
///   keeps the signature in effect from the previous measure
///
/// # Returns
/// The measures with their offsets, and the beat grid across all of them
pub fn layout_measures(signatures: &[(i64, Option<TimeSignature>)]) -> Result<(Vec<Measure>, BeatGrid)> {
    let mut measures = Vec::with_capacity(signatures.len());
    let mut offsets = vec![0.0];
    let mut current: Option<TimeSignature> = None;
    let mut cursor = 0.0;

    for &(number, signature) in signatures {
        let ts = match (signature, current) {
            (Some(ts), _) => ts,
            (None, Some(prev)) => prev,
            (None, None) => {
                log::warn!(
                    "Measure {} has no time signature in effect, assuming {}",
                    number,
                    TimeSignature::default()
                );
                TimeSignature::default()
            }
        };
        current = Some(ts);

        for beat in ts.beat_lengths() {
            let next = offsets[offsets.len() - 1] + beat;
            offsets.push(next);
        }

        measures.push(Measure {
            number,
            offset: cursor,
            length: ts.bar_length(),
        });
        cursor += ts.bar_length();
    }

    log::debug!(
        "Laid out {} measures with {} beats",
        measures.len(),
        offsets.len() - 1
    );

    Ok((measures, BeatGrid::new(offsets)?))
}
