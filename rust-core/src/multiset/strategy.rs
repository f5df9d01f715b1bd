//! Pitch-class counting strategies

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a note updates its pitch-class bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum CountingStrategy {
    /// +1 per note onset
    Onset,

    /// +quarter length per note
    Duration,

    /// Bin set to 1 if the pitch class occurs at all
    Flat,
}

impl CountingStrategy {
    pub const ALL: [CountingStrategy; 3] = [
        CountingStrategy::Duration,
        CountingStrategy::Onset,
        CountingStrategy::Flat,
    ];

    /// Apply one note to a bin value
    pub fn update(&self, bin: &mut f64, quarter_length: f64) {
        match self {
            CountingStrategy::Onset => *bin += 1.0,
            CountingStrategy::Duration => *bin += quarter_length,
            CountingStrategy::Flat => *bin = 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CountingStrategy::Onset => "Onset",
            CountingStrategy::Duration => "Duration",
            CountingStrategy::Flat => "Flat",
        }
    }
}

impl Default for CountingStrategy {
    fn default() -> Self {
        CountingStrategy::Duration
    }
}

impl fmt::Display for CountingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CountingStrategy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "onset" => Ok(CountingStrategy::Onset),
            "duration" => Ok(CountingStrategy::Duration),
            "flat" => Ok(CountingStrategy::Flat),
            _ => Err(AnalysisError::InvalidStrategy(s.to_string())),
        }
    }
}

impl TryFrom<String> for CountingStrategy {
    type Error = AnalysisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
