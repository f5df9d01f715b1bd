//! Run configuration: which piece to analyze and how
//!
//! Collected by the parameter form and handed over as a plain record.
//! Can also be read from TOML; missing keys take the defaults.

use crate::corpus::BUILTIN_CORPUS;
use crate::error::{AnalysisError, Result};
use crate::multiset::{CountingStrategy, WindowSpec};
use crate::spectrum::{AnalyzerConfig, DEFAULT_QUANTIZATION_NODES};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Analysis run parameters
///
/// ```
/// use pitch_spectrum::{CountingStrategy, RunConfig};
///
/// let config = RunConfig::from_toml_str(r#"
///     repertoire = "bach/bwv244.10.mxl"
///     window_size = 8
///     strategy = "Onset"
/// "#).unwrap();
///
/// assert_eq!(config.strategy, CountingStrategy::Onset);
/// assert!(config.log_weight);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Corpus path or local file naming the piece
    pub repertoire: String,

    /// Inclusive (start, end) measure numbers to analyze
    pub excerpt: Option<(i64, i64)>,

    /// Window length in beats
    pub window_size: usize,

    /// Pitch-class counting strategy
    pub strategy: CountingStrategy,

    /// Apply log2(x + 1) weighting before the transform
    pub log_weight: bool,

    /// Nodes for phase quantization
    pub quantization_nodes: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            repertoire: BUILTIN_CORPUS[0].to_string(),
            excerpt: None,
            window_size: 16,
            strategy: CountingStrategy::Duration,
            log_weight: true,
            quantization_nodes: DEFAULT_QUANTIZATION_NODES,
        }
    }
}

impl RunConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            AnalysisError::Config(format!(
                "Failed to read config file {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate a TOML record
    ///
    /// An unknown strategy name fails with `InvalidStrategy`, any other
    /// malformed input with `Config`.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let file: RunConfigFile = toml::from_str(toml_str)
            .map_err(|e| AnalysisError::Config(format!("Failed to parse TOML: {}", e)))?;
        let config = RunConfig::try_from(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameters no run could use
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(AnalysisError::InvalidWindowSize(self.window_size));
        }
        if self.quantization_nodes == 0 {
            return Err(AnalysisError::InvalidQuantization(self.quantization_nodes));
        }
        if let Some((start, end)) = self.excerpt {
            if start < 0 || start > end {
                return Err(AnalysisError::InvalidExcerpt { start, end });
            }
        }
        Ok(())
    }

    pub fn window_spec(&self) -> Result<WindowSpec> {
        WindowSpec::new(self.window_size, self.strategy, self.log_weight)
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            quantization_nodes: self.quantization_nodes,
        }
    }

    /// Chart title, e.g. "K155: 16-Beat Window, Duration"
    pub fn title(&self, name: &str) -> String {
        format!("{}: {}-Beat Window, {}", name, self.window_size, self.strategy)
    }

    /// File stem for saved charts, e.g. "K155_16beat_Duration"
    pub fn save_stem(&self, name: &str) -> String {
        format!("{}_{}beat_{}", name, self.window_size, self.strategy)
    }
}

/// On-disk form of [`RunConfig`], strategy still a bare name
#[derive(Debug, Deserialize)]
#[serde(default)]
struct RunConfigFile {
    repertoire: String,
    excerpt: Option<(i64, i64)>,
    window_size: usize,
    strategy: String,
    log_weight: bool,
    quantization_nodes: usize,
}

impl Default for RunConfigFile {
    fn default() -> Self {
        let defaults = RunConfig::default();
        Self {
            repertoire: defaults.repertoire,
            excerpt: defaults.excerpt,
            window_size: defaults.window_size,
            strategy: defaults.strategy.to_string(),
            log_weight: defaults.log_weight,
            quantization_nodes: defaults.quantization_nodes,
        }
    }
}

impl TryFrom<RunConfigFile> for RunConfig {
    type Error = AnalysisError;

    fn try_from(file: RunConfigFile) -> Result<Self> {
        Ok(Self {
            repertoire: file.repertoire,
            excerpt: file.excerpt,
            window_size: file.window_size,
            strategy: file.strategy.parse()?,
            log_weight: file.log_weight,
            quantization_nodes: file.quantization_nodes,
        })
    }
}
