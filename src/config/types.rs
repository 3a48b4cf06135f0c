use serde::{Deserialize, Serialize};

use crate::render::OutputFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_damping")]
    pub damping: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_boost_factor")]
    pub boost_factor: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iterations: default_max_iterations(),
            epsilon: default_epsilon(),
            boost_factor: default_boost_factor(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_budget")]
    pub budget: usize,
    #[serde(default = "default_max_signatures")]
    pub max_signatures_per_file: usize,
    #[serde(default)]
    pub show_scores: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            budget: default_budget(),
            max_signatures_per_file: default_max_signatures(),
            show_scores: false,
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScanConfig {
    /// Directories (relative to the root) the scan is limited to.
    #[serde(default)]
    pub include: Vec<String>,
    /// Directory names skipped anywhere in the tree.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Regexes matched against `/`-normalized relative paths.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// On-disk shape of `contextmap.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContextMapToml {
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub ranking: RankingConfig,
    pub output: OutputConfig,
    pub scan: ScanConfig,
    pub exclude_patterns: Vec<regex::Regex>,
}

const fn default_damping() -> f64 { 0.85 }
const fn default_max_iterations() -> usize { 100 }
const fn default_epsilon() -> f64 { 1e-6 }
const fn default_boost_factor() -> f64 { 10.0 }
const fn default_budget() -> usize { 4000 }
const fn default_max_signatures() -> usize { 15 }
