// src/config/mod.rs
pub mod types;

pub use self::types::{Config, ContextMapToml, OutputConfig, RankingConfig, ScanConfig};

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::discovery::ScanOptions;
use crate::error::{MapError, Result};
use crate::graph::rank::PageRankOptions;

pub const CONFIG_FILE: &str = "contextmap.toml";

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config and applies `contextmap.toml` from `root` if present.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self> {
        let mut config = Self::new();
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            let content = fs::read_to_string(&path).map_err(|e| MapError::io(e, &path))?;
            config.parse_toml(&content)?;
            tracing::debug!(path = %path.display(), "loaded config");
        }
        Ok(config)
    }

    /// Replaces all settings with the ones in `content`.
    ///
    /// # Errors
    /// Returns an error on malformed TOML or an invalid exclude pattern.
    pub fn parse_toml(&mut self, content: &str) -> Result<()> {
        let parsed: ContextMapToml = toml::from_str(content)?;
        self.ranking = parsed.ranking;
        self.output = parsed.output;
        self.scan = parsed.scan;
        self.compile_patterns()
    }

    /// Recompiles `scan.exclude_patterns` into regexes.
    ///
    /// # Errors
    /// Returns an error if any pattern is not a valid regex.
    pub fn compile_patterns(&mut self) -> Result<()> {
        self.exclude_patterns = self
            .scan
            .exclude_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<_, _>>()?;
        Ok(())
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns `InvalidOption` for out-of-range ranking or output values.
    pub fn validate(&self) -> Result<()> {
        self.pagerank_options().validate()?;
        if self.ranking.boost_factor.is_nan() || self.ranking.boost_factor <= 0.0 {
            return Err(MapError::invalid("boost_factor", "must be positive"));
        }
        if self.output.max_signatures_per_file == 0 {
            return Err(MapError::invalid("max_signatures_per_file", "must be at least 1"));
        }
        Ok(())
    }

    #[must_use]
    pub fn pagerank_options(&self) -> PageRankOptions {
        PageRankOptions {
            damping: self.ranking.damping,
            max_iterations: self.ranking.max_iterations,
            epsilon: self.ranking.epsilon,
            personalization: None,
        }
    }

    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            include: self.scan.include.clone(),
            exclude: self.scan.exclude.clone(),
            exclude_patterns: self.exclude_patterns.clone(),
        }
    }
}

// Pattern constants
pub const PRUNE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "dist",
    "build",
    "target",
    "gen",
    "tests",
    "test",
    "__tests__",
    "__pycache__",
    ".next",
    ".venv",
    "venv",
    ".tox",
    ".cache",
    "coverage",
    "vendor",
    "third_party",
];

pub const SECRET_PATTERN: &str = r"(?i)(^\.?env(\..*)?$|/\.?env(\..*)?$|(^|/)(id_rsa(\.pub)?|id_ed25519(\.pub)?|.*\.(pem|p12|jks|keystore|pfx))$)";

pub const GENERATED_PATTERN: &str = r"(?i)(\.d\.ts|\.min\.js|\.generated\.\w+)$";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert!((config.ranking.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.ranking.max_iterations, 100);
        assert_eq!(config.output.max_signatures_per_file, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_carries_only_loaded_settings() {
        let Config {
            ranking,
            output,
            scan,
            exclude_patterns,
        } = Config::new();
        assert_eq!(ranking.max_iterations, 100);
        assert_eq!(output.budget, 4000);
        assert!(scan.include.is_empty());
        assert!(exclude_patterns.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let mut config = Config::new();
        let toml = r#"
            [ranking]
            damping = 0.5

            [output]
            budget = 1200
            format = "xml"

            [scan]
            exclude_patterns = ["\\.gen\\.ts$"]
        "#;
        config.parse_toml(toml).unwrap();
        assert!((config.ranking.damping - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.ranking.max_iterations, 100);
        assert_eq!(config.output.budget, 1200);
        assert_eq!(config.output.format, OutputFormat::Xml);
        assert_eq!(config.exclude_patterns.len(), 1);
        assert!(config.exclude_patterns[0].is_match("src/api.gen.ts"));
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let mut config = Config::new();
        let toml = "[scan]\nexclude_patterns = [\"(unclosed\"]";
        assert!(matches!(config.parse_toml(toml), Err(MapError::Regex(_))));
    }

    #[test]
    fn test_validate_rejects_bad_damping() {
        let mut config = Config::new();
        config.ranking.damping = 1.5;
        assert!(matches!(
            config.validate(),
            Err(MapError::InvalidOption { name: "damping", .. })
        ));
    }
}
