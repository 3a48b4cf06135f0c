// src/graph/rank/personalization.rs
//! Teleport vectors that bias ranking toward matching paths.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::pagerank::Personalization;
use crate::discovery::normalize_path;

pub const DEFAULT_BOOST_FACTOR: f64 = 10.0;

/// A path selector for personalization.
#[derive(Debug, Clone)]
pub enum PathPattern {
    /// Case-insensitive substring of the `/`-normalized path.
    Literal(String),
    /// The whole `/`-normalized path, compared case-sensitively.
    Exact(String),
    Regex(Regex),
}

impl PathPattern {
    /// Matches `path` and nothing else. A leading `./` is ignored.
    #[must_use]
    pub fn exact(path: &Path) -> Self {
        let normalized = normalize_path(path);
        Self::Exact(normalized.trim_start_matches("./").to_string())
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Literal(s) => !s.is_empty() && path.to_lowercase().contains(&s.to_lowercase()),
            Self::Exact(s) => !s.is_empty() && path == s.as_str(),
            Self::Regex(re) => re.is_match(path),
        }
    }
}

impl From<&str> for PathPattern {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for PathPattern {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

impl From<Regex> for PathPattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

/// Weights each file `boost_factor` if any pattern matches it, 1.0 otherwise.
#[must_use]
pub fn create_personalization<'a, I>(files: I, patterns: &[PathPattern], boost_factor: f64) -> Personalization
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    files
        .into_iter()
        .map(|file| {
            let normalized = normalize_path(file);
            let boosted = patterns.iter().any(|p| p.matches(&normalized));
            (file.clone(), if boosted { boost_factor } else { 1.0 })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn test_literal_and_regex_patterns() {
        let files = vec![p("src/bookings/create.ts"), p("src/payments/pay.ts"), p("src/App.tsx")];
        let patterns = vec![
            PathPattern::from("Bookings"),
            PathPattern::from(Regex::new(r"App\.tsx$").unwrap()),
        ];
        let pers = create_personalization(&files, &patterns, DEFAULT_BOOST_FACTOR);

        assert!((pers[&p("src/bookings/create.ts")] - 10.0).abs() < f64::EPSILON);
        assert!((pers[&p("src/payments/pay.ts")] - 1.0).abs() < f64::EPSILON);
        assert!((pers[&p("src/App.tsx")] - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_patterns_is_flat() {
        let files = vec![p("a.rs"), p("b.rs")];
        let pers = create_personalization(&files, &[], 3.0);
        assert!(pers.values().all(|w| (*w - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn test_exact_pattern_matches_whole_path_only() {
        let files = vec![p("src/a.ts"), p("src/a.tsx"), p("lib/src/a.ts")];
        let patterns = vec![PathPattern::exact(Path::new("./src/a.ts"))];
        let pers = create_personalization(&files, &patterns, DEFAULT_BOOST_FACTOR);

        assert!((pers[&p("src/a.ts")] - 10.0).abs() < f64::EPSILON);
        assert!((pers[&p("src/a.tsx")] - 1.0).abs() < f64::EPSILON);
        assert!((pers[&p("lib/src/a.ts")] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_literal_matches_nothing() {
        assert!(!PathPattern::from("").matches("src/a.rs"));
    }
}
