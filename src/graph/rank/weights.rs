// src/graph/rank/weights.rs
//! Symbol importance used to weight reference edges.
//!
//! The multipliers are empirically tuned; they are kept as named constants
//! rather than derived.

/// Weight every symbol starts from.
pub const BASE_WEIGHT: f64 = 1.0;

/// camelCase / PascalCase names of at least this length get `LONG_IDENT_BOOST`.
pub const LONG_IDENT_LEN: usize = 8;
pub const LONG_IDENT_BOOST: f64 = 10.0;
/// camelCase / PascalCase names of at least this length get `MEDIUM_IDENT_BOOST`.
pub const MEDIUM_IDENT_LEN: usize = 5;
pub const MEDIUM_IDENT_BOOST: f64 = 5.0;

/// Leading underscore marks a private symbol.
pub const PRIVATE_PENALTY: f64 = 0.1;

/// Symbols defined in many files are generic (`new`, `render`, `Props`).
pub const WIDE_DEF_THRESHOLD: usize = 10;
pub const WIDE_DEF_PENALTY: f64 = 0.05;
pub const COMMON_DEF_THRESHOLD: usize = 5;
pub const COMMON_DEF_PENALTY: f64 = 0.1;
pub const SHARED_DEF_THRESHOLD: usize = 3;
pub const SHARED_DEF_PENALTY: f64 = 0.5;

pub const FEATURE_BOOST: f64 = 10.0;

pub const HOOK_BOOST: f64 = 5.0;
pub const UTILITY_BOOST: f64 = 3.0;
pub const SCHEMA_BOOST: f64 = 4.0;
pub const SERVICE_BOOST: f64 = 3.0;

/// Names this short or shorter are usually loop variables or generics.
pub const SHORT_NAME_LEN: usize = 2;
pub const SHORT_NAME_PENALTY: f64 = 0.1;

const FEATURE_SUFFIXES: &[&str] = &["s", "ing", "ed", "er"];
const MIN_FEATURE_ROOT: usize = 3;

const UTILITY_SUFFIXES: &[&str] = &["Util", "Utils", "Helper", "Helpers"];
const UTILITY_PREFIXES: &[&str] = &["format", "parse"];
const SCHEMA_SUFFIXES: &[&str] = &["Schema", "Validator"];
const SERVICE_SUFFIXES: &[&str] = &["Service", "Repository", "Router", "Controller"];

/// Scores a symbol name for edge weighting. Always positive.
///
/// `definition_count` is the number of files defining the symbol.
#[must_use]
pub fn symbol_weight(name: &str, definition_count: usize, matches_feature: bool) -> f64 {
    let len = name.chars().count();
    let mut weight = BASE_WEIGHT;

    if is_camel_or_pascal(name) {
        if len >= LONG_IDENT_LEN {
            weight *= LONG_IDENT_BOOST;
        } else if len >= MEDIUM_IDENT_LEN {
            weight *= MEDIUM_IDENT_BOOST;
        }
    }

    if name.starts_with('_') {
        weight *= PRIVATE_PENALTY;
    }

    if definition_count > WIDE_DEF_THRESHOLD {
        weight *= WIDE_DEF_PENALTY;
    } else if definition_count > COMMON_DEF_THRESHOLD {
        weight *= COMMON_DEF_PENALTY;
    } else if definition_count > SHARED_DEF_THRESHOLD {
        weight *= SHARED_DEF_PENALTY;
    }

    if matches_feature {
        weight *= FEATURE_BOOST;
    }

    if is_hook_name(name) {
        weight *= HOOK_BOOST;
    }
    if is_utility_name(name) {
        weight *= UTILITY_BOOST;
    }
    if has_suffix(name, SCHEMA_SUFFIXES) {
        weight *= SCHEMA_BOOST;
    }
    if has_suffix(name, SERVICE_SUFFIXES) {
        weight *= SERVICE_BOOST;
    }

    if len <= SHORT_NAME_LEN {
        weight *= SHORT_NAME_PENALTY;
    }

    weight
}

/// Case-insensitive test of whether `name` relates to `feature`.
///
/// Besides the plain substring test, a feature ending in a common suffix
/// (`bookings`, `booking`, `booked`) also matches through its root, provided
/// the root keeps at least three characters.
#[must_use]
pub fn matches_feature(name: &str, feature: &str) -> bool {
    let feature = feature.trim().to_lowercase();
    if feature.is_empty() {
        return false;
    }
    let name = name.to_lowercase();
    if name.contains(&feature) {
        return true;
    }
    FEATURE_SUFFIXES.iter().any(|suffix| {
        feature
            .strip_suffix(suffix)
            .is_some_and(|root| root.chars().count() >= MIN_FEATURE_ROOT && name.contains(root))
    })
}

/// ASCII alphanumeric, starts with a letter, mixes upper and lower case.
fn is_camel_or_pascal(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && name.chars().all(|c| c.is_ascii_alphanumeric())
        && name.chars().any(|c| c.is_ascii_uppercase())
        && name.chars().any(|c| c.is_ascii_lowercase())
}

/// React-style hooks: `useBooking`, `useState`.
fn is_hook_name(name: &str) -> bool {
    name.strip_prefix("use")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

fn is_utility_name(name: &str) -> bool {
    has_suffix(name, UTILITY_SUFFIXES)
        || UTILITY_PREFIXES.iter().any(|prefix| {
            name.strip_prefix(prefix)
                .and_then(|rest| rest.chars().next())
                .is_some_and(|c| c.is_ascii_uppercase())
        })
}

fn has_suffix(name: &str, suffixes: &[&str]) -> bool {
    suffixes
        .iter()
        .any(|s| name.len() > s.len() && name.ends_with(s))
}
