// src/discovery.rs
use crate::config::{GENERATED_PATTERN, PRUNE_DIRS, SECRET_PATTERN};
use crate::error::{MapError, Result};
use crate::lang::Lang;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

/// Directory filters for a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Root-relative directories the scan is limited to. Empty means everything.
    pub include: Vec<String>,
    /// Directory names pruned wherever they appear.
    pub exclude: Vec<String>,
    pub exclude_patterns: Vec<Regex>,
}

/// Lists the source files under `root` that an extractor can read.
/// Returned paths are relative to `root` and sorted.
///
/// # Errors
/// Returns error if `root` is not a directory.
pub fn discover(root: &Path, opts: &ScanOptions) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(MapError::io(
            std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
            root,
        ));
    }

    let raw_files = walk_filesystem(root, opts);
    let mut files: Vec<PathBuf> = raw_files
        .into_iter()
        .filter(|p| is_source_file(p))
        .filter(|p| is_included(p, &opts.include))
        .collect();
    filter_patterns(&mut files, &opts.exclude_patterns);
    files.sort();

    tracing::debug!(root = %root.display(), count = files.len(), "discovered source files");
    Ok(files)
}

fn walk_filesystem(root: &Path, opts: &ScanOptions) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !should_prune(&e.file_name().to_string_lossy(), opts));

    let (paths, error_count) = accumulate_walker(walker, root);
    if error_count > 0 {
        tracing::warn!("encountered {error_count} errors during file walk");
    }
    paths
}

fn accumulate_walker<I>(walker: I, root: &Path) -> (Vec<PathBuf>, usize)
where
    I: Iterator<Item = walkdir::Result<walkdir::DirEntry>>,
{
    let mut paths = Vec::new();
    let mut errors = 0;
    for item in walker {
        match item {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    let p = entry.path().strip_prefix(root).unwrap_or(entry.path());
                    paths.push(p.to_path_buf());
                }
            }
            Err(_) => errors += 1,
        }
    }
    (paths, errors)
}

fn should_prune(name: &str, opts: &ScanOptions) -> bool {
    PRUNE_DIRS.contains(&name) || opts.exclude.iter().any(|e| e == name)
}

static SECRET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(SECRET_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));
static GENERATED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(GENERATED_PATTERN).unwrap_or_else(|_| panic!("Invalid Regex")));

fn is_source_file(path: &Path) -> bool {
    let s = normalize_path(path);
    if SECRET_RE.is_match(&s) || GENERATED_RE.is_match(&s) {
        return false;
    }
    Lang::from_path(path).is_some()
}

fn is_included(path: &Path, include: &[String]) -> bool {
    if include.is_empty() {
        return true;
    }
    include.iter().any(|dir| {
        let dir = dir.trim_start_matches("./").trim_end_matches('/');
        dir.is_empty() || path.starts_with(dir)
    })
}

/// Normalizes a path to use forward slashes (cross-platform pattern matching).
#[must_use]
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

fn filter_patterns(paths: &mut Vec<PathBuf>, exclude: &[Regex]) {
    if exclude.is_empty() {
        return;
    }
    paths.retain(|p| {
        let s = normalize_path(p);
        !exclude.iter().any(|re| re.is_match(&s))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "x").unwrap();
    }

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/main.rs");
        touch(dir.path(), "src/api/routes.ts");
        touch(dir.path(), "src/api/routes.d.ts");
        touch(dir.path(), "lib/util.py");
        touch(dir.path(), "node_modules/pkg/index.ts");
        touch(dir.path(), "README.md");
        touch(dir.path(), ".env");
        dir
    }

    #[test]
    fn test_discovers_supported_sources_only() {
        let dir = fixture();
        let files = discover(dir.path(), &ScanOptions::default()).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("lib/util.py"),
                PathBuf::from("src/api/routes.ts"),
                PathBuf::from("src/main.rs"),
            ]
        );
    }

    #[test]
    fn test_include_and_exclude_dirs() {
        let dir = fixture();
        let opts = ScanOptions {
            include: vec!["src".into()],
            exclude: vec!["api".into()],
            exclude_patterns: Vec::new(),
        };
        let files = discover(dir.path(), &opts).unwrap();
        assert_eq!(files, vec![PathBuf::from("src/main.rs")]);
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = fixture();
        let opts = ScanOptions {
            exclude_patterns: vec![Regex::new(r"\.py$").unwrap()],
            ..ScanOptions::default()
        };
        let files = discover(dir.path(), &opts).unwrap();
        assert!(!files.iter().any(|f| f.ends_with("util.py")));
    }

    #[test]
    fn test_walk_errors_are_counted_not_raised() {
        let dir = fixture();
        let walker = WalkDir::new(dir.path().join("vanished")).into_iter();
        let (paths, errors) = accumulate_walker(walker, dir.path());
        assert!(paths.is_empty());
        assert_eq!(errors, 1);
    }

    #[test]
    fn test_missing_root_is_error() {
        let result = discover(Path::new("/definitely/not/here"), &ScanOptions::default());
        assert!(matches!(result, Err(MapError::Io { .. })));
    }
}
