// src/graph/symbols.rs
//! The per-request symbol graph: tags per file plus name indices.

use std::path::{Path, PathBuf};

use indexmap::{IndexMap, IndexSet};

use super::tags::Tag;

/// Tags keyed by file, with definition and reference indices keyed by symbol.
///
/// All maps preserve insertion order, so everything derived from the graph
/// iterates in the order files were added.
#[derive(Debug, Clone, Default)]
pub struct SymbolGraph {
    pub(crate) file_to_tags: IndexMap<PathBuf, Vec<Tag>>,
    pub(crate) definitions: IndexMap<String, IndexSet<PathBuf>>,
    pub(crate) references: IndexMap<String, IndexSet<PathBuf>>,
}

impl SymbolGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from an extractor's raw output.
    ///
    /// Index paths missing from `file_to_tags` are registered as zero-tag files.
    #[must_use]
    pub fn from_parts(
        file_to_tags: IndexMap<PathBuf, Vec<Tag>>,
        definitions: IndexMap<String, IndexSet<PathBuf>>,
        references: IndexMap<String, IndexSet<PathBuf>>,
    ) -> Self {
        let mut graph = Self {
            file_to_tags,
            definitions,
            references,
        };
        let indexed: Vec<PathBuf> = graph
            .definitions
            .values()
            .chain(graph.references.values())
            .flatten()
            .cloned()
            .collect();
        for path in indexed {
            graph.ensure_file(&path);
        }
        graph
    }

    /// Adds a file's tags and indexes its definitions and references.
    /// Adding the same path twice appends to its tag list.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, tags: Vec<Tag>) {
        let path = path.into();
        for tag in &tags {
            let index = if tag.is_def() {
                &mut self.definitions
            } else {
                &mut self.references
            };
            index.entry(tag.name.clone()).or_default().insert(path.clone());
        }
        self.file_to_tags.entry(path).or_default().extend(tags);
    }

    /// Registers `path` as a zero-tag file if it is unknown.
    /// Returns true if the path was newly added.
    pub fn ensure_file(&mut self, path: &Path) -> bool {
        if self.file_to_tags.contains_key(path) {
            return false;
        }
        self.file_to_tags.insert(path.to_path_buf(), Vec::new());
        true
    }

    #[must_use]
    pub fn file_count(&self) -> usize {
        self.file_to_tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_to_tags.is_empty()
    }

    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.file_to_tags.keys()
    }

    #[must_use]
    pub fn tags(&self, path: &Path) -> &[Tag] {
        self.file_to_tags.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Files defining `symbol`, in insertion order.
    #[must_use]
    pub fn definitions_of(&self, symbol: &str) -> Option<&IndexSet<PathBuf>> {
        self.definitions.get(symbol)
    }

    /// Files referencing `symbol`, in insertion order.
    #[must_use]
    pub fn references_to(&self, symbol: &str) -> Option<&IndexSet<PathBuf>> {
        self.references.get(symbol)
    }

    /// Number of reference tags naming `symbol` across all files, duplicates included.
    #[must_use]
    pub fn reference_count(&self, symbol: &str) -> usize {
        let Some(files) = self.references.get(symbol) else {
            return 0;
        };
        files
            .iter()
            .map(|f| self.count_refs_in(f, symbol))
            .sum()
    }

    pub(crate) fn count_refs_in(&self, path: &Path, symbol: &str) -> usize {
        self.tags(path)
            .iter()
            .filter(|t| t.is_ref() && t.name == symbol)
            .count()
    }

    /// Files whose definitions `anchor` references.
    #[must_use]
    pub fn dependencies(&self, anchor: &Path) -> Vec<PathBuf> {
        let mut result = IndexSet::new();
        for (symbol, ref_files) in &self.references {
            if ref_files.contains(anchor) {
                collect_others(self.definitions.get(symbol), anchor, &mut result);
            }
        }
        sorted(result)
    }

    /// Files that reference definitions in `anchor`.
    #[must_use]
    pub fn dependents(&self, anchor: &Path) -> Vec<PathBuf> {
        let mut result = IndexSet::new();
        for (symbol, def_files) in &self.definitions {
            if def_files.contains(anchor) {
                collect_others(self.references.get(symbol), anchor, &mut result);
            }
        }
        sorted(result)
    }
}

fn collect_others(files: Option<&IndexSet<PathBuf>>, anchor: &Path, result: &mut IndexSet<PathBuf>) {
    let Some(files) = files else {
        return;
    };
    for f in files {
        if f != anchor {
            result.insert(f.clone());
        }
    }
}

fn sorted(set: IndexSet<PathBuf>) -> Vec<PathBuf> {
    let mut out: Vec<_> = set.into_iter().collect();
    out.sort();
    out
}
