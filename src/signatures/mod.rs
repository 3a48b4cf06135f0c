// src/signatures/mod.rs
//! Exported-symbol signatures for ranked files.
//! Within a file, the most referenced symbols come first.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use crate::graph::rank::RankedFile;
use crate::graph::symbols::SymbolGraph;
use crate::graph::tags::SymbolType;

pub const MAX_SIGNATURES_PER_FILE: usize = 15;

/// One exported definition, rendered as a short declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub file: PathBuf,
    pub line: usize,
    pub text: String,
    #[serde(rename = "type")]
    pub symbol_type: SymbolType,
    pub name: String,
    pub exported: bool,
    /// References to this name across the whole graph.
    pub refs: usize,
}

/// Collects up to `max_per_file` exported signatures per ranked file.
///
/// Files keep their rank order. Files without exported definitions are left
/// out of the map.
#[must_use]
pub fn extract_signatures_for_ranked_files(
    graph: &SymbolGraph,
    ranked: &[RankedFile],
    max_per_file: usize,
) -> IndexMap<PathBuf, Vec<Signature>> {
    let mut out = IndexMap::new();

    for file in ranked {
        let sigs = file_signatures(graph, file, max_per_file);
        if !sigs.is_empty() {
            out.insert(file.path.clone(), sigs);
        }
    }

    tracing::debug!(files = out.len(), "extracted signatures");
    out
}

fn file_signatures(graph: &SymbolGraph, file: &RankedFile, max_per_file: usize) -> Vec<Signature> {
    let mut sigs: Vec<Signature> = graph
        .tags(&file.path)
        .iter()
        .filter(|t| t.is_def() && t.exported)
        .map(|t| Signature {
            file: file.path.clone(),
            line: t.line,
            text: format_tag_as_signature(&t.name, t.symbol_type),
            symbol_type: t.symbol_type,
            name: t.name.clone(),
            exported: true,
            refs: graph.reference_count(&t.name),
        })
        .collect();

    sigs.sort_by(|a, b| b.refs.cmp(&a.refs).then(a.line.cmp(&b.line)));
    sigs.truncate(max_per_file);
    sigs
}

/// Renders a definition as a one-line declaration.
#[must_use]
pub fn format_tag_as_signature(name: &str, symbol_type: SymbolType) -> String {
    match symbol_type {
        SymbolType::Function => format!("function {name}()"),
        SymbolType::Method => format!("{name}()"),
        SymbolType::Class => format!("class {name}"),
        SymbolType::Struct => format!("struct {name}"),
        SymbolType::Enum => format!("enum {name}"),
        SymbolType::Interface => format!("interface {name}"),
        SymbolType::Trait => format!("trait {name}"),
        SymbolType::Type => format!("type {name}"),
        SymbolType::Const => format!("const {name}"),
        SymbolType::Module => format!("mod {name}"),
        SymbolType::Other => name.to_string(),
    }
}

/// Coarse importance label for a `PageRank` score.
#[must_use]
pub fn rank_tier(rank: f64) -> &'static str {
    if rank >= 0.05 {
        "CORE"
    } else if rank >= 0.02 {
        "HIGH"
    } else if rank >= 0.01 {
        "MID"
    } else {
        "LOW"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tags::Tag;

    fn ranked(path: &str, rank: f64) -> RankedFile {
        RankedFile {
            path: PathBuf::from(path),
            rank,
            def_count: 0,
            ref_count: 0,
        }
    }

    #[test]
    fn test_format_table() {
        assert_eq!(format_tag_as_signature("load", SymbolType::Function), "function load()");
        assert_eq!(format_tag_as_signature("save", SymbolType::Method), "save()");
        assert_eq!(format_tag_as_signature("User", SymbolType::Class), "class User");
        assert_eq!(format_tag_as_signature("Engine", SymbolType::Struct), "struct Engine");
        assert_eq!(format_tag_as_signature("Mode", SymbolType::Enum), "enum Mode");
        assert_eq!(format_tag_as_signature("Props", SymbolType::Interface), "interface Props");
        assert_eq!(format_tag_as_signature("Render", SymbolType::Trait), "trait Render");
        assert_eq!(format_tag_as_signature("Id", SymbolType::Type), "type Id");
        assert_eq!(format_tag_as_signature("MAX", SymbolType::Const), "const MAX");
        assert_eq!(format_tag_as_signature("net", SymbolType::Module), "mod net");
        assert_eq!(format_tag_as_signature("thing", SymbolType::Other), "thing");
    }

    #[test]
    fn test_caps_and_orders_by_refs() {
        let mut graph = SymbolGraph::new();
        let defs: Vec<Tag> = (0..30)
            .map(|i| Tag::definition(format!("sym{i}"), i + 1, SymbolType::Function, true))
            .collect();
        graph.add_file("big.ts", defs);

        // sym29 gets 3 refs, sym10 gets 2, sym5 gets 1.
        let mut refs = Vec::new();
        for (name, count) in [("sym29", 3), ("sym10", 2), ("sym5", 1)] {
            for line in 0..count {
                refs.push(Tag::reference(name, line + 1));
            }
        }
        graph.add_file("user.ts", refs);

        let sigs = extract_signatures_for_ranked_files(&graph, &[ranked("big.ts", 0.5)], MAX_SIGNATURES_PER_FILE);
        let list = &sigs[&PathBuf::from("big.ts")];
        assert_eq!(list.len(), 15);
        assert_eq!(list[0].name, "sym29");
        assert_eq!(list[0].refs, 3);
        assert_eq!(list[1].name, "sym10");
        assert_eq!(list[2].name, "sym5");
        // Unreferenced symbols follow in line order.
        assert_eq!(list[3].name, "sym0");
        assert!(list.windows(2).all(|w| w[0].refs >= w[1].refs));
    }

    #[test]
    fn test_skips_private_and_empty_files() {
        let mut graph = SymbolGraph::new();
        graph.add_file(
            "a.rs",
            vec![
                Tag::definition("Public", 1, SymbolType::Struct, true),
                Tag::definition("hidden", 2, SymbolType::Function, false),
            ],
        );
        graph.add_file("b.rs", vec![Tag::reference("Public", 3)]);

        let sigs = extract_signatures_for_ranked_files(
            &graph,
            &[ranked("b.rs", 0.6), ranked("a.rs", 0.4)],
            MAX_SIGNATURES_PER_FILE,
        );
        assert_eq!(sigs.len(), 1);
        let list = &sigs[&PathBuf::from("a.rs")];
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text, "struct Public");
        assert_eq!(list[0].refs, 1);
    }

    #[test]
    fn test_preserves_rank_order() {
        let mut graph = SymbolGraph::new();
        graph.add_file("x.py", vec![Tag::definition("X", 1, SymbolType::Class, true)]);
        graph.add_file("y.py", vec![Tag::definition("Y", 1, SymbolType::Class, true)]);

        let sigs = extract_signatures_for_ranked_files(
            &graph,
            &[ranked("y.py", 0.7), ranked("x.py", 0.3)],
            MAX_SIGNATURES_PER_FILE,
        );
        let keys: Vec<_> = sigs.keys().cloned().collect();
        assert_eq!(keys, vec![PathBuf::from("y.py"), PathBuf::from("x.py")]);
    }

    #[test]
    fn test_serializes_type_key() {
        let sig = Signature {
            file: PathBuf::from("a.ts"),
            line: 3,
            text: "function go()".into(),
            symbol_type: SymbolType::Function,
            name: "go".into(),
            exported: true,
            refs: 0,
        };
        let json = serde_json::to_value(&sig).unwrap();
        assert_eq!(json["type"], "function");
        assert!(json.get("symbol_type").is_none());
    }
}
