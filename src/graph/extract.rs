// src/graph/extract.rs
//! Tag extraction and symbol graph construction from a project root.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tree_sitter::{Node, Parser, Query, QueryCursor, Tree};

use super::symbols::SymbolGraph;
use super::tags::{SymbolType, Tag, TagKind};
use crate::discovery::{self, ScanOptions};
use crate::error::{MapError, Result};
use crate::lang::Lang;

/// Produces the tags of one source file.
///
/// Implementations must be pure with respect to their inputs; files are
/// extracted in parallel.
pub trait TagExtractor: Sync {
    /// Returns true if this extractor understands the file.
    fn supports(&self, path: &Path) -> bool;

    /// Extracts definitions and references from `content`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be analysed at all.
    fn extract(&self, path: &Path, content: &str) -> Result<Vec<Tag>>;
}

/// Tree-sitter backed extractor for Rust, Python and TypeScript/TSX.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterExtractor;

impl TagExtractor for TreeSitterExtractor {
    fn supports(&self, path: &Path) -> bool {
        Lang::from_path(path).is_some()
    }

    fn extract(&self, path: &Path, content: &str) -> Result<Vec<Tag>> {
        let Some(lang) = Lang::from_path(path) else {
            return Ok(Vec::new());
        };
        let Some(tree) = parse_source(content, lang) else {
            return Ok(Vec::new());
        };

        let defs = extract_defs(lang, &tree, content)?;
        let def_ranges: HashSet<(usize, usize)> = defs.iter().map(|(_, r)| *r).collect();
        let refs = extract_refs(lang, &tree, content, &def_ranges)?;

        let mut tags: Vec<Tag> = defs.into_iter().map(|(t, _)| t).chain(refs).collect();
        tags.sort_by_key(|t| (t.line, t.kind == TagKind::Reference));
        Ok(tags)
    }
}

/// Scans `root` and builds the symbol graph with the tree-sitter extractor.
///
/// # Errors
/// Returns error if `root` cannot be scanned.
pub fn build_symbol_graph(root: &Path, opts: &ScanOptions) -> Result<SymbolGraph> {
    build_symbol_graph_with(root, opts, &TreeSitterExtractor)
}

/// Scans `root` and builds the symbol graph with a custom extractor.
///
/// Unreadable files are skipped. Files whose extraction fails are kept as
/// zero-tag nodes.
///
/// # Errors
/// Returns error if `root` cannot be scanned.
pub fn build_symbol_graph_with<E: TagExtractor>(
    root: &Path,
    opts: &ScanOptions,
    extractor: &E,
) -> Result<SymbolGraph> {
    let files: Vec<PathBuf> = discovery::discover(root, opts)?
        .into_iter()
        .filter(|p| extractor.supports(p))
        .collect();

    let extracted: Vec<(PathBuf, Vec<Tag>)> = files
        .par_iter()
        .filter_map(|rel| extract_file(root, rel, extractor))
        .collect();

    let mut graph = SymbolGraph::new();
    for (path, tags) in extracted {
        graph.add_file(path, tags);
    }

    tracing::debug!(
        files = graph.file_count(),
        symbols = graph.definitions.len(),
        "built symbol graph"
    );
    Ok(graph)
}

fn extract_file<E: TagExtractor>(root: &Path, rel: &Path, extractor: &E) -> Option<(PathBuf, Vec<Tag>)> {
    let content = match fs::read_to_string(root.join(rel)) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(path = %rel.display(), "skipping unreadable file: {e}");
            return None;
        }
    };
    let tags = extractor.extract(rel, &content).unwrap_or_else(|e| {
        tracing::warn!(path = %rel.display(), "tag extraction failed: {e}");
        Vec::new()
    });
    Some((rel.to_path_buf(), tags))
}

fn parse_source(source: &str, lang: Lang) -> Option<Tree> {
    let mut parser = Parser::new();
    parser.set_language(lang.grammar()).ok()?;
    parser.parse(source, None)
}

fn compile_query(lang: Lang, pattern: &str) -> Result<Query> {
    Query::new(lang.grammar(), pattern).map_err(|e| MapError::Query {
        lang: lang.name(),
        message: e.message,
    })
}

type ByteRange = (usize, usize);

fn extract_defs(lang: Lang, tree: &Tree, source: &str) -> Result<Vec<(Tag, ByteRange)>> {
    let query = compile_query(lang, lang.q_defs())?;
    let name_idx = query.capture_index_for_name("name").unwrap_or(0);
    let def_idx = query.capture_index_for_name("def").unwrap_or(0);

    let mut cursor = QueryCursor::new();
    let mut defs = Vec::new();
    for m in cursor.matches(&query, tree.root_node(), source.as_bytes()) {
        let name = m.captures.iter().find(|c| c.index == name_idx).map(|c| c.node);
        let def = m.captures.iter().find(|c| c.index == def_idx).map(|c| c.node);
        let (Some(name), Some(def)) = (name, def) else {
            continue;
        };
        if let Some(tag) = build_def(lang, name, def, source) {
            defs.push((tag, (name.start_byte(), name.end_byte())));
        }
    }
    Ok(defs)
}

fn build_def(lang: Lang, name_node: Node, def: Node, source: &str) -> Option<Tag> {
    let name = name_node.utf8_text(source.as_bytes()).ok()?;
    if is_nested_binding(def) {
        return None;
    }
    let symbol_type = classify(lang, def);
    let exported = is_exported(lang, def, name, source);
    Some(Tag::definition(name, def.start_position().row + 1, symbol_type, exported))
}

fn extract_refs(
    lang: Lang,
    tree: &Tree,
    source: &str,
    def_ranges: &HashSet<ByteRange>,
) -> Result<Vec<Tag>> {
    let query = compile_query(lang, lang.q_refs())?;
    let mut cursor = QueryCursor::new();
    let mut refs = Vec::new();
    let mut seen: HashSet<ByteRange> = HashSet::new();

    for m in cursor.matches(&query, tree.root_node(), source.as_bytes()) {
        for capture in m.captures {
            let node = capture.node;
            let range = (node.start_byte(), node.end_byte());
            // Overlapping patterns can capture the same node twice.
            if def_ranges.contains(&range) || !seen.insert(range) {
                continue;
            }
            if let Ok(text) = node.utf8_text(source.as_bytes()) {
                refs.push(Tag::reference(text, node.start_position().row + 1));
            }
        }
    }
    Ok(refs)
}

/// `let`/`const` bindings only count when declared at module level.
fn is_nested_binding(def: Node) -> bool {
    if def.kind() != "variable_declarator" {
        return false;
    }
    let grandparent = def.parent().and_then(|p| p.parent());
    !matches!(grandparent.map(|g| g.kind()), Some("program" | "export_statement"))
}

fn classify(lang: Lang, def: Node) -> SymbolType {
    match def.kind() {
        "function_item" if enclosed_by(def, &["impl_item", "trait_item"]) => SymbolType::Method,
        "function_definition" if lang == Lang::Python && enclosed_by(def, &["class_definition"]) => {
            SymbolType::Method
        }
        "function_item" | "function_definition" | "function_declaration" => SymbolType::Function,
        "method_definition" => SymbolType::Method,
        "class_definition" | "class_declaration" | "abstract_class_declaration" => SymbolType::Class,
        "struct_item" => SymbolType::Struct,
        "enum_item" | "enum_declaration" => SymbolType::Enum,
        "interface_declaration" => SymbolType::Interface,
        "trait_item" => SymbolType::Trait,
        "type_item" | "type_alias_declaration" => SymbolType::Type,
        "const_item" | "static_item" | "assignment" => SymbolType::Const,
        "mod_item" => SymbolType::Module,
        "variable_declarator" => classify_binding(def),
        _ => SymbolType::Other,
    }
}

fn classify_binding(def: Node) -> SymbolType {
    let value = def.child_by_field_name("value").map(|v| v.kind());
    match value {
        Some("arrow_function" | "function" | "function_expression") => SymbolType::Function,
        _ => SymbolType::Const,
    }
}

fn enclosed_by(node: Node, kinds: &[&str]) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if kinds.contains(&n.kind()) {
            return true;
        }
        current = n.parent();
    }
    false
}

fn is_exported(lang: Lang, def: Node, name: &str, source: &str) -> bool {
    match lang {
        Lang::Rust => is_rust_public(def, source),
        Lang::Python => !name.starts_with('_'),
        Lang::TypeScript | Lang::Tsx => is_ts_exported(def, source),
    }
}

fn is_ts_exported(def: Node, source: &str) -> bool {
    match def.kind() {
        "method_definition" => {
            let private = (0..def.child_count())
                .filter_map(|i| def.child(i))
                .filter(|c| c.kind() == "accessibility_modifier")
                .any(|c| c.utf8_text(source.as_bytes()).is_ok_and(|t| t == "private"));
            let class = def.parent().and_then(|body| body.parent());
            !private && class.is_some_and(|c| is_export_parent(c.parent()))
        }
        "variable_declarator" => is_export_parent(def.parent().and_then(|p| p.parent())),
        _ => is_export_parent(def.parent()),
    }
}

fn is_export_parent(parent: Option<Node>) -> bool {
    parent.is_some_and(|p| p.kind() == "export_statement")
}

/// Only a bare `pub` exports. A restricted `pub(..)` does not.
fn is_rust_public(def: Node, source: &str) -> bool {
    (0..def.child_count())
        .filter_map(|i| def.child(i))
        .filter(|c| c.kind() == "visibility_modifier")
        .any(|c| c.utf8_text(source.as_bytes()).is_ok_and(|t| t == "pub"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(path: &str, code: &str) -> Vec<Tag> {
        TreeSitterExtractor.extract(Path::new(path), code).unwrap()
    }

    fn def<'a>(tags: &'a [Tag], name: &str) -> Option<&'a Tag> {
        tags.iter().find(|t| t.kind == TagKind::Definition && t.name == name)
    }

    #[test]
    fn test_rust_defs_and_visibility() {
        let code = "pub struct User { name: String }\nfn helper() -> bool { true }\nimpl User {\n    pub fn new() -> Self { todo!() }\n}";
        let tags = extract("lib.rs", code);

        let user = def(&tags, "User").unwrap();
        assert_eq!(user.symbol_type, SymbolType::Struct);
        assert!(user.exported);
        assert_eq!(user.line, 1);

        let helper = def(&tags, "helper").unwrap();
        assert_eq!(helper.symbol_type, SymbolType::Function);
        assert!(!helper.exported);

        let new = def(&tags, "new").unwrap();
        assert_eq!(new.symbol_type, SymbolType::Method);
        assert!(new.exported);
    }

    #[test]
    fn test_rust_restricted_visibility_not_exported() {
        let code = "pub fn open() {}\npub(crate) fn internal() {}\npub(super) struct Parent;\npub(in crate::graph) enum Scoped { A }";
        let tags = extract("vis.rs", code);
        assert!(def(&tags, "open").unwrap().exported);
        assert!(!def(&tags, "internal").unwrap().exported);
        assert!(!def(&tags, "Parent").unwrap().exported);
        assert!(!def(&tags, "Scoped").unwrap().exported);
    }

    #[test]
    fn test_rust_refs_skip_definition_names() {
        let code = "use crate::config::Config;\npub struct App { config: Config }\nfn run() { load_config(); }";
        let tags = extract("app.rs", code);
        let refs: Vec<_> = tags.iter().filter(|t| t.is_ref()).map(|t| t.name.as_str()).collect();
        assert!(refs.contains(&"Config"));
        assert!(refs.contains(&"load_config"));
        assert!(!refs.contains(&"App"));
    }

    #[test]
    fn test_python_defs() {
        let code = "class UserService:\n    def create(self):\n        pass\n\ndef _private():\n    return helper()\n\nLIMIT = 10\n";
        let tags = extract("service.py", code);

        assert_eq!(def(&tags, "UserService").unwrap().symbol_type, SymbolType::Class);
        assert_eq!(def(&tags, "create").unwrap().symbol_type, SymbolType::Method);
        assert!(!def(&tags, "_private").unwrap().exported);
        assert_eq!(def(&tags, "LIMIT").unwrap().symbol_type, SymbolType::Const);
        assert!(tags.iter().any(|t| t.is_ref() && t.name == "helper"));
    }

    #[test]
    fn test_typescript_exports() {
        let code = r"
export function createBooking(input: BookingInput) { return save(input); }
function internal() {}
export const useBooking = () => createBooking({});
export interface BookingInput { id: string }
export class BookingService {
  list() { return []; }
  private secret() {}
}
function outer() { const inner = 1; }
";
        let tags = extract("booking.ts", code);

        let create = def(&tags, "createBooking").unwrap();
        assert!(create.exported);
        assert_eq!(create.symbol_type, SymbolType::Function);
        assert!(!def(&tags, "internal").unwrap().exported);
        assert_eq!(def(&tags, "useBooking").unwrap().symbol_type, SymbolType::Function);
        assert_eq!(def(&tags, "BookingInput").unwrap().symbol_type, SymbolType::Interface);
        assert!(def(&tags, "list").unwrap().exported);
        assert!(!def(&tags, "secret").unwrap().exported);
        assert!(def(&tags, "inner").is_none());

        assert!(tags.iter().any(|t| t.is_ref() && t.name == "save"));
        assert!(tags.iter().any(|t| t.is_ref() && t.name == "BookingInput"));
    }

    #[test]
    fn test_unsupported_file_yields_nothing() {
        assert!(extract("notes.md", "# hi").is_empty());
    }
}
