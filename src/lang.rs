use std::path::Path;
use tree_sitter::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Rust,
    Python,
    TypeScript,
    Tsx,
}

#[derive(Debug, Clone, Copy)]
pub enum QueryKind {
    Defs,
    Refs,
}

impl Lang {
    #[must_use]
    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext {
            "rs" => Some(Self::Rust),
            "py" => Some(Self::Python),
            "ts" | "mts" | "cts" | "js" | "mjs" | "cjs" => Some(Self::TypeScript),
            "tsx" | "jsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|s| s.to_str())
            .and_then(Self::from_ext)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Python => "python",
            Self::TypeScript => "typescript",
            Self::Tsx => "tsx",
        }
    }

    #[must_use]
    pub fn grammar(self) -> Language {
        match self {
            Self::Rust => tree_sitter_rust::language(),
            Self::Python => tree_sitter_python::language(),
            Self::TypeScript => tree_sitter_typescript::language_typescript(),
            Self::Tsx => tree_sitter_typescript::language_tsx(),
        }
    }

    // Indexing is safe: the row index is bounded by the query-set count and
    // query_idx by the QueryKind variant count.
    #[must_use]
    #[allow(clippy::indexing_slicing)]
    pub fn query(self, kind: QueryKind) -> &'static str {
        let row = match self {
            Self::Rust => 0,
            Self::Python => 1,
            Self::TypeScript | Self::Tsx => 2,
        };
        QUERIES[row][kind as usize]
    }

    #[must_use]
    pub fn q_defs(self) -> &'static str {
        self.query(QueryKind::Defs)
    }

    #[must_use]
    pub fn q_refs(self) -> &'static str {
        self.query(QueryKind::Refs)
    }
}

// [Rust, Python, TypeScript] x [Defs, Refs]
// Defs capture the name as @name and the declaring node as @def.
const QUERIES: [[&str; 2]; 3] = [
    // Rust
    [
        r"
            (function_item name: (identifier) @name) @def
            (struct_item name: (type_identifier) @name) @def
            (enum_item name: (type_identifier) @name) @def
            (trait_item name: (type_identifier) @name) @def
            (const_item name: (identifier) @name) @def
            (static_item name: (identifier) @name) @def
            (type_item name: (type_identifier) @name) @def
            (mod_item name: (identifier) @name) @def
        ", // Defs
        r"
            (call_expression function: (identifier) @ref)
            (call_expression function: (scoped_identifier name: (identifier) @ref))
            (call_expression function: (field_expression field: (field_identifier) @ref))
            (scoped_identifier path: (identifier) @ref)
            (macro_invocation macro: (identifier) @ref)
            (use_declaration argument: (scoped_identifier name: (identifier) @ref))
            (use_list (identifier) @ref)
            (use_list (scoped_identifier name: (identifier) @ref))
            (type_identifier) @ref
        ", // Refs
    ],
    // Python
    [
        r"
            (function_definition name: (identifier) @name) @def
            (class_definition name: (identifier) @name) @def
            (module (expression_statement (assignment left: (identifier) @name) @def))
        ", // Defs
        r"
            (call function: (identifier) @ref)
            (call function: (attribute attribute: (identifier) @ref))
            (import_from_statement name: (dotted_name (identifier) @ref))
            (aliased_import name: (dotted_name (identifier) @ref))
            (class_definition superclasses: (argument_list (identifier) @ref))
        ", // Refs
    ],
    // TypeScript / TSX
    [
        r"
            (function_declaration name: (identifier) @name) @def
            (class_declaration name: (type_identifier) @name) @def
            (abstract_class_declaration name: (type_identifier) @name) @def
            (interface_declaration name: (type_identifier) @name) @def
            (type_alias_declaration name: (type_identifier) @name) @def
            (enum_declaration name: (identifier) @name) @def
            (method_definition name: (property_identifier) @name) @def
            (lexical_declaration (variable_declarator name: (identifier) @name) @def)
        ", // Defs
        r"
            (call_expression function: (identifier) @ref)
            (call_expression function: (member_expression property: (property_identifier) @ref))
            (new_expression constructor: (identifier) @ref)
            (import_specifier name: (identifier) @ref)
            (type_identifier) @ref
        ", // Refs
    ],
];
