// src/graph/tags.rs
//! Symbol occurrence records produced by extraction.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    Definition,
    Reference,
}

/// What a definition declares. References carry `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolType {
    Function,
    Method,
    Class,
    Struct,
    Enum,
    Interface,
    Trait,
    Type,
    Const,
    Module,
    Other,
}

impl SymbolType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Method => "method",
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Enum => "enum",
            Self::Interface => "interface",
            Self::Trait => "trait",
            Self::Type => "type",
            Self::Const => "const",
            Self::Module => "module",
            Self::Other => "other",
        }
    }
}

/// One occurrence of a symbol in a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub kind: TagKind,
    /// 1-based source line.
    pub line: usize,
    pub exported: bool,
    pub symbol_type: SymbolType,
}

impl Tag {
    #[must_use]
    pub fn definition(name: impl Into<String>, line: usize, symbol_type: SymbolType, exported: bool) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::Definition,
            line,
            exported,
            symbol_type,
        }
    }

    #[must_use]
    pub fn reference(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            kind: TagKind::Reference,
            line,
            exported: false,
            symbol_type: SymbolType::Other,
        }
    }

    #[must_use]
    pub fn is_def(&self) -> bool {
        self.kind == TagKind::Definition
    }

    #[must_use]
    pub fn is_ref(&self) -> bool {
        self.kind == TagKind::Reference
    }
}
