// src/render/mod.rs
//! Output formats for a fitted context map.

mod json;
mod text;
mod xml;

pub use json::JsonRenderer;
pub use text::TextRenderer;
pub use xml::XmlRenderer;

use std::path::PathBuf;

use clap::ValueEnum;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::graph::rank::RankedFile;
use crate::signatures::{Signature, MAX_SIGNATURES_PER_FILE};

/// Signatures keyed by file, in rank order.
pub type SignatureMap = IndexMap<PathBuf, Vec<Signature>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown-style headings and bullet lists.
    #[default]
    Text,
    Xml,
    Json,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub max_signatures_per_file: usize,
    pub show_scores: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_signatures_per_file: MAX_SIGNATURES_PER_FILE,
            show_scores: false,
        }
    }
}

/// Turns ranked files and their signatures into the final text.
///
/// Output for a longer prefix of `ranked` must never be shorter than for a
/// shorter one; the budget fitter relies on it.
pub trait Renderer {
    /// # Errors
    /// Returns an error if the document cannot be written.
    fn render(&self, ranked: &[RankedFile], signatures: &SignatureMap, opts: &RenderOptions) -> Result<String>;
}

#[must_use]
pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Xml => Box::new(XmlRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// `/`-separated display form of a path.
pub(crate) fn display_path(path: &std::path::Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// The signatures of `file`, capped for display.
pub(crate) fn signatures_of<'a>(
    signatures: &'a SignatureMap,
    file: &RankedFile,
    opts: &RenderOptions,
) -> &'a [Signature] {
    let all = signatures.get(&file.path).map(Vec::as_slice).unwrap_or(&[]);
    &all[..all.len().min(opts.max_signatures_per_file)]
}
