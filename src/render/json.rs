// src/render/json.rs
use serde::Serialize;

use super::{display_path, signatures_of, RenderOptions, Renderer, SignatureMap};
use crate::error::Result;
use crate::graph::rank::RankedFile;
use crate::signatures::Signature;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct Document<'a> {
    files: Vec<FileEntry<'a>>,
}

#[derive(Serialize)]
struct FileEntry<'a> {
    path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<f64>,
    def_count: usize,
    ref_count: usize,
    signatures: Vec<SignatureEntry<'a>>,
}

/// A signature without its (redundant) file path.
#[derive(Serialize)]
struct SignatureEntry<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    symbol_type: &'static str,
    line: usize,
    text: &'a str,
    refs: usize,
}

impl<'a> From<&'a Signature> for SignatureEntry<'a> {
    fn from(sig: &'a Signature) -> Self {
        Self {
            name: &sig.name,
            symbol_type: sig.symbol_type.as_str(),
            line: sig.line,
            text: &sig.text,
            refs: sig.refs,
        }
    }
}

impl Renderer for JsonRenderer {
    fn render(&self, ranked: &[RankedFile], signatures: &SignatureMap, opts: &RenderOptions) -> Result<String> {
        if ranked.is_empty() {
            return Ok(String::new());
        }

        let files = ranked
            .iter()
            .map(|file| FileEntry {
                path: display_path(&file.path),
                rank: opts.show_scores.then_some(file.rank),
                def_count: file.def_count,
                ref_count: file.ref_count,
                signatures: signatures_of(signatures, file, opts)
                    .iter()
                    .map(SignatureEntry::from)
                    .collect(),
            })
            .collect();

        Ok(serde_json::to_string_pretty(&Document { files })?)
    }
}
