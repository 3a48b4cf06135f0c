// src/render/text.rs
use std::fmt::Write;

use super::{display_path, signatures_of, RenderOptions, Renderer, SignatureMap};
use crate::error::Result;
use crate::graph::rank::RankedFile;
use crate::signatures::rank_tier;

/// Markdown: one heading per file, one bullet per signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn render(&self, ranked: &[RankedFile], signatures: &SignatureMap, opts: &RenderOptions) -> Result<String> {
        let mut out = String::new();
        if ranked.is_empty() {
            return Ok(out);
        }

        writeln!(out, "# Repository Map")?;
        for file in ranked {
            write_file(&mut out, file, signatures, opts)?;
        }
        Ok(out)
    }
}

fn write_file(out: &mut String, file: &RankedFile, signatures: &SignatureMap, opts: &RenderOptions) -> Result<()> {
    let path = display_path(&file.path);
    if opts.show_scores {
        writeln!(out, "\n## {path} [{} {:.4}]", rank_tier(file.rank), file.rank)?;
    } else {
        writeln!(out, "\n## {path}")?;
    }

    for sig in signatures_of(signatures, file, opts) {
        if sig.refs > 0 {
            writeln!(out, "- {} (L{}, {} refs)", sig.text, sig.line, sig.refs)?;
        } else {
            writeln!(out, "- {} (L{})", sig.text, sig.line)?;
        }
    }
    Ok(())
}
