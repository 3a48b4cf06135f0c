// src/render/xml.rs
use std::fmt::Write;

use super::{display_path, signatures_of, RenderOptions, Renderer, SignatureMap};
use crate::error::Result;
use crate::graph::rank::RankedFile;

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

impl Renderer for XmlRenderer {
    fn render(&self, ranked: &[RankedFile], signatures: &SignatureMap, opts: &RenderOptions) -> Result<String> {
        let mut out = String::new();
        if ranked.is_empty() {
            return Ok(out);
        }

        writeln!(out, "<context_map>")?;
        for file in ranked {
            write_file(&mut out, file, signatures, opts)?;
        }
        writeln!(out, "</context_map>")?;
        Ok(out)
    }
}

fn write_file(out: &mut String, file: &RankedFile, signatures: &SignatureMap, opts: &RenderOptions) -> Result<()> {
    let path = escape(&display_path(&file.path));
    let score = if opts.show_scores {
        format!(" rank=\"{:.6}\"", file.rank)
    } else {
        String::new()
    };

    let sigs = signatures_of(signatures, file, opts);
    if sigs.is_empty() {
        writeln!(out, "  <file path=\"{path}\"{score} />")?;
        return Ok(());
    }

    writeln!(out, "  <file path=\"{path}\"{score}>")?;
    for sig in sigs {
        writeln!(
            out,
            "    <signature line=\"{}\" type=\"{}\" refs=\"{}\">{}</signature>",
            sig.line,
            sig.symbol_type.as_str(),
            sig.refs,
            escape(&sig.text)
        )?;
    }
    writeln!(out, "  </file>")?;
    Ok(())
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn test_xml_layout() {
        let out = XmlRenderer
            .render(&fixtures::ranked(), &fixtures::signatures(), &RenderOptions::default())
            .unwrap();
        assert!(out.starts_with("<context_map>\n"));
        assert!(out.trim_end().ends_with("</context_map>"));
        assert!(out.contains(
            "<signature line=\"4\" type=\"function\" refs=\"3\">function createBooking()</signature>"
        ));
        assert!(out.contains("<file path=\"src/util.ts\" />"));
        assert!(!out.contains("rank="));
    }

    #[test]
    fn test_escapes_generics() {
        let out = XmlRenderer
            .render(&fixtures::ranked(), &fixtures::signatures(), &RenderOptions::default())
            .unwrap();
        assert!(out.contains("interface Booking&lt;T&gt;"));
        assert!(!out.contains("Booking<T>"));
    }

    #[test]
    fn test_scores() {
        let opts = RenderOptions {
            show_scores: true,
            ..RenderOptions::default()
        };
        let out = XmlRenderer
            .render(&fixtures::ranked(), &fixtures::signatures(), &opts)
            .unwrap();
        assert!(out.contains("<file path=\"src/bookings/create.ts\" rank=\"0.420000\">"));
    }
}
