//! Word Document Text Extraction
//!
//! Reads every paragraph's text via docx-rs and joins them with newlines.

use std::path::Path;

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::types::{DocError, Result};

/// Extract paragraph text from a .docx file, one line per paragraph.
pub fn extract(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;

    let doc = docx_rs::read_docx(&bytes).map_err(|e| {
        DocError::Extraction(format!("cannot parse DOCX {}: {}", path.display(), e))
    })?;

    let mut paragraphs = Vec::new();
    for child in &doc.document.children {
        if let DocumentChild::Paragraph(para) = child {
            paragraphs.push(paragraph_text(para));
        }
    }

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        match child {
            ParagraphChild::Run(run) => collect_run(run, &mut text),
            ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let ParagraphChild::Run(run) = inner {
                        collect_run(run, &mut text);
                    }
                }
            }
            _ => {}
        }
    }
    text
}

fn collect_run(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        if let RunChild::Text(t) = child {
            out.push_str(&t.text);
        }
    }
}
