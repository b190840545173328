//! Slide Deck Text Extraction
//!
//! A .pptx file is a zip container; each slide lives at
//! `ppt/slides/slideN.xml` with text runs in `<a:t>` elements. Text is
//! collected per paragraph across every slide in deck order and joined with
//! newlines.

use std::io::Read;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::types::{DocError, Result};

/// Extract all shape text from every slide of a .pptx file.
pub fn extract(path: &Path) -> Result<String> {
    let file = std::fs::File::open(path)?;
    let mut archive = zip::ZipArchive::new(file).map_err(|e| {
        DocError::Extraction(format!("cannot open PPTX {}: {}", path.display(), e))
    })?;

    // Slide order: entry names are slide1.xml, slide2.xml, ... slide10.xml,
    // so lexicographic order is wrong; sort by the numeric index.
    let mut slides: Vec<(u32, String)> = archive
        .file_names()
        .filter_map(|name| slide_index(name).map(|idx| (idx, name.to_string())))
        .collect();
    slides.sort_by_key(|(idx, _)| *idx);

    let mut lines = Vec::new();
    for (_, name) in slides {
        let mut xml = String::new();
        archive
            .by_name(&name)
            .map_err(|e| DocError::Extraction(format!("cannot read slide {}: {}", name, e)))?
            .read_to_string(&mut xml)?;
        collect_slide_text(&xml, &mut lines)?;
    }

    Ok(lines.join("\n"))
}

/// Parse the numeric index out of `ppt/slides/slideN.xml`, if this entry is one.
fn slide_index(name: &str) -> Option<u32> {
    name.strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// Accumulate one line per `<a:p>` paragraph, concatenating its `<a:t>` runs.
fn collect_slide_text(xml: &str, lines: &mut Vec<String>) -> Result<()> {
    // No trim_text: whitespace inside <a:t> runs is significant, and text
    // events outside a run are ignored anyway.
    let mut reader = Reader::from_str(xml);

    let mut in_text_run = false;
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"a:t" => in_text_run = true,
            Ok(Event::Text(t)) if in_text_run => {
                let text = t
                    .unescape()
                    .map_err(|e| DocError::Extraction(format!("bad slide XML: {}", e)))?;
                current.push_str(&text);
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"a:t" => in_text_run = false,
                b"a:p" => {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(DocError::Extraction(format!("bad slide XML: {}", e)));
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    Ok(())
}
