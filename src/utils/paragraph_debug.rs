// src/utils/paragraph_debug.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::docx::Paragraph;
use crate::extractors::headings::HeadingSet;
use crate::extractors::heuristics::{looks_like_candidate_name, parse_numbered_entry};
use crate::utils::error::AppError;

/// Tags describing how the segmenter sees a paragraph.
pub fn paragraph_tags(text: &str, headings: &HeadingSet, max_name_chars: usize) -> Vec<String> {
    if text.is_empty() {
        return vec!["blank".to_string()];
    }

    let mut tags = Vec::new();
    if parse_numbered_entry(text).is_some() {
        tags.push("numbered".to_string());
    }
    if let Some(label) = headings.classify(text) {
        tags.push(format!("heading:{}", label));
    } else if looks_like_candidate_name(text, max_name_chars) {
        tags.push("name-like".to_string());
    }
    tags
}

/// Writes every paragraph as `[index] <tags> text` so boundary decisions can
/// be checked by eye against the source document.
pub fn save_paragraph_dump(
    paragraphs: &[Paragraph],
    headings: &HeadingSet,
    max_name_chars: usize,
    filename: &Path,
) -> Result<(), AppError> {
    let mut out = BufWriter::new(File::create(filename)?);

    writeln!(out, "# {} paragraphs", paragraphs.len())?;
    for p in paragraphs {
        let tags = paragraph_tags(&p.text, headings, max_name_chars);
        let tag_str = if tags.is_empty() {
            String::new()
        } else {
            format!("<{}> ", tags.join(","))
        };
        writeln!(out, "[{}] {}{}", p.index, tag_str, p.text)?;
    }
    out.flush()?;

    tracing::info!("Saved paragraph dump to {}", filename.display());
    Ok(())
}
