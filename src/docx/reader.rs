// src/docx/reader.rs

use std::path::Path;

use docx_rs::{
    read_docx, DocumentChild, InsertChild, Paragraph as DocxParagraph, ParagraphChild, Run,
    RunChild,
};

use crate::docx::models::Paragraph;
use crate::utils::error::DocxError;

/// Options controlling how paragraph text is pulled out of the package.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Drop text that sits inside `<w:hyperlink>` elements. Hyperlinked
    /// citations in the source document are noise inside a bio.
    pub strip_hyperlinks: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self { strip_hyperlinks: true }
    }
}

/// Reads the top-level body paragraphs of a .docx file.
pub fn read_paragraphs(path: &Path, options: ReadOptions) -> Result<Vec<Paragraph>, DocxError> {
    if !path.is_file() {
        return Err(DocxError::NotFound(path.display().to_string()));
    }

    let buffer = std::fs::read(path)?;
    tracing::debug!("Read {} bytes from {}", buffer.len(), path.display());

    let paragraphs = paragraphs_from_bytes(&buffer, options)?;
    tracing::info!("Loaded {} paragraphs from {}", paragraphs.len(), path.display());
    Ok(paragraphs)
}

/// Parses an in-memory .docx package into a paragraph stream.
/// Tables and other non-paragraph body children are skipped and do not
/// consume an index.
pub fn paragraphs_from_bytes(bytes: &[u8], options: ReadOptions) -> Result<Vec<Paragraph>, DocxError> {
    let document = read_docx(bytes).map_err(|e| DocxError::Parse(e.to_string()))?;

    let paragraphs = document
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(p) => Some(paragraph_text(p, options)),
            _ => None,
        })
        .enumerate()
        .map(|(index, text)| Paragraph::new(index, text))
        .collect();

    Ok(paragraphs)
}

/// Plain text of one paragraph, run by run.
pub fn paragraph_text(paragraph: &DocxParagraph, options: ReadOptions) -> String {
    let mut text = String::new();
    push_children_text(&paragraph.children, options, &mut text);
    text
}

fn push_children_text(children: &[ParagraphChild], options: ReadOptions, out: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run_text(run, out),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        push_run_text(run, out);
                    }
                }
            }
            ParagraphChild::Hyperlink(link) => {
                if options.strip_hyperlinks {
                    tracing::trace!("Skipping hyperlink run group");
                    continue;
                }
                push_children_text(&link.children, options, out);
            }
            _ => {} // Bookmarks, comments, deletions carry no visible text
        }
    }
}

fn push_run_text(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}
