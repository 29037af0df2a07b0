// src/docx/models.rs

/// One body paragraph of the source document.
///
/// `index` is the paragraph's position among the document's top-level
/// paragraphs (tables are not counted); `text` is whitespace-trimmed and may
/// be empty, since blank paragraphs separate entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub index: usize,
    pub text: String,
}

impl Paragraph {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into().trim().to_string(),
        }
    }
}

/// Builds a paragraph stream from plain lines, numbering them in order.
/// Handy for feeding text that did not come out of a .docx package.
#[cfg(test)]
pub fn paragraphs_from_lines<I, S>(lines: I) -> Vec<Paragraph>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| Paragraph::new(index, line.as_ref()))
        .collect()
}
