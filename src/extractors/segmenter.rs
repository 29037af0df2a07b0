// src/extractors/segmenter.rs

// --- Imports ---
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::docx::Paragraph;
use crate::extractors::headings::HeadingSet;
use crate::extractors::heuristics::{
    looks_like_candidate_name, parse_numbered_entry, DEFAULT_MAX_NAME_LINE_CHARS,
};
use crate::extractors::normalize::{display_name, normalize_name};
use crate::extractors::sections::{split_sections, Section, SectionFallback};

// --- Configuration ---

/// How candidate entries are located in the paragraph stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EntryMode {
    /// Numbered entries when some `<n>. <name>` line names a candidate
    /// exactly (or by normalized key); direct name paragraphs otherwise and
    /// for candidates without a numbered entry.
    #[default]
    Auto,
    /// Only `<n>. <name>` lines start an entry.
    Numbered,
    /// Only a paragraph that is exactly the candidate's name starts an entry.
    Direct,
}

#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    pub headings: HeadingSet,
    pub mode: EntryMode,
    pub fallback: SectionFallback,
    pub max_name_line_chars: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            headings: HeadingSet::default(),
            mode: EntryMode::default(),
            fallback: SectionFallback::default(),
            max_name_line_chars: DEFAULT_MAX_NAME_LINE_CHARS,
        }
    }
}

// --- Data Structures ---

/// Which matching pass found the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    Exact,
    CaseInsensitive,
    Substring,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentEntry {
    pub candidate: String,
    /// Document index of the anchor paragraph.
    pub anchor_index: usize,
    /// Name text as it appears in the document.
    pub name_text: String,
    pub body: String,
    pub match_kind: MatchKind,
    pub numbered: bool,
}

/// Result of one segmentation pass. Every candidate either has its
/// normalized key in `entries` or is listed in `unmatched`, never both.
/// Spellings sharing a key share the entry.
#[derive(Debug, Default)]
pub struct Segmentation {
    /// Keyed by normalized candidate name.
    pub entries: BTreeMap<String, DocumentEntry>,
    pub unmatched: Vec<String>,
}

/// A `<n>. <name>` entry with its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberedEntry {
    pub position: usize,
    pub name: String,
    pub body: String,
}

// --- Segmenter ---
pub struct BioSegmenter {
    config: SegmenterConfig,
}

impl BioSegmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SegmenterConfig {
        &self.config
    }

    /// Finds an entry for each candidate. Candidates sharing a normalized key
    /// are located once, by the first spelling; later spellings share the
    /// outcome.
    pub fn segment(&self, paragraphs: &[Paragraph], candidates: &[String]) -> Segmentation {
        let numbered = match self.config.mode {
            EntryMode::Direct => Vec::new(),
            EntryMode::Numbered => self.numbered_entries(paragraphs),
            EntryMode::Auto => {
                let entries = self.numbered_entries(paragraphs);
                if is_numbered_document(&entries, candidates) {
                    entries
                } else {
                    tracing::debug!("No numbered line names a candidate, using direct anchors only");
                    Vec::new()
                }
            }
        };
        tracing::debug!("Using {} numbered entries from {} paragraphs", numbered.len(), paragraphs.len());

        let mut result = Segmentation::default();
        let mut unmatched_keys = HashSet::new();

        for candidate in candidates {
            let key = normalize_name(candidate);
            if result.entries.contains_key(&key) {
                tracing::debug!("'{}' shares key '{}' with an earlier spelling", candidate, key);
                continue;
            }
            if unmatched_keys.contains(&key) {
                result.unmatched.push(candidate.clone());
                continue;
            }

            match self.locate(paragraphs, &numbered, candidate) {
                Some(entry) => {
                    tracing::debug!(
                        "Matched '{}' to '{}' at paragraph {} ({:?})",
                        candidate,
                        entry.name_text,
                        entry.anchor_index,
                        entry.match_kind
                    );
                    result.entries.insert(key, entry);
                }
                None => {
                    tracing::debug!("No entry found for '{}'", candidate);
                    unmatched_keys.insert(key);
                    result.unmatched.push(candidate.clone());
                }
            }
        }

        result
    }

    fn locate(&self, paragraphs: &[Paragraph], numbered: &[NumberedEntry], candidate: &str) -> Option<DocumentEntry> {
        let from_numbered = || {
            match_numbered_entry(numbered, candidate).map(|(entry, kind)| DocumentEntry {
                candidate: candidate.to_string(),
                anchor_index: paragraphs[entry.position].index,
                name_text: entry.name.clone(),
                body: entry.body.clone(),
                match_kind: kind,
                numbered: true,
            })
        };
        let from_direct = || {
            self.find_anchor(paragraphs, candidate).map(|(pos, kind)| DocumentEntry {
                candidate: candidate.to_string(),
                anchor_index: paragraphs[pos].index,
                name_text: paragraphs[pos].text.clone(),
                body: self.collect_body(paragraphs, pos),
                match_kind: kind,
                numbered: false,
            })
        };

        match self.config.mode {
            EntryMode::Numbered => from_numbered(),
            EntryMode::Direct => from_direct(),
            EntryMode::Auto => from_numbered().or_else(from_direct),
        }
    }

    /// Splits the stream at `<n>. <name>` lines. Paragraphs ahead of the
    /// first numbered line belong to no entry.
    pub fn numbered_entries(&self, paragraphs: &[Paragraph]) -> Vec<NumberedEntry> {
        let starts: Vec<(usize, &str)> = paragraphs
            .iter()
            .enumerate()
            .filter_map(|(pos, p)| parse_numbered_entry(&p.text).map(|name| (pos, name)))
            .collect();

        starts
            .iter()
            .enumerate()
            .map(|(i, &(pos, name))| {
                let end = starts.get(i + 1).map(|&(next, _)| next).unwrap_or(paragraphs.len());
                NumberedEntry {
                    position: pos,
                    name: name.to_string(),
                    body: join_body(paragraphs[pos + 1..end].iter().map(|p| p.text.as_str())),
                }
            })
            .collect()
    }

    /// Position of the paragraph naming `candidate`. Exact text (either the
    /// underscored or spaced form) is tried over the whole stream before a
    /// case-insensitive pass.
    pub fn find_anchor(&self, paragraphs: &[Paragraph], candidate: &str) -> Option<(usize, MatchKind)> {
        let spaced = display_name(candidate);

        if let Some(pos) = paragraphs
            .iter()
            .position(|p| p.text == candidate || p.text == spaced)
        {
            return Some((pos, MatchKind::Exact));
        }

        let lower = candidate.to_lowercase();
        let spaced_lower = spaced.to_lowercase();
        paragraphs
            .iter()
            .position(|p| {
                let text = p.text.to_lowercase();
                text == lower || text == spaced_lower
            })
            .map(|pos| (pos, MatchKind::CaseInsensitive))
    }

    /// Accumulates the bio that follows the anchor at `anchor_pos`.
    ///
    /// Blank lines and heading lines never stop accumulation. A name-like
    /// line ends the body and is not included. Numbered list items such as
    /// `1. Mayor of Aspen` stay in the body.
    pub fn collect_body(&self, paragraphs: &[Paragraph], anchor_pos: usize) -> String {
        let mut lines = Vec::new();

        for p in paragraphs.iter().skip(anchor_pos + 1) {
            let text = p.text.as_str();
            if text.is_empty() || self.is_heading(text) {
                lines.push(text);
                continue;
            }
            if looks_like_candidate_name(text, self.config.max_name_line_chars) {
                tracing::trace!("Body boundary at paragraph {}: '{}'", p.index, text);
                break;
            }
            lines.push(text);
        }

        join_body(lines.into_iter())
    }

    fn is_heading(&self, line: &str) -> bool {
        self.config.headings.is_heading(line)
    }

    /// Splits an entry body into sections using the configured headings and
    /// fallback.
    pub fn sections(&self, body: &str) -> Vec<Section> {
        split_sections(body, &self.config.headings, self.config.fallback)
    }
}

/// A document counts as numbered when some numbered line names a candidate
/// exactly or by normalized key. Substring hits alone do not count, since
/// numbered list items inside a bio often mention other people.
fn is_numbered_document(entries: &[NumberedEntry], candidates: &[String]) -> bool {
    !entries.is_empty()
        && candidates.iter().any(|c| {
            matches!(
                match_numbered_entry(entries, c),
                Some((_, MatchKind::Exact | MatchKind::CaseInsensitive))
            )
        })
}

/// Exact name, then normalized-key equality, then normalized-key
/// containment in either direction. First entry in document order wins
/// within each pass.
fn match_numbered_entry<'a>(entries: &'a [NumberedEntry], candidate: &str) -> Option<(&'a NumberedEntry, MatchKind)> {
    let spaced = display_name(candidate);
    if let Some(entry) = entries.iter().find(|e| e.name == candidate || e.name == spaced) {
        return Some((entry, MatchKind::Exact));
    }

    let key = normalize_name(candidate);
    if key.is_empty() {
        return None;
    }
    if let Some(entry) = entries.iter().find(|e| normalize_name(&e.name) == key) {
        return Some((entry, MatchKind::CaseInsensitive));
    }

    entries
        .iter()
        .find(|e| {
            let entry_key = normalize_name(&e.name);
            !entry_key.is_empty() && (entry_key.contains(&key) || key.contains(&entry_key))
        })
        .map(|e| (e, MatchKind::Substring))
}

fn join_body<'a>(lines: impl Iterator<Item = &'a str>) -> String {
    lines.collect::<Vec<_>>().join("\n").trim().to_string()
}
