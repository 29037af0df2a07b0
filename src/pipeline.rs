// src/pipeline.rs
//
// One batch: candidates + paragraph stream in, rendered bios and a report
// out. No file I/O happens here.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::docx::Paragraph;
use crate::extractors::normalize::{display_name, normalize_name};
use crate::extractors::render::{render_bio, render_raw_body, RenderOptions};
use crate::extractors::sections::has_content;
use crate::extractors::{BioSegmenter, HeadingSet, MatchKind};

/// What to write for a matched entry that yields no section text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum EmptyBodyPolicy {
    /// Write nothing; the candidate is reported as skipped.
    Skip,
    /// Write the raw body without section structure. Still skipped when the
    /// body holds nothing but blank and heading lines.
    #[default]
    FullBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBio {
    pub candidate: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedCandidate {
    pub candidate: String,
    pub name_text: String,
    pub anchor_index: usize,
    pub match_kind: MatchKind,
}

/// Counts and name lists for one run.
///
/// `matched.len() + unmatched.len() == candidates`. Every matched candidate
/// is either rendered or listed in `skipped_empty`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub candidates: usize,
    pub matched: Vec<MatchedCandidate>,
    pub saved: Vec<String>,
    pub skipped_empty: Vec<String>,
    pub failed_writes: Vec<String>,
    pub unmatched: Vec<String>,
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub bios: Vec<RenderedBio>,
    pub report: BatchReport,
}

/// Sorted candidate list with exact duplicates removed. Spellings that
/// differ but share a normalized key are all kept, since each manifest value
/// names its own bio file. Names in `exclude` are dropped.
pub fn unique_candidates<I>(names: I, exclude: &[String]) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && !exclude.contains(n))
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

pub fn run_batch(
    paragraphs: &[Paragraph],
    candidates: &[String],
    segmenter: &BioSegmenter,
    render: &RenderOptions,
    empty_policy: EmptyBodyPolicy,
) -> BatchOutcome {
    let segmentation = segmenter.segment(paragraphs, candidates);
    let mut outcome = BatchOutcome::default();
    outcome.report.candidates = candidates.len();
    outcome.report.unmatched = segmentation.unmatched;
    let headings = &segmenter.config().headings;

    for candidate in candidates {
        // Spellings sharing a key share the entry but get their own file.
        let Some(entry) = segmentation.entries.get(&normalize_name(candidate)) else {
            continue;
        };

        outcome.report.matched.push(MatchedCandidate {
            candidate: candidate.clone(),
            name_text: entry.name_text.clone(),
            anchor_index: entry.anchor_index,
            match_kind: entry.match_kind,
        });

        let title = display_name(candidate);
        let sections = segmenter.sections(&entry.body);
        let text = if has_content(&sections) {
            Some(render_bio(&title, &sections, headings, render))
        } else {
            match empty_policy {
                EmptyBodyPolicy::FullBody if has_prose(headings, &entry.body) => {
                    tracing::debug!("No section text for '{}', writing raw body", candidate);
                    Some(render_raw_body(&title, &entry.body, headings, render))
                }
                _ => None,
            }
        };

        match text {
            Some(text) => {
                tracing::info!(
                    "Extracted bio for {} ({} chars, {} sections)",
                    candidate,
                    text.chars().count(),
                    sections.iter().filter(|s| !s.is_empty()).count()
                );
                outcome.bios.push(RenderedBio { candidate: candidate.clone(), text });
            }
            None => {
                tracing::warn!("Entry for {} has no extractable text, skipping", candidate);
                outcome.report.skipped_empty.push(candidate.clone());
            }
        }
    }

    outcome
}

fn has_prose(headings: &HeadingSet, body: &str) -> bool {
    body.lines()
        .map(str::trim)
        .any(|line| !line.is_empty() && !headings.is_heading(line))
}

/// Logs final counts and at most `limit` unmatched names.
pub fn log_summary(report: &BatchReport, limit: usize) {
    tracing::info!(
        "Candidates: {}, matched: {}, saved: {}, skipped (empty): {}, failed writes: {}, unmatched: {}",
        report.candidates,
        report.matched.len(),
        report.saved.len(),
        report.skipped_empty.len(),
        report.failed_writes.len(),
        report.unmatched.len()
    );

    if report.unmatched.is_empty() {
        return;
    }
    tracing::info!("Unmatched candidates (no entry found in document):");
    for name in report.unmatched.iter().take(limit) {
        tracing::info!("  - {}", name);
    }
    if report.unmatched.len() > limit {
        tracing::info!("  ... and {} more", report.unmatched.len() - limit);
    }
}
