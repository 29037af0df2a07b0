// src/extractors/sections.rs

use serde::Serialize;

use crate::extractors::headings::{HeadingSet, SectionLabel};

/// What to do with a body that contains no recognized heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SectionFallback {
    /// Whole body becomes the Educational Background section.
    #[default]
    Whole,
    /// Non-blank lines are split into three contiguous chunks, one per label.
    ThreeWay,
    /// Whole body becomes one section without a heading.
    Unlabeled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: Option<SectionLabel>,
    pub text: String,
}

impl Section {
    pub fn labeled(label: SectionLabel, text: impl Into<String>) -> Self {
        Self { label: Some(label), text: text.into() }
    }

    pub fn unlabeled(text: impl Into<String>) -> Self {
        Self { label: None, text: text.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Splits a bio body into sections, in document order.
///
/// Each heading line owns the lines after it up to the next heading or the
/// end of the body; the heading line itself is excluded. Text ahead of the
/// first heading is dropped. Sections may come back empty when two headings
/// are adjacent.
pub fn split_sections(body: &str, headings: &HeadingSet, fallback: SectionFallback) -> Vec<Section> {
    if body.trim().is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = body.lines().collect();
    let heading_positions: Vec<(usize, SectionLabel)> = lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| headings.classify(line).map(|label| (idx, label)))
        .collect();

    if heading_positions.is_empty() {
        tracing::debug!("No section headings in body, using {:?} fallback", fallback);
        return fallback_sections(&lines, fallback);
    }

    let (first_heading, _) = heading_positions[0];
    if lines[..first_heading].iter().any(|l| !l.trim().is_empty()) {
        tracing::debug!("Dropping {} preamble lines ahead of the first heading", first_heading);
    }

    heading_positions
        .iter()
        .enumerate()
        .map(|(i, &(start, label))| {
            let end = heading_positions
                .get(i + 1)
                .map(|&(next, _)| next)
                .unwrap_or(lines.len());
            Section::labeled(label, lines[start + 1..end].join("\n").trim())
        })
        .collect()
}

fn fallback_sections(lines: &[&str], fallback: SectionFallback) -> Vec<Section> {
    let body = lines.join("\n").trim().to_string();
    match fallback {
        SectionFallback::Whole => vec![Section::labeled(SectionLabel::EducationalBackground, body)],
        SectionFallback::Unlabeled => vec![Section::unlabeled(body)],
        SectionFallback::ThreeWay => {
            let content: Vec<&str> = lines
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .collect();
            three_way_chunks(&content)
                .into_iter()
                .zip(SectionLabel::ALL)
                .map(|(chunk, label)| Section::labeled(label, chunk.join("\n")))
                .collect()
        }
    }
}

/// Chunk sizes are ceil(n/3), ceil(n/3), and whatever remains.
fn three_way_chunks<'a, T>(items: &'a [T]) -> [&'a [T]; 3] {
    let n = items.len();
    let chunk = n.div_ceil(3);
    let first_end = chunk.min(n);
    let second_end = (2 * chunk).min(n);
    [&items[..first_end], &items[first_end..second_end], &items[second_end..]]
}

/// True when at least one section has non-blank text.
pub fn has_content(sections: &[Section]) -> bool {
    sections.iter().any(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(body: &str, fallback: SectionFallback) -> Vec<Section> {
        split_sections(body, &HeadingSet::default(), fallback)
    }

    #[test]
    fn test_text_between_headings_belongs_to_preceding_heading() {
        let body = "Educational Background\nBA Economics\nCareer\nAnalyst";
        let sections = split(body, SectionFallback::Whole);
        assert_eq!(
            sections,
            vec![
                Section::labeled(SectionLabel::EducationalBackground, "BA Economics"),
                Section::labeled(SectionLabel::Career, "Analyst"),
            ]
        );
    }

    #[test]
    fn test_blank_lines_inside_sections_are_kept() {
        let body = "Career\nMayor of Aspen\n\nCity council\n\nPersonal Information\nLives in Colorado";
        let sections = split(body, SectionFallback::Whole);
        assert_eq!(sections[0].text, "Mayor of Aspen\n\nCity council");
        assert_eq!(sections[1], Section::labeled(SectionLabel::PersonalInformation, "Lives in Colorado"));
    }

    #[test]
    fn test_heading_variants_and_preamble() {
        let body = "Some lead-in sentence.\nEducation:\nBA\nprofessional experience\nAnalyst";
        let sections = split(body, SectionFallback::Whole);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0], Section::labeled(SectionLabel::EducationalBackground, "BA"));
        assert_eq!(sections[1], Section::labeled(SectionLabel::Career, "Analyst"));
    }

    #[test]
    fn test_adjacent_headings_give_empty_section() {
        let sections = split("Career\nPersonal Information\nMarried", SectionFallback::Whole);
        assert!(sections[0].is_empty());
        assert!(has_content(&sections));
    }

    #[test]
    fn test_whole_fallback_labels_as_education() {
        let sections = split("MBA", SectionFallback::Whole);
        assert_eq!(sections, vec![Section::labeled(SectionLabel::EducationalBackground, "MBA")]);
    }

    #[test]
    fn test_unlabeled_fallback() {
        let sections = split("MBA\n\nLawyer", SectionFallback::Unlabeled);
        assert_eq!(sections, vec![Section::unlabeled("MBA\n\nLawyer")]);
    }

    #[test]
    fn test_three_way_fallback_chunk_sizes() {
        let body = "a\nb\n\nc\nd\ne\nf\ng";
        let sections = split(body, SectionFallback::ThreeWay);
        let texts: Vec<&str> = sections.iter().map(|s| s.text.as_str()).collect();
        // 7 non-blank lines -> 3, 3, 1
        assert_eq!(texts, vec!["a\nb\nc", "d\ne\nf", "g"]);
        assert_eq!(sections[2].label, Some(SectionLabel::PersonalInformation));
    }

    #[test]
    fn test_three_way_chunks_small_inputs() {
        let one = ["x"];
        let chunks = three_way_chunks(&one);
        assert_eq!(chunks.map(|c| c.len()), [1, 0, 0]);

        let four = [1, 2, 3, 4];
        assert_eq!(three_way_chunks(&four).map(|c| c.len()), [2, 2, 0]);

        let six = [0; 6];
        assert_eq!(three_way_chunks(&six).map(|c| c.len()), [2, 2, 2]);

        let none: [u8; 0] = [];
        assert_eq!(three_way_chunks(&none).map(|c| c.len()), [0, 0, 0]);
    }

    #[test]
    fn test_empty_body_has_no_sections() {
        assert!(split("", SectionFallback::Whole).is_empty());
        assert!(split(" \n \n", SectionFallback::ThreeWay).is_empty());
        assert!(!has_content(&[]));
    }
}
