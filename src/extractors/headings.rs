// src/extractors/headings.rs

use serde::Serialize;

/// Canonical biography section labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SectionLabel {
    EducationalBackground,
    Career,
    PersonalInformation,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 3] = [
        SectionLabel::EducationalBackground,
        SectionLabel::Career,
        SectionLabel::PersonalInformation,
    ];

    /// Heading line written into rendered bios.
    pub fn title(self) -> &'static str {
        match self {
            SectionLabel::EducationalBackground => "Educational Background",
            SectionLabel::Career => "Career",
            SectionLabel::PersonalInformation => "Personal Information",
        }
    }
}

impl std::fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// Heading spellings recognized in a bio body, each mapped onto its
/// canonical label. Matching ignores case, internal whitespace runs and a
/// single trailing colon.
#[derive(Debug, Clone)]
pub struct HeadingSet {
    variants: Vec<(String, SectionLabel)>,
}

impl Default for HeadingSet {
    fn default() -> Self {
        Self::new([
            ("Educational Background", SectionLabel::EducationalBackground),
            ("Education", SectionLabel::EducationalBackground),
            ("Career", SectionLabel::Career),
            ("Professional Experience", SectionLabel::Career),
            ("Personal Information", SectionLabel::PersonalInformation),
            ("Personal Info", SectionLabel::PersonalInformation),
        ])
    }
}

impl HeadingSet {
    pub fn new<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = (S, SectionLabel)>,
        S: AsRef<str>,
    {
        Self {
            variants: variants
                .into_iter()
                .map(|(text, label)| (canonical_form(text.as_ref()), label))
                .collect(),
        }
    }

    /// Maps a whole line onto a section label if the line is a heading.
    pub fn classify(&self, line: &str) -> Option<SectionLabel> {
        let key = canonical_form(line);
        if key.is_empty() {
            return None;
        }
        self.variants
            .iter()
            .find(|(variant, _)| *variant == key)
            .map(|(_, label)| *label)
    }

    pub fn is_heading(&self, line: &str) -> bool {
        self.classify(line).is_some()
    }
}

fn canonical_form(line: &str) -> String {
    let line = line.trim();
    let line = line.strip_suffix(':').unwrap_or(line);
    line.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_headings() {
        let set = HeadingSet::default();
        assert_eq!(set.classify("Educational Background"), Some(SectionLabel::EducationalBackground));
        assert_eq!(set.classify("Career"), Some(SectionLabel::Career));
        assert_eq!(set.classify("Personal Information"), Some(SectionLabel::PersonalInformation));
    }

    #[test]
    fn test_case_colon_and_spacing_variants() {
        let set = HeadingSet::default();
        assert_eq!(set.classify("personal information"), Some(SectionLabel::PersonalInformation));
        assert_eq!(set.classify("CAREER:"), Some(SectionLabel::Career));
        assert_eq!(
            set.classify("  Educational   Background : "),
            Some(SectionLabel::EducationalBackground)
        );
        assert_eq!(set.classify("Career::"), None);
        assert_eq!(set.classify("Educational\tBackground:"), Some(SectionLabel::EducationalBackground));
    }

    #[test]
    fn test_synonyms_map_to_canonical_labels() {
        let set = HeadingSet::default();
        assert_eq!(set.classify("Education"), Some(SectionLabel::EducationalBackground));
        assert_eq!(set.classify("Professional Experience"), Some(SectionLabel::Career));
        assert_eq!(set.classify("Personal Info:"), Some(SectionLabel::PersonalInformation));
    }

    #[test]
    fn test_prose_is_not_a_heading() {
        let set = HeadingSet::default();
        assert!(!set.is_heading("Career politician since 1990"));
        assert!(!set.is_heading("Education:: BA"));
        assert!(!set.is_heading(""));
        assert!(!set.is_heading(":"));
    }

    #[test]
    fn test_titles() {
        let titles: Vec<&str> = SectionLabel::ALL.iter().map(|l| l.title()).collect();
        assert_eq!(titles, vec!["Educational Background", "Career", "Personal Information"]);
        assert_eq!(SectionLabel::Career.to_string(), "Career");
    }
}
