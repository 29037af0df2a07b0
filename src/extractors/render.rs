// src/extractors/render.rs

use crate::extractors::headings::HeadingSet;
use crate::extractors::sections::Section;

pub const DEFAULT_BULLET: &str = "\u{2022} ";

/// Cosmetic policy applied when turning sections into a bio file.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Strip trailing commas and empty `()` pairs from every line.
    pub clean_lines: bool,
    /// Prefix placed before every content line; `None` disables bullets.
    pub bullet: Option<String>,
    /// Put the display name on the first line.
    pub title: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            clean_lines: true,
            bullet: Some(DEFAULT_BULLET.to_string()),
            title: true,
        }
    }
}

/// Removes trailing commas and trailing empty parenthesis pairs until
/// neither is left: `"Lawyer (),"` -> `"Lawyer"`.
pub fn clean_line(line: &str) -> String {
    let mut line = line.trim_end();
    loop {
        if let Some(rest) = line.strip_suffix(',') {
            line = rest.trim_end();
        } else if let Some(rest) = line.strip_suffix("()") {
            line = rest.trim_end();
        } else {
            break;
        }
    }
    line.to_string()
}

fn clean_block(text: &str) -> String {
    text.lines().map(clean_line).collect::<Vec<_>>().join("\n")
}

/// Renders non-empty sections as `Heading\ncontent` blocks separated by a
/// blank line. Unlabeled sections contribute content only. Returns an empty
/// string when every section is empty. Lines `headings` recognizes are never
/// bulleted.
pub fn render_sections(sections: &[Section], headings: &HeadingSet, options: &RenderOptions) -> String {
    let parts: Vec<String> = sections
        .iter()
        .filter(|s| !s.is_empty())
        .map(|s| {
            let text = s.text.trim();
            let text = if options.clean_lines { clean_block(text) } else { text.to_string() };
            match s.label {
                Some(label) => format!("{}\n{}", label.title(), text),
                None => text,
            }
        })
        .collect();

    let body = parts.join("\n\n").trim().to_string();
    match &options.bullet {
        Some(bullet) => add_bullets(&body, bullet, headings),
        None => body,
    }
}

/// Full bio text: optional title line, then the rendered sections.
pub fn render_bio(display_name: &str, sections: &[Section], headings: &HeadingSet, options: &RenderOptions) -> String {
    let body = render_sections(sections, headings, options);
    if options.title {
        format!("{}\n\n{}", display_name, body)
    } else {
        body
    }
}

/// Renders a raw body with no section structure, used when a matched entry
/// yields no sections.
pub fn render_raw_body(display_name: &str, body: &str, headings: &HeadingSet, options: &RenderOptions) -> String {
    render_bio(display_name, &[Section::unlabeled(body)], headings, options)
}

/// Prefixes every non-empty line that is not a heading.
pub fn add_bullets(text: &str, bullet: &str, headings: &HeadingSet) -> String {
    text.lines()
        .map(|line| {
            let stripped = line.trim();
            if stripped.is_empty() {
                String::new()
            } else if headings.is_heading(stripped) {
                stripped.to_string()
            } else {
                format!("{}{}", bullet, stripped)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Inverse of [`add_bullets`] for content lines.
#[cfg(test)]
pub fn strip_bullets(text: &str, bullet: &str) -> String {
    text.lines()
        .map(|line| line.strip_prefix(bullet).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::headings::SectionLabel;

    fn plain() -> RenderOptions {
        RenderOptions { clean_lines: false, bullet: None, title: false }
    }

    fn sample_sections() -> Vec<Section> {
        vec![
            Section::labeled(SectionLabel::EducationalBackground, "BA Economics\n\nMBA"),
            Section::labeled(SectionLabel::Career, "Analyst"),
            Section::labeled(SectionLabel::PersonalInformation, ""),
        ]
    }

    #[test]
    fn test_clean_line() {
        assert_eq!(clean_line("Harvard University,"), "Harvard University");
        assert_eq!(clean_line("Lawyer ()"), "Lawyer");
        assert_eq!(clean_line("Lawyer, ()"), "Lawyer");
        assert_eq!(clean_line("Lawyer () () ,"), "Lawyer");
        assert_eq!(clean_line("Mayor (2010-2014)"), "Mayor (2010-2014)");
        assert_eq!(clean_line("a, b, c"), "a, b, c");
        assert_eq!(clean_line(",()"), "");
        assert_eq!(clean_line("  indented,  "), "  indented");
    }

    #[test]
    fn test_clean_line_is_stable() {
        for input in ["x,", "x (),", "x, (), ,", "(x)", ""] {
            let once = clean_line(input);
            assert_eq!(clean_line(&once), once);
        }
    }

    #[test]
    fn test_render_full_bio() {
        let text = render_bio("Jane Doe", &sample_sections(), &HeadingSet::default(), &RenderOptions::default());
        assert_eq!(
            text,
            "Jane Doe\n\nEducational Background\n\u{2022} BA Economics\n\n\u{2022} MBA\n\nCareer\n\u{2022} Analyst"
        );
    }

    #[test]
    fn test_render_applies_cleanup_per_line() {
        let sections = vec![Section::labeled(SectionLabel::Career, "Lawyer (),\nJudge,")];
        let options = RenderOptions { bullet: None, title: false, ..RenderOptions::default() };
        assert_eq!(render_sections(&sections, &HeadingSet::default(), &options), "Career\nLawyer\nJudge");
    }

    #[test]
    fn test_unlabeled_section_has_no_heading() {
        let text = render_bio("Jane Doe", &[Section::unlabeled("Analyst")], &HeadingSet::default(), &RenderOptions::default());
        assert_eq!(text, "Jane Doe\n\n\u{2022} Analyst");
    }

    #[test]
    fn test_all_empty_sections_render_empty() {
        let sections = vec![Section::labeled(SectionLabel::Career, "  ")];
        assert_eq!(render_sections(&sections, &HeadingSet::default(), &RenderOptions::default()), "");
    }

    #[test]
    fn test_bullet_round_trip_recovers_section_text() {
        let sections = sample_sections();
        let headings = HeadingSet::default();
        let unbulleted = render_sections(&sections, &headings, &plain());
        let bulleted = render_sections(&sections, &headings, &RenderOptions { bullet: Some(DEFAULT_BULLET.into()), ..plain() });
        assert_ne!(unbulleted, bulleted);
        assert_eq!(strip_bullets(&bulleted, DEFAULT_BULLET), unbulleted);
    }

    #[test]
    fn test_custom_bullet() {
        assert_eq!(
            add_bullets("Career\nAnalyst\n\nLawyer", "- ", &HeadingSet::default()),
            "Career\n- Analyst\n\n- Lawyer"
        );
    }

    #[test]
    fn test_raw_body_render() {
        let text = render_raw_body("John Roe", "Career\nLawyer,", &HeadingSet::default(), &RenderOptions::default());
        assert_eq!(text, "John Roe\n\nCareer\n\u{2022} Lawyer");
    }

    #[test]
    fn test_heading_variants_are_not_bulleted() {
        let body = "Education:\nBA Economics\npersonal info\nmarried, two kids\nProfessional Experience\nAnalyst";
        let text = render_raw_body("John Roe", body, &HeadingSet::default(), &RenderOptions::default());
        assert_eq!(
            text,
            "John Roe\n\nEducation:\n\u{2022} BA Economics\npersonal info\n\u{2022} married, two kids\nProfessional Experience\n\u{2022} Analyst"
        );
    }
}
