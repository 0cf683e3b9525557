use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{ExtractedPoems, Section, SectionKind, SegmentConfig};

/// Two or more consecutive line breaks separate sections.
static SECTION_BREAK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// Split full text into trimmed sections and classify each one.
pub fn classify_sections(full_text: &str, config: &SegmentConfig) -> Vec<Section> {
    SECTION_BREAK_RE
        .split(full_text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|text| Section {
            text: text.to_string(),
            kind: classify(text, config),
        })
        .collect()
}

fn classify(section: &str, config: &SegmentConfig) -> SectionKind {
    if is_title(section, config) {
        SectionKind::Title
    } else {
        SectionKind::Content
    }
}

/// Single line and shorter than the configured limit. Nothing else is checked.
fn is_title(section: &str, config: &SegmentConfig) -> bool {
    !section.contains('\n') && section.chars().count() < config.max_title_chars
}

/// Build the title -> content lines mapping from the full text.
///
/// A title only makes it into the result once it has accumulated at least one
/// content line. Content seen before the first title is dropped.
pub fn segment(full_text: &str, config: &SegmentConfig) -> ExtractedPoems {
    let mut poems = ExtractedPoems::new();
    let mut current_title: Option<String> = None;
    let mut current_lines: Vec<String> = Vec::new();

    for section in classify_sections(full_text, config) {
        match section.kind {
            SectionKind::Title => {
                flush_poem(&mut poems, current_title.take(), &mut current_lines);
                current_title = Some(section.text);
            }
            SectionKind::Content if current_title.is_some() => {
                current_lines.extend(content_lines(&section.text));
            }
            SectionKind::Content => {
                log::debug!("dropping section before first title: {:?}", preview(&section.text));
            }
        }
    }
    flush_poem(&mut poems, current_title, &mut current_lines);
    poems
}

fn content_lines(section: &str) -> impl Iterator<Item = String> + '_ {
    section
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

fn flush_poem(poems: &mut ExtractedPoems, title: Option<String>, lines: &mut Vec<String>) {
    let lines = std::mem::take(lines);
    let Some(title) = title else {
        return;
    };
    if lines.is_empty() {
        log::debug!("title without content: {title:?}");
        return;
    }
    poems.insert(title, lines);
}

fn preview(text: &str) -> String {
    text.chars().take(40).collect()
}
