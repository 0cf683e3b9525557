/// How the segmenter classified a blank-line-delimited section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Title,
    Content,
}

/// A trimmed, non-empty section of the full text.
#[derive(Debug, Clone)]
pub struct Section {
    pub text: String,
    pub kind: SectionKind,
}

/// Thresholds for the title heuristic.
#[derive(Debug, Clone, Copy)]
pub struct SegmentConfig {
    /// A single-line section is a title only if it is shorter than this (in chars).
    pub max_title_chars: usize,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self { max_title_chars: 50 }
    }
}

/// Titles mapped to their content lines, in first-seen order.
///
/// Re-inserting a title replaces its lines but keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPoems {
    entries: Vec<(String, Vec<String>)>,
}

impl ExtractedPoems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, title: String, lines: Vec<String>) {
        match self.entries.iter_mut().find(|(t, _)| *t == title) {
            Some(entry) => entry.1 = lines,
            None => self.entries.push((title, lines)),
        }
    }

    #[cfg(test)]
    pub fn get(&self, title: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, lines)| lines.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(t, lines)| (t.as_str(), lines.as_slice()))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One record whose content was filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoemUpdate {
    pub title: String,
    pub line_count: usize,
}

/// Outcome of merging extracted poems into the dataset.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub updates: Vec<PoemUpdate>,
}

impl MergeReport {
    pub fn updated_count(&self) -> usize {
        self.updates.len()
    }
}
