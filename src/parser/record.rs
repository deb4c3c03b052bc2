use std::collections::BTreeMap;

use serde::Serialize;

use super::residual::Residual;

/// Role → value map for one sport.
pub type Roster = BTreeMap<String, String>;

/// One college block of the directory.
///
/// Created by the segmenter with a name and line range only; the later passes
/// fill it in place. Serialized field names follow the legacy JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct EntityRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "SingleLiners")]
    pub attributes: BTreeMap<String, String>,
    #[serde(rename = "MultiLiners")]
    pub sections: BTreeMap<String, Roster>,
    /// Index of the heading line within the body.
    #[serde(skip)]
    pub start_line: usize,
    /// Exclusive end: the next heading, or the body length.
    #[serde(skip)]
    pub end_line: usize,
    #[serde(rename = "Text")]
    pub clean_text: Vec<String>,
    #[serde(rename = "UnusedText")]
    pub residual: Residual,
}

impl EntityRecord {
    pub fn new(name: String, start_line: usize) -> Self {
        EntityRecord {
            name,
            attributes: BTreeMap::new(),
            sections: BTreeMap::new(),
            start_line,
            end_line: start_line,
            clean_text: Vec::new(),
            residual: Residual::default(),
        }
    }

    /// Body lines after the heading, up to the next heading.
    pub fn content_range(&self) -> std::ops::Range<usize> {
        (self.start_line + 1).min(self.end_line)..self.end_line
    }
}

pub fn total_raw_lines(records: &[EntityRecord]) -> usize {
    records.iter().map(|r| r.content_range().len()).sum()
}

pub fn total_clean_lines(records: &[EntityRecord]) -> usize {
    records.iter().map(|r| r.clean_text.len()).sum()
}

pub fn total_residual(records: &[EntityRecord]) -> usize {
    records.iter().map(|r| r.residual.len()).sum()
}
