use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::record::EntityRecord;

// Anything that is not a letter, number or punctuation mark at either end.
static EDGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\p{L}\p{N}\p{P}]+|[^\p{L}\p{N}\p{P}]+$").unwrap());
// Letters, punctuation and whitespace only, with at least one letter.
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{P}\s]*\p{L}[\p{L}\p{P}\s]*$").unwrap());

/// Trim edge noise from an OCR line.
pub fn trim_edges(line: &str) -> String {
    EDGE_RE.replace_all(line, "").into_owned()
}

/// College headings are printed in capitals: no lowercase, no digits, no
/// symbols, and at least one letter.
pub fn is_heading(trimmed: &str) -> bool {
    HEADING_RE.is_match(trimmed) && trimmed.to_uppercase() == trimmed
}

/// Start a record at every heading line; each one runs to the next heading.
pub fn segment(body: &[String]) -> Vec<EntityRecord> {
    let mut records: Vec<EntityRecord> = body
        .iter()
        .enumerate()
        .filter_map(|(n, line)| {
            let trimmed = trim_edges(line);
            is_heading(&trimmed).then(|| EntityRecord::new(trimmed, n))
        })
        .collect();

    let starts: Vec<usize> = records.iter().map(|r| r.start_line).skip(1).collect();
    for (record, end) in records.iter_mut().zip(starts.into_iter().chain([body.len()])) {
        record.end_line = end;
    }

    debug!(headings = records.len(), body_lines = body.len(), "segmented body");
    records
}
