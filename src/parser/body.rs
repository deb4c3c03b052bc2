use tracing::{debug, warn};

use super::vocab::BODY_MARKER;
use crate::error::ExtractError;

/// Lines strictly between the first two `SENIOR COLLEGES` marker lines.
/// Later markers are ignored.
pub fn locate(lines: &[String]) -> Result<&[String], ExtractError> {
    let markers: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.trim_matches(' ') == BODY_MARKER)
        .map(|(n, _)| n)
        .collect();

    let (start, end) = match markers.as_slice() {
        [start, end, rest @ ..] => {
            if !rest.is_empty() {
                warn!(extra = rest.len(), "ignoring marker lines past the second");
            }
            (*start, *end)
        }
        _ => {
            return Err(ExtractError::BoundaryNotFound {
                marker: BODY_MARKER,
                found: markers.len(),
            })
        }
    };

    debug!(start, end, "located body");
    Ok(&lines[start + 1..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn body_excludes_markers() {
        let doc = lines(&["cover", "  SENIOR COLLEGES ", "A", "B", "SENIOR COLLEGES", "index"]);
        assert_eq!(locate(&doc).unwrap(), &doc[2..4]);
    }

    #[test]
    fn third_marker_ignored() {
        let doc = lines(&["SENIOR COLLEGES", "A", "SENIOR COLLEGES", "B", "SENIOR COLLEGES"]);
        assert_eq!(locate(&doc).unwrap(), &doc[1..2]);
    }

    #[test]
    fn tab_padded_marker_does_not_count() {
        let doc = lines(&["SENIOR COLLEGES", "A", "\tSENIOR COLLEGES"]);
        let err = locate(&doc).unwrap_err();
        assert!(matches!(err, ExtractError::BoundaryNotFound { found: 1, .. }));
    }

    #[test]
    fn no_markers() {
        let err = locate(&lines(&["A", "B"])).unwrap_err();
        assert!(matches!(err, ExtractError::BoundaryNotFound { found: 0, .. }));
    }

    #[test]
    fn adjacent_markers_give_empty_body() {
        let doc = lines(&["SENIOR COLLEGES", "SENIOR COLLEGES"]);
        assert!(locate(&doc).unwrap().is_empty());
    }
}
