use std::path::Path;

use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use crate::error::ExtractError;

/// Read a Windows-1252 encoded OCR dump and split it into lines.
pub fn read_lines(path: &Path) -> Result<Vec<String>, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let lines = decode_lines(&bytes);
    debug!(path = ?path, bytes = bytes.len(), lines = lines.len(), "decoded source");
    Ok(lines)
}

/// Decode without BOM sniffing; `str::lines` drops the `\n` and one trailing `\r`.
pub fn decode_lines(bytes: &[u8]) -> Vec<String> {
    let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
    if had_errors {
        warn!("source contained bytes that did not map cleanly from windows-1252");
    }
    text.lines().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_smart_quotes() {
        // 0x92 is a right single quotation mark in windows-1252
        let lines = decode_lines(b"ST. MARY\x92S COLLEGE\nConference-Big East");
        assert_eq!(lines, vec!["ST. MARY\u{2019}S COLLEGE", "Conference-Big East"]);
    }

    #[test]
    fn strips_carriage_returns() {
        let lines = decode_lines(b"one\r\ntwo\r\n\r\nthree");
        assert_eq!(lines, vec!["one", "two", "", "three"]);
    }

    #[test]
    fn keeps_blank_and_noise_lines() {
        let lines = decode_lines(b"\n  \n42\n");
        assert_eq!(lines, vec!["", "  ", "42"]);
    }

    #[test]
    fn missing_file_is_unreadable() {
        let err = read_lines(Path::new("tests/fixtures/does_not_exist.txt")).unwrap_err();
        assert!(matches!(err, ExtractError::Unreadable { .. }));
    }

    #[test]
    fn reads_fixture() {
        let lines = read_lines(Path::new("tests/fixtures/directory_sample.txt")).unwrap();
        assert!(lines.iter().any(|l| l.trim() == "SENIOR COLLEGES"));
    }
}
