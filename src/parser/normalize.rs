use std::sync::LazyLock;

use regex::Regex;

use super::record::EntityRecord;
use super::vocab::{NEW_PAGE_MARKER, WEBSITE_FOOTER};

static PAGE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\p{Nd}+$").unwrap());

/// Trimmed, non-noise lines in source order. Duplicates are kept.
pub fn clean_lines<'a, I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    raw.into_iter()
        .map(|l| l.trim())
        .filter(|l| !is_noise(l))
        .map(str::to_string)
        .collect()
}

fn is_noise(line: &str) -> bool {
    line.is_empty()
        || line.contains(NEW_PAGE_MARKER)
        || line.contains(WEBSITE_FOOTER)
        || PAGE_NUMBER_RE.is_match(line)
}

pub fn normalize(record: &mut EntityRecord, body: &[String]) {
    record.clean_text = clean_lines(&body[record.content_range()]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn drops_blank_and_page_numbers() {
        let raw = lines(&["  Conference-Big East  ", "", "   ", "42", "Football-Coach Smith"]);
        assert_eq!(clean_lines(&raw), vec!["Conference-Big East", "Football-Coach Smith"]);
    }

    #[test]
    fn drops_page_banners_and_footer() {
        let raw = lines(&[
            "----- NEW PAGE 17 -----",
            "Visit www.collegiatedirectories.com for updates",
            "Colors-Red & Gold",
        ]);
        assert_eq!(clean_lines(&raw), vec!["Colors-Red & Gold"]);
    }

    #[test]
    fn numbers_with_text_survive() {
        let raw = lines(&["Enrollment-4,200", "42a"]);
        assert_eq!(clean_lines(&raw).len(), 2);
    }

    #[test]
    fn keeps_duplicates_and_order() {
        let raw = lines(&["b", "a", "b"]);
        assert_eq!(clean_lines(&raw), vec!["b", "a", "b"]);
    }

    #[test]
    fn heading_not_reprocessed() {
        let body = lines(&["ALPHA STATE", "Conference-Big East", "BETA COLLEGE"]);
        let mut r = EntityRecord::new("ALPHA STATE".into(), 0);
        r.end_line = 2;
        normalize(&mut r, &body);
        assert_eq!(r.clean_text, vec!["Conference-Big East"]);
    }
}
