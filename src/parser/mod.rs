pub mod attributes;
pub mod body;
pub mod normalize;
pub mod record;
pub mod residual;
pub mod sections;
pub mod segment;
pub mod vocab;

use rayon::prelude::*;
use tracing::info;

use crate::error::ExtractError;
use crate::metrics::PassTracker;
use record::{total_clean_lines, total_raw_lines, total_residual, EntityRecord};

/// Pipeline: body → colleges → clean text → attributes → sport sections.
/// Every pass after segmentation runs over all colleges before the next starts.
pub fn parse_directory(
    lines: &[String],
    tracker: &mut PassTracker,
) -> Result<Vec<EntityRecord>, ExtractError> {
    let body = body::locate(lines)?;

    let mut records = segment::segment(body);
    tracker.record("segment", records.len(), body.len(), total_raw_lines(&records));

    let before = total_raw_lines(&records);
    records.par_iter_mut().for_each(|r| normalize::normalize(r, body));
    tracker.record("normalize", records.len(), before, total_clean_lines(&records));

    let before = total_clean_lines(&records);
    records.par_iter_mut().for_each(attributes::classify);
    tracker.record("attributes", records.len(), before, total_residual(&records));

    let before = total_residual(&records);
    records.par_iter_mut().for_each(sections::classify);
    tracker.record("sections", records.len(), before, total_residual(&records));

    info!(colleges = records.len(), "directory parsed");
    Ok(records)
}

/// Redo attribute and section classification from the record's clean text.
pub fn classify(record: &mut EntityRecord) {
    record.attributes.clear();
    record.sections.clear();
    record.residual.clear();
    attributes::classify(record);
    sections::classify(record);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn parse(doc: &[String]) -> Vec<EntityRecord> {
        let mut tracker = PassTracker::new("run-test".into());
        parse_directory(doc, &mut tracker).unwrap()
    }

    fn fixture() -> Vec<String> {
        let text = std::fs::read_to_string("tests/fixtures/directory_sample.txt").unwrap();
        text.lines().map(str::to_string).collect()
    }

    #[test]
    fn two_colleges() {
        let doc = lines(&[
            "SENIOR COLLEGES",
            "- blank -",
            "ALPHA STATE",
            "Conference-Big East",
            "",
            "Football-Coach Smith",
            "Asst.-Coach Jones",
            "BETA COLLEGE",
            "Conference-Small Ten",
            "SENIOR COLLEGES",
        ]);
        let records = parse(&doc);
        assert_eq!(records.len(), 2);

        let alpha = &records[0];
        assert_eq!(alpha.name, "ALPHA STATE");
        assert_eq!(alpha.attributes.len(), 1);
        assert_eq!(alpha.attributes["Conference"], "Big East");
        assert_eq!(alpha.sections.len(), 1);
        assert_eq!(alpha.sections["Football"]["Lead"], "Coach Smith");
        assert_eq!(alpha.sections["Football"]["Asst."], "Coach Jones");
        assert!(alpha.residual.is_empty());

        let beta = &records[1];
        assert_eq!(beta.name, "BETA COLLEGE");
        assert_eq!(beta.attributes["Conference"], "Small Ten");
        assert!(beta.sections.is_empty());
    }

    #[test]
    fn missing_second_marker_is_fatal() {
        let doc = lines(&["SENIOR COLLEGES", "ALPHA STATE"]);
        let mut tracker = PassTracker::new("run-test".into());
        assert!(parse_directory(&doc, &mut tracker).is_err());
        assert!(tracker.metrics().is_empty());
    }

    #[test]
    fn empty_body_gives_no_records() {
        let doc = lines(&["SENIOR COLLEGES", "just text", "SENIOR COLLEGES"]);
        assert!(parse(&doc).is_empty());
    }

    #[test]
    fn tracker_sees_every_pass() {
        let mut tracker = PassTracker::new("run-test".into());
        parse_directory(&fixture(), &mut tracker).unwrap();
        let passes: Vec<_> = tracker.metrics().iter().map(|m| m.pass_name.as_str()).collect();
        assert_eq!(passes, vec!["segment", "normalize", "attributes", "sections"]);
        assert!(tracker.metrics().iter().all(|m| m.after <= m.before));
    }

    #[test]
    fn fixture_colleges() {
        let records = parse(&fixture());
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["ABILENE CHRISTIAN UNIVERSITY", "ADAMS STATE COLLEGE", "ST. MARY'S COLLEGE"]);

        let acu = &records[0];
        assert_eq!(acu.attributes["Nickname"], "Wildcats");
        assert_eq!(acu.attributes["Colors"], "Purple & White");
        let bask = &acu.sections["Basketball"];
        assert_eq!(bask["Lead"], "Jason Copeland");
        assert_eq!(bask["Video Coord."], "Luke Henry");
        assert_eq!(acu.residual.lines().collect::<Vec<_>>(), vec!["Abilene, TX 79699"]);

        let adams = &records[1];
        assert_eq!(adams.sections["Track"]["Asst."], "Nick Lane Ruth Ortiz");
        assert!(adams.clean_text.iter().all(|l| l != "214" && !l.contains("NEW PAGE")));
    }

    #[test]
    fn names_are_headings() {
        for r in parse(&fixture()) {
            assert!(!r.name.is_empty());
            assert_eq!(r.name.to_uppercase(), r.name);
            assert!(!r.name.chars().any(|c| c.is_ascii_digit()));
            assert!(r.start_line < r.end_line);
        }
    }

    #[test]
    fn reclassify_is_idempotent() {
        for mut r in parse(&fixture()) {
            let attributes = r.attributes.clone();
            let sections = r.sections.clone();
            let residual = r.residual.clone();
            classify(&mut r);
            assert_eq!(r.attributes, attributes);
            assert_eq!(r.sections, sections);
            assert_eq!(r.residual, residual);
        }
    }

    #[test]
    fn every_clean_line_accounted_for() {
        // Attribute lines inside a sport run are claimed by both passes;
        // everything else has exactly one owner.
        for r in parse(&fixture()) {
            let attribute_lines: BTreeSet<usize> = r
                .clean_text
                .iter()
                .enumerate()
                .filter(|(_, l)| {
                    matches!(vocab::split_label(l), Some((k, _)) if vocab::is_attribute_label(k))
                })
                .map(|(p, _)| p)
                .collect();
            let section_lines: BTreeSet<usize> =
                sections::clumps(&r.clean_text).into_values().flatten().collect();
            let residual: BTreeSet<usize> = r.residual.positions().collect();

            assert!(residual.is_disjoint(&attribute_lines), "{}", r.name);
            assert!(residual.is_disjoint(&section_lines), "{}", r.name);
            let covered: BTreeSet<usize> = residual
                .iter()
                .chain(&attribute_lines)
                .chain(&section_lines)
                .copied()
                .collect();
            assert_eq!(covered, (0..r.clean_text.len()).collect(), "{}", r.name);
        }
    }

    #[test]
    fn attribute_inside_run_is_double_claimed() {
        let doc = lines(&[
            "SENIOR COLLEGES",
            "GAMMA TECH",
            "Football-Coach Smith",
            "Mgr. FB Ops-Ray Cole",
            "SENIOR COLLEGES",
        ]);
        let records = parse(&doc);
        let gamma = &records[0];
        assert_eq!(gamma.attributes["Mgr. FB Ops"], "Ray Cole");
        assert_eq!(gamma.sections["Football"]["Asst."], "Mgr. FB Ops-Ray Cole");
        assert!(gamma.residual.is_empty());
    }
}
