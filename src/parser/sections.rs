use std::collections::BTreeMap;

use tracing::trace;

use super::record::{EntityRecord, Roster};
use super::residual::Residual;
use super::vocab::{is_role_label, is_section_label, split_label, LEAD_ROLE, UNLABELED_ROLE};

/// Positions of lines that open a sport section, with the sport label.
pub fn section_starts(clean_text: &[String]) -> Vec<(usize, &str)> {
    clean_text
        .iter()
        .enumerate()
        .filter_map(|(pos, line)| match split_label(line) {
            Some((label, _)) if is_section_label(label) => Some((pos, label)),
            _ => None,
        })
        .collect()
}

/// Group lines into per-sport runs. A run lasts until the next section start;
/// runs sharing a label are concatenated, which rejoins rosters that a page
/// break split in two.
pub fn clumps(clean_text: &[String]) -> BTreeMap<String, Vec<usize>> {
    let starts = section_starts(clean_text);
    let mut clumps: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (i, (start, label)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map_or(clean_text.len(), |(next, _)| *next);
        clumps.entry(label.to_string()).or_default().extend(*start..end);
    }
    clumps
}

/// Build the sport rosters of a record and claim their lines from the
/// residual. Every line of a run is sub-classified, including lines the
/// attribute pass already took; claiming those is a no-op.
pub fn classify(record: &mut EntityRecord) {
    for (label, positions) in clumps(&record.clean_text) {
        let roster = build_roster(&record.clean_text, &positions, &mut record.residual);
        trace!(college = %record.name, section = %label, roles = roster.len(), "clumped section");
        record.sections.insert(label, roster);
    }
}

fn build_roster(clean_text: &[String], positions: &[usize], residual: &mut Residual) -> Roster {
    let mut roster = Roster::new();
    let Some((&first, rest)) = positions.split_first() else {
        return roster;
    };

    let lead = split_label(&clean_text[first]).map_or("", |(_, value)| value);
    roster.insert(LEAD_ROLE.to_string(), lead.to_string());
    residual.claim(first);

    for &pos in rest {
        let line = &clean_text[pos];
        match split_label(line) {
            Some((role, value)) if is_role_label(role) => {
                roster.insert(role.to_string(), value.to_string());
            }
            // OCR drops the role on many assistant lines; keep them together
            _ => {
                roster
                    .entry(UNLABELED_ROLE.to_string())
                    .and_modify(|existing| {
                        existing.push(' ');
                        existing.push_str(line);
                    })
                    .or_insert_with(|| line.clone());
            }
        }
        residual.claim(pos);
    }
    roster
}
