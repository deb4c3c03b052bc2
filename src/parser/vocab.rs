use std::collections::HashSet;
use std::sync::LazyLock;

/// Line that opens and closes the senior-college body of the directory.
pub const BODY_MARKER: &str = "SENIOR COLLEGES";

/// Page-break banner inserted by the OCR run.
pub const NEW_PAGE_MARKER: &str = "NEW PAGE";

/// Publisher footer repeated on every printed page.
pub const WEBSITE_FOOTER: &str = "www.collegiatedirectories.com";

/// Role key given to the first line of every section.
pub const LEAD_ROLE: &str = "Lead";

/// Role key that collects unlabeled roster lines.
pub const UNLABELED_ROLE: &str = "Asst.";

const ATTRIBUTE_LABELS: &[&str] = &[
    "Affiliation",
    "Conference",
    "Enrollment",
    "Colors",
    "Nickname",
    "Pres.",
    "Stadium",
    "Arena",
    "AD",
    "Acad. Adv.",
    "Acad. Affairs",
    "FB Secy.",
    "Secy.",
    "Ath. Communications",
    "Fac. Rep.",
    "PE Dir.",
    "Intra. Dir.",
    "Tkt. Mgr.",
    "SWA",
    "Asst. Aquatics Dir.",
    "Ath. Secy.",
    "Mgr. FB Ops",
    "Aquatics Dir.",
];

// Repeats are in the printed legend; the set collapses them.
const SECTION_LABELS: &[&str] = &[
    "Football",
    "Basketball",
    "Baseball",
    "Cross Country",
    "Diving",
    "Golf",
    "Soccer",
    "Tennis",
    "Track",
    "Archery",
    "Aquatics",
    "Badminton",
    "Bowling",
    "Broomball",
    "Cheer",
    "Curling",
    "Cycling",
    "Equestrian",
    "Fencing",
    "Golf",
    "Gymnastics",
    "Handball",
    "Hockey",
    "Indoor soccer",
    "Lacrosse",
    "Rodeo",
    "Rugby",
    "Sailing",
    "Ski",
    "Squash",
    "Swim",
    "Strength",
    "Badminton",
    "Cross Country",
    "Crew",
];

const ROLE_LABELS: &[&str] = &[
    "Asst.",
    "Assoc.",
    "Video Coord.",
    "Dir. Bask Ops.",
    "Bask. Secy.",
    "Dir. FB Ops.",
];

static ATTRIBUTES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ATTRIBUTE_LABELS.iter().copied().collect());
static SECTIONS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| SECTION_LABELS.iter().copied().collect());
static ROLES: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ROLE_LABELS.iter().copied().collect());

pub fn is_attribute_label(label: &str) -> bool {
    ATTRIBUTES.contains(label)
}

pub fn is_section_label(label: &str) -> bool {
    SECTIONS.contains(label)
}

pub fn is_role_label(label: &str) -> bool {
    ROLES.contains(label)
}

/// Split once on the first `-`. `None` means the line carries no label at all,
/// which is not the same as a label with an empty value.
pub fn split_label(line: &str) -> Option<(&str, &str)> {
    line.split_once('-')
}
