/// Every status a PEP page is known to declare.
pub const KNOWN_STATUSES: &[&str] = &[
    "Active",
    "Draft",
    "Final",
    "Provisional",
    "Rejected",
    "Superseded",
    "Withdrawn",
    "Deferred",
    "April Fool!",
    "Accepted",
];

/// Index abbreviation -> statuses a detail page may legitimately declare.
/// The empty key is used for index rows that carry no status letter.
const EXPECTED_STATUS: &[(&str, &[&str])] = &[
    ("A", &["Active", "Accepted"]),
    ("D", &["Deferred"]),
    ("F", &["Final"]),
    ("P", &["Provisional"]),
    ("R", &["Rejected"]),
    ("S", &["Superseded"]),
    ("W", &["Withdrawn"]),
    ("", &["Draft", "Active"]),
];

/// Looks up the acceptable detail statuses for an index abbreviation.
///
/// Returns `None` for abbreviations outside the table; the empty string is a
/// valid key and yields the default `Draft`/`Active` set.
pub fn expected_statuses(abbreviation: &str) -> Option<&'static [&'static str]> {
    EXPECTED_STATUS
        .iter()
        .find(|(key, _)| *key == abbreviation)
        .map(|(_, statuses)| *statuses)
}

/// All abbreviations the index page is known to use, empty key included.
pub fn abbreviations() -> impl Iterator<Item = &'static str> {
    EXPECTED_STATUS.iter().map(|(key, _)| *key)
}

pub fn is_known_status(status: &str) -> bool {
    KNOWN_STATUSES.contains(&status)
}

/// Derives the status abbreviation from the first cell of an index row.
///
/// The cell holds a type letter followed by an optional status letter
/// (`"SF"`, `"I"`); only a two-character cell carries a status.
pub fn abbreviation_from_cell(cell_text: &str) -> String {
    let mut chars = cell_text.trim().chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(_), Some(status), None) => status.to_string(),
        _ => String::new(),
    }
}
