//! Docscrape core: pure extraction data, PEP status table and reconciliation.
mod reconcile;
mod status;
mod table;

pub use reconcile::{
    Discrepancy, ReconciliationResult, Reconciler, StatusRecord, StatusTally, PEP_HEADER,
    TOTAL_LABEL,
};
pub use status::{
    abbreviation_from_cell, abbreviations, expected_statuses, is_known_status, KNOWN_STATUSES,
};
pub use table::{ResultTable, Row};
