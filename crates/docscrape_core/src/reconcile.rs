use std::fmt;

use url::Url;

use crate::status::expected_statuses;
use crate::table::ResultTable;

pub const PEP_HEADER: [&str; 2] = ["Status", "Count"];
pub const TOTAL_LABEL: &str = "Total";

/// One row of the PEP index: the status letter it advertises and where the
/// authoritative detail page lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRecord {
    /// Single status letter, or empty when the index row carries none.
    pub abbreviation: String,
    pub detail_url: Url,
}

/// A detail page whose declared status is outside what its index row promised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discrepancy {
    pub url: Url,
    pub actual: String,
    pub abbreviation: String,
    /// Acceptable statuses; empty when the abbreviation itself is unknown.
    pub expected: &'static [&'static str],
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mismatched status:")?;
        writeln!(f, "{}", self.url)?;
        writeln!(f, "Status on page: {}", self.actual)?;
        if self.expected.is_empty() {
            write!(f, "Expected statuses: unknown abbreviation {:?}", self.abbreviation)
        } else {
            write!(f, "Expected statuses: {:?}", self.expected)
        }
    }
}

/// Occurrence count per distinct status, kept in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTally {
    entries: Vec<(String, usize)>,
}

impl StatusTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-zero, then increment.
    pub fn increment(&mut self, status: &str) {
        match self.entries.iter_mut().find(|(name, _)| name == status) {
            Some((_, count)) => *count += 1,
            None => self.entries.push((status.to_string(), 1)),
        }
    }

    pub fn get(&self, status: &str) -> usize {
        self.entries
            .iter()
            .find(|(name, _)| name == status)
            .map_or(0, |(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, count)| (name.as_str(), *count))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sum(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Accumulates detail statuses for one run of the PEP mode.
#[derive(Debug, Default)]
pub struct Reconciler {
    tally: StatusTally,
    discrepancies: Vec<Discrepancy>,
    processed: usize,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cross-checks one record against the status its detail page declared and
    /// counts it. Returns the discrepancy when the status was not expected.
    pub fn record(&mut self, record: &StatusRecord, detail_status: &str) -> Option<&Discrepancy> {
        self.processed += 1;
        self.tally.increment(detail_status);

        let expected = expected_statuses(&record.abbreviation).unwrap_or(&[]);
        if expected.contains(&detail_status) {
            return None;
        }
        self.discrepancies.push(Discrepancy {
            url: record.detail_url.clone(),
            actual: detail_status.to_string(),
            abbreviation: record.abbreviation.clone(),
            expected,
        });
        self.discrepancies.last()
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn finish(self) -> ReconciliationResult {
        debug_assert_eq!(self.tally.sum(), self.processed);
        ReconciliationResult {
            counts: self.tally,
            discrepancies: self.discrepancies,
            total: self.processed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationResult {
    pub counts: StatusTally,
    /// In the order the mismatching rows were encountered.
    pub discrepancies: Vec<Discrepancy>,
    pub total: usize,
}

impl ReconciliationResult {
    /// `(Status, Count)` header, one row per status, then the `Total` row.
    pub fn to_table(&self) -> ResultTable {
        let mut table = ResultTable::new(PEP_HEADER);
        for (status, count) in self.counts.iter() {
            table.push([status.to_string(), count.to_string()]);
        }
        table.push([TOTAL_LABEL.to_string(), self.total.to_string()]);
        table
    }
}
