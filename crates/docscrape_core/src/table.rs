/// A single result row: fixed-arity, one string per column.
pub type Row = Vec<String>;

/// Tabular result of a mode: a header row followed by data rows.
///
/// Every mode constructs its own table per invocation and hands it back by
/// value, so rows never leak from one run into the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultTable {
    header: Row,
    rows: Vec<Row>,
}

impl ResultTable {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Rows must have the same arity as the header.
    pub fn push<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let row: Row = row.into_iter().map(Into::into).collect();
        debug_assert_eq!(row.len(), self.header.len(), "row arity mismatch");
        self.rows.push(row);
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consumes the table into the header-first row sequence handed to output.
    pub fn into_rows(self) -> Vec<Row> {
        let mut all = Vec::with_capacity(self.rows.len() + 1);
        all.push(self.header);
        all.extend(self.rows);
        all
    }
}
