//! Spreadsheet CSV export tokenizer and positional row access.
//!
//! Published sheet exports are small and quirky: CRLF or LF line endings,
//! quoted cells with embedded commas or newlines, doubled-quote escapes and
//! trailing blank lines. [`parse`] turns such a document into
//! [`ContentRow`]s; malformed quoting is tolerated rather than rejected.

mod tokenizer;

pub use tokenizer::tokenize;

/// Parse a CSV document and drop rows whose every cell is blank after trimming.
pub fn parse(text: &str) -> Vec<ContentRow> {
    let rows: Vec<ContentRow> = tokenize(text)
        .into_iter()
        .filter(|row| !row.is_blank())
        .collect();
    tracing::trace!(rows = rows.len(), "parsed CSV document");
    rows
}

/// Split a multi-value cell on `delimiter`, trimming each segment and
/// dropping empty ones.
pub fn split_list(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

// ---------------------------------------------------------------------------
// ContentRow
// ---------------------------------------------------------------------------

/// One tokenized row. Column position carries the meaning of each cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentRow(Vec<String>);

impl ContentRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self(cells)
    }

    /// Number of cells in the row, blank ones included.
    pub fn width(&self) -> usize {
        self.0.len()
    }

    /// Raw cell at `index`; `""` past the end of the row.
    pub fn cell(&self, index: usize) -> &str {
        self.0.get(index).map(String::as_str).unwrap_or("")
    }

    /// Trimmed cell at `index`, `None` when missing or blank.
    pub fn field(&self, index: usize) -> Option<&str> {
        let value = self.cell(index).trim();
        (!value.is_empty()).then_some(value)
    }

    /// Trimmed cell at `index`, or `default` when missing or blank.
    pub fn field_or(&self, index: usize, default: &str) -> String {
        self.field(index).unwrap_or(default).to_string()
    }

    /// Whether every cell is empty after trimming.
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(|c| c.trim().is_empty())
    }

    /// Cells from `start` onwards.
    pub fn cells_from(&self, start: usize) -> &[String] {
        self.0.get(start..).unwrap_or(&[])
    }

    pub fn cells(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for ContentRow {
    fn from(cells: Vec<String>) -> Self {
        Self(cells)
    }
}

impl<const N: usize> From<[&str; N]> for ContentRow {
    fn from(cells: [&str; N]) -> Self {
        Self(cells.iter().map(|c| c.to_string()).collect())
    }
}
