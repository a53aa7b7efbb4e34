//! Report data types.
//!
//! Field names follow the upstream accounting API on the wire.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a report row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RowType {
    /// Column headings; always the first row of a report.
    Header,
    /// Group of rows, e.g. "Assets".
    Section,
    /// Total line.
    SummaryRow,
    /// Plain line item, normally nested in a section.
    Row,
    /// Any type the upstream sends that is not listed above.
    Other(String),
}

impl RowType {
    /// Wire name of the row type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Header => "Header",
            Self::Section => "Section",
            Self::SummaryRow => "SummaryRow",
            Self::Row => "Row",
            Self::Other(name) => name,
        }
    }
}

impl From<String> for RowType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Header" => Self::Header,
            "Section" => Self::Section,
            "SummaryRow" => Self::SummaryRow,
            "Row" => Self::Row,
            _ => Self::Other(value),
        }
    }
}

impl From<RowType> for String {
    fn from(value: RowType) -> Self {
        match value {
            RowType::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single cell value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Display value, e.g. "$1,000".
    #[serde(rename = "Value")]
    pub value: String,
}

impl Cell {
    /// Creates a cell.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// One line of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Row {
    /// Row kind.
    pub row_type: RowType,
    /// Optional title.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional cell values.
    #[serde(default)]
    pub cells: Option<Vec<Cell>>,
    /// Nested rows; only sections carry them in practice.
    #[serde(default)]
    pub rows: Option<Vec<Row>>,
}

impl Row {
    /// Creates a bare row of the given type.
    #[must_use]
    pub fn new(row_type: RowType) -> Self {
        Self {
            row_type,
            title: None,
            cells: None,
            rows: None,
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the cells from plain values.
    #[must_use]
    pub fn with_cells<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cells = Some(values.into_iter().map(Cell::new).collect());
        self
    }

    /// Sets the nested rows.
    #[must_use]
    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = Some(rows);
        self
    }
}

/// One report document.
///
/// `R` is the row representation: raw JSON while the payload is being
/// flattened, [`Row`] once the reply is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report<R = Row> {
    /// Report identifier.
    #[serde(rename = "ReportID")]
    pub report_id: String,
    /// Report name.
    pub report_name: String,
    /// Report type.
    pub report_type: String,
    /// Title lines.
    pub report_titles: Vec<String>,
    /// Report date, normalized on output.
    pub report_date: String,
    /// Last update timestamp, normalized on output.
    #[serde(rename = "UpdatedDateUTC")]
    pub updated_date_utc: String,
    /// Top-level rows.
    pub rows: Vec<R>,
}

impl<R> Report<R> {
    /// Replaces the rows, possibly changing their representation.
    #[must_use]
    pub fn with_rows<T>(self, rows: Vec<T>) -> Report<T> {
        Report {
            report_id: self.report_id,
            report_name: self.report_name,
            report_type: self.report_type,
            report_titles: self.report_titles,
            report_date: self.report_date,
            updated_date_utc: self.updated_date_utc,
            rows,
        }
    }
}

/// Balance sheet payload as returned by the upstream API.
///
/// Envelope fields other than `Reports` are ignored. Rows stay raw JSON so
/// that rows which are dropped or fall outside the requested page are never
/// decoded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceSheetPayload {
    /// Reports in the payload.
    pub reports: Vec<Report<Value>>,
}

/// Paginated balance sheet reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BalanceSheetResponse {
    /// Reports; the first one carries the requested page of rows.
    pub reports: Vec<Report>,
    /// Rows in the flattened report.
    pub total_rows: u64,
    /// Requested page.
    pub current_page: u32,
    /// Requested page size.
    pub page_size: u32,
    /// `ceil(total_rows / page_size)`.
    pub total_pages: u64,
}
