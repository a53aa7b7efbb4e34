//! Flattening of the report row tree.
//!
//! Flattening only looks at `RowType` and the nested `Rows` of each row, so it
//! runs on raw upstream JSON as well as on decoded [`Row`]s.

use serde_json::Value;

use super::types::{Row, RowType};

/// A row as seen by the flattener.
pub trait FlatRow: Clone {
    /// Kind of the row.
    fn row_type(&self) -> RowType;

    /// Direct children; empty when absent.
    fn children(&self) -> &[Self];
}

impl FlatRow for Row {
    fn row_type(&self) -> RowType {
        self.row_type.clone()
    }

    fn children(&self) -> &[Self] {
        self.rows.as_deref().unwrap_or_default()
    }
}

/// Raw rows: a missing `RowType` reads as an empty unknown type and a
/// non-array `Rows` as no children.
impl FlatRow for Value {
    fn row_type(&self) -> RowType {
        self.get("RowType")
            .and_then(Value::as_str)
            .map_or_else(|| RowType::Other(String::new()), |name| RowType::from(name.to_string()))
    }

    fn children(&self) -> &[Self] {
        self.get("Rows")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Result of flattening one or more row trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedRows<R = Row> {
    /// Rows in display order.
    pub rows: Vec<R>,
    /// Types of top-level rows that were skipped.
    pub dropped: Vec<RowType>,
}

impl<R> Default for FlattenedRows<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            dropped: Vec::new(),
        }
    }
}

impl<R> FlattenedRows<R> {
    fn extend(&mut self, other: Self) {
        self.rows.extend(other.rows);
        self.dropped.extend(other.dropped);
    }
}

/// Flattens one report's top-level rows.
///
/// The first row (the header) is kept unconditionally. After it, a section is
/// emitted followed by its direct children, and a summary row is emitted as
/// is. Other top-level row types are skipped and recorded in `dropped`.
/// Sections keep their own nested rows; grandchildren are not lifted.
#[must_use]
pub fn flatten_rows<R: FlatRow>(rows: Vec<R>) -> FlattenedRows<R> {
    let mut flattened = FlattenedRows {
        rows: Vec::with_capacity(rows.len()),
        dropped: Vec::new(),
    };
    let mut rows = rows.into_iter();

    if let Some(header) = rows.next() {
        flattened.rows.push(header);
    }

    for row in rows {
        match row.row_type() {
            RowType::Section => {
                let children = row.children().to_vec();
                flattened.rows.push(row);
                flattened.rows.extend(children);
            }
            RowType::SummaryRow => flattened.rows.push(row),
            other => flattened.dropped.push(other),
        }
    }

    flattened
}

/// Flattens the row lists of several reports in order and concatenates the
/// results.
#[must_use]
pub fn flatten_reports<R, I>(reports: I) -> FlattenedRows<R>
where
    R: FlatRow,
    I: IntoIterator<Item = Vec<R>>,
{
    reports
        .into_iter()
        .fold(FlattenedRows::default(), |mut acc, rows| {
            acc.extend(flatten_rows(rows));
            acc
        })
}
