//! Builds the paginated reply from a raw upstream payload.

use std::iter;

use moneyview_shared::types::{PageRequest, paginate};
use serde_json::Value;
use tracing::warn;

use super::dates::{DisplayZone, NormalizedDate};
use super::error::ReportError;
use super::flatten::flatten_reports;
use super::types::{BalanceSheetPayload, BalanceSheetResponse, Report, Row};

/// Turns upstream JSON into a [`BalanceSheetResponse`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportAssembler {
    zone: DisplayZone,
}

impl ReportAssembler {
    /// Creates an assembler rendering timestamps in `zone`.
    #[must_use]
    pub const fn new(zone: DisplayZone) -> Self {
        Self { zone }
    }

    /// Decodes, flattens and paginates `raw`.
    ///
    /// The first report's rows are replaced by the requested page; every
    /// report gets its dates normalized. Rows are flattened as raw JSON and
    /// only the rows placed in the reply are decoded.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::UpstreamSchema`] if the report envelope or a
    /// returned row does not decode into the report model, or the payload
    /// holds no reports.
    pub fn assemble(
        &self,
        raw: Value,
        request: &PageRequest,
    ) -> Result<BalanceSheetResponse, ReportError> {
        let payload: BalanceSheetPayload =
            serde_json::from_value(raw).map_err(|e| ReportError::schema(e.to_string()))?;
        let mut reports = payload.reports;
        if reports.is_empty() {
            return Err(ReportError::schema("payload contains no reports"));
        }

        let first_rows = std::mem::take(&mut reports[0].rows);
        let flattened = flatten_reports(
            iter::once(first_rows).chain(reports[1..].iter().map(|report| report.rows.clone())),
        );
        if !flattened.dropped.is_empty() {
            let dropped: Vec<&str> = flattened.dropped.iter().map(|t| t.as_str()).collect();
            warn!(
                count = dropped.len(),
                row_types = ?dropped,
                "Skipped unexpected top-level report rows"
            );
        }

        let page = paginate(flattened.rows, request);
        reports[0].rows = page.items;
        let reports = reports
            .into_iter()
            .map(|report| self.finish(report))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BalanceSheetResponse {
            reports,
            total_rows: page.meta.total_rows,
            current_page: page.meta.page,
            page_size: page.meta.page_size,
            total_pages: page.meta.total_pages,
        })
    }

    /// Decodes the rows of one report and normalizes its dates.
    fn finish(&self, mut report: Report<Value>) -> Result<Report, ReportError> {
        let rows = std::mem::take(&mut report.rows)
            .into_iter()
            .map(serde_json::from_value::<Row>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ReportError::schema(e.to_string()))?;

        let mut report = report.with_rows(rows);
        report.report_date = NormalizedDate::report_date(&report.report_date).into_string();
        report.updated_date_utc =
            NormalizedDate::updated_date(&report.updated_date_utc, self.zone).into_string();
        Ok(report)
    }
}
