//! Balance sheet service.

use std::sync::Arc;

use moneyview_shared::types::PageRequest;
use tracing::{error, info, warn};

use super::assemble::ReportAssembler;
use super::dates::DisplayZone;
use super::error::ReportError;
use super::source::BalanceSheetSource;
use super::types::BalanceSheetResponse;
use crate::retry::{RetryError, RetryPolicy, Sleeper, TokioSleeper};

/// Fetches, flattens and paginates the upstream balance sheet.
///
/// Constructed once at startup and shared by all requests; it holds no
/// per-request state.
#[derive(Clone)]
pub struct BalanceSheetService {
    source: Arc<dyn BalanceSheetSource>,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
    assembler: ReportAssembler,
}

impl BalanceSheetService {
    /// Creates a service that waits between retries on the tokio timer.
    #[must_use]
    pub fn new(source: Arc<dyn BalanceSheetSource>, policy: RetryPolicy, zone: DisplayZone) -> Self {
        Self::with_sleeper(source, policy, zone, Arc::new(TokioSleeper))
    }

    /// Creates a service with a custom sleeper.
    #[must_use]
    pub fn with_sleeper(
        source: Arc<dyn BalanceSheetSource>,
        policy: RetryPolicy,
        zone: DisplayZone,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            source,
            policy,
            sleeper,
            assembler: ReportAssembler::new(zone),
        }
    }

    /// Returns the requested page of the flattened balance sheet.
    ///
    /// Transport failures are retried per the policy; a payload that does not
    /// match the report model fails immediately.
    pub async fn get_balance_sheet(
        &self,
        request: PageRequest,
    ) -> Result<BalanceSheetResponse, ReportError> {
        let max_attempts = self.policy.max_attempts.max(1);

        let raw = self
            .policy
            .run(
                self.sleeper.as_ref(),
                |attempt| {
                    info!(
                        attempt,
                        max_attempts,
                        page = request.page,
                        page_size = request.page_size,
                        "Fetching balance sheet"
                    );
                    let source = Arc::clone(&self.source);
                    async move {
                        let result = source.fetch_balance_sheet(&request).await;
                        if let Err(e) = &result {
                            warn!(attempt, error = %e, "Balance sheet fetch failed");
                        }
                        result
                    }
                },
                ReportError::is_retryable,
            )
            .await
            .map_err(|e| match e {
                RetryError::Exhausted { attempts, last } => ReportError::RetriesExhausted {
                    attempts,
                    last: last.to_string(),
                },
                RetryError::Aborted(err) => err,
            })
            .inspect_err(|e| error!(error = %e, "Giving up on balance sheet fetch"))?;

        self.assembler
            .assemble(raw, &request)
            .inspect_err(|e| error!(error = %e, "Failed to build balance sheet response"))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;

    /// Source that replays scripted outcomes and counts calls.
    struct ScriptedSource {
        outcomes: Mutex<VecDeque<Result<Value, ReportError>>>,
        calls: Mutex<Vec<PageRequest>>,
    }

    impl ScriptedSource {
        fn new(outcomes: Vec<Result<Value, ReportError>>) -> Arc<Self> {
            Arc::new(Self {
                outcomes: Mutex::new(outcomes.into()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<PageRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BalanceSheetSource for ScriptedSource {
        async fn fetch_balance_sheet(&self, request: &PageRequest) -> Result<Value, ReportError> {
            self.calls.lock().unwrap().push(*request);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ReportError::transport("script exhausted")))
        }
    }

    #[derive(Default)]
    struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    fn balance_sheet() -> Value {
        json!({
            "Reports": [{
                "ReportID": "BalanceSheet",
                "ReportName": "Balance Sheet",
                "ReportType": "BalanceSheet",
                "ReportTitles": ["Balance Sheet"],
                "ReportDate": "24 March 2024",
                "UpdatedDateUTC": "/Date(1711234567000)/",
                "Rows": [
                    {"RowType": "Header", "Cells": [{"Value": "Account"}]},
                    {"RowType": "Section", "Title": "Assets", "Rows": [
                        {"RowType": "Row", "Cells": [{"Value": "Cash"}]}
                    ]},
                    {"RowType": "SummaryRow", "Title": "Net Assets"}
                ]
            }]
        })
    }

    fn service(
        source: Arc<ScriptedSource>,
        sleeper: Arc<RecordingSleeper>,
    ) -> BalanceSheetService {
        BalanceSheetService::with_sleeper(
            source,
            RetryPolicy::new(3, Duration::from_secs(2)),
            DisplayZone::Named(chrono_tz::UTC),
            sleeper,
        )
    }

    #[tokio::test]
    async fn test_success_first_try() {
        let source = ScriptedSource::new(vec![Ok(balance_sheet())]);
        let sleeper = Arc::new(RecordingSleeper::default());

        let response = service(source.clone(), sleeper.clone())
            .get_balance_sheet(PageRequest::new(1, 10))
            .await
            .unwrap();

        assert_eq!(response.total_rows, 4);
        assert_eq!(response.total_pages, 1);
        assert_eq!(source.calls(), vec![PageRequest::new(1, 10)]);
        assert!(sleeper.slept.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recovers_on_third_attempt() {
        let source = ScriptedSource::new(vec![
            Err(ReportError::transport("connection refused")),
            Err(ReportError::transport("HTTP status 502 Bad Gateway")),
            Ok(balance_sheet()),
        ]);
        let sleeper = Arc::new(RecordingSleeper::default());

        let response = service(source.clone(), sleeper.clone())
            .get_balance_sheet(PageRequest::default())
            .await
            .unwrap();

        assert_eq!(response.reports[0].rows.len(), 4);
        assert_eq!(source.calls().len(), 3);
        assert_eq!(sleeper.slept.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_gives_up_after_three_attempts() {
        let source = ScriptedSource::new(vec![
            Err(ReportError::transport("first")),
            Err(ReportError::transport("second")),
            Err(ReportError::transport("third")),
        ]);
        let sleeper = Arc::new(RecordingSleeper::default());

        let err = service(source.clone(), sleeper.clone())
            .get_balance_sheet(PageRequest::default())
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("after 3 attempts"), "{message}");
        assert!(message.contains("third"), "{message}");
        assert!(!message.contains("second"), "{message}");
        assert_eq!(err.kind(), "RetriesExhaustedError");
        assert_eq!(source.calls().len(), 3);
        assert_eq!(
            *sleeper.slept.lock().unwrap(),
            vec![Duration::from_secs(2); 2]
        );
    }

    #[tokio::test]
    async fn test_schema_error_is_not_retried() {
        let source = ScriptedSource::new(vec![Ok(json!({"invalid": "response"}))]);
        let sleeper = Arc::new(RecordingSleeper::default());

        let err = service(source.clone(), sleeper.clone())
            .get_balance_sheet(PageRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::UpstreamSchema(_)));
        assert_eq!(source.calls().len(), 1);
        assert!(sleeper.slept.lock().unwrap().is_empty());
    }
}
