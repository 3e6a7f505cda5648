//! Per-mode submission lifecycle.
//!
//! Each input mode owns one `SubmissionController`. A submission moves
//! `Idle -> Pending -> Succeeded | Failed`; terminal states only leave via a
//! new explicit submit. The options in effect are snapshotted when the
//! submission begins, travel with the dispatched request, and come back with
//! the response, so a settings change mid-flight never affects how that
//! response is interpreted.

use crate::client::{AnalysisResult, Entity, Sentiment, Source};
use crate::options::SummarizeOptions;

/// Where a submission stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionState {
    /// Nothing submitted since the mode was mounted (or since reset).
    #[default]
    Idle,
    /// A request is in flight. Previous outcomes are already cleared.
    Pending,
    /// The service answered; `options` is the snapshot the request was made
    /// with and gates which optional sections are shown.
    Succeeded {
        result: AnalysisResult,
        options: SummarizeOptions,
    },
    /// The request failed. Holds only the most recent message.
    Failed { message: String },
}

impl SubmissionState {
    /// Entities to display: requires both the snapshot toggle and the field.
    ///
    /// `Some(&[])` means the analysis ran and found nothing, which renders
    /// differently from `None` (not requested or not returned).
    pub fn visible_entities(&self) -> Option<&[Entity]> {
        match self {
            SubmissionState::Succeeded { result, options } if options.recognize_entities => {
                result.entities.as_deref()
            }
            _ => None,
        }
    }

    /// Sentiment to display, gated the same way as entities.
    pub fn visible_sentiment(&self) -> Option<&Sentiment> {
        match self {
            SubmissionState::Succeeded { result, options } if options.analyze_sentiment => {
                result.sentiment.as_ref()
            }
            _ => None,
        }
    }
}

/// State machine guarding one in-flight request per input mode.
#[derive(Debug, Default)]
pub struct SubmissionController {
    state: SubmissionState,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SubmissionState::Pending)
    }

    /// Try to start a submission.
    ///
    /// Returns the options snapshot to dispatch with, or `None` when the
    /// source is empty or a request is already in flight; in both cases the
    /// state is left untouched and no request must be made. Entering
    /// `Pending` clears any previously displayed outcome.
    pub fn begin(&mut self, source: &Source, options: &SummarizeOptions) -> Option<SummarizeOptions> {
        if source.is_empty() || self.is_pending() {
            return None;
        }
        self.state = SubmissionState::Pending;
        Some(options.clone())
    }

    /// Apply a successful response and its submit-time snapshot.
    ///
    /// Applied to whatever state is current; there is no request-id check
    /// and no cancellation.
    pub fn succeed(&mut self, result: AnalysisResult, options: SummarizeOptions) {
        self.state = SubmissionState::Succeeded { result, options };
    }

    /// Apply a failure. The message replaces any earlier one.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = SubmissionState::Failed {
            message: message.into(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{self, AnalysisApi, ClientError, EntityLabel};
    use crate::history::HistoryLedger;
    use crate::options::Algorithm;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Stub service: canned response, counts calls.
    struct StubApi {
        response: Result<AnalysisResult, String>,
        calls: AtomicUsize,
    }

    impl StubApi {
        fn ok(result: AnalysisResult) -> Self {
            Self {
                response: Ok(result),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn answer(&self) -> Result<AnalysisResult, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response.clone().map_err(ClientError::Service)
        }
    }

    #[async_trait]
    impl AnalysisApi for StubApi {
        async fn submit_text(
            &self,
            _text: &str,
            _options: &SummarizeOptions,
        ) -> Result<AnalysisResult, ClientError> {
            self.answer()
        }

        async fn submit_url(
            &self,
            _url: &str,
            _options: &SummarizeOptions,
        ) -> Result<AnalysisResult, ClientError> {
            self.answer()
        }

        async fn fetch_sample(&self) -> Result<String, ClientError> {
            Ok("sample".to_string())
        }
    }

    /// The same begin/dispatch/resolve path the workspace runs, minus the
    /// event loop.
    async fn drive(
        controller: &mut SubmissionController,
        api: &StubApi,
        source: &Source,
        options: &SummarizeOptions,
        ledger: &mut HistoryLedger,
    ) {
        let Some(snapshot) = controller.begin(source, options) else {
            return;
        };
        match client::submit(api, source, &snapshot).await {
            Ok(result) => {
                ledger.append(&result.summary);
                controller.succeed(result, snapshot);
            }
            Err(err) => controller.fail(err.to_string()),
        }
    }

    fn summary_only(text: &str) -> AnalysisResult {
        AnalysisResult {
            summary: text.to_string(),
            entities: None,
            sentiment: None,
        }
    }

    #[tokio::test]
    async fn empty_source_never_submits() {
        let api = StubApi::ok(summary_only("unused"));
        let mut controller = SubmissionController::new();
        let mut ledger = HistoryLedger::new();

        let source = Source::Text("   ".to_string());
        drive(
            &mut controller,
            &api,
            &source,
            &SummarizeOptions::default(),
            &mut ledger,
        )
        .await;

        assert_eq!(*controller.state(), SubmissionState::Idle);
        assert_eq!(api.calls(), 0);
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn success_appends_exactly_one_history_entry() {
        let api = StubApi::ok(summary_only("The gist of it."));
        let mut controller = SubmissionController::new();
        let mut ledger = HistoryLedger::new();
        ledger.append("older entry");

        let source = Source::Text("plenty of source text".to_string());
        drive(
            &mut controller,
            &api,
            &source,
            &SummarizeOptions::default(),
            &mut ledger,
        )
        .await;

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.entries()[0].text, "The gist of it.");
        assert!(matches!(
            controller.state(),
            SubmissionState::Succeeded { .. }
        ));
    }

    #[tokio::test]
    async fn reentrant_submit_is_ignored_while_pending() {
        let api = StubApi::ok(summary_only("once"));
        let mut controller = SubmissionController::new();
        let options = SummarizeOptions::default();
        let source = Source::Text("text".to_string());

        // First submit goes out; second fires before the response lands.
        let first = controller.begin(&source, &options);
        assert!(first.is_some());
        let second = controller.begin(&source, &options);
        assert!(second.is_none());
        assert!(controller.is_pending());

        let snapshot = first.unwrap();
        let result = client::submit(&api, &source, &snapshot).await.unwrap();
        controller.succeed(result, snapshot);

        assert_eq!(api.calls(), 1);
    }

    #[tokio::test]
    async fn failures_hold_only_the_latest_message() {
        let mut controller = SubmissionController::new();
        let mut ledger = HistoryLedger::new();
        let source = Source::Url("https://example.com".to_string());
        let options = SummarizeOptions::default();

        let first = StubApi::err("first failure");
        drive(&mut controller, &first, &source, &options, &mut ledger).await;
        let second = StubApi::err("second failure");
        drive(&mut controller, &second, &source, &options, &mut ledger).await;

        assert_eq!(
            *controller.state(),
            SubmissionState::Failed {
                message: "second failure".to_string()
            }
        );
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn entity_display_follows_the_submit_time_snapshot() {
        let api = StubApi::ok(AnalysisResult {
            summary: "Markets rose.".to_string(),
            entities: Some(vec![Entity {
                text: "markets".to_string(),
                label: EntityLabel::Other("OTHER".to_string()),
            }]),
            sentiment: None,
        });
        let mut controller = SubmissionController::new();
        let requested = SummarizeOptions {
            algorithm: Algorithm::TextRank,
            recognize_entities: true,
            ..SummarizeOptions::default()
        };

        let source = Source::Text("A short article about markets.".to_string());
        let snapshot = controller.begin(&source, &requested).unwrap();

        // The user toggles entities off while the request is in flight; the
        // snapshot, not the current options, decides what is shown.
        let result = client::submit(&api, &source, &snapshot).await.unwrap();
        controller.succeed(result, snapshot);

        let entities = controller.state().visible_entities().unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "markets");
        assert!(controller.state().visible_sentiment().is_none());
    }

    #[tokio::test]
    async fn new_submission_clears_the_previous_outcome() {
        let api = StubApi::ok(summary_only("first"));
        let mut controller = SubmissionController::new();
        let mut ledger = HistoryLedger::new();
        let source = Source::Text("text".to_string());
        let options = SummarizeOptions::default();

        drive(&mut controller, &api, &source, &options, &mut ledger).await;
        assert!(matches!(
            controller.state(),
            SubmissionState::Succeeded { .. }
        ));

        // Beginning again must drop the old result before the new response.
        controller.begin(&source, &options);
        assert_eq!(*controller.state(), SubmissionState::Pending);
        assert!(controller.state().visible_entities().is_none());
    }

    #[test]
    fn requested_but_empty_entities_stay_visible() {
        let options = SummarizeOptions {
            recognize_entities: true,
            analyze_sentiment: true,
            ..SummarizeOptions::default()
        };
        let state = SubmissionState::Succeeded {
            result: AnalysisResult {
                summary: "s".to_string(),
                entities: Some(vec![]),
                sentiment: None,
            },
            options,
        };

        // "Found nothing" is a real, renderable outcome...
        assert_eq!(state.visible_entities(), Some(&[][..]));
        // ...while "requested but not returned" is not.
        assert!(state.visible_sentiment().is_none());
    }

    #[test]
    fn unrequested_entities_are_hidden_even_when_returned() {
        let state = SubmissionState::Succeeded {
            result: AnalysisResult {
                summary: "s".to_string(),
                entities: Some(vec![Entity {
                    text: "Paris".to_string(),
                    label: EntityLabel::Gpe,
                }]),
                sentiment: None,
            },
            options: SummarizeOptions::default(),
        };

        assert!(state.visible_entities().is_none());
    }
}
