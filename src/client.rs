//! Client for the summarization service.
//!
//! The service exposes three operations: summarize pasted text, summarize a
//! URL, and fetch the preloaded sample text. Everything is JSON over HTTP.
//! The boundary is a trait so the rest of the workspace can be driven against
//! a stub in tests.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::options::SummarizeOptions;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!(
    "precis/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/cladam/precis)"
);

/// Transport-level timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum ClientError {
    /// The service answered with a non-success status. Carries the server's
    /// `detail` message when it sent one, else a fixed per-operation message.
    #[error("{0}")]
    Service(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// What is being summarized. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Text(String),
    Url(String),
}

impl Source {
    pub fn is_empty(&self) -> bool {
        match self {
            Source::Text(text) => text.trim().is_empty(),
            Source::Url(url) => url.trim().is_empty(),
        }
    }
}

/// A named span recognized in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Entity category, round-tripping the service's uppercase tags.
///
/// The service emits spaCy-style labels; anything beyond the common four is
/// preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Loc,
    Other(String),
}

impl From<String> for EntityLabel {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "PERSON" => EntityLabel::Person,
            "ORG" => EntityLabel::Org,
            "GPE" => EntityLabel::Gpe,
            "LOC" => EntityLabel::Loc,
            _ => EntityLabel::Other(tag),
        }
    }
}

impl From<EntityLabel> for String {
    fn from(label: EntityLabel) -> Self {
        match label {
            EntityLabel::Person => "PERSON".to_string(),
            EntityLabel::Org => "ORG".to_string(),
            EntityLabel::Gpe => "GPE".to_string(),
            EntityLabel::Loc => "LOC".to_string(),
            EntityLabel::Other(tag) => tag,
        }
    }
}

impl EntityLabel {
    pub fn as_str(&self) -> &str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Loc => "LOC",
            EntityLabel::Other(tag) => tag,
        }
    }
}

/// Polarity classification of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
        }
    }
}

/// Sentiment label plus the compound score in [-1, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

/// A normalized service response.
///
/// `entities` and `sentiment` are present only when the corresponding
/// analysis was requested and the service returned the field. `Some(vec![])`
/// means "requested, nothing found" and is distinct from `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<Entity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
}

#[derive(Serialize)]
struct TextPayload<'a> {
    text: &'a str,
    #[serde(flatten)]
    options: &'a SummarizeOptions,
}

#[derive(Serialize)]
struct UrlPayload<'a> {
    url: &'a str,
    #[serde(flatten)]
    options: &'a SummarizeOptions,
}

#[derive(Deserialize)]
struct SamplePayload {
    sample_text: String,
}

#[derive(Deserialize)]
struct ErrorPayload {
    detail: String,
}

/// The three operations the workspace needs from the service.
///
/// One attempt per call; retry policy, if any, belongs to the caller.
#[async_trait]
pub trait AnalysisApi {
    async fn submit_text(
        &self,
        text: &str,
        options: &SummarizeOptions,
    ) -> Result<AnalysisResult, ClientError>;

    async fn submit_url(
        &self,
        url: &str,
        options: &SummarizeOptions,
    ) -> Result<AnalysisResult, ClientError>;

    async fn fetch_sample(&self) -> Result<String, ClientError>;
}

/// Route a request to the operation matching its source kind.
pub async fn submit<C: AnalysisApi + ?Sized>(
    client: &C,
    source: &Source,
    options: &SummarizeOptions,
) -> Result<AnalysisResult, ClientError> {
    match source {
        Source::Text(text) => client.submit_text(text, options).await,
        Source::Url(url) => client.submit_url(url, options).await,
    }
}

/// HTTP implementation of [`AnalysisApi`].
pub struct HttpAnalysisClient {
    http: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Build a client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a summarize payload and normalize the response.
    ///
    /// Non-success responses carry `{ "detail": ... }`; that message is
    /// surfaced as-is, falling back to `fallback` when the body is missing
    /// or malformed.
    async fn post_summarize<P: Serialize>(
        &self,
        path: &str,
        payload: &P,
        fallback: &str,
    ) -> Result<AnalysisResult, ClientError> {
        let response = self.http.post(self.endpoint(path)).json(payload).send().await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(ClientError::Service(detail_or(response, fallback).await))
        }
    }
}

/// Extract the server's `detail` message, or fall back to a fixed one.
async fn detail_or(response: reqwest::Response, fallback: &str) -> String {
    match response.json::<ErrorPayload>().await {
        Ok(body) if !body.detail.is_empty() => body.detail,
        _ => fallback.to_string(),
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisClient {
    async fn submit_text(
        &self,
        text: &str,
        options: &SummarizeOptions,
    ) -> Result<AnalysisResult, ClientError> {
        let payload = TextPayload { text, options };
        self.post_summarize("/summarize-text", &payload, "Failed to summarize text")
            .await
    }

    async fn submit_url(
        &self,
        url: &str,
        options: &SummarizeOptions,
    ) -> Result<AnalysisResult, ClientError> {
        let payload = UrlPayload { url, options };
        self.post_summarize("/summarize-url", &payload, "Failed to summarize URL")
            .await
    }

    async fn fetch_sample(&self) -> Result<String, ClientError> {
        let response = self.http.get(self.endpoint("/sample-text")).send().await?;

        if response.status().is_success() {
            let body: SamplePayload = response.json().await?;
            Ok(body.sample_text)
        } else {
            Err(ClientError::Service(
                detail_or(response, "Failed to fetch sample text").await,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Algorithm, SummaryLength};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn options() -> SummarizeOptions {
        SummarizeOptions {
            algorithm: Algorithm::TextRank,
            compression_ratio: 40,
            recognize_entities: true,
            analyze_sentiment: false,
            ..SummarizeOptions::default()
        }
    }

    #[tokio::test]
    async fn submit_text_sends_options_verbatim_and_decodes_entities() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize-text"))
            .and(body_partial_json(json!({
                "text": "A short article about markets.",
                "algorithm": "TextRank",
                "summary_length": "Medium",
                "compression_ratio": 40,
                "recognize_entities": true,
                "analyze_sentiment": false,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "summary": "Markets rose.",
                "entities": [{"text": "markets", "label": "OTHER"}],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(server.uri()).unwrap();
        let result = client
            .submit_text("A short article about markets.", &options())
            .await
            .unwrap();

        assert_eq!(result.summary, "Markets rose.");
        let entities = result.entities.unwrap();
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "markets");
        assert_eq!(entities[0].label, EntityLabel::Other("OTHER".to_string()));
        assert_eq!(result.sentiment, None);
    }

    #[tokio::test]
    async fn inactive_ratio_is_still_sent_for_abstractive_algorithms() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize-text"))
            .and(body_partial_json(json!({
                "algorithm": "Hugging Face",
                "summary_length": "Long",
                "compression_ratio": 40,
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"summary": "Short."})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(server.uri()).unwrap();
        let abstractive = SummarizeOptions {
            algorithm: Algorithm::HuggingFace,
            summary_length: SummaryLength::Long,
            ..SummarizeOptions::default()
        };
        let result = client.submit_text("some text", &abstractive).await.unwrap();

        assert_eq!(result.summary, "Short.");
        assert_eq!(result.entities, None);
    }

    #[tokio::test]
    async fn server_detail_is_surfaced_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize-text"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "detail": "Text must be at least 100 characters long.",
            })))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(server.uri()).unwrap();
        let err = client.submit_text("too short", &options()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Text must be at least 100 characters long."
        );
    }

    #[tokio::test]
    async fn missing_detail_falls_back_to_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/summarize-url"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(server.uri()).unwrap();
        let err = client
            .submit_url("https://example.com", &options())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to summarize URL");
    }

    #[tokio::test]
    async fn fetch_sample_unwraps_the_sample_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sample-text"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sample_text": "Artificial intelligence has come a long way.",
            })))
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(server.uri()).unwrap();
        let sample = client.fetch_sample().await.unwrap();

        assert_eq!(sample, "Artificial intelligence has come a long way.");
    }

    #[tokio::test]
    async fn fetch_sample_failure_surfaces_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sample-text"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"detail": "unavailable"})),
            )
            .mount(&server)
            .await;

        let client = HttpAnalysisClient::new(server.uri()).unwrap();
        let err = client.fetch_sample().await.unwrap_err();

        assert_eq!(err.to_string(), "unavailable");
    }

    #[test]
    fn entity_labels_round_trip() {
        for tag in ["PERSON", "ORG", "GPE", "LOC", "NORP"] {
            let label = EntityLabel::from(tag.to_string());
            assert_eq!(String::from(label.clone()), tag);
            assert_eq!(label.as_str(), tag);
        }
    }

    #[test]
    fn empty_sources_are_detected() {
        assert!(Source::Text("   ".to_string()).is_empty());
        assert!(Source::Url(String::new()).is_empty());
        assert!(!Source::Text("words".to_string()).is_empty());
    }
}
