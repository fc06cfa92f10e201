//! Reqwest adapter for the Text-Service.

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use crate::domain::ports::{TextServiceClient, UpstreamError};
use crate::domain::{Summary, SummaryRequest, TextServiceHealth, Translation, TranslationRequest};

use super::upstream::Upstream;

/// Talks to the Text-Service under `base` (for example `http://localhost:8002`).
#[derive(Debug, Clone)]
pub struct HttpTextServiceClient {
    upstream: Upstream,
}

impl HttpTextServiceClient {
    /// Create a client rooted at `base`.
    pub fn new(client: Client, base: &Url) -> Self {
        Self {
            upstream: Upstream::new(client, base),
        }
    }
}

#[async_trait]
impl TextServiceClient for HttpTextServiceClient {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, UpstreamError> {
        self.upstream
            .send(Method::POST, "/api/translate/", request, "translation")
            .await
    }

    async fn summarize(&self, request: &SummaryRequest) -> Result<Summary, UpstreamError> {
        self.upstream
            .send(Method::POST, "/api/summarize/", request, "summary")
            .await
    }

    async fn health(&self) -> Result<TextServiceHealth, UpstreamError> {
        self.upstream.get("/api/health/", "text service health").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn translate_omits_absent_languages() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/translate/"))
            .and(body_json(json!({ "text": "bonjour" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "original_text": "bonjour",
                "translated_text": "hello",
                "source_lang": "fr",
                "target_lang": "en"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).expect("mock server url");
        let translation = HttpTextServiceClient::new(Client::new(), &base)
            .translate(&TranslationRequest {
                text: "bonjour".to_owned(),
                source_lang: None,
                target_lang: None,
            })
            .await
            .expect("translated");
        assert_eq!(translation.translated_text, "hello");
    }

    #[tokio::test]
    async fn malformed_summary_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/summarize/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "summary": 3 })))
            .mount(&server)
            .await;

        let base = Url::parse(&server.uri()).expect("mock server url");
        let err = HttpTextServiceClient::new(Client::new(), &base)
            .summarize(&SummaryRequest {
                text: "long text".to_owned(),
                max_length: None,
                min_length: None,
            })
            .await
            .expect_err("bad shape");
        assert_eq!(err.kind(), "decode");
    }
}
