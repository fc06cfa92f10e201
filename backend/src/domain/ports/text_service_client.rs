//! Outbound port for the external Text-Service.

use async_trait::async_trait;

use crate::domain::{Summary, SummaryRequest, TextServiceHealth, Translation, TranslationRequest};

use super::UpstreamError;

/// Client port for translation and summarisation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextServiceClient: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation, UpstreamError>;

    async fn summarize(&self, request: &SummaryRequest) -> Result<Summary, UpstreamError>;

    async fn health(&self) -> Result<TextServiceHealth, UpstreamError>;
}
