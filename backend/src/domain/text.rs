//! Request and response shapes for the external Text-Service.

use serde::{Deserialize, Serialize};

/// Translation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationRequest {
    /// Text to translate.
    pub text: String,
    /// Source language code; the service defaults it when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
    /// Target language code; the service defaults it when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_lang: Option<String>,
}

/// Translation produced by the Text-Service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Translation {
    /// Echo of the submitted text.
    pub original_text: String,
    /// Translated text.
    pub translated_text: String,
    /// Resolved source language.
    pub source_lang: String,
    /// Resolved target language.
    pub target_lang: String,
}

/// Summarisation request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRequest {
    /// Text to summarise.
    pub text: String,
    /// Upper bound on summary length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i32>,
    /// Lower bound on summary length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<i32>,
}

/// Summary produced by the Text-Service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Summary {
    /// Echo of the submitted text.
    pub original_text: String,
    /// Generated summary.
    pub summary: String,
    /// Word count of the input.
    pub original_length: i32,
    /// Word count of the summary.
    pub summary_length: i32,
}

/// Health report of the Text-Service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextServiceHealth {
    /// Service-reported status string.
    #[serde(default)]
    pub status: Option<String>,
    /// Service name.
    #[serde(default)]
    pub service: Option<String>,
    /// Service version.
    #[serde(default)]
    pub version: Option<String>,
}
