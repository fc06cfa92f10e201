//! GraphQL aggregator settings (`AGGREGATOR_*`).

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use super::{SettingsError, bind_addr, timeout, url};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:9000";
const DEFAULT_RECORD_STORE_URL: &str = "http://localhost:8080";
const DEFAULT_COURSE_STORE_URL: &str = "http://localhost:9090/api";
const DEFAULT_TEXT_SERVICE_URL: &str = "http://localhost:8002";

/// Settings for the `campus-aggregator` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AGGREGATOR")]
pub struct AggregatorSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Record Store base URL.
    pub record_store_url: Option<String>,
    /// Course Store base URL including its `/api` prefix.
    pub course_store_url: Option<String>,
    /// Text-Service base URL.
    pub text_service_url: Option<String>,
    /// Per-request timeout for upstream calls.
    pub request_timeout_secs: Option<u64>,
    /// Serve the GraphiQL explorer on `GET /graphql`.
    #[ortho_config(default = true)]
    pub graphiql: bool,
}

impl AggregatorSettings {
    /// Listen address, `0.0.0.0:9000` by default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        bind_addr(self.bind_addr.as_deref(), DEFAULT_BIND_ADDR)
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] when the value does not parse.
    pub fn record_store_url(&self) -> Result<Url, SettingsError> {
        url(
            "record_store_url",
            self.record_store_url.as_deref(),
            DEFAULT_RECORD_STORE_URL,
        )
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] when the value does not parse.
    pub fn course_store_url(&self) -> Result<Url, SettingsError> {
        url(
            "course_store_url",
            self.course_store_url.as_deref(),
            DEFAULT_COURSE_STORE_URL,
        )
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::Url`] when the value does not parse.
    pub fn text_service_url(&self) -> Result<Url, SettingsError> {
        url(
            "text_service_url",
            self.text_service_url.as_deref(),
            DEFAULT_TEXT_SERVICE_URL,
        )
    }

    /// Upstream timeout; `None` leaves the client default in place.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositive`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Option<Duration>, SettingsError> {
        timeout("request_timeout_secs", self.request_timeout_secs)
    }
}
