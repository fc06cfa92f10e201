//! Gateway settings (`GATEWAY_*`).

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use super::{SettingsError, bind_addr, timeout, url};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_RECORD_STORE_URL: &str = "http://localhost:8080";
const DEFAULT_AGGREGATOR_URL: &str = "http://localhost:9000";
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Settings for the `campus-gateway` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Target for `/api/students`, `/api/universities` and `/auth`.
    pub record_store_url: Option<String>,
    /// Target for `/graphql`.
    pub aggregator_url: Option<String>,
    /// Per-request timeout for forwarded calls.
    pub request_timeout_secs: Option<u64>,
    /// Largest request body forwarded, in bytes.
    #[ortho_config(default = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,
}

impl GatewaySettings {
    /// Listen address, `0.0.0.0:8000` by default.
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
    pub fn aggregator_url(&self) -> Result<Url, SettingsError> {
        url(
            "aggregator_url",
            self.aggregator_url.as_deref(),
            DEFAULT_AGGREGATOR_URL,
        )
    }

    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositive`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Option<Duration>, SettingsError> {
        timeout("request_timeout_secs", self.request_timeout_secs)
    }

    /// Request body limit, 10 MiB by default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositive`] for a zero limit.
    pub fn max_body_bytes(&self) -> Result<usize, SettingsError> {
        match self.max_body_bytes {
            0 => Err(SettingsError::NonPositive {
                name: "max_body_bytes",
                value: 0,
            }),
            bytes => Ok(bytes),
        }
    }
}
