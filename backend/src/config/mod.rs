//! Settings for the three binaries, loaded via OrthoConfig from CLI flags,
//! environment variables and configuration files.
//!
//! Accessors apply defaults for absent values and validate what is present so
//! binaries fail fast on malformed addresses or URLs. Each struct needs at
//! least one `#[ortho_config(default = ..)]` field to load from an empty
//! environment.

mod aggregator;
mod gateway;
mod record_store;

use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

pub use aggregator::AggregatorSettings;
pub use gateway::GatewaySettings;
pub use record_store::RecordStoreSettings;

/// Invalid configuration values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A bind address did not parse as `host:port`.
    #[error("invalid bind address '{value}': {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// An upstream URL did not parse.
    #[error("invalid URL for {name} '{value}': {source}")]
    Url {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// A duration was zero or negative.
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: i64 },
}

fn bind_addr(value: Option<&str>, default: &str) -> Result<SocketAddr, SettingsError> {
    let raw = value.unwrap_or(default);
    raw.parse().map_err(|source| SettingsError::BindAddr {
        value: raw.to_owned(),
        source,
    })
}

fn url(name: &'static str, value: Option<&str>, default: &str) -> Result<Url, SettingsError> {
    let raw = value.unwrap_or(default);
    Url::parse(raw).map_err(|source| SettingsError::Url {
        name,
        value: raw.to_owned(),
        source,
    })
}

fn positive_secs(name: &'static str, value: Option<i64>) -> Result<Option<i64>, SettingsError> {
    match value {
        Some(secs) if secs <= 0 => Err(SettingsError::NonPositive { name, value: secs }),
        other => Ok(other),
    }
}

fn timeout(name: &'static str, value: Option<u64>) -> Result<Option<Duration>, SettingsError> {
    match value {
        Some(0) => Err(SettingsError::NonPositive { name, value: 0 }),
        other => Ok(other.map(Duration::from_secs)),
    }
}
