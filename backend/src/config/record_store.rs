//! Record Store service settings (`RECORD_STORE_*`).

use std::net::SocketAddr;

use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::{SettingsError, bind_addr, positive_secs};
use crate::outbound::auth::JwtConfig;
use crate::outbound::persistence::PoolConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings for the `campus` binary.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RECORD_STORE")]
pub struct RecordStoreSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL; without it the service keeps records in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub database_max_connections: Option<u32>,
    /// HS256 signing secret for issued tokens.
    pub jwt_secret: Option<String>,
    /// Access token lifetime in seconds.
    pub access_token_ttl_secs: Option<i64>,
    /// Refresh token lifetime in seconds.
    pub refresh_token_ttl_secs: Option<i64>,
    /// Insert the sample universities and students into an empty store.
    #[ortho_config(default = false)]
    pub seed_sample_data: bool,
}

impl RecordStoreSettings {
    /// Listen address, `0.0.0.0:8080` by default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        bind_addr(self.bind_addr.as_deref(), DEFAULT_BIND_ADDR)
    }

    /// Configured database URL, ignoring blank values.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Pool configuration for `database_url`, honouring the connection cap.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositive`] for a zero connection cap.
    pub fn pool_config(&self, database_url: &str) -> Result<PoolConfig, SettingsError> {
        let config = PoolConfig::new(database_url);
        match self.database_max_connections {
            None => Ok(config),
            Some(0) => Err(SettingsError::NonPositive {
                name: "database_max_connections",
                value: 0,
            }),
            Some(max) => Ok(config.with_max_size(max).with_min_idle(Some(max.min(2)))),
        }
    }

    /// Token configuration using `secret` and the configured lifetimes.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositive`] for zero or negative lifetimes.
    pub fn jwt_config(&self, secret: &str) -> Result<JwtConfig, SettingsError> {
        let access = positive_secs("access_token_ttl_secs", self.access_token_ttl_secs)?
            .unwrap_or(JwtConfig::DEFAULT_ACCESS_TTL_SECS);
        let refresh = positive_secs("refresh_token_ttl_secs", self.refresh_token_ttl_secs)?
            .unwrap_or(JwtConfig::DEFAULT_REFRESH_TTL_SECS);
        Ok(JwtConfig::new(secret)
            .with_ttls(TimeDelta::seconds(access), TimeDelta::seconds(refresh)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "RECORD_STORE_BIND_ADDR",
        "RECORD_STORE_DATABASE_URL",
        "RECORD_STORE_DATABASE_MAX_CONNECTIONS",
        "RECORD_STORE_JWT_SECRET",
        "RECORD_STORE_ACCESS_TOKEN_TTL_SECS",
        "RECORD_STORE_REFRESH_TOKEN_TTL_SECS",
        "RECORD_STORE_SEED_SAMPLE_DATA",
    ];

    fn load() -> RecordStoreSettings {
        RecordStoreSettings::load_from_iter([OsString::from("campus")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load();
        assert_eq!(
            settings.bind_addr().expect("default addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert!(settings.database_url().is_none());
        assert!(settings.jwt_secret.is_none());
        assert!(!settings.seed_sample_data);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("RECORD_STORE_BIND_ADDR", Some("127.0.0.1:9999".to_owned())),
            (
                "RECORD_STORE_DATABASE_URL",
                Some("postgres://localhost/campus".to_owned()),
            ),
            ("RECORD_STORE_JWT_SECRET", Some("s3cret".to_owned())),
            ("RECORD_STORE_ACCESS_TOKEN_TTL_SECS", Some("3600".to_owned())),
            ("RECORD_STORE_REFRESH_TOKEN_TTL_SECS", None::<String>),
            ("RECORD_STORE_SEED_SAMPLE_DATA", Some("true".to_owned())),
        ]);

        let settings = load();
        assert_eq!(settings.bind_addr().expect("addr").port(), 9999);
        assert_eq!(settings.database_url(), Some("postgres://localhost/campus"));
        assert_eq!(settings.jwt_secret.as_deref(), Some("s3cret"));
        assert_eq!(settings.access_token_ttl_secs, Some(3600));
        assert!(settings.seed_sample_data);
    }

    #[rstest]
    #[case(Some(0), true)]
    #[case(Some(-5), true)]
    #[case(Some(60), false)]
    #[case(None, false)]
    fn token_lifetimes_must_be_positive(#[case] ttl: Option<i64>, #[case] rejected: bool) {
        let settings = RecordStoreSettings {
            bind_addr: None,
            database_url: None,
            database_max_connections: None,
            jwt_secret: None,
            access_token_ttl_secs: ttl,
            refresh_token_ttl_secs: None,
            seed_sample_data: false,
        };
        assert_eq!(settings.jwt_config("secret").is_err(), rejected);
    }

    #[rstest]
    fn malformed_bind_addresses_are_reported() {
        let settings = RecordStoreSettings {
            bind_addr: Some("localhost".to_owned()),
            database_url: Some("   ".to_owned()),
            database_max_connections: None,
            jwt_secret: None,
            access_token_ttl_secs: None,
            refresh_token_ttl_secs: None,
            seed_sample_data: false,
        };
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::BindAddr { .. })
        ));
        assert!(settings.database_url().is_none());
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(0), false)]
    #[case(Some(4), true)]
    fn connection_cap_must_be_positive(#[case] cap: Option<u32>, #[case] accepted: bool) {
        let settings = RecordStoreSettings {
            bind_addr: None,
            database_url: None,
            database_max_connections: cap,
            jwt_secret: None,
            access_token_ttl_secs: None,
            refresh_token_ttl_secs: None,
            seed_sample_data: false,
        };
        let config = settings.pool_config("postgres://localhost/campus");
        assert_eq!(config.is_ok(), accepted);
        if let Ok(config) = config {
            assert_eq!(config.database_url(), "postgres://localhost/campus");
        }
    }
}
