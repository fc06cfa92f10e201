//! Record Store entry-point: student, university and account REST endpoints.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
use zeroize::Zeroizing;

use campus::config::RecordStoreSettings;
use campus::inbound::http::health::HealthState;
use campus::outbound::persistence::{DbPool, run_pending_migrations};
use campus::server::{ServerConfig, create_server};

const EPHEMERAL_SECRET_LEN: usize = 48;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = RecordStoreSettings::load()
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;

    let secret = match settings.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
        Some(secret) => Zeroizing::new(secret.to_owned()),
        None => {
            warn!("no JWT secret configured; issued tokens will not survive a restart");
            Zeroizing::new(ephemeral_secret())
        }
    };
    let jwt = settings.jwt_config(&secret).map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, jwt).with_sample_data(settings.seed_sample_data);
    if let Some(database_url) = settings.database_url() {
        run_pending_migrations(database_url)
            .await
            .map_err(|e| io::Error::other(format!("database migration failed: {e}")))?;
        let pool_config = settings.pool_config(database_url).map_err(io::Error::other)?;
        let pool = DbPool::new(pool_config)
            .await
            .map_err(|e| io::Error::other(format!("database pool setup failed: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config, Arc::new(DefaultClock)).await?;
    info!(%bind_addr, "record store listening");
    server.await
}

fn ephemeral_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(EPHEMERAL_SECRET_LEN)
        .map(char::from)
        .collect()
}
