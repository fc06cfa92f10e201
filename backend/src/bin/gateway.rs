//! Prefix-routing gateway in front of the Record Store and the aggregator.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use campus::config::GatewaySettings;
use campus::gateway::{GatewayState, RouteTable, build_client};
use campus::server::gateway::create_server;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load()
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let record_store_url = settings.record_store_url().map_err(io::Error::other)?;
    let aggregator_url = settings.aggregator_url().map_err(io::Error::other)?;
    let routes =
        RouteTable::with_defaults(&record_store_url, &aggregator_url).map_err(io::Error::other)?;
    let client = build_client(settings.request_timeout().map_err(io::Error::other)?)
        .map_err(|e| io::Error::other(format!("HTTP client setup failed: {e}")))?;

    for route in routes.rules() {
        info!(
            id = route.id(),
            prefix = route.prefix(),
            upstream = %route.upstream(),
            "route registered"
        );
    }

    let body_limit = settings.max_body_bytes().map_err(io::Error::other)?;
    let state =
        GatewayState::new(routes, client, Arc::new(DefaultClock)).with_body_limit(body_limit);
    let server = create_server(state, bind_addr)?;
    info!(%bind_addr, body_limit, "gateway listening");
    server.await
}
