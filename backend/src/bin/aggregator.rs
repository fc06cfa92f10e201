//! GraphQL aggregator over the Record Store, Course Store and Text Service.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use campus::config::AggregatorSettings;
use campus::inbound::graphql::Upstreams;
use campus::inbound::http::health::HealthState;
use campus::outbound::http::{
    HttpCourseStoreClient, HttpRecordStoreClient, HttpTextServiceClient, build_client,
};
use campus::server::aggregator::create_server;

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AggregatorSettings::load()
        .map_err(|e| io::Error::other(format!("invalid configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let record_store_url = settings.record_store_url().map_err(io::Error::other)?;
    let course_store_url = settings.course_store_url().map_err(io::Error::other)?;
    let text_service_url = settings.text_service_url().map_err(io::Error::other)?;

    let client = build_client(settings.request_timeout().map_err(io::Error::other)?)
        .map_err(|e| io::Error::other(format!("HTTP client setup failed: {e}")))?;

    let upstreams = Upstreams::new(
        Arc::new(HttpRecordStoreClient::new(client.clone(), &record_store_url)),
        Arc::new(HttpCourseStoreClient::new(client.clone(), &course_store_url)),
        Arc::new(HttpTextServiceClient::new(client, &text_service_url)),
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, bind_addr, upstreams, settings.graphiql)?;
    info!(
        %bind_addr,
        record_store = %record_store_url,
        course_store = %course_store_url,
        text_service = %text_service_url,
        graphiql = settings.graphiql,
        "aggregator listening"
    );
    server.await
}
