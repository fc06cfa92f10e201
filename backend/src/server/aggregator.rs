//! GraphQL aggregator server.

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::inbound::graphql::{self, CampusSchema, Upstreams, build_schema};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::middleware::Trace;

/// `/graphql` plus health probes; `graphiql` adds the explorer page.
pub fn build_app(
    health_state: web::Data<HealthState>,
    schema: web::Data<CampusSchema>,
    graphiql: bool,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(schema)
        .wrap(Trace)
        .configure(if graphiql {
            graphql::configure
        } else {
            graphql::configure_api
        })
        .service(ready)
        .service(live)
}

/// Bind the aggregator to `bind_addr`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    bind_addr: SocketAddr,
    upstreams: Upstreams,
    graphiql: bool,
) -> std::io::Result<Server> {
    let schema = web::Data::new(build_schema(upstreams));
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), schema.clone(), graphiql)
    })
        .bind(bind_addr)?
        .run();
    health_state.mark_ready();
    Ok(server)
}
