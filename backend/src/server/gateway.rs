//! Gateway server.

use std::net::SocketAddr;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use crate::gateway::{self, GatewayState};
use crate::middleware::{RequestLog, Trace};

/// Status endpoints and prefix forwarding, with access logging. Request
/// bodies up to [`GatewayState::body_limit`] are accepted.
pub fn build_app(
    state: web::Data<GatewayState>,
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
        .app_data(web::PayloadConfig::new(state.body_limit()))
        .app_data(state)
        .wrap(RequestLog)
        .wrap(Trace)
        .configure(gateway::configure)
}

/// Bind the gateway to `bind_addr`.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or starting fails.
pub fn create_server(state: GatewayState, bind_addr: SocketAddr) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    Ok(HttpServer::new(move || build_app(state.clone()))
        .bind(bind_addr)?
        .run())
}
