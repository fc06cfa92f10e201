//! Static gateway status endpoints.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use super::GatewayState;
use super::routes::RouteDescription;

const SERVICE_NAME: &str = "API Gateway";

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    service: &'static str,
    timestamp: String,
    routes: Vec<RouteDescription>,
}

#[derive(Debug, Serialize)]
struct InfoBody {
    name: &'static str,
    version: &'static str,
    description: &'static str,
    routes: Vec<RouteDescription>,
}

/// `{status:"UP", service, timestamp, routes}`.
#[get("/gateway/health")]
pub async fn health(state: web::Data<GatewayState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthBody {
        status: "UP",
        service: SERVICE_NAME,
        timestamp: state.clock.utc().to_rfc3339(),
        routes: state.routes.describe(),
    })
}

/// `{name, version, description, routes}`.
#[get("/gateway/info")]
pub async fn info(state: web::Data<GatewayState>) -> HttpResponse {
    HttpResponse::Ok().json(InfoBody {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        description: "Prefix router for the campus Record Store and GraphQL aggregator",
        routes: state.routes.describe(),
    })
}
