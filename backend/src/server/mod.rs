//! Server construction and middleware wiring for the three services.
//!
//! The Record Store lives here; the aggregator and gateway have their own
//! submodules. Each exposes `build_app` for in-process tests and
//! `create_server` for the binaries.

pub mod aggregator;
mod config;
pub mod gateway;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{DieselRepositories, InMemoryRepositories, Repositories};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::Clock;
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{StudentRepository, UniversityRepository, UserRepository};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::configure_extractors;
use crate::inbound::http::{auth, students, universities};
use crate::middleware::Trace;
use crate::outbound::auth::JwtConfig;

/// Record Store application: `/api` records, `/auth` accounts, probes and
/// (in debug builds) Swagger UI at `/docs`.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_extractors)
        .service(
            web::scope("/api")
                .configure(students::configure)
                .configure(universities::configure),
        )
        .service(web::scope("/auth").configure(auth::configure))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

async fn prepare_state<S, U, R>(
    repositories: Repositories<S, U, R>,
    seed_sample_data: bool,
    jwt: JwtConfig,
    clock: Arc<dyn Clock>,
) -> std::io::Result<HttpState>
where
    S: StudentRepository + 'static,
    U: UniversityRepository + 'static,
    R: UserRepository + 'static,
{
    repositories
        .seed_if(seed_sample_data)
        .await
        .map_err(|e| std::io::Error::other(format!("sample data seeding failed: {e}")))?;
    Ok(repositories.http_state(jwt, clock))
}

/// Construct the Record Store server, seeding sample data first when asked.
///
/// # Errors
/// Propagates [`std::io::Error`] when seeding, binding or starting fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
    clock: Arc<dyn Clock>,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        jwt,
        db_pool,
        seed_sample_data,
    } = config;

    let http_state = match db_pool {
        Some(pool) => {
            prepare_state(
                DieselRepositories::diesel(&pool),
                seed_sample_data,
                jwt,
                clock,
            )
            .await?
        }
        None => {
            info!("no database configured; records are kept in memory");
            prepare_state(
                InMemoryRepositories::in_memory(),
                seed_sample_data,
                jwt,
                clock,
            )
            .await?
        }
    };
    let http_state = web::Data::new(http_state);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(bind_addr)?
        .run();

    health_state.mark_ready();
    Ok(server)
}
