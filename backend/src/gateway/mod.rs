//! Reverse proxy routing requests by path prefix.
//!
//! ```text
//! /graphql          -> aggregator
//! /api/students     -> record store
//! /api/universities -> record store
//! /auth             -> record store
//! ```
//!
//! Unmatched paths get a plain 404. `GET /gateway/health` and
//! `GET /gateway/info` describe the table.

mod proxy;
mod routes;
mod status;

use std::sync::Arc;
use std::time::Duration;

use actix_web::web;
use mockable::Clock;
use reqwest::Client;
use reqwest::redirect::Policy;

pub use proxy::forward;
pub use routes::{RouteDescription, RouteError, RouteRule, RouteTable};

/// Request body limit applied unless configured otherwise.
pub const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Build the forwarding client.
///
/// Redirects are never followed; a 3xx goes back to the caller as sent.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let builder = Client::builder().redirect(Policy::none());
    match timeout {
        Some(timeout) => builder.timeout(timeout).build(),
        None => builder.build(),
    }
}

/// Shared, immutable gateway state.
#[derive(Clone)]
pub struct GatewayState {
    pub(crate) routes: Arc<RouteTable>,
    pub(crate) client: Client,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) body_limit: usize,
}

impl GatewayState {
    /// State over `routes`, forwarding with `client`.
    pub fn new(routes: RouteTable, client: Client, clock: Arc<dyn Clock>) -> Self {
        Self {
            routes: Arc::new(routes),
            client,
            clock,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Replace the request body limit.
    #[must_use]
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Largest request body forwarded, in bytes.
    #[must_use]
    pub fn body_limit(&self) -> usize {
        self.body_limit
    }
}

/// Register the status endpoints and route everything else through
/// [`forward`]. Expects a `web::Data<GatewayState>` in app data; bodies above
/// actix's default limit need a `web::PayloadConfig` as well.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(status::health)
        .service(status::info)
        .default_service(web::to(forward));
}
