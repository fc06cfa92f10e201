//! Campus records platform: the Record Store REST service, the GraphQL
//! aggregation layer and the prefix-routing gateway.

pub mod config;
pub mod doc;
pub mod domain;
pub mod gateway;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
