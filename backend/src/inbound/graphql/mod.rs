//! GraphQL aggregation surface over the Record Store, Course Store and
//! Text-Service clients.
//!
//! ```text
//! POST /graphql   execute a query or mutation
//! GET  /graphql   GraphiQL explorer
//! ```
//!
//! Resolvers hold the clients directly; no joins happen across stores.

mod error;
mod mutation;
mod query;
mod types;

use std::sync::Arc;

use actix_web::{HttpResponse, get, http::header, post, web};
use async_graphql::extensions::Tracing;
use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, Schema};
use async_graphql_actix_web::{GraphQLRequest, GraphQLResponse};

use crate::domain::ports::{CourseStoreClient, RecordStoreClient, TextServiceClient};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

/// Executable aggregation schema.
pub type CampusSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Upstream clients the resolvers fan out to.
#[derive(Clone)]
pub struct Upstreams {
    /// Students and universities.
    pub records: Arc<dyn RecordStoreClient>,
    /// Courses and enrollments.
    pub courses: Arc<dyn CourseStoreClient>,
    /// Text analysis and chatbot.
    pub text: Arc<dyn TextServiceClient>,
}

impl Upstreams {
    /// Bundle the three clients.
    pub fn new(
        records: Arc<dyn RecordStoreClient>,
        courses: Arc<dyn CourseStoreClient>,
        text: Arc<dyn TextServiceClient>,
    ) -> Self {
        Self {
            records,
            courses,
            text,
        }
    }
}

/// Build the schema with request tracing enabled.
pub fn build_schema(upstreams: Upstreams) -> CampusSchema {
    Schema::build(
        QueryRoot::new(upstreams.clone()),
        MutationRoot::new(upstreams),
        EmptySubscription,
    )
    .extension(Tracing)
    .finish()
}

#[post("/graphql")]
async fn execute(schema: web::Data<CampusSchema>, request: GraphQLRequest) -> GraphQLResponse {
    schema.execute(request.into_inner()).await.into()
}

#[get("/graphql")]
async fn graphiql() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Register `POST /graphql` and `GET /graphql`; expects a
/// `web::Data<CampusSchema>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(execute).service(graphiql);
}

/// Register `POST /graphql` only.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(execute);
}

#[cfg(test)]
mod tests;
