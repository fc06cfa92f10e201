//! HTTP clients for the services the aggregation layer fans out to.

mod course_store;
mod record_store;
mod text_service;
mod upstream;

pub use course_store::HttpCourseStoreClient;
pub use record_store::HttpRecordStoreClient;
pub use text_service::HttpTextServiceClient;
pub use upstream::build_client;
