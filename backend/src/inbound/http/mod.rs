//! HTTP inbound adapter exposing the Record Store REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod state;
pub mod students;
pub mod universities;
pub mod validation;

pub use error::ApiResult;
