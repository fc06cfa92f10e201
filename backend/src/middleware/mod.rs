//! Request middleware shared by the three services.

pub mod request_log;
pub mod trace;

pub use request_log::RequestLog;
pub use trace::Trace;
