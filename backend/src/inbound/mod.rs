//! Inbound adapters that translate external requests into port calls while
//! keeping framework details at the edge.
//!
//! - [`http`]: Record Store REST handlers, probes and the error mapping.
//! - [`graphql`]: the aggregation schema over the upstream clients.

pub mod graphql;
pub mod http;
