//! Record Store server configuration object.

use std::net::SocketAddr;

use crate::outbound::auth::JwtConfig;
use crate::outbound::persistence::DbPool;

/// Builder-style configuration for creating the Record Store server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt: JwtConfig,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) seed_sample_data: bool,
}

impl ServerConfig {
    /// In-memory storage, no seeding.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt: JwtConfig) -> Self {
        Self {
            bind_addr,
            jwt,
            db_pool: None,
            seed_sample_data: false,
        }
    }

    /// Persist through PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Insert sample records on startup when the store is empty.
    #[must_use]
    pub const fn with_sample_data(mut self, enabled: bool) -> Self {
        self.seed_sample_data = enabled;
        self
    }

    /// Socket address the server binds to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
