//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use actix_web::web;
use city_info::inbound::http::state::HttpState;

/// Everything the HTTP server needs once dependencies have been built.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: web::Data<HttpState>,
}

impl ServerConfig {
    /// Pair a listener address with the shared handler state.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            bind_addr,
            http_state: web::Data::new(http_state),
        }
    }
}
