//! StockDash proxy: one pass-through route in front of the upstream chart API.
//!
//! `GET /api/stock/{symbol}?range=<r>&interval=<i>` is forwarded to the
//! upstream with those values interpolated into the URL. The upstream JSON
//! comes back unchanged with status 200; any failure becomes a 500 with
//! `{ "error": "<message>" }`. No validation, caching, retry, or rate limiting.

pub mod config;
pub mod error;
pub mod routes;
pub mod upstream;

use std::sync::Arc;

use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use routes::ProxyState;
pub use upstream::{upstream_url, ChartUpstream, UpstreamReply, YahooUpstream};

/// Headers added to every response. The dashboard may be served from any origin.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET, OPTIONS"))
}

/// Bind and run the proxy until the process is stopped.
pub async fn run(config: ProxyConfig) -> Result<(), ProxyError> {
    let upstream = YahooUpstream::new()?;
    let state = web::Data::new(ProxyState::new(Arc::new(upstream), &config.upstream_url));
    let port = config.port;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors_headers())
            .app_data(state.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), port))
    .map_err(ProxyError::Bind)?;

    log::info!("Server running on port {port}");
    server.run().await.map_err(ProxyError::Bind)
}
