//! Startup configuration: flags with environment fallbacks (`.env` is loaded first).

use clap::Parser;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_UPSTREAM_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "stockdash-proxy",
    about = "StockDash proxy: forwards chart requests to the upstream quote API"
)]
pub struct ProxyConfig {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Upstream chart endpoint; the symbol is appended as a path segment.
    #[arg(long, env = "UPSTREAM_URL", default_value = DEFAULT_UPSTREAM_URL)]
    pub upstream_url: String,
}
