//! StockDash proxy binary.
//!
//! Reads `HOST` / `PORT` / `UPSTREAM_URL` (flags override), loads `.env` if
//! present, and serves `GET /api/stock/{symbol}`.

use anyhow::Result;
use clap::Parser;

use stockdash_proxy::ProxyConfig;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ProxyConfig::parse();
    log::info!("Proxy configuration: {config:?}");

    stockdash_proxy::run(config).await?;
    Ok(())
}
