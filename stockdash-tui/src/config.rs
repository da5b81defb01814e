//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_PROXY_URL: &str = "http://localhost:5000";

#[derive(Debug, Clone, Parser)]
#[command(name = "stockdash", version, about = "Terminal stock dashboard")]
pub struct DashboardConfig {
    /// Base URL of the StockDash proxy
    #[arg(long, env = "STOCKDASH_PROXY_URL", default_value = DEFAULT_PROXY_URL)]
    pub proxy_url: String,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long, env = "STOCKDASH_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_proxy() {
        let config = DashboardConfig::try_parse_from(["stockdash"]).unwrap();
        if std::env::var_os("STOCKDASH_PROXY_URL").is_none() {
            assert_eq!(config.proxy_url, DEFAULT_PROXY_URL);
        }
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn flags_override() {
        let config = DashboardConfig::try_parse_from([
            "stockdash",
            "--proxy-url",
            "http://10.0.0.5:8080",
            "--log-file",
            "/tmp/stockdash.log",
        ])
        .unwrap();
        assert_eq!(config.proxy_url, "http://10.0.0.5:8080");
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/stockdash.log")));
    }
}
