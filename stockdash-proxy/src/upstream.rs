//! Outbound side: URL construction, the upstream trait, and the relay policy.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::ProxyError;

/// Raw upstream answer, before the relay policy looks at it.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait ChartUpstream: Send + Sync {
    async fn fetch_chart(&self, url: &str) -> Result<UpstreamReply, ProxyError>;
}

/// Build the upstream URL by plain interpolation. Values are not validated or
/// escaped; a missing query value interpolates as empty.
pub fn upstream_url(base: &str, symbol: &str, range: &str, interval: &str) -> String {
    format!(
        "{}/{symbol}?range={range}&interval={interval}&includePrePost=false",
        base.trim_end_matches('/')
    )
}

/// Decide what goes back to the caller.
///
/// A 2xx JSON body is relayed as-is. A non-2xx body that still carries the
/// upstream's `chart` envelope is relayed too, so the dashboard can show the
/// upstream's own `chart.error.description`. Everything else is an error.
pub fn relay(reply: UpstreamReply) -> Result<String, ProxyError> {
    let success = (200..300).contains(&reply.status);

    match serde_json::from_str::<serde_json::Value>(&reply.body) {
        Ok(_) if success => Ok(reply.body),
        Ok(value) if value.get("chart").is_some_and(|c| c.is_object()) => Ok(reply.body),
        Ok(_) => Err(ProxyError::UpstreamStatus(reply.status)),
        Err(_) if !success => Err(ProxyError::UpstreamStatus(reply.status)),
        Err(e) => Err(ProxyError::InvalidJson(e.to_string())),
    }
}

/// The real upstream: Yahoo Finance's v8 chart endpoint over `reqwest`.
pub struct YahooUpstream {
    client: Client,
}

impl YahooUpstream {
    pub fn new() -> Result<Self, ProxyError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ChartUpstream for YahooUpstream {
    async fn fetch_chart(&self, url: &str) -> Result<UpstreamReply, ProxyError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(UpstreamReply { status, body })
    }
}
