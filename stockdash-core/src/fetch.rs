//! Fetch side of the dashboard pipeline: fetch → validate → transform.
//!
//! `QuoteSource` abstracts over where chart payloads come from so the
//! dashboard worker can be driven by a stub in tests. `ProxyClient` is the
//! real implementation and talks to the proxy's `/api/stock/{symbol}` route.

use reqwest::blocking::Client;

use crate::catalog::TimeRange;
use crate::chart::ChartPayload;
use crate::error::{DataError, FETCH_FALLBACK_MESSAGE};
use crate::quote::{QuoteSeries, QuoteSnapshot};

/// Anything that can produce a chart payload for a symbol and time range.
pub trait QuoteSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    fn fetch_chart(&self, symbol: &str, range: &TimeRange) -> Result<ChartPayload, DataError>;
}

/// Blocking HTTP client for the proxy service.
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = Client::builder()
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Route on the proxy for one symbol/range selection.
    pub fn chart_url(&self, symbol: &str, range: &TimeRange) -> String {
        format!(
            "{}/api/stock/{symbol}?range={}&interval={}",
            self.base_url,
            range.range(),
            range.interval()
        )
    }
}

impl QuoteSource for ProxyClient {
    fn name(&self) -> &str {
        "proxy"
    }

    fn fetch_chart(&self, symbol: &str, range: &TimeRange) -> Result<ChartPayload, DataError> {
        let url = self.chart_url(symbol, range);
        log::debug!("GET {url}");

        let resp = self
            .client
            .get(&url)
            .send()
            .map_err(|e| DataError::Network(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .map_err(|e| DataError::Network(e.to_string()))?;

        parse_proxy_body(status, &body)
    }
}

/// Interpret a proxy response body.
///
/// A `{ "error": ... }` envelope (the proxy's 500 shape) becomes
/// [`DataError::Proxy`] carrying the message; anything with a `chart` object
/// is deserialized as a chart payload.
pub fn parse_proxy_body(status: u16, body: &str) -> Result<ChartPayload, DataError> {
    let success = (200..300).contains(&status);

    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) if !success => return Err(DataError::Http { status }),
        Err(e) => {
            return Err(DataError::MalformedPayload(format!(
                "response is not JSON: {e}"
            )))
        }
    };

    if value.get("chart").is_none() {
        if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
            return Err(DataError::Proxy(message.to_string()));
        }
        if !success {
            return Err(DataError::Http { status });
        }
        return Err(DataError::MalformedPayload("missing chart object".into()));
    }

    serde_json::from_value(value).map_err(|e| DataError::MalformedPayload(e.to_string()))
}

/// Run one full fetch cycle for a selection.
pub fn load_quotes(
    source: &dyn QuoteSource,
    symbol: &str,
    range: TimeRange,
) -> Result<QuoteSnapshot, DataError> {
    let payload = source.fetch_chart(symbol, &range)?;
    let series = QuoteSeries::from_payload(payload).map_err(|e| {
        if matches!(e, DataError::MalformedPayload(_)) {
            log::warn!("[{symbol}] {} payload rejected: {e}", source.name());
        }
        e
    })?;
    Ok(QuoteSnapshot::new(symbol, range, series))
}

/// Text for the dashboard's error state.
pub fn error_state_message(err: &DataError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FETCH_FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    struct StubSource {
        reply: Result<serde_json::Value, DataError>,
        calls: Mutex<Vec<(String, &'static str, &'static str)>>,
    }

    impl StubSource {
        fn new(reply: Result<serde_json::Value, DataError>) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl QuoteSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        fn fetch_chart(&self, symbol: &str, range: &TimeRange) -> Result<ChartPayload, DataError> {
            self.calls
                .lock()
                .unwrap()
                .push((symbol.to_string(), range.range(), range.interval()));
            match &self.reply {
                Ok(v) => parse_proxy_body(200, &v.to_string()),
                Err(e) => Err(e.clone()),
            }
        }
    }

    fn bars_payload(n: usize) -> serde_json::Value {
        let ts: Vec<i64> = (0..n as i64).map(|i| 1_700_000_000 + i * 86_400).collect();
        let px: Vec<f64> = (0..n).map(|i| 400.0 + i as f64).collect();
        let vol: Vec<u64> = (0..n as u64).map(|i| 10_000 + i).collect();
        json!({
            "chart": {
                "result": [{
                    "timestamp": ts,
                    "indicators": { "quote": [{
                        "open": px, "high": px, "low": px, "close": px, "volume": vol
                    }] }
                }],
                "error": null
            }
        })
    }

    #[test]
    fn chart_url_carries_range_and_interval() {
        let client = ProxyClient::new("http://localhost:5000/").unwrap();
        assert_eq!(
            client.chart_url("MSFT", &TimeRange::OneMonth),
            "http://localhost:5000/api/stock/MSFT?range=1mo&interval=1d"
        );
    }

    #[test]
    fn load_quotes_runs_the_pipeline() {
        let source = StubSource::new(Ok(bars_payload(22)));
        let snapshot = load_quotes(&source, "MSFT", TimeRange::OneMonth).unwrap();

        assert_eq!(snapshot.series.len(), 22);
        let summary = snapshot.summary.unwrap();
        assert_eq!(summary.current_price, Some(421.0));
        assert_eq!(summary.volume, Some(10_021));
        assert_eq!(
            source.calls.lock().unwrap().as_slice(),
            &[("MSFT".to_string(), "1mo", "1d")]
        );
    }

    #[test]
    fn embedded_upstream_error_surfaces_description() {
        let source = StubSource::new(Ok(json!({
            "chart": {
                "result": null,
                "error": { "code": "Not Found", "description": "No data found, symbol may be delisted" }
            }
        })));
        let err = load_quotes(&source, "ZZZZ", TimeRange::OneDay).unwrap_err();
        assert_eq!(error_state_message(&err), "No data found, symbol may be delisted");
    }

    #[test]
    fn proxy_envelope_becomes_proxy_error() {
        let err = parse_proxy_body(500, r#"{"error":"connect ECONNREFUSED"}"#).unwrap_err();
        assert_eq!(err, DataError::Proxy("connect ECONNREFUSED".into()));
    }

    #[test]
    fn non_json_failure_reports_status() {
        let err = parse_proxy_body(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err, DataError::Http { status: 502 });
    }

    #[test]
    fn non_json_success_is_malformed() {
        let err = parse_proxy_body(200, "not json").unwrap_err();
        assert!(matches!(err, DataError::MalformedPayload(_)));
    }

    #[test]
    fn json_without_chart_is_malformed() {
        let err = parse_proxy_body(200, r#"{"foo":1}"#).unwrap_err();
        assert_eq!(err, DataError::MalformedPayload("missing chart object".into()));
    }

    #[test]
    fn empty_message_falls_back() {
        let err = DataError::Proxy(String::new());
        assert_eq!(error_state_message(&err), FETCH_FALLBACK_MESSAGE);
    }

    #[test]
    fn network_error_passes_through() {
        let source = StubSource::new(Err(DataError::Network("connection refused".into())));
        let err = load_quotes(&source, "AAPL", TimeRange::OneYear).unwrap_err();
        assert_eq!(error_state_message(&err), "network error: connection refused");
    }
}
