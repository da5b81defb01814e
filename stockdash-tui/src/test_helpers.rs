//! Test helpers: canned chart payloads and a recording quote source.

use std::sync::Mutex;

use serde_json::json;
use stockdash_core::chart::ChartPayload;
use stockdash_core::{DataError, QuoteSource, TimeRange};

/// `n` daily bars; bar `i` opens at 100+i, closes at 101+i.
pub fn chart_payload(n: usize) -> ChartPayload {
    let ts: Vec<i64> = (0..n as i64).map(|i| 1_704_153_600 + i * 86_400).collect();
    let open: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
    let high: Vec<f64> = (0..n).map(|i| 102.0 + i as f64).collect();
    let low: Vec<f64> = (0..n).map(|i| 99.0 + i as f64).collect();
    let close: Vec<f64> = (0..n).map(|i| 101.0 + i as f64).collect();
    let volume: Vec<u64> = (0..n as u64).map(|i| 1_000 + i).collect();
    serde_json::from_value(json!({
        "chart": {
            "result": [{
                "timestamp": ts,
                "indicators": { "quote": [{
                    "open": open, "high": high, "low": low, "close": close, "volume": volume
                }] }
            }],
            "error": null
        }
    }))
    .unwrap()
}

/// Serves `bars` bars for any symbol except `ZZZZ`, which fails the way the
/// upstream does for unknown tickers. Records every call.
pub struct StubSource {
    bars: usize,
    calls: Mutex<Vec<(String, TimeRange)>>,
}

impl StubSource {
    pub fn new(bars: usize) -> Self {
        Self {
            bars,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, TimeRange)> {
        self.calls.lock().unwrap().clone()
    }
}

impl QuoteSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    fn fetch_chart(&self, symbol: &str, range: &TimeRange) -> Result<ChartPayload, DataError> {
        self.calls.lock().unwrap().push((symbol.to_string(), *range));
        if symbol == "ZZZZ" {
            return Err(DataError::Upstream {
                code: "Not Found".into(),
                description: "No data found, symbol may be delisted".into(),
            });
        }
        Ok(chart_payload(self.bars))
    }
}
