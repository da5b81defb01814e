//! Yahoo Finance v8 chart payload.
//!
//! The proxy relays this shape verbatim; the dashboard deserializes it here.
//! Upstream emits `null` for prices inside a bar it has no trade for, so every
//! series element is optional. Missing arrays default to empty and are caught
//! by the length check in [`crate::quote::QuoteSeries::from_payload`].

use serde::{Deserialize, Serialize};

use crate::error::DataError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub chart: ChartEnvelope,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartEnvelope {
    #[serde(default)]
    pub result: Option<Vec<ChartResult>>,
    #[serde(default)]
    pub error: Option<ChartError>,
}

/// Business error reported by the upstream inside an otherwise valid payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartError {
    #[serde(default)]
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    #[serde(default)]
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Indicators {
    #[serde(default)]
    pub quote: Vec<QuoteBlock>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteBlock {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<u64>>,
}

impl ChartPayload {
    /// Fail with the embedded upstream error if there is one, otherwise take
    /// the first result object.
    pub fn into_first_result(self) -> Result<ChartResult, DataError> {
        if let Some(err) = self.chart.error {
            return Err(DataError::Upstream {
                code: err.code,
                description: err.description,
            });
        }

        self.chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::MalformedPayload("result array is empty".into()))
    }
}

impl ChartResult {
    /// Take the first quote object.
    pub fn first_quote(&mut self) -> Result<QuoteBlock, DataError> {
        if self.indicators.quote.is_empty() {
            return Err(DataError::MalformedPayload("no quote data".into()));
        }
        Ok(self.indicators.quote.swap_remove(0))
    }
}
