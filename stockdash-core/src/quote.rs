//! Quote Series and Summary Statistics.
//!
//! A `QuoteSeries` is the upstream's parallel arrays copied unchanged, with
//! one check on top: all six arrays must have the same length. Ordering is
//! whatever the upstream sent (chronological ascending in practice).

use serde::{Deserialize, Serialize};

use crate::catalog::TimeRange;
use crate::chart::ChartPayload;
use crate::error::DataError;

/// Parallel OHLCV arrays, one entry per bar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuoteSeries {
    pub timestamp: Vec<i64>,
    pub open: Vec<Option<f64>>,
    pub high: Vec<Option<f64>>,
    pub low: Vec<Option<f64>>,
    pub close: Vec<Option<f64>>,
    pub volume: Vec<Option<u64>>,
}

/// One bar with all four prices present.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub time: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl QuoteSeries {
    /// Extract the first result's first quote object and copy its arrays.
    pub fn from_payload(payload: ChartPayload) -> Result<Self, DataError> {
        let mut result = payload.into_first_result()?;
        let quote = result.first_quote()?;
        let timestamp = result
            .timestamp
            .ok_or_else(|| DataError::MalformedPayload("no timestamps".into()))?;

        let n = timestamp.len();
        let lengths = [
            ("open", quote.open.len()),
            ("high", quote.high.len()),
            ("low", quote.low.len()),
            ("close", quote.close.len()),
            ("volume", quote.volume.len()),
        ];
        for (field, len) in lengths {
            if len != n {
                return Err(DataError::MalformedPayload(format!(
                    "{field} has {len} entries, expected {n}"
                )));
            }
        }

        Ok(Self {
            timestamp,
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
        })
    }

    pub fn len(&self) -> usize {
        self.timestamp.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamp.is_empty()
    }

    /// Pair each timestamp with its OHLC. Bars with a missing price are skipped.
    pub fn candles(&self) -> Vec<Candle> {
        (0..self.len())
            .filter_map(|i| {
                Some(Candle {
                    time: self.timestamp[i],
                    open: self.open[i]?,
                    high: self.high[i]?,
                    low: self.low[i]?,
                    close: self.close[i]?,
                })
            })
            .collect()
    }
}

/// Statistics drawn from the last bar of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub symbol: String,
    /// Last close.
    pub current_price: Option<f64>,
    /// High of the last bar only, not of the session or the period.
    pub day_high: Option<f64>,
    /// Low of the last bar only.
    pub day_low: Option<f64>,
    /// Open of the last bar.
    pub open_price: Option<f64>,
    /// Volume of the last bar.
    pub volume: Option<u64>,
    /// Highest high across the whole series.
    pub period_high: Option<f64>,
    /// Lowest low across the whole series.
    pub period_low: Option<f64>,
}

impl SummaryStatistics {
    /// Derive statistics from a series. Returns `None` for an empty series.
    pub fn derive(symbol: &str, series: &QuoteSeries) -> Option<Self> {
        let last = series.len().checked_sub(1)?;

        // Extremes over a one-element tail slice: the last bar's own high/low.
        let day_high = max_of(&series.high[last..]);
        let day_low = min_of(&series.low[last..]);

        Some(Self {
            symbol: symbol.to_string(),
            current_price: series.close[last],
            day_high,
            day_low,
            open_price: series.open[last],
            volume: series.volume[last],
            period_high: max_of(&series.high),
            period_low: min_of(&series.low),
        })
    }
}

fn max_of(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::max)
}

fn min_of(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::min)
}

/// Everything one fetch cycle produces.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSnapshot {
    pub symbol: String,
    pub range: TimeRange,
    pub series: QuoteSeries,
    pub summary: Option<SummaryStatistics>,
}

impl QuoteSnapshot {
    pub fn new(symbol: &str, range: TimeRange, series: QuoteSeries) -> Self {
        let summary = SummaryStatistics::derive(symbol, &series);
        Self {
            symbol: symbol.to_string(),
            range,
            series,
            summary,
        }
    }
}
