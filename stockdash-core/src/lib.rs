//! StockDash Core: quote domain types, chart payload schema, fetch pipeline.
//!
//! This crate is shared by the proxy and the dashboard:
//! - Upstream chart payload schema (Yahoo v8 chart shape)
//! - Quote Series and Summary Statistics derived from a payload
//! - Static company list, fixed time-range set, company filter
//! - `QuoteSource` trait and the blocking proxy client
//! - Axis/price/volume label formatting

pub mod catalog;
pub mod chart;
pub mod error;
pub mod fetch;
pub mod format;
pub mod quote;

pub use catalog::{filter_companies, TimeRange, COMPANY_LIST, DEFAULT_SYMBOL};
pub use chart::ChartPayload;
pub use error::DataError;
pub use fetch::{error_state_message, load_quotes, ProxyClient, QuoteSource};
pub use quote::{QuoteSeries, QuoteSnapshot, SummaryStatistics};
