//! StockDash terminal dashboard.
//!
//! Layout:
//! - Companies: filterable list of the fixed symbols
//! - Time range bar: five range/interval presets
//! - Content: loading indicator, error message, or candlestick chart with
//!   summary statistics
//!
//! Quotes come from the StockDash proxy on a background worker thread.

pub mod app;
pub mod config;
pub mod input;
pub mod panels;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;
pub use config::DashboardConfig;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
