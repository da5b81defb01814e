//! Widgets rendered by the dashboard layout.

pub mod candle_chart;

pub use candle_chart::{CandleChartPanel, ChartSurface};
