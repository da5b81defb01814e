//! Candlestick chart surface.
//!
//! Renders with direct buffer writes:
//! - Bars are fitted to the plot width: one column per bar when they fit,
//!   evenly spaced; merged into OHLC buckets when they don't
//! - Body: block char in the rising/falling color; wicks as `|`
//! - Price scale on the right with three grid rules
//! - Time axis below the plot, then a crosshair readout line

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

use stockdash_core::format::{format_price, format_tick_local};
use stockdash_core::quote::{Candle, QuoteSeries};

use crate::theme::Theme;

/// Width reserved for the price scale.
const SCALE_WIDTH: u16 = 10;

/// A drawable chart for one loaded series.
///
/// Built once per successful fetch and dropped with the state that owns it;
/// a new fetch builds a fresh surface rather than mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSurface {
    candles: Vec<Candle>,
    labels: Vec<String>,
    theme: Theme,
}

impl ChartSurface {
    /// Build with tick labels in local time.
    pub fn build(series: &QuoteSeries, theme: Theme) -> Self {
        Self::build_with(series, theme, format_tick_local)
    }

    pub fn build_with(series: &QuoteSeries, theme: Theme, label: impl Fn(i64) -> String) -> Self {
        let candles = series.candles();
        let labels = candles.iter().map(|c| label(c.time)).collect();
        Self {
            candles,
            labels,
            theme,
        }
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Time label for the bar at `idx`.
    pub fn label(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    /// Padded (low, high) price bounds over every bar.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        if self.candles.is_empty() {
            return None;
        }
        let lo = self.candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
        let hi = self.candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
        let span = hi - lo;
        let pad = if span > 0.0 { span * 0.05 } else { 1.0 };
        Some((lo - pad, hi + pad))
    }

    pub fn columns(&self, width: usize) -> Vec<Column> {
        fit_to_width(&self.candles, width)
    }
}

/// One drawn column: a bar, or several merged bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Index of the first bar in this column.
    pub first: usize,
    /// Index of the last bar in this column (inclusive).
    pub last: usize,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Column {
    pub fn contains(&self, idx: usize) -> bool {
        self.first <= idx && idx <= self.last
    }
}

/// Fit bars to `width` columns so the whole series is visible.
pub fn fit_to_width(candles: &[Candle], width: usize) -> Vec<Column> {
    let n = candles.len();
    if n == 0 || width == 0 {
        return Vec::new();
    }
    let cols = n.min(width);

    (0..cols)
        .map(|b| {
            let start = b * n / cols;
            let end = (b + 1) * n / cols;
            let bucket = &candles[start..end];
            Column {
                first: start,
                last: end - 1,
                open: bucket[0].open,
                close: bucket[bucket.len() - 1].close,
                high: bucket.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max),
                low: bucket.iter().map(|c| c.low).fold(f64::INFINITY, f64::min),
            }
        })
        .collect()
}

/// X offset of column `b` when `cols` columns are spread over `plot_width`.
fn column_offset(b: usize, cols: usize, plot_width: u16) -> u16 {
    (b * plot_width as usize / cols.max(1)) as u16
}

/// Map a price to a row in the plot area (0 = top).
fn price_to_y(price: f64, y_min: f64, y_max: f64, plot_height: u16) -> u16 {
    if (y_max - y_min).abs() < 1e-9 || plot_height == 0 {
        return 0;
    }
    let frac = (price - y_min) / (y_max - y_min);
    let y = plot_height.saturating_sub(1) as f64 * (1.0 - frac);
    y.round().max(0.0).min(plot_height.saturating_sub(1) as f64) as u16
}

/// Candle chart widget over a [`ChartSurface`].
pub struct CandleChartPanel<'a> {
    surface: &'a ChartSurface,
    title: &'a str,
    crosshair: Option<usize>,
    focused: bool,
}

impl<'a> CandleChartPanel<'a> {
    pub fn new(surface: &'a ChartSurface, title: &'a str) -> Self {
        Self {
            surface,
            title,
            crosshair: None,
            focused: false,
        }
    }

    pub fn crosshair(mut self, idx: Option<usize>) -> Self {
        self.crosshair = idx;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl<'a> Widget for CandleChartPanel<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = &self.surface.theme;
        let border = if self.focused { theme.accent } else { theme.border };

        let Some((y_lower, y_upper)) = self.surface.price_bounds() else {
            Block::default()
                .title(format!(" {} [No Data] ", self.title))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(theme.background))
                .render(area, buf);
            return;
        };

        let block = Block::default()
            .title(format!(" {} | {} bars ", self.title, self.surface.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.background));
        let inner = block.inner(area);
        block.render(area, buf);

        // Bottom two rows: time axis, crosshair readout.
        let plot_left = inner.x;
        let plot_top = inner.y;
        let plot_width = inner.width.saturating_sub(SCALE_WIDTH);
        let plot_height = inner.height.saturating_sub(2);
        if plot_width == 0 || plot_height == 0 {
            return;
        }
        let scale_x = plot_left + plot_width;

        // Grid rules and price scale.
        let grid_style = Style::default().fg(theme.grid);
        let text_style = Style::default().fg(theme.text);
        let rows = [0u16, plot_height / 2, plot_height.saturating_sub(1)];
        let prices = [y_upper, (y_upper + y_lower) / 2.0, y_lower];
        for (row, price) in rows.iter().zip(prices) {
            let y = plot_top + row;
            for x in plot_left..scale_x {
                buf.set_string(x, y, "┄", grid_style);
            }
            buf.set_string(scale_x + 1, y, format_price(price), text_style);
        }
        for row in 0..plot_height {
            buf.set_string(scale_x, plot_top + row, "│", Style::default().fg(theme.border));
        }

        let columns = self.surface.columns(plot_width as usize);
        let cols = columns.len();

        let cross_col = self
            .crosshair
            .filter(|idx| *idx < self.surface.len())
            .and_then(|idx| columns.iter().position(|c| c.contains(idx)));

        // Crosshair goes under the candles.
        if let Some(b) = cross_col {
            let x = plot_left + column_offset(b, cols, plot_width);
            let style = Style::default().fg(theme.crosshair);
            for row in 0..plot_height {
                buf.set_string(x, plot_top + row, "│", style);
            }
        }

        for (b, col) in columns.iter().enumerate() {
            let x = plot_left + column_offset(b, cols, plot_width);
            let style = Style::default().fg(theme.candle_color(col.open, col.close));

            let high_y = price_to_y(col.high, y_lower, y_upper, plot_height);
            let low_y = price_to_y(col.low, y_lower, y_upper, plot_height);
            let body_top_y = price_to_y(col.open.max(col.close), y_lower, y_upper, plot_height);
            let body_bot_y = price_to_y(col.open.min(col.close), y_lower, y_upper, plot_height);

            for y in high_y..body_top_y {
                buf.set_string(x, plot_top + y, "|", style);
            }
            for y in body_top_y..=body_bot_y {
                buf.set_string(x, plot_top + y, "\u{2588}", style);
            }
            for y in (body_bot_y + 1)..=low_y {
                buf.set_string(x, plot_top + y, "|", style);
            }
        }

        // Time axis: left to right, skipping labels that would collide.
        let axis_y = plot_top + plot_height;
        let mut next_free = plot_left;
        for (b, col) in columns.iter().enumerate() {
            let x = plot_left + column_offset(b, cols, plot_width);
            let Some(label) = self.surface.label(col.first) else {
                continue;
            };
            let w = label.chars().count() as u16;
            if x >= next_free && x + w <= scale_x {
                buf.set_string(x, axis_y, label, text_style);
                next_free = x + w + 3;
            }
        }

        let info_y = axis_y + 1;
        match self.crosshair.and_then(|idx| Some((idx, self.surface.candles().get(idx)?))) {
            Some((idx, candle)) => {
                let label = self.surface.label(idx).unwrap_or_default();
                if let Some(b) = cross_col {
                    let w = label.chars().count() as u16;
                    let x = (plot_left + column_offset(b, cols, plot_width))
                        .min(scale_x.saturating_sub(w))
                        .max(plot_left);
                    let tag = Style::default()
                        .fg(Color::White)
                        .bg(theme.crosshair_label);
                    buf.set_string(x, axis_y, label, tag);
                }
                let readout = format!(
                    "{label}  O {}  H {}  L {}  C {}",
                    format_price(candle.open),
                    format_price(candle.high),
                    format_price(candle.low),
                    format_price(candle.close),
                );
                buf.set_stringn(
                    plot_left,
                    info_y,
                    readout,
                    inner.width as usize,
                    text_style.add_modifier(Modifier::BOLD),
                );
            }
            None => {
                buf.set_stringn(
                    plot_left,
                    info_y,
                    "h/l: crosshair  Esc: clear",
                    inner.width as usize,
                    Style::default().fg(theme.muted),
                );
            }
        }
    }
}
