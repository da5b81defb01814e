//! Application state, single-owner, main-thread only.
//!
//! All dashboard state lives here. The worker thread communicates via
//! channels; every fetch carries a request id and only the newest one is
//! allowed to change what is on screen.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use stockdash_core::{
    error_state_message, filter_companies, DataError, QuoteSnapshot, TimeRange, COMPANY_LIST,
    DEFAULT_SYMBOL,
};

use crate::panels::ChartSurface;
use crate::theme::Theme;
use crate::worker::{FetchRequest, WorkerCommand, WorkerResponse};

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Companies,
    Ranges,
    Chart,
}

impl Focus {
    pub fn label(self) -> &'static str {
        match self {
            Focus::Companies => "Companies",
            Focus::Ranges => "Time Range",
            Focus::Chart => "Chart",
        }
    }

    pub fn next(self) -> Focus {
        match self {
            Focus::Companies => Focus::Ranges,
            Focus::Ranges => Focus::Chart,
            Focus::Chart => Focus::Companies,
        }
    }

    pub fn prev(self) -> Focus {
        match self {
            Focus::Companies => Focus::Chart,
            Focus::Ranges => Focus::Companies,
            Focus::Chart => Focus::Ranges,
        }
    }
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: &'static str,
    pub message: String,
    pub context: String,
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Company list: filter query plus cursor over the filtered view.
#[derive(Debug, Clone, Default)]
pub struct CompaniesState {
    pub query: String,
    pub editing: bool,
    pub cursor: usize,
}

impl CompaniesState {
    /// Companies matching the current query, in catalog order.
    pub fn visible(&self) -> Vec<&'static str> {
        filter_companies(&COMPANY_LIST, &self.query)
    }

    pub fn cursor_symbol(&self) -> Option<&'static str> {
        self.visible().get(self.cursor).copied()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self.cursor.saturating_add_signed(delta).min(len - 1);
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.cursor = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.cursor = 0;
    }

    /// Drops the filter and puts the cursor back on `selected`.
    pub fn clear_query(&mut self, selected: &str) {
        self.query.clear();
        self.cursor = self
            .visible()
            .iter()
            .position(|s| *s == selected)
            .unwrap_or(0);
    }
}

/// What the content area shows for the current selection.
#[derive(Debug, Default)]
pub struct QuoteState {
    pub loading: bool,
    pub error: Option<String>,
    pub snapshot: Option<QuoteSnapshot>,
    pub chart: Option<ChartSurface>,
    /// Hovered bar index into the chart's drawn candles.
    pub crosshair: Option<usize>,
}

impl QuoteState {
    /// Enter the loading state. Whatever was shown is released.
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.snapshot = None;
        self.chart = None;
        self.crosshair = None;
    }

    /// Install a fresh chart, dropping the previous surface.
    fn replace_chart(&mut self, snapshot: QuoteSnapshot, theme: Theme) {
        let surface = ChartSurface::build(&snapshot.series, theme);
        self.loading = false;
        self.error = None;
        self.crosshair = None;
        self.chart.replace(surface);
        self.snapshot.replace(snapshot);
    }

    fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
        self.snapshot = None;
        self.chart = None;
        self.crosshair = None;
    }
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub focus: Focus,
    pub overlay: Overlay,

    pub companies: CompaniesState,
    pub selected_symbol: String,
    pub selected_range: TimeRange,
    pub quote: QuoteState,
    pub theme: Theme,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,
    next_request_id: u64,
    active_request: Option<u64>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub tick: u64,
}

impl AppState {
    pub fn new(worker_tx: Sender<WorkerCommand>, worker_rx: Receiver<WorkerResponse>) -> Self {
        let companies = CompaniesState {
            cursor: COMPANY_LIST
                .iter()
                .position(|s| *s == DEFAULT_SYMBOL)
                .unwrap_or(0),
            ..CompaniesState::default()
        };
        Self {
            running: true,
            focus: Focus::Companies,
            overlay: Overlay::None,
            companies,
            selected_symbol: DEFAULT_SYMBOL.to_string(),
            selected_range: TimeRange::default(),
            quote: QuoteState::default(),
            theme: Theme::default(),
            worker_tx,
            worker_rx,
            next_request_id: 1,
            active_request: None,
            status_message: None,
            error_history: VecDeque::with_capacity(50),
            error_scroll: 0,
            tick: 0,
        }
    }

    /// Select a company. Re-selecting the current one does nothing.
    pub fn select_symbol(&mut self, symbol: &str) {
        if symbol == self.selected_symbol {
            return;
        }
        self.selected_symbol = symbol.to_string();
        self.request_fetch();
    }

    /// Select a time range. Re-selecting the current one does nothing.
    pub fn select_range(&mut self, range: TimeRange) {
        if range == self.selected_range {
            return;
        }
        self.selected_range = range;
        self.request_fetch();
    }

    /// Start a fetch cycle for the current selection.
    pub fn request_fetch(&mut self) {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.active_request = Some(request_id);
        self.quote.begin();

        let req = FetchRequest {
            request_id,
            symbol: self.selected_symbol.clone(),
            range: self.selected_range,
        };
        log::debug!("requesting #{request_id}: {} {}", req.symbol, req.range.label());
        if self.worker_tx.send(WorkerCommand::Fetch(req)).is_err() {
            self.active_request = None;
            self.quote.fail(error_state_message(&DataError::Other(String::new())));
            self.push_error("ERR", "fetch worker is not running".into(), self.selection_label());
        }
    }

    pub fn active_request(&self) -> Option<u64> {
        self.active_request
    }

    /// Apply a worker response if it answers the newest request.
    /// Returns whether it was applied.
    pub fn apply_response(&mut self, resp: WorkerResponse) -> bool {
        if Some(resp.request_id()) != self.active_request {
            log::debug!("dropping stale response #{}", resp.request_id());
            return false;
        }
        self.active_request = None;

        match resp {
            WorkerResponse::Loaded { snapshot, .. } => {
                let bars = snapshot.series.len();
                let label = format!("{} {}", snapshot.symbol, snapshot.range.label());
                self.quote.replace_chart(*snapshot, self.theme);
                self.set_status(format!("Loaded {label}: {bars} bars"));
            }
            WorkerResponse::Failed { symbol, error, .. } => {
                let message = error_state_message(&error);
                self.quote.fail(message.clone());
                self.push_error(
                    error.category(),
                    message,
                    format!("{symbol} {}", self.selected_range.label()),
                );
            }
        }
        true
    }

    /// Drain everything the worker has sent so far.
    pub fn drain_worker(&mut self) {
        while let Ok(resp) = self.worker_rx.try_recv() {
            self.apply_response(resp);
        }
    }

    /// Move the crosshair by `delta` bars, starting from the newest bar.
    pub fn move_crosshair(&mut self, delta: isize) {
        let Some(len) = self.quote.chart.as_ref().map(ChartSurface::len) else {
            return;
        };
        if len == 0 {
            return;
        }
        let current = self.quote.crosshair.unwrap_or(len - 1);
        let next = if self.quote.crosshair.is_none() {
            current
        } else {
            current.saturating_add_signed(delta).min(len - 1)
        };
        self.quote.crosshair = Some(next);
    }

    pub fn clear_crosshair(&mut self) {
        self.quote.crosshair = None;
    }

    fn selection_label(&self) -> String {
        format!("{} {}", self.selected_symbol, self.selected_range.label())
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: &'static str, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > 50 {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::chart_payload;
    use std::sync::mpsc;
    use stockdash_core::QuoteSeries;

    fn app() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        (AppState::new(cmd_tx, resp_rx), cmd_rx, resp_tx)
    }

    fn sent(rx: &Receiver<WorkerCommand>) -> Vec<FetchRequest> {
        rx.try_iter()
            .filter_map(|cmd| match cmd {
                WorkerCommand::Fetch(req) => Some(req),
                WorkerCommand::Shutdown => None,
            })
            .collect()
    }

    fn loaded(request_id: u64, symbol: &str, range: TimeRange, bars: usize) -> WorkerResponse {
        let series = QuoteSeries::from_payload(chart_payload(bars)).unwrap();
        WorkerResponse::Loaded {
            request_id,
            snapshot: Box::new(QuoteSnapshot::new(symbol, range, series)),
        }
    }

    #[test]
    fn focus_cycle() {
        assert_eq!(Focus::Companies.next(), Focus::Ranges);
        assert_eq!(Focus::Chart.next(), Focus::Companies);
        assert_eq!(Focus::Companies.prev(), Focus::Chart);
    }

    #[test]
    fn starts_on_msft_one_day() {
        let (app, _rx, _tx) = app();
        assert_eq!(app.selected_symbol, "MSFT");
        assert_eq!(app.selected_range, TimeRange::OneDay);
        assert_eq!(app.companies.cursor_symbol(), Some("MSFT"));
        assert!(app.quote.snapshot.is_none());
    }

    #[test]
    fn selecting_a_company_issues_a_fetch() {
        let (mut app, rx, _tx) = app();
        app.select_symbol("AAPL");
        let reqs = sent(&rx);
        assert_eq!(reqs.len(), 1);
        assert_eq!(reqs[0].symbol, "AAPL");
        assert_eq!(reqs[0].range, TimeRange::OneDay);
        assert!(app.quote.loading);
    }

    #[test]
    fn reselecting_current_values_is_a_no_op() {
        let (mut app, rx, _tx) = app();
        app.select_symbol("MSFT");
        app.select_range(TimeRange::OneDay);
        assert!(sent(&rx).is_empty());
        assert!(!app.quote.loading);
    }

    #[test]
    fn range_change_keeps_symbol() {
        let (mut app, rx, _tx) = app();
        app.select_range(TimeRange::OneMonth);
        let reqs = sent(&rx);
        assert_eq!(reqs[0].symbol, "MSFT");
        assert_eq!(reqs[0].range.range(), "1mo");
        assert_eq!(reqs[0].range.interval(), "1d");
    }

    #[test]
    fn success_installs_chart_and_summary() {
        let (mut app, rx, _tx) = app();
        app.select_range(TimeRange::OneMonth);
        let id = sent(&rx)[0].request_id;

        assert!(app.apply_response(loaded(id, "MSFT", TimeRange::OneMonth, 22)));
        assert!(!app.quote.loading);
        assert!(app.quote.error.is_none());
        assert_eq!(app.quote.chart.as_ref().unwrap().len(), 22);
        let stats = app.quote.snapshot.as_ref().unwrap().summary.clone().unwrap();
        assert_eq!(stats.current_price, Some(122.0));
        assert_eq!(stats.volume, Some(1_021));
    }

    #[test]
    fn stale_response_is_dropped() {
        let (mut app, rx, _tx) = app();
        app.select_symbol("AAPL");
        app.select_symbol("GOOGL");
        let reqs = sent(&rx);
        let (aapl, googl) = (reqs[0].request_id, reqs[1].request_id);

        // GOOGL resolves first, then the slower AAPL answer arrives.
        assert!(app.apply_response(loaded(googl, "GOOGL", TimeRange::OneDay, 3)));
        assert!(!app.apply_response(loaded(aapl, "AAPL", TimeRange::OneDay, 9)));

        assert_eq!(app.quote.snapshot.as_ref().unwrap().symbol, "GOOGL");
        assert_eq!(app.quote.chart.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn failure_shows_error_and_clears_chart() {
        let (mut app, rx, _tx) = app();
        app.select_range(TimeRange::OneMonth);
        let id = sent(&rx)[0].request_id;
        app.apply_response(loaded(id, "MSFT", TimeRange::OneMonth, 5));

        app.select_symbol("ZZZZ");
        let id = sent(&rx)[0].request_id;
        app.apply_response(WorkerResponse::Failed {
            request_id: id,
            symbol: "ZZZZ".into(),
            error: DataError::Upstream {
                code: "Not Found".into(),
                description: "No data found, symbol may be delisted".into(),
            },
        });

        assert!(!app.quote.loading);
        assert_eq!(
            app.quote.error.as_deref(),
            Some("No data found, symbol may be delisted")
        );
        assert!(app.quote.chart.is_none());
        assert!(app.quote.snapshot.is_none());
        assert_eq!(app.error_history[0].category, "UPSTREAM");
    }

    #[test]
    fn empty_error_text_falls_back() {
        let (mut app, rx, _tx) = app();
        app.select_symbol("V");
        let id = sent(&rx)[0].request_id;
        app.apply_response(WorkerResponse::Failed {
            request_id: id,
            symbol: "V".into(),
            error: DataError::Proxy(String::new()),
        });
        assert_eq!(app.quote.error.as_deref(), Some("Failed to fetch stock data"));
    }

    #[test]
    fn new_fetch_releases_previous_chart() {
        let (mut app, rx, _tx) = app();
        app.select_symbol("AAPL");
        let id = sent(&rx)[0].request_id;
        app.apply_response(loaded(id, "AAPL", TimeRange::OneDay, 4));
        app.move_crosshair(0);

        app.select_range(TimeRange::FiveYears);
        assert!(app.quote.loading);
        assert!(app.quote.chart.is_none());
        assert!(app.quote.crosshair.is_none());
    }

    #[test]
    fn dead_worker_surfaces_error_state() {
        let (mut app, rx, _tx) = app();
        drop(rx);
        app.select_symbol("TSLA");
        assert!(!app.quote.loading);
        assert_eq!(app.quote.error.as_deref(), Some("Failed to fetch stock data"));
        assert_eq!(app.active_request(), None);
    }

    #[test]
    fn crosshair_starts_at_newest_bar_and_clamps() {
        let (mut app, rx, _tx) = app();
        app.select_symbol("NVDA");
        let id = sent(&rx)[0].request_id;
        app.apply_response(loaded(id, "NVDA", TimeRange::OneDay, 4));

        app.move_crosshair(-1);
        assert_eq!(app.quote.crosshair, Some(3));
        app.move_crosshair(-10);
        assert_eq!(app.quote.crosshair, Some(0));
        app.move_crosshair(10);
        assert_eq!(app.quote.crosshair, Some(3));
        app.clear_crosshair();
        assert_eq!(app.quote.crosshair, None);
    }

    #[test]
    fn filter_resets_cursor() {
        let mut companies = CompaniesState::default();
        companies.move_cursor(4);
        companies.push_char('a');
        assert_eq!(companies.cursor, 0);
        assert_eq!(companies.visible(), vec!["AAPL", "AMZN", "META", "TSLA", "NVDA"]);
        companies.move_cursor(99);
        assert_eq!(companies.cursor_symbol(), Some("NVDA"));
        companies.clear_query("MSFT");
        assert_eq!(companies.visible().len(), 10);
    }

    #[test]
    fn clearing_filter_returns_cursor_to_selection() {
        let mut companies = CompaniesState::default();
        companies.push_char('a');
        companies.move_cursor(3);
        assert_eq!(companies.cursor_symbol(), Some("TSLA"));
        companies.clear_query("MSFT");
        assert_eq!(companies.cursor_symbol(), Some("MSFT"));

        companies.push_char('z');
        companies.clear_query("UNKNOWN");
        assert_eq!(companies.cursor, 0);
    }

    #[test]
    fn error_history_caps_at_50() {
        let (mut app, _rx, _tx) = app();
        for i in 0..60 {
            app.push_error("ERR", format!("error {i}"), String::new());
        }
        assert_eq!(app.error_history.len(), 50);
        assert!(app.error_history[0].message.contains("59"));
    }
}
