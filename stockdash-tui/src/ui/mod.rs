//! Top-level layout: companies on the left; range bar, chart and details on
//! the right; status bar along the bottom.

pub mod companies_panel;
pub mod details_panel;
pub mod overlays;
pub mod range_bar;
pub mod status_bar;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::{AppState, Focus, Overlay};
use crate::panels::CandleChartPanel;
use crate::theme;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(f.area());
    let main_area = chunks[0];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(main_area);

    companies_panel::render(f, columns[0], app);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);

    range_bar::render(f, right[0], app);
    draw_content(f, right[1], app);
    status_bar::render(f, chunks[1], app);

    match app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::ErrorHistory => overlays::render_error_history(f, main_area, app),
        Overlay::None => {}
    }
}

/// Exactly one of: loading, error, chart with details.
fn draw_content(f: &mut Frame, area: Rect, app: &AppState) {
    let quote = &app.quote;

    if quote.loading {
        let spinner = SPINNER[(app.tick / 2) as usize % SPINNER.len()];
        let text = Paragraph::new(Line::from(vec![
            Span::styled(format!("{spinner} "), theme::accent()),
            Span::styled(
                format!(
                    "Loading {} ({})...",
                    app.selected_symbol,
                    app.selected_range.label()
                ),
                theme::text(),
            ),
        ]))
        .alignment(Alignment::Center)
        .block(content_block(" Stock Market Dashboard ", false));
        f.render_widget(text, area);
        return;
    }

    if let Some(message) = &quote.error {
        let text = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(message.as_str(), theme::negative())),
            Line::from(""),
            Line::from(Span::styled("r: retry", theme::muted())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::negative())
                .title(" Error ")
                .title_style(theme::negative()),
        );
        f.render_widget(text, area);
        return;
    }

    let (Some(snapshot), Some(chart)) = (&quote.snapshot, &quote.chart) else {
        let text = Paragraph::new(Span::styled(
            "Select a company to load its chart.",
            theme::muted(),
        ))
        .alignment(Alignment::Center)
        .block(content_block(" Stock Market Dashboard ", false));
        f.render_widget(text, area);
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(details_panel::HEIGHT)])
        .split(area);

    let title = format!("{} Price Chart", snapshot.symbol);
    let panel = CandleChartPanel::new(chart, &title)
        .crosshair(quote.crosshair)
        .focused(app.focus == Focus::Chart);
    f.render_widget(panel, parts[0]);

    details_panel::render(f, parts[1], snapshot.summary.as_ref());
}

fn content_block(title: &str, active: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(title)
        .title_style(theme::panel_title(active))
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
