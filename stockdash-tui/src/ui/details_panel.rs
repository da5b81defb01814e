//! Summary statistics under the chart.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use stockdash_core::format::{format_money, format_volume};
use stockdash_core::SummaryStatistics;

use crate::theme;

/// Rows the panel needs, borders included.
pub const HEIGHT: u16 = 7;

pub fn render(f: &mut Frame, area: Rect, summary: Option<&SummaryStatistics>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(false));

    // No bars at all: nothing to summarize.
    let Some(s) = summary else {
        f.render_widget(
            Paragraph::new(Span::styled("No quote data for this range.", theme::muted()))
                .block(block),
            area,
        );
        return;
    };

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let header = Line::from(vec![
        Span::styled(format!(" {}  ", s.symbol), theme::accent_bold()),
        Span::styled(format_money(s.current_price), theme::text()),
        Span::styled(
            format!(
                "    range low {}  high {}",
                format_money(s.period_low),
                format_money(s.period_high)
            ),
            theme::muted(),
        ),
    ]);
    f.render_widget(Paragraph::new(header), rows[0]);

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);

    stat(f, cells[0], "Day High", format_money(s.day_high), theme::positive());
    stat(f, cells[1], "Day Low", format_money(s.day_low), theme::negative());
    stat(f, cells[2], "Open Price", format_money(s.open_price), theme::text());
    stat(f, cells[3], "Volume", format_volume(s.volume), theme::text());
}

fn stat(f: &mut Frame, area: Rect, label: &str, value: String, style: Style) {
    let text = vec![
        Line::from(Span::styled(format!(" {label}"), theme::muted())),
        Line::from(Span::styled(format!(" {value}"), style)),
    ];
    f.render_widget(Paragraph::new(text), area);
}
