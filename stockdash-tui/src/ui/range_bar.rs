//! Row of time-range buttons.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use stockdash_core::TimeRange;

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.focus == Focus::Ranges;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(" Time Range ")
        .title_style(theme::panel_title(active));

    let mut spans: Vec<Span> = Vec::new();
    for (i, range) in TimeRange::all().iter().enumerate() {
        let label = format!(" {} {} ", i + 1, range.label());
        let style = if *range == app.selected_range {
            theme::selected()
        } else {
            theme::text()
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
