//! Left pane: filter line plus the filtered company list.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, Focus};
use crate::theme;

pub fn render(f: &mut Frame, area: Rect, app: &AppState) {
    let active = app.focus == Focus::Companies;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(active))
        .title(" Companies ")
        .title_style(theme::panel_title(active));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(inner);

    let companies = &app.companies;
    let filter_line = if companies.editing {
        Line::from(vec![
            Span::styled("/ ", theme::accent()),
            Span::styled(companies.query.as_str(), theme::accent_bold()),
            Span::styled("_", theme::accent()),
        ])
    } else if companies.query.is_empty() {
        Line::from(Span::styled("/ Search companies...", theme::muted()))
    } else {
        Line::from(vec![
            Span::styled("/ ", theme::muted()),
            Span::styled(companies.query.as_str(), theme::text()),
        ])
    };
    f.render_widget(Paragraph::new(filter_line), chunks[0]);

    let visible = companies.visible();
    if visible.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No matches", theme::muted())),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = visible
        .iter()
        .map(|symbol| {
            let style = if *symbol == app.selected_symbol {
                theme::accent_bold()
            } else {
                theme::text()
            };
            ListItem::new(Line::from(Span::styled(format!(" {symbol}"), style)))
        })
        .collect();

    let list = List::new(items).highlight_style(theme::selected());
    let mut state = ListState::default().with_selected(active.then_some(companies.cursor));
    f.render_stateful_widget(list, chunks[1], &mut state);
}
