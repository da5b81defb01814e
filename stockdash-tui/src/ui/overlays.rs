//! Overlays drawn over the main area: key help and error history.

use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect;
use crate::app::AppState;
use crate::theme;

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::accent())
        .title(" Keys [any key]close ")
        .title_style(theme::accent_bold());
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut lines: Vec<Line> = Vec::new();
    section(&mut lines, "Global");
    key(&mut lines, "Tab / Shift+Tab", "Cycle focus: companies, range, chart");
    key(&mut lines, "1-5 / [ ]", "Pick time range");
    key(&mut lines, "r", "Reload current selection");
    key(&mut lines, "e", "Error history");
    key(&mut lines, "q / Ctrl+C", "Quit");
    lines.push(Line::from(""));

    section(&mut lines, "Companies");
    key(&mut lines, "/", "Filter companies (Enter keep, Esc clear)");
    key(&mut lines, "j / k", "Move cursor");
    key(&mut lines, "Enter", "Load selected company");
    lines.push(Line::from(""));

    section(&mut lines, "Chart");
    key(&mut lines, "h / l", "Move crosshair one bar");
    key(&mut lines, "H / L", "Move crosshair ten bars");
    key(&mut lines, "Esc", "Hide crosshair");

    f.render_widget(Paragraph::new(lines), inner);
}

fn section(lines: &mut Vec<Line<'_>>, title: &'static str) {
    lines.push(Line::from(Span::styled(title, theme::accent_bold())));
}

fn key(lines: &mut Vec<Line<'_>>, keys: &'static str, what: &'static str) {
    lines.push(Line::from(vec![
        Span::styled(format!("  {keys:>16}  "), theme::warning()),
        Span::styled(what, theme::text()),
    ]));
}

/// Error history, newest first.
pub fn render_error_history(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(80, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::negative())
        .title(format!(
            " Error History ({}) [j/k]scroll [Esc]close ",
            app.error_history.len()
        ))
        .title_style(theme::negative().add_modifier(Modifier::BOLD));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    if app.error_history.is_empty() {
        f.render_widget(
            Paragraph::new(Span::styled("No errors this session.", theme::muted())),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for (i, err) in app.error_history.iter().enumerate().skip(app.error_scroll) {
        if lines.len() >= inner.height as usize {
            break;
        }
        let style = if i == app.error_scroll {
            theme::negative().add_modifier(Modifier::BOLD)
        } else {
            theme::muted()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("[{}] ", err.timestamp.format("%H:%M:%S")), theme::muted()),
            Span::styled(format!("[{}] ", err.category), theme::warning()),
            Span::styled(err.message.as_str(), style),
        ]));
        if !err.context.is_empty() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(err.context.as_str(), theme::muted()),
            ]));
        }
    }

    f.render_widget(Paragraph::new(lines), inner);
}
