//! Dark dashboard palette.
//!
//! A single fixed theme: slate background, gray text and grid, blue
//! crosshair, green/red candles. Free functions return ready-made styles for
//! the panel renderers.

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Chart and panel background
    pub background: Color,
    /// Axis labels and body text
    pub text: Color,
    /// Horizontal grid rules
    pub grid: Color,
    /// Inactive borders and scale separators
    pub border: Color,
    /// Crosshair line
    pub crosshair: Color,
    /// Crosshair label background
    pub crosshair_label: Color,
    /// Rising candles
    pub positive: Color,
    /// Falling candles, error text
    pub negative: Color,
    /// Focus, selection, active range
    pub accent: Color,
    pub warning: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::slate()
    }
}

impl Theme {
    pub fn slate() -> Self {
        Self {
            background: Color::Rgb(31, 41, 55),
            text: Color::Rgb(156, 163, 175),
            grid: Color::Rgb(55, 65, 81),
            border: Color::Rgb(75, 85, 99),
            crosshair: Color::Rgb(96, 165, 250),
            crosshair_label: Color::Rgb(37, 99, 235),
            positive: Color::Rgb(52, 211, 153),
            negative: Color::Rgb(248, 113, 113),
            accent: Color::Rgb(96, 165, 250),
            warning: Color::Rgb(251, 191, 36),
            muted: Color::Rgb(107, 114, 128),
        }
    }

    /// Candle color: rising (or flat) is positive.
    pub fn candle_color(&self, open: f64, close: f64) -> Color {
        if close >= open {
            self.positive
        } else {
            self.negative
        }
    }
}

pub fn text() -> Style {
    Style::default().fg(Theme::default().text)
}

pub fn muted() -> Style {
    Style::default().fg(Theme::default().muted)
}

pub fn accent() -> Style {
    Style::default().fg(Theme::default().accent)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(Theme::default().warning)
}

pub fn negative() -> Style {
    Style::default().fg(Theme::default().negative)
}

pub fn positive() -> Style {
    Style::default().fg(Theme::default().positive)
}

/// Highlighted row in a list.
pub fn selected() -> Style {
    let t = Theme::default();
    Style::default()
        .fg(t.background)
        .bg(t.accent)
        .add_modifier(Modifier::BOLD)
}

pub fn panel_border(active: bool) -> Style {
    let t = Theme::default();
    Style::default().fg(if active { t.accent } else { t.border })
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slate_is_default() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(31, 41, 55));
        assert_eq!(theme.grid, Color::Rgb(55, 65, 81));
    }

    #[test]
    fn candle_color_by_direction() {
        let theme = Theme::default();
        assert_eq!(theme.candle_color(100.0, 101.0), theme.positive);
        assert_eq!(theme.candle_color(100.0, 100.0), theme.positive);
        assert_eq!(theme.candle_color(100.0, 99.0), theme.negative);
    }

    #[test]
    fn border_tracks_focus() {
        let theme = Theme::default();
        assert_eq!(panel_border(true).fg, Some(theme.accent));
        assert_eq!(panel_border(false).fg, Some(theme.border));
    }
}
