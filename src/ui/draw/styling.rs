//! Styling utilities and color schemes

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};

pub fn focused_border() -> Color {
    Color::Cyan
}

pub fn unfocused_border() -> Color {
    Color::DarkGray
}

/// Background shared by every modal
pub fn modal_style() -> Style {
    Style::default().bg(Color::Rgb(30, 30, 30)).fg(Color::White)
}

pub fn modal_border(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

pub fn help_style() -> Style {
    Style::default().fg(Color::Rgb(150, 150, 150))
}

/// Style for the text field that currently receives input
pub fn input_style(active: bool) -> Style {
    if active {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Center a box of at most `max_width` columns inside `area`
pub fn centered_rect(area: Rect, width_ratio: f32, max_width: u16, height: u16) -> Rect {
    let width = ((area.width as f32 * width_ratio) as u16).min(max_width);
    let height = height.min(area.height);

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
