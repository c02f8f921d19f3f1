//! Modal dialog rendering
//!
//! - URL configuration modal (API URL + public API URL)
//! - Path modal (open any page by path)
//! - Preview modal (content type + preview token)

use super::styling::{self, centered_rect};
use crate::state::AppState;
use crate::types::{PreviewField, UrlInputField};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Render the URL configuration modal
pub fn render_url_input_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered_rect(frame.area(), 0.7, 90, 11);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Configure CMS API ")
        .borders(Borders::ALL)
        .border_style(styling::modal_border(Color::Cyan))
        .style(styling::modal_style());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // API label
            Constraint::Length(1), // API input
            Constraint::Length(1),
            Constraint::Length(1), // Public label
            Constraint::Length(1), // Public input
            Constraint::Length(1),
            Constraint::Length(1), // Error
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let api_active = state.input.active_url_field == UrlInputField::ApiUrl;

    frame.render_widget(
        Paragraph::new("API URL:").style(Style::default().fg(Color::LightCyan)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(with_cursor(&state.input.api_url_input, api_active))
            .style(styling::input_style(api_active)),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new("Public API URL (optional, defaults to API URL):")
            .style(Style::default().fg(Color::LightCyan)),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(with_cursor(&state.input.public_api_url_input, !api_active))
            .style(styling::input_style(!api_active)),
        chunks[4],
    );

    if let Some(error) = &state.input.url_error {
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            chunks[6],
        );
    }

    let help = Paragraph::new("Enter: Save  |  Tab: Switch field  |  Ctrl+W: Delete word  |  Esc: Cancel")
        .style(styling::help_style())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[7]);
}

/// Render the modal asking for a page path
pub fn render_path_input_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered_rect(frame.area(), 0.6, 80, 6);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Open Page ")
        .borders(Borders::ALL)
        .border_style(styling::modal_border(Color::Cyan))
        .style(styling::modal_style());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new("Path:").style(Style::default().fg(Color::LightCyan)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(with_cursor(&state.input.path_input, true)).style(styling::input_style(true)),
        chunks[1],
    );

    let help = Paragraph::new("Enter: Open  |  Ctrl+L: Clear  |  Esc: Cancel")
        .style(styling::help_style())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

/// Render the page preview modal
pub fn render_preview_input_modal(frame: &mut Frame, state: &AppState) {
    let modal_area = centered_rect(frame.area(), 0.6, 80, 9);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(" Page Preview ")
        .borders(Borders::ALL)
        .border_style(styling::modal_border(Color::Magenta))
        .style(styling::modal_style());

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let content_type_active = state.input.active_preview_field == PreviewField::ContentType;

    frame.render_widget(
        Paragraph::new("Content type (e.g. blogpage):").style(Style::default().fg(Color::LightCyan)),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(with_cursor(
            &state.input.preview_content_type,
            content_type_active,
        ))
        .style(styling::input_style(content_type_active)),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new("Preview token:").style(Style::default().fg(Color::LightCyan)),
        chunks[3],
    );
    frame.render_widget(
        Paragraph::new(with_cursor(&state.input.preview_token, !content_type_active))
            .style(styling::input_style(!content_type_active)),
        chunks[4],
    );

    let help = Paragraph::new("Enter: Load  |  Tab: Switch field  |  Esc: Cancel")
        .style(styling::help_style())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[6]);
}

fn with_cursor(text: &str, active: bool) -> String {
    if active {
        format!("{text}_")
    } else {
        text.to_string()
    }
}
