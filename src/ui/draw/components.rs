//! Reusable UI components
//!
//! This module contains shared UI components used throughout the application:
//! - Header (API root, load status)
//! - Footer (command help)
//! - Loading spinners
//! - Error/empty state messages

use crate::types::{InputMode, LoadingState, PanelFocus};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SPINNER: [&str; 4] = ["⠋", "⠙", "⠹", "⠸"];

pub const PAGES_TITLE: &str = "[1] Pages";

/// Render the application header with status
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    api_url: &str,
    loading_state: &LoadingState,
    pages_count: usize,
) {
    let status_text = match loading_state {
        LoadingState::Idle => "Idle".to_string(),
        LoadingState::Fetching => "Fetching...".to_string(),
        LoadingState::Complete => format!("{pages_count} pages"),
        LoadingState::Error(_) => "Error".to_string(),
    };

    let header = Paragraph::new(format!("headless cms tui - {api_url} [{status_text}]"))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the footer with command help for the current mode
pub fn render_footer(frame: &mut Frame, area: Rect, mode: &InputMode, focus: &PanelFocus) {
    let footer_text = match (mode, focus) {
        (InputMode::EnteringPassword, _) => "Type password | Enter:Submit Ctrl+L:Clear Esc:Leave form",
        (InputMode::EnteringUrl | InputMode::EnteringPath | InputMode::EnteringPreview, _) => {
            "Enter:Submit Tab:Next field Esc:Cancel"
        }
        (InputMode::Normal, PanelFocus::PagesList) => {
            "Tab:Panel j/k:Nav Enter:Open o:Path p:Preview r:Refresh | ,:URL q:Quit"
        }
        (InputMode::Normal, PanelFocus::Page) => {
            "Tab:Panel Ctrl+d/u:Scroll i:Password o:Path p:Preview | ,:URL q:Quit"
        }
    };

    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title("Commands"));

    frame.render_widget(footer, area);
}

/// Render loading spinner animation
pub fn render_loading_spinner(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    spinner_index: usize,
) {
    let loading_text = format!(
        "{} {message}\n\nPlease wait...",
        SPINNER[spinner_index % SPINNER.len()]
    );

    let loading = Paragraph::new(loading_text)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    frame.render_widget(loading, area);
}

/// Render error message with retry instructions
pub fn render_error_message(frame: &mut Frame, area: Rect, error: &str, retry_count: u32) {
    let retry_text = if retry_count > 0 {
        format!("\n\nRetry attempt: {retry_count}")
    } else {
        String::new()
    };

    let error_msg = format!("❌ {error}{retry_text}\n\nPress [r] to retry");

    let error_widget = Paragraph::new(error_msg)
        .style(Style::default().fg(Color::Red))
        .block(Block::default().borders(Borders::ALL).title(PAGES_TITLE));

    frame.render_widget(error_widget, area);
}

/// Render empty state message
pub fn render_empty_message(frame: &mut Frame, area: Rect) {
    let empty = Paragraph::new("No pages found\n\nPress [r] to refresh")
        .block(Block::default().borders(Borders::ALL).title(PAGES_TITLE));

    frame.render_widget(empty, area);
}
