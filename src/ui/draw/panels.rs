//! Main panel rendering
//!
//! - Pages panel (left side) - list of page paths
//! - Page panel (right side) - the selected page, its gate or its outcome

use super::components::{
    render_empty_message, render_error_message, render_loading_spinner, PAGES_TITLE,
};
use super::page::{render_page, render_password_gate};
use super::styling;
use crate::registry::ComponentRegistry;
use crate::state::AppState;
use crate::types::{InputMode, LoadingState, PageState, PanelFocus};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const PAGE_TITLE: &str = "[2] Page";

/// Render the left panel with the page list
pub fn render_pages_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    spinner_index: usize,
    list_state: &mut ListState,
) {
    match &state.data.loading_state {
        LoadingState::Fetching => {
            render_loading_spinner(frame, area, PAGES_TITLE, "Fetching pages", spinner_index);
        }
        LoadingState::Error(error) => {
            render_error_message(frame, area, error, state.data.retry_count);
        }
        LoadingState::Complete | LoadingState::Idle => {
            if state.data.pages.is_empty() {
                render_empty_message(frame, area);
                return;
            }

            let items: Vec<ListItem> = state
                .data
                .pages
                .iter()
                .map(|path| ListItem::new(Line::from(path.as_str())))
                .collect();

            let border_color = if state.ui.panel_focus == PanelFocus::PagesList {
                styling::focused_border()
            } else {
                styling::unfocused_border()
            };

            let list = List::new(items)
                .block(
                    Block::default()
                        .title(format!("{PAGES_TITLE} ({})", state.data.pages.len()))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border_color)),
                )
                .highlight_style(
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("> ");

            list_state.select(Some(state.ui.selected_index));
            frame.render_stateful_widget(list, area, list_state);
        }
    }
}

/// Render the right panel according to the page state
pub fn render_page_panel(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    registry: &dyn ComponentRegistry,
    spinner_index: usize,
) {
    let scroll = state.ui.page_scroll;

    match &state.page {
        PageState::Empty => {
            render_message(
                frame,
                area,
                state,
                "Select a page and press [Enter]".to_string(),
                Color::DarkGray,
            );
        }
        PageState::Loading(path) => {
            render_loading_spinner(frame, area, PAGE_TITLE, &format!("Loading {path}"), spinner_index);
        }
        PageState::Loaded { page, .. } => {
            render_page(frame, area, page, registry, scroll);
        }
        PageState::Protected { path } => match &state.gate {
            Some(gate) => {
                let focused = state.input.mode == InputMode::EnteringPassword;
                render_password_gate(frame, area, gate, registry, focused, scroll);
            }
            None => {
                render_message(frame, area, state, format!("{path} is protected"), Color::Yellow);
            }
        },
        PageState::Redirect { path, redirect } => {
            let kind = if redirect.is_permanent {
                "permanently"
            } else {
                "temporarily"
            };
            render_message(
                frame,
                area,
                state,
                format!(
                    "{path} has moved {kind} to\n\n{}\n\nPress [Enter] to follow",
                    redirect.redirect_url
                ),
                Color::Yellow,
            );
        }
        PageState::NotFound(path) => {
            render_message(frame, area, state, format!("{path}\n\nPage not found"), Color::Red);
        }
        PageState::Failed { path, message } => {
            render_message(
                frame,
                area,
                state,
                format!("Error loading {path}:\n\n{message}"),
                Color::Red,
            );
        }
    }
}

fn render_message(frame: &mut Frame, area: Rect, state: &AppState, text: String, color: Color) {
    let border_color = if state.ui.panel_focus == PanelFocus::Page {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .title(PAGE_TITLE)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
