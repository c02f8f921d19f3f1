//! Page content and the password form

use super::styling;
use crate::gate::PasswordGate;
use crate::pages::PageData;
use crate::registry::ComponentRegistry;
use crate::utils::mask_password;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a page through the registry view named by its component
pub fn render_page(
    frame: &mut Frame,
    area: Rect,
    page: &PageData,
    registry: &dyn ComponentRegistry,
    scroll: u16,
) {
    match registry.resolve(&page.component_name) {
        Some(view) => view.render(frame, area, &page.component_props, scroll),
        None => {
            let missing = Paragraph::new(format!("Component {} not found", page.component_name))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(missing, area);
        }
    }
}

/// Draw the gate: the entry form until revealed, then the page itself
pub fn render_password_gate(
    frame: &mut Frame,
    area: Rect,
    gate: &PasswordGate,
    registry: &dyn ComponentRegistry,
    focused: bool,
    scroll: u16,
) {
    if let Some(page) = gate.revealed_page() {
        render_page(frame, area, page, registry, scroll);
        return;
    }

    let masked = mask_password(gate.password());
    let cursor = if focused && !gate.is_submitting() { "_" } else { "" };

    let mut lines = vec![
        Line::from(Span::styled(
            "Password is required",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("You need a password to access this website"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Password: ", Style::default().fg(Color::LightCyan)),
            Span::styled(format!("{masked}{cursor}"), styling::input_style(focused)),
        ]),
        Line::from(""),
    ];

    if let Some(message) = gate.error_message() {
        lines.push(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    let hint = if gate.is_submitting() {
        Span::styled("Checking...", Style::default().fg(Color::Yellow))
    } else if focused {
        Span::styled("[Enter] Continue", styling::help_style())
    } else {
        Span::styled("[i] Enter password", styling::help_style())
    };
    lines.push(Line::from(hint));

    let border = if focused {
        styling::focused_border()
    } else {
        styling::unfocused_border()
    };

    let form = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Protected page ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(form, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::request_error;
    use crate::pages::PasswordProtectedProps;
    use crate::registry::StaticRegistry;
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn gate() -> PasswordGate {
        PasswordGate::new(PasswordProtectedProps {
            restriction_id: 1,
            page_id: 2,
            csrf_token: "csrf".to_string(),
        })
    }

    #[test]
    fn test_rejected_password_shows_message() {
        let mut gate = gate();
        gate.push_str("wrong");
        let submission = gate.begin_submit().unwrap();
        gate.complete(submission.id, Err(request_error(401, "Unauthorized", "")));

        let registry = StaticRegistry::new();
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_password_gate(frame, area, &gate, &registry, true, 0);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Password is required"));
        assert!(text.contains("Invalid password"));
        assert!(text.contains("•••••"));
        assert!(!text.contains("wrong"));
        assert!(!text.contains("Unauthorized"));
    }

    #[test]
    fn test_unknown_component_falls_back() {
        let mut gate = gate();
        let submission = gate.begin_submit().unwrap();
        gate.complete(submission.id, Ok(json!({ "componentName": "Missing", "componentProps": {} })));
        assert!(gate.is_revealed());

        let registry = StaticRegistry::with_props_views(["HomePage"]);
        let mut terminal = Terminal::new(TestBackend::new(60, 8)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_password_gate(frame, area, &gate, &registry, true, 0);
            })
            .unwrap();

        assert!(buffer_text(&terminal).contains("Component Missing not found"));
    }

    #[test]
    fn test_registered_component_is_rendered() {
        let page = PageData {
            component_name: "HomePage".to_string(),
            component_props: json!({ "title": "Welcome" }),
        };

        let registry = StaticRegistry::with_props_views(["HomePage"]);
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_page(frame, area, &page, &registry, 0);
            })
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("HomePage"));
        assert!(text.contains("Welcome"));
    }
}
