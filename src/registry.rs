//! Component registry: maps backend component names to terminal views
//!
//! The core only depends on [`ComponentRegistry`]; which names exist is up
//! to whoever hosts the UI. [`StaticRegistry`] is the map-backed
//! implementation the binary fills at startup.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use serde_json::Value;
use std::collections::HashMap;

/// Something that can draw a page from its props
pub trait PageView: Send + Sync {
    fn render(&self, frame: &mut Frame, area: Rect, props: &Value, scroll: u16);
}

/// Resolves a component name to a view
pub trait ComponentRegistry: Send + Sync {
    fn resolve(&self, name: &str) -> Option<&dyn PageView>;
}

#[derive(Default)]
pub struct StaticRegistry {
    views: HashMap<String, Box<dyn PageView>>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with a [`PropsView`] for each name
    pub fn with_props_views<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            let name = name.into();
            registry.register(name.clone(), PropsView::new(name));
        }
        registry
    }

    pub fn register(&mut self, name: impl Into<String>, view: impl PageView + 'static) {
        self.views.insert(name.into(), Box::new(view));
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.views.keys().map(String::as_str).collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for StaticRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticRegistry")
            .field("views", &self.names())
            .finish()
    }
}

impl ComponentRegistry for StaticRegistry {
    fn resolve(&self, name: &str) -> Option<&dyn PageView> {
        self.views.get(name).map(|view| view.as_ref())
    }
}

/// Generic view: the `title` prop as a heading, then the props as JSON
#[derive(Debug, Clone)]
pub struct PropsView {
    component_name: String,
}

impl PropsView {
    pub fn new(component_name: impl Into<String>) -> Self {
        Self {
            component_name: component_name.into(),
        }
    }
}

impl PageView for PropsView {
    fn render(&self, frame: &mut Frame, area: Rect, props: &Value, scroll: u16) {
        let mut lines = Vec::new();

        if let Some(title) = props.get("title").and_then(Value::as_str) {
            lines.push(Line::from(Span::styled(
                title.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
        }

        for line in format_props(props).lines() {
            lines.push(Line::from(line.to_string()));
        }

        let block = Block::default()
            .title(format!(" {} ", self.component_name))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0));

        frame.render_widget(paragraph, area);
    }
}

/// Pretty-print props, falling back to compact output
pub fn format_props(props: &Value) -> String {
    serde_json::to_string_pretty(props).unwrap_or_else(|_| props.to_string())
}
