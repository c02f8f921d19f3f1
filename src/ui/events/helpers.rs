//! Helper functions for event handling
//!
//! - Paste batching
//! - Read-only state snapshots

use crate::state::AppState;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Read something out of the state without keeping the lock
pub fn snapshot<T>(state: &Arc<RwLock<AppState>>, f: impl FnOnce(&AppState) -> T) -> Option<T> {
    state.read().ok().map(|s| f(&s))
}

/// Collect a batch of characters for paste support
///
/// When a character is typed, this function checks for any immediately available
/// character events and batches them together. This enables fast paste operations
/// in terminals. The key that ended the batch, if any, is handed back so the
/// caller can still dispatch it.
pub fn collect_paste_batch(initial_char: char) -> (String, Option<KeyEvent>) {
    let pending = std::iter::from_fn(|| match event::poll(Duration::from_millis(0)) {
        Ok(true) => event::read().ok(),
        _ => None,
    });
    batch_chars(initial_char, pending)
}

/// Batch plain character presses from `events` until the first other key
fn batch_chars(
    initial_char: char,
    events: impl IntoIterator<Item = Event>,
) -> (String, Option<KeyEvent>) {
    let mut text = String::from(initial_char);

    for event in events {
        let Event::Key(key) = event else {
            continue;
        };
        // Terminals reporting releases send one per press
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => text.push(c),
            _ => return (text, Some(key)),
        }
    }

    (text, None)
}
