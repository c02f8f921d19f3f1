//! Terminal UI: drawing and input handling

pub mod draw;
pub mod events;

pub use events::EventHandler;
