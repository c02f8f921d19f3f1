//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Reusable UI components (header, footer, spinners)
//! - `modals`: Modal dialogs (URL, path, preview)
//! - `panels`: Main panels (pages list, page panel)
//! - `page`: Registry-backed page rendering and the password form
//! - `styling`: Color schemes and layout helpers

mod components;
mod modals;
mod page;
mod panels;
mod styling;

pub use components::{render_footer, render_header};
pub use modals::{render_path_input_modal, render_preview_input_modal, render_url_input_modal};
pub use page::{render_page, render_password_gate};
pub use panels::{render_page_panel, render_pages_panel};
