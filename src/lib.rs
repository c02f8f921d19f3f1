//! Client library and terminal host for a headless CMS page API
//!
//! The library half talks to the CMS: key casing ([`case`]), the generic
//! request functions ([`request`]), the endpoint client ([`api`]), page
//! resolution ([`pages`]), the password gate ([`gate`]) and the component
//! registry ([`registry`]). The rest is the ratatui application hosting them.

pub mod actions;
pub mod api;
pub mod app;
pub mod case;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod pages;
pub mod registry;
pub mod request;
pub mod state;
pub mod tasks;
pub mod types;
pub mod ui;
pub mod utils;

pub use api::{ClientConfig, CmsClient};
pub use error::{Error, ErrorResponse, RequestError};
pub use gate::{GateState, PasswordGate, ProtectedPageSource};
pub use pages::{PageData, PageResolution, PasswordProtectedProps, Redirect};
pub use registry::{ComponentRegistry, PageView, StaticRegistry};
pub use request::{get_request, post_request, Params, RequestOptions};
