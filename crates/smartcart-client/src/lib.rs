//! Client-side state and API access for SmartCart frontends.
//!
//! Mirrors the server's wire types one-to-one: a typed HTTP client for
//! the REST API, a `Resource` wrapper for async fetch lifecycles, and
//! an explicitly-owned application state struct with the reductions a
//! UI applies to API responses.

pub mod api;
pub mod error;
pub mod resource;
pub mod state;
pub mod ui;

pub use api::ApiClient;
pub use error::ClientError;
pub use resource::Resource;
pub use state::AppState;
pub use ui::{Theme, UiState};
