//! REST API for the SmartCart storefront.
//!
//! Thin warp layer over the store and AI crates: filters decode and
//! authenticate requests, handlers delegate to the services, and the
//! rejection handler turns every error into a `{ "message": ... }`
//! JSON body with the right status code.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod server;

pub use auth::{Role, SessionStore, User};
pub use config::ServerConfig;
pub use error::ApiError;
pub use server::{routes, AppContext};
