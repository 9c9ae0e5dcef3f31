//! # goldshop-console
//!
//! Native client for the gold-shop admin backend (`/api`).
//!
//! The crate owns the session/auth controller (current identity, CSRF token,
//! permission checks), an HTTP transport that attaches the CSRF header to
//! every mutating request, and thin typed passthrough for the CRUD endpoints
//! the admin dashboard consumes. The `goldshop` binary drives all of it from
//! a terminal.

pub mod config;
pub mod error;
pub mod net;
pub mod resources;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::ClientConfig;
pub use error::{ApiError, ConfigError};
pub use session::SessionController;
