//! Networking modules for the backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` owns the reqwest client and cookie jar, `csrf` is the outbound
//! stage every request passes through, `cookies` reads the readable
//! `csrf_token` cookie, `api` wraps the auth endpoints, and `types` defines
//! the shared wire schema.

pub mod api;
pub mod cookies;
pub mod csrf;
pub mod http;
pub mod types;
