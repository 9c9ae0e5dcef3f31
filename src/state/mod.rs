//! Client-side state modules.
//!
//! DESIGN
//! ======
//! State is kept as plain data with explicit transitions; the session
//! controller owns the only mutable instance and everything else reads
//! snapshots.

pub mod auth;
