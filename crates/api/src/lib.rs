//! Battery monitoring query service library.
//!
//! Exposes config, state, router and routes so integration tests and the
//! binary entrypoint build exactly the same application.

pub mod config;
pub mod handlers;
pub mod router;
pub mod routes;
pub mod state;
