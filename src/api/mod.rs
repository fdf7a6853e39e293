//! REST API module for the consent server.
//!
//! Response bodies keep the shape the browser front end already expects.

mod consent;

pub use consent::*;

/// Health check endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
