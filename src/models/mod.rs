//! Data models for Dog Finder.
//!
//! Wire types match the adoption service and consent server payloads.

mod consent;
mod dog;
mod filter;

pub use consent::*;
pub use dog::*;
pub use filter::*;
