//! Trait definitions for Servers.com operations.
//!
//! Each entity type implements the traits its endpoints support.

mod get;
mod list;

pub use get::Get;
pub use list::{list_all, List};
