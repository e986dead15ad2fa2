//! Servers.com API client library.
//!
//! A Rust library for the Servers.com public API. Every list endpoint is
//! exposed as a [`Collection`]: a lazily fetched page that follows the
//! RFC 5988 `Link` header to its `next`, `prev`, `first` and `last`
//! neighbours.
//!
//! # Quick Start
//!
//! ```no_run
//! use serverscom::{Get, Host, List, ServersComClient, SshKey};
//!
//! #[tokio::main]
//! async fn main() -> serverscom::Result<()> {
//!     // Create client from environment variables
//!     let client = ServersComClient::from_env()?;
//!
//!     // First page of SSH keys
//!     let mut keys = SshKey::collection(&client);
//!     for key in keys.set_per_page(20).list().await? {
//!         println!("{} {}", key.fingerprint, key.name);
//!     }
//!
//!     // Walk forward while there is a next page
//!     while keys.has_next() {
//!         println!("{} more", keys.next_page().await?.len());
//!     }
//!
//!     // Every host, all pages at once
//!     let hosts = Host::collection(&client).collect().await?;
//!     println!("Found {} hosts", hosts.len());
//!
//!     // A nested collection bound to one server
//!     let records = Host::ptr_records(&client, "dedicated_servers", "xkazYeJ0")
//!         .collect()
//!         .await?;
//!     println!("{} PTR records", records.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`ServersComClient`] - authentication, URL building, status mapping
//! - [`Transport`] - the pluggable HTTP backend ([`ReqwestTransport`] by default)
//! - [`Collection`] - paginated list state and navigation
//! - [`parse_link_header`] - `Link` header to [`Relations`]
//! - [`List`] / [`Get`] - binding model types to their endpoints
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `SERVERSCOM_TOKEN` (required) - API token
//! - `SERVERSCOM_API_URL` (optional) - Base URL (defaults to `https://api.servers.com/v1`)

mod client;
mod collection;
mod error;
mod link;
mod models;
mod output;
mod resources;
mod traits;
mod transport;

pub mod cli;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::ServersComClient;
pub use collection::Collection;
pub use error::{ApiErrorKind, Result, ServersComError, TransportError};
pub use link::{parse_link_header, Relation, Relations};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

// Re-export traits
pub use output::PrettyPrint;
pub use traits::{list_all, Get, List};

// Re-export models
pub use models::{Host, Location, NetworkPool, PtrRecord, Subnetwork, SshKey};
