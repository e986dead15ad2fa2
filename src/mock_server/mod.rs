//! Mock Servers.com API server for E2E testing.
//!
//! This module provides an in-memory mock server that simulates the
//! Servers.com API for integration and end-to-end testing. Unlike wiremock
//! which mocks at the HTTP level per-test, this server keeps state across
//! requests and paginates list endpoints with real `Link` headers, so whole
//! navigation workflows can be exercised.
//!
//! # Example
//!
//! ```ignore
//! use serverscom::mock_server::MockServer;
//! use serverscom::{List, ServersComClient, SshKey};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = ServersComClient::new("test-token", server.url()).unwrap();
//!
//!     let mut keys = SshKey::collection(&client);
//!     keys.set_per_page(2);
//!     let all = keys.collect().await.unwrap();
//!     assert_eq!(all.len(), 5);
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
