//! Mock Servers.com API server.
//!
//! Provides an axum-based HTTP server that simulates the Servers.com API.

use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// A mock Servers.com API server for testing.
///
/// The server runs in the background and can be used to test the client
/// against a realistic, paginating API implementation.
pub struct MockServer {
    /// The URL where the server is listening.
    url: String,
    /// Handle to the server task.
    handle: JoinHandle<()>,
    /// Shared state that can be modified during tests.
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Start a new mock server with default fixtures.
    ///
    /// The server listens on a random available port and returns immediately.
    /// Use `url()` to get the server's base URL.
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Start a mock server with empty state.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Start a mock server with custom state.
    pub async fn with_state(mut state: MockState) -> Self {
        // Bind to a random available port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to address");
        let addr = listener.local_addr().expect("Failed to get local address");
        let url = format!("http://{}", addr);

        // Link headers point back at this server
        state.base_url = url.clone();
        let shared_state = state.shared();
        let app = Self::create_router(shared_state.clone());

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server error");
        });

        Self {
            url,
            handle,
            state: shared_state,
        }
    }

    /// Get the base URL of the mock server.
    ///
    /// Use this URL when creating a `ServersComClient` for testing.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get access to the server's shared state.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        self.state.clone()
    }

    /// Shutdown the server.
    ///
    /// This aborts the server task. It's safe to call multiple times.
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
    }

    fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        state.ssh_keys = scenario.ssh_keys;
        state.locations = scenario.locations;
        state.hosts = scenario.hosts;
        state.network_pools = scenario.network_pools;

        for (host_id, records) in scenario.ptr_records {
            state.ptr_records.insert(host_id, records);
        }

        for (pool_id, subnets) in scenario.subnetworks {
            state.subnetworks.insert(pool_id, subnets);
        }

        state
    }

    /// Create the axum router with all routes.
    fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            // Account routes
            .route("/ssh_keys", get(handlers::list_ssh_keys))
            .route("/ssh_keys/:fingerprint", get(handlers::get_ssh_key))
            .route("/locations", get(handlers::list_locations))
            .route("/locations/:id", get(handlers::get_location))
            // Host routes
            .route("/hosts", get(handlers::list_hosts))
            .route(
                "/hosts/:kind/:id/ptr_records",
                get(handlers::list_ptr_records),
            )
            // Network routes
            .route("/network_pools", get(handlers::list_network_pools))
            .route("/network_pools/:id", get(handlers::get_network_pool))
            .route(
                "/network_pools/:id/subnetworks",
                get(handlers::list_subnetworks),
            )
            // Health check
            .route("/health", get(health_check))
            .with_state(state)
    }
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "ok"
}
