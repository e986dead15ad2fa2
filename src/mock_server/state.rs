//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Servers.com API server.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{Host, Location, NetworkPool, PtrRecord, SshKey, Subnetwork};

/// Shared state for the mock server.
///
/// Lists are kept in insertion order, which is the order pages are served in.
#[derive(Debug, Default)]
pub struct MockState {
    pub ssh_keys: Vec<SshKey>,

    pub locations: Vec<Location>,

    pub hosts: Vec<Host>,

    /// PTR records indexed by host ID.
    pub ptr_records: HashMap<String, Vec<PtrRecord>>,

    pub network_pools: Vec<NetworkPool>,

    /// Subnetworks indexed by network pool ID.
    pub subnetworks: HashMap<String, Vec<Subnetwork>>,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    /// Absolute base URL used in `Link` headers. Set by the server on start.
    pub base_url: String,
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    pub fn with_ssh_key(mut self, key: SshKey) -> Self {
        self.ssh_keys.push(key);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    pub fn with_host(mut self, host: Host) -> Self {
        self.hosts.push(host);
        self
    }

    /// Add PTR records for a host.
    pub fn with_ptr_records(mut self, host_id: &str, records: Vec<PtrRecord>) -> Self {
        self.ptr_records
            .entry(host_id.to_string())
            .or_default()
            .extend(records);
        self
    }

    pub fn with_network_pool(mut self, pool: NetworkPool) -> Self {
        self.network_pools.push(pool);
        self
    }

    /// Add subnetworks for a network pool.
    pub fn with_subnetworks(mut self, pool_id: &str, subnets: Vec<Subnetwork>) -> Self {
        self.subnetworks
            .entry(pool_id.to_string())
            .or_default()
            .extend(subnets);
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Whether an `Authorization` header value is accepted.
    pub fn is_authorized(&self, authorization: Option<&str>) -> bool {
        match &self.required_token {
            None => true,
            Some(token) => authorization
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|v| v == token)
                .unwrap_or(false),
        }
    }

    pub fn get_ssh_key(&self, fingerprint: &str) -> Option<&SshKey> {
        self.ssh_keys.iter().find(|k| k.fingerprint == fingerprint)
    }

    pub fn get_location(&self, id: i64) -> Option<&Location> {
        self.locations.iter().find(|l| l.id == id)
    }

    pub fn get_network_pool(&self, id: &str) -> Option<&NetworkPool> {
        self.network_pools.iter().find(|p| p.id == id)
    }

    /// Locations whose name or code contains `pattern` (case-insensitive).
    pub fn list_locations(&self, pattern: Option<&str>) -> Vec<Location> {
        self.locations
            .iter()
            .filter(|l| {
                pattern
                    .map(|p| {
                        let p = p.to_lowercase();
                        l.name.to_lowercase().contains(&p) || l.code.to_lowercase().contains(&p)
                    })
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    /// Hosts filtered by location, type and title.
    pub fn list_hosts(
        &self,
        location_id: Option<i64>,
        host_type: Option<&str>,
        pattern: Option<&str>,
    ) -> Vec<Host> {
        self.hosts
            .iter()
            .filter(|h| location_id.map(|id| h.location_id == id).unwrap_or(true))
            .filter(|h| host_type.map(|t| h.host_type == t).unwrap_or(true))
            .filter(|h| {
                pattern
                    .map(|p| h.title.to_lowercase().contains(&p.to_lowercase()))
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    /// PTR records of a host, or `None` if there is no such host.
    pub fn list_ptr_records(&self, kind: &str, host_id: &str) -> Option<Vec<PtrRecord>> {
        let host = self.hosts.iter().find(|h| h.id == host_id)?;
        if host.kind_segment() != kind {
            return None;
        }
        Some(self.ptr_records.get(host_id).cloned().unwrap_or_default())
    }

    /// Network pools filtered by title/CIDR pattern.
    pub fn list_network_pools(&self, pattern: Option<&str>) -> Vec<NetworkPool> {
        self.network_pools
            .iter()
            .filter(|p| {
                pattern
                    .map(|pat| {
                        p.cidr.contains(pat)
                            || p.title
                                .as_deref()
                                .map(|t| t.to_lowercase().contains(&pat.to_lowercase()))
                                .unwrap_or(false)
                    })
                    .unwrap_or(true)
            })
            .cloned()
            .collect()
    }

    /// Subnetworks of a pool, or `None` if there is no such pool.
    pub fn list_subnetworks(&self, pool_id: &str) -> Option<Vec<Subnetwork>> {
        self.get_network_pool(pool_id)?;
        Some(self.subnetworks.get(pool_id).cloned().unwrap_or_default())
    }
}
