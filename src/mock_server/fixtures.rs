//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};

use crate::{Host, Location, NetworkPool, PtrRecord, SshKey, Subnetwork};

/// Collection of fixture factories for test data.
pub struct Fixtures;

fn fixed_time() -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).single()
}

impl Fixtures {
    // =========================================================================
    // Account Fixtures
    // =========================================================================

    pub fn ssh_key(name: &str, fingerprint: &str) -> SshKey {
        SshKey {
            name: name.to_string(),
            fingerprint: fingerprint.to_string(),
            labels: BTreeMap::new(),
            created: fixed_time(),
            updated: fixed_time(),
        }
    }

    /// Create an SSH key carrying one label.
    pub fn labeled_ssh_key(name: &str, fingerprint: &str, key: &str, value: &str) -> SshKey {
        let mut ssh_key = Self::ssh_key(name, fingerprint);
        ssh_key.labels.insert(key.to_string(), value.to_string());
        ssh_key
    }

    pub fn location(id: i64, code: &str, name: &str) -> Location {
        Location {
            id,
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    // =========================================================================
    // Host Fixtures
    // =========================================================================

    /// Create an active dedicated server.
    pub fn dedicated_server(id: &str, title: &str, location_id: i64, location_code: &str) -> Host {
        Host {
            id: id.to_string(),
            host_type: "dedicated_server".to_string(),
            title: title.to_string(),
            location_id,
            location_code: location_code.to_string(),
            status: "active".to_string(),
            operational_status: "normal".to_string(),
            power_status: "powered_on".to_string(),
            configuration: "REMM R123".to_string(),
            private_ipv4_address: Some("10.0.0.1".to_string()),
            public_ipv4_address: Some("203.0.113.10".to_string()),
            scheduled_release: None,
            created: fixed_time(),
            updated: fixed_time(),
        }
    }

    pub fn ptr_record(id: &str, ip: &str, domain: &str) -> PtrRecord {
        PtrRecord {
            id: id.to_string(),
            ip: ip.to_string(),
            domain: domain.to_string(),
            priority: 0,
            ttl: 3600,
        }
    }

    // =========================================================================
    // Network Fixtures
    // =========================================================================

    pub fn network_pool(id: &str, cidr: &str, pool_type: &str) -> NetworkPool {
        NetworkPool {
            id: id.to_string(),
            title: None,
            cidr: cidr.to_string(),
            pool_type: pool_type.to_string(),
            location_ids: vec![1],
            labels: BTreeMap::new(),
            created: fixed_time(),
            updated: fixed_time(),
        }
    }

    pub fn subnetwork(id: &str, pool_id: &str, cidr: &str) -> Subnetwork {
        Subnetwork {
            id: id.to_string(),
            network_pool_id: pool_id.to_string(),
            title: None,
            cidr: cidr.to_string(),
            attached: false,
            interface_type: "public".to_string(),
            created: fixed_time(),
            updated: fixed_time(),
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create the default test scenario.
    ///
    /// Five SSH keys, three locations, three hosts (two in AMS1), three PTR
    /// records on the first host, two network pools and four subnetworks in
    /// the first pool.
    pub fn default_scenario() -> DefaultScenario {
        let ssh_keys = vec![
            Self::labeled_ssh_key("deploy", "aa:01", "env", "prod"),
            Self::ssh_key("ci", "aa:02"),
            Self::labeled_ssh_key("backup", "aa:03", "env", "prod"),
            Self::ssh_key("alice", "aa:04"),
            Self::ssh_key("bob", "aa:05"),
        ];

        let locations = vec![
            Self::location(1, "AMS1", "Amsterdam"),
            Self::location(2, "WDC1", "Washington DC"),
            Self::location(3, "SIN1", "Singapore"),
        ];

        let hosts = vec![
            Self::dedicated_server("xkazYeJ0", "web-01", 1, "AMS1"),
            Self::dedicated_server("b0Ze3nDo", "web-02", 2, "WDC1"),
            Self::dedicated_server("qmdzL2dw", "db-01", 1, "AMS1"),
        ];

        let ptr_records = vec![(
            "xkazYeJ0".to_string(),
            vec![
                Self::ptr_record("p1", "203.0.113.10", "web-01.example.com"),
                Self::ptr_record("p2", "203.0.113.11", "www.example.com"),
                Self::ptr_record("p3", "203.0.113.12", "api.example.com"),
            ],
        )];

        let mut public_pool = Self::network_pool("pool1", "203.0.113.0/24", "public");
        public_pool.title = Some("Public AMS1".to_string());
        let network_pools = vec![
            public_pool,
            Self::network_pool("pool2", "10.0.0.0/16", "private"),
        ];

        let subnetworks = vec![(
            "pool1".to_string(),
            vec![
                Self::subnetwork("s1", "pool1", "203.0.113.0/29"),
                Self::subnetwork("s2", "pool1", "203.0.113.8/29"),
                Self::subnetwork("s3", "pool1", "203.0.113.16/29"),
                Self::subnetwork("s4", "pool1", "203.0.113.24/29"),
            ],
        )];

        DefaultScenario {
            ssh_keys,
            locations,
            hosts,
            ptr_records,
            network_pools,
            subnetworks,
        }
    }
}

/// Default test scenario with pre-configured data.
pub struct DefaultScenario {
    pub ssh_keys: Vec<SshKey>,
    pub locations: Vec<Location>,
    pub hosts: Vec<Host>,
    pub ptr_records: Vec<(String, Vec<PtrRecord>)>,
    pub network_pools: Vec<NetworkPool>,
    pub subnetworks: Vec<(String, Vec<Subnetwork>)>,
}
