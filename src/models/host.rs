//! Host and PTR record models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ServersComClient;
use crate::collection::Collection;
use crate::resources::resource_path;
use crate::traits::List;

/// A host: dedicated server, Kubernetes bare-metal node or scalable
/// bare-metal server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub id: String,

    /// Host type, e.g. `dedicated_server`.
    #[serde(rename = "type")]
    pub host_type: String,

    pub title: String,

    #[serde(default)]
    pub location_id: i64,

    #[serde(default)]
    pub location_code: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub operational_status: String,

    #[serde(default)]
    pub power_status: String,

    #[serde(default)]
    pub configuration: String,

    #[serde(default)]
    pub private_ipv4_address: Option<String>,

    #[serde(default)]
    pub public_ipv4_address: Option<String>,

    #[serde(rename = "scheduled_release_at", default)]
    pub scheduled_release: Option<DateTime<Utc>>,

    #[serde(rename = "created_at", default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(rename = "updated_at", default)]
    pub updated: Option<DateTime<Utc>>,
}

impl List for Host {
    const PATH: &'static str = "/hosts";
}

impl Host {
    /// PTR records of the host `host_id` of kind `kind` (the plural path
    /// segment, e.g. `dedicated_servers`).
    pub fn ptr_records(
        client: &ServersComClient,
        kind: &str,
        host_id: &str,
    ) -> Collection<PtrRecord> {
        client.collection(resource_path("/hosts/{}/{}/ptr_records", &[kind, host_id]))
    }

    /// Path segment for this host's kind (`dedicated_server` → `dedicated_servers`).
    pub fn kind_segment(&self) -> String {
        format!("{}s", self.host_type)
    }

    /// PTR records of this host.
    pub fn ptr_record_collection(&self, client: &ServersComClient) -> Collection<PtrRecord> {
        Self::ptr_records(client, &self.kind_segment(), &self.id)
    }
}

impl Collection<Host> {
    /// Only hosts in the given location.
    pub fn location_id(&mut self, location_id: i64) -> &mut Self {
        self.set_param("location_id", location_id.to_string())
    }

    /// Only hosts of the given type, e.g. `dedicated_server`.
    pub fn host_type(&mut self, host_type: &str) -> &mut Self {
        self.set_param("type", host_type)
    }

    /// Filter by title.
    pub fn search_pattern(&mut self, pattern: &str) -> &mut Self {
        self.set_param("search_pattern", pattern)
    }

    /// Filter by label selector, e.g. `env=prod`.
    pub fn label_selector(&mut self, selector: &str) -> &mut Self {
        self.set_param("label_selector", selector)
    }
}

/// A reverse DNS record attached to one of a host's addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PtrRecord {
    pub id: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub ttl: i32,
}
