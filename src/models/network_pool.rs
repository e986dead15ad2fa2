//! Network pool and subnetwork models.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ServersComClient;
use crate::collection::Collection;
use crate::error::Result;
use crate::resources::resource_path;
use crate::traits::{Get, List};

/// A pool of addresses subnetworks are carved from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkPool {
    pub id: String,

    #[serde(default)]
    pub title: Option<String>,

    pub cidr: String,

    /// `public` or `private`.
    #[serde(rename = "type")]
    pub pool_type: String,

    #[serde(default)]
    pub location_ids: Vec<i64>,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(rename = "created_at", default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(rename = "updated_at", default)]
    pub updated: Option<DateTime<Utc>>,
}

impl List for NetworkPool {
    const PATH: &'static str = "/network_pools";
}

#[async_trait]
impl Get for NetworkPool {
    type Id = String;

    async fn get(client: &ServersComClient, id: String) -> Result<Self> {
        client
            .get_json(&resource_path("/network_pools/{}", &[id.as_str()]))
            .await
    }
}

impl NetworkPool {
    /// Subnetworks of the pool `pool_id`.
    pub fn subnetworks(client: &ServersComClient, pool_id: &str) -> Collection<Subnetwork> {
        client.collection(resource_path("/network_pools/{}/subnetworks", &[pool_id]))
    }
}

impl Collection<NetworkPool> {
    /// Filter by title or CIDR.
    pub fn search_pattern(&mut self, pattern: &str) -> &mut Self {
        self.set_param("search_pattern", pattern)
    }

    /// Only pools available in the given location.
    pub fn location_id(&mut self, location_id: i64) -> &mut Self {
        self.set_param("location_id", location_id.to_string())
    }

    /// Only `public` or `private` pools.
    pub fn pool_type(&mut self, pool_type: &str) -> &mut Self {
        self.set_param("type", pool_type)
    }
}

/// A subnetwork allocated from a [`NetworkPool`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subnetwork {
    pub id: String,

    #[serde(default)]
    pub network_pool_id: String,

    #[serde(default)]
    pub title: Option<String>,

    pub cidr: String,

    #[serde(default)]
    pub attached: bool,

    #[serde(default)]
    pub interface_type: String,

    #[serde(rename = "created_at", default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(rename = "updated_at", default)]
    pub updated: Option<DateTime<Utc>>,
}

impl Collection<Subnetwork> {
    /// Only attached (or only detached) subnetworks.
    pub fn attached(&mut self, attached: bool) -> &mut Self {
        self.set_param("attached", attached.to_string())
    }
}
