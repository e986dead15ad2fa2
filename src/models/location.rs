//! Location model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::ServersComClient;
use crate::collection::Collection;
use crate::error::Result;
use crate::traits::{Get, List};

/// A data center location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    /// Short code such as `AMS1`.
    pub code: String,
}

impl List for Location {
    const PATH: &'static str = "/locations";
}

#[async_trait]
impl Get for Location {
    type Id = i64;

    async fn get(client: &ServersComClient, id: i64) -> Result<Self> {
        client.get_json(&format!("/locations/{id}")).await
    }
}

impl Collection<Location> {
    /// Filter by name or code.
    pub fn search_pattern(&mut self, pattern: &str) -> &mut Self {
        self.set_param("search_pattern", pattern)
    }
}
