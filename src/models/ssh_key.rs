//! SSH key model and trait implementations.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::ServersComClient;
use crate::collection::Collection;
use crate::error::Result;
use crate::resources::resource_path;
use crate::traits::{Get, List};

/// An SSH public key registered with the account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshKey {
    /// Key name.
    pub name: String,

    /// MD5 fingerprint, also the key's identifier.
    pub fingerprint: String,

    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    #[serde(rename = "created_at", default)]
    pub created: Option<DateTime<Utc>>,

    #[serde(rename = "updated_at", default)]
    pub updated: Option<DateTime<Utc>>,
}

impl List for SshKey {
    const PATH: &'static str = "/ssh_keys";
}

#[async_trait]
impl Get for SshKey {
    type Id = String;

    async fn get(client: &ServersComClient, fingerprint: String) -> Result<Self> {
        client
            .get_json(&resource_path("/ssh_keys/{}", &[fingerprint.as_str()]))
            .await
    }
}

impl Collection<SshKey> {
    /// Filter by label selector, e.g. `env=prod`.
    pub fn label_selector(&mut self, selector: &str) -> &mut Self {
        self.set_param("label_selector", selector)
    }
}
