//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::ServersComClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use serverscom::{Get, ServersComClient, SshKey};
///
/// let client = ServersComClient::from_env()?;
/// let key = SshKey::get(&client, "48:81:0c:43:99:12:71:5e:ba:fd:e7:2f:20:d7:95:e8".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity (fingerprint, numeric id, ...).
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found or the request fails.
    async fn get(client: &ServersComClient, id: Self::Id) -> Result<Self>;
}
