//! List trait for binding entity types to their collections.

use serde::de::DeserializeOwned;

use crate::client::ServersComClient;
use crate::collection::Collection;

/// Entities served by a top-level paginated list endpoint.
///
/// Nested lists (PTR records of one host, subnetworks of one pool) are
/// constructors on the parent type instead, since they need its identifier.
///
/// # Example
///
/// ```ignore
/// use serverscom::{List, Location, ServersComClient};
///
/// let client = ServersComClient::from_env()?;
///
/// // One page at a time
/// let mut locations = Location::collection(&client);
/// let page = locations.set_per_page(10).list().await?;
///
/// // Every page
/// let all = serverscom::list_all::<Location>(&client).await?;
/// ```
pub trait List: DeserializeOwned + Clone + Send {
    /// Path of the list endpoint, e.g. `/ssh_keys`.
    const PATH: &'static str;

    /// A clean collection over [`Self::PATH`].
    fn collection(client: &ServersComClient) -> Collection<Self> {
        client.collection(Self::PATH)
    }
}

/// Fetch every page of a [`List`] entity.
///
/// # Errors
///
/// Returns an error if any page request fails.
pub async fn list_all<T: List>(client: &ServersComClient) -> crate::Result<Vec<T>> {
    T::collection(client).collect().await
}
