//! Servers.com API model types.

mod host;
mod location;
mod network_pool;
mod ssh_key;

pub use host::*;
pub use location::*;
pub use network_pool::*;
pub use ssh_key::*;
