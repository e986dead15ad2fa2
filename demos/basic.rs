//! Basic example demonstrating the Servers.com API client.
//!
//! Run with:
//! ```
//! SERVERSCOM_TOKEN=your-token cargo run --example basic
//! ```

use serverscom::{Get, Host, List, Location, NetworkPool, ServersComClient, SshKey};

#[tokio::main]
async fn main() -> serverscom::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    // Create client from environment variables
    println!("Creating Servers.com client...");
    let client = ServersComClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    // Page through SSH keys by hand
    println!("\n--- SSH Keys (5 per page) ---");
    let mut keys = SshKey::collection(&client);
    keys.set_per_page(5);

    let mut page = 1;
    for key in keys.list().await? {
        println!("  [{page}] {} ({})", key.name, key.fingerprint);
    }
    while keys.has_next() {
        page += 1;
        for key in keys.next_page().await? {
            println!("  [{page}] {} ({})", key.name, key.fingerprint);
        }
    }

    // Every location, all pages at once
    println!("\n--- Locations ---");
    let locations = Location::collection(&client).collect().await?;
    for location in &locations {
        println!("  {} - {}", location.code, location.name);
    }

    // Hosts in the first location, with their PTR records
    if let Some(location) = locations.first() {
        println!("\n--- Hosts in {} ---", location.code);
        let mut hosts = Host::collection(&client);
        hosts.location_id(location.id);

        for host in hosts.collect().await? {
            println!("  {} {} [{}]", host.id, host.title, host.status);

            let records = host.ptr_record_collection(&client).collect().await?;
            for record in records.iter().take(3) {
                println!("      PTR {} -> {}", record.ip, record.domain);
            }
        }
    }

    // Network pools and the subnetworks of the first one
    println!("\n--- Network Pools ---");
    let mut pools = NetworkPool::collection(&client);
    let first_pool = pools.list().await?.first().cloned();
    if let Some(pool) = first_pool {
        let pool = NetworkPool::get(&client, pool.id).await?;
        println!("  {} {} ({})", pool.id, pool.cidr, pool.pool_type);

        let subnets = NetworkPool::subnetworks(&client, &pool.id).collect().await?;
        println!("  {} subnetworks", subnets.len());
        for subnet in subnets.iter().filter(|s| s.attached) {
            println!("    {} attached", subnet.cidr);
        }
    }

    println!("\nDone!");
    Ok(())
}
