//! Servers.com API CLI binary.
//!
//! A command-line interface for browsing Servers.com resources.

use clap::Parser;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serverscom::cli::{Cli, Command, Entity};
use serverscom::{
    Collection, Get, Host, List, Location, NetworkPool, PrettyPrint, PtrRecord, ServersComClient,
    ServersComError, SshKey, Subnetwork,
};
use std::process::ExitCode;
use tabled::{Table, Tabled};

/// Paging options shared by every list command.
struct ListOptions {
    page: Option<i64>,
    per_page: Option<i64>,
    all: bool,
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(std::io::stderr)
            .init();
    }

    let client = match ServersComClient::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Set SERVERSCOM_TOKEN environment variable");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(client: &ServersComClient, cli: Cli) -> serverscom::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(client, entity, id, cli.json).await,
        Command::List {
            entity,
            page,
            per_page,
            all,
            host,
            host_kind,
            pool,
            search,
        } => {
            let options = ListOptions {
                page,
                per_page,
                all,
                json: cli.json,
            };
            match entity {
                Entity::SshKeys => {
                    let collection = SshKey::collection(client);
                    output_collection(collection, &options, |x| SshKeyRow::from(x)).await
                }
                Entity::Locations => {
                    let mut collection = Location::collection(client);
                    if let Some(ref s) = search {
                        collection.search_pattern(s);
                    }
                    output_collection(collection, &options, |x| LocationRow::from(x)).await
                }
                Entity::Hosts => {
                    let mut collection = Host::collection(client);
                    if let Some(ref s) = search {
                        collection.search_pattern(s);
                    }
                    output_collection(collection, &options, |x| HostRow::from(x)).await
                }
                Entity::PtrRecords => {
                    let host = host.ok_or_else(|| {
                        ServersComError::ConfigMissing(
                            "--host required for listing PTR records".to_string(),
                        )
                    })?;
                    let collection = Host::ptr_records(client, &host_kind, &host);
                    output_collection(collection, &options, |x| PtrRecordRow::from(x)).await
                }
                Entity::NetworkPools => {
                    let mut collection = NetworkPool::collection(client);
                    if let Some(ref s) = search {
                        collection.search_pattern(s);
                    }
                    output_collection(collection, &options, |x| NetworkPoolRow::from(x)).await
                }
                Entity::Subnetworks => {
                    let pool = pool.ok_or_else(|| {
                        ServersComError::ConfigMissing(
                            "--pool required for listing subnetworks".to_string(),
                        )
                    })?;
                    let collection = NetworkPool::subnetworks(client, &pool);
                    output_collection(collection, &options, |x| SubnetworkRow::from(x)).await
                }
            }
        }
    }
}

async fn handle_get(
    client: &ServersComClient,
    entity: Entity,
    id: String,
    json: bool,
) -> serverscom::Result<()> {
    match entity {
        Entity::SshKeys => {
            let key = SshKey::get(client, id).await?;
            output_single(&key, json)?;
        }
        Entity::Locations => {
            let id: i64 = id.parse().map_err(|_| {
                ServersComError::ConfigMissing(format!("location ID must be numeric: {id}"))
            })?;
            let location = Location::get(client, id).await?;
            output_single(&location, json)?;
        }
        Entity::NetworkPools => {
            let pool = NetworkPool::get(client, id).await?;
            output_single(&pool, json)?;
        }
        _ => {
            eprintln!("Error: Only ssh-keys, locations and network-pools can be retrieved individually");
            eprintln!("Hint: Use 'serverscom list <entity>'");
            return Err(ServersComError::ConfigMissing(
                "get not supported for this entity".to_string(),
            ));
        }
    }
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> serverscom::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

async fn output_collection<T, R, F>(
    mut collection: Collection<T>,
    options: &ListOptions,
    to_row: F,
) -> serverscom::Result<()>
where
    T: DeserializeOwned + Clone + Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if let Some(page) = options.page {
        collection.set_page(page);
    }
    if let Some(per_page) = options.per_page {
        collection.set_per_page(per_page);
    }

    let items = if options.all {
        collection.collect().await?
    } else {
        collection.list().await?.to_vec()
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    let rows: Vec<R> = items.iter().map(to_row).collect();
    println!("{}", Table::new(rows));

    if options.all {
        println!("\n{} items", items.len());
    } else {
        let page = options.page.unwrap_or(1).max(1);
        let mut links = Vec::new();
        if collection.has_previous() {
            links.push("previous");
        }
        if collection.has_next() {
            links.push("next");
        }
        if links.is_empty() {
            println!("\nPage {page} (only page)");
        } else {
            println!("\nPage {page} ({} available)", links.join(", "));
        }
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct SshKeyRow {
    fingerprint: String,
    name: String,
}

impl From<&SshKey> for SshKeyRow {
    fn from(k: &SshKey) -> Self {
        Self {
            fingerprint: k.fingerprint.clone(),
            name: k.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct LocationRow {
    id: i64,
    code: String,
    name: String,
}

impl From<&Location> for LocationRow {
    fn from(l: &Location) -> Self {
        Self {
            id: l.id,
            code: l.code.clone(),
            name: l.name.clone(),
        }
    }
}

#[derive(Tabled)]
struct HostRow {
    id: String,
    #[tabled(rename = "type")]
    host_type: String,
    title: String,
    location: String,
    status: String,
}

impl From<&Host> for HostRow {
    fn from(h: &Host) -> Self {
        Self {
            id: h.id.clone(),
            host_type: h.host_type.clone(),
            title: h.title.clone(),
            location: h.location_code.clone(),
            status: h.status.clone(),
        }
    }
}

#[derive(Tabled)]
struct PtrRecordRow {
    id: String,
    ip: String,
    domain: String,
    ttl: i32,
}

impl From<&PtrRecord> for PtrRecordRow {
    fn from(r: &PtrRecord) -> Self {
        Self {
            id: r.id.clone(),
            ip: r.ip.clone(),
            domain: r.domain.clone(),
            ttl: r.ttl,
        }
    }
}

#[derive(Tabled)]
struct NetworkPoolRow {
    id: String,
    cidr: String,
    #[tabled(rename = "type")]
    pool_type: String,
    title: String,
}

impl From<&NetworkPool> for NetworkPoolRow {
    fn from(p: &NetworkPool) -> Self {
        Self {
            id: p.id.clone(),
            cidr: p.cidr.clone(),
            pool_type: p.pool_type.clone(),
            title: p.title.clone().unwrap_or_default(),
        }
    }
}

#[derive(Tabled)]
struct SubnetworkRow {
    id: String,
    cidr: String,
    attached: bool,
    interface: String,
}

impl From<&Subnetwork> for SubnetworkRow {
    fn from(s: &Subnetwork) -> Self {
        Self {
            id: s.id.clone(),
            cidr: s.cidr.clone(),
            attached: s.attached,
            interface: s.interface_type.clone(),
        }
    }
}
