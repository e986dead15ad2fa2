//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! `serverscom` binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Servers.com API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "serverscom", about = "Servers.com API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log HTTP requests to stderr.
    #[arg(long, short, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The ID (fingerprint for SSH keys).
        id: String,
    },

    /// List entities, one page or all of them.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<i64>,

        /// Number of items per page.
        #[arg(long)]
        per_page: Option<i64>,

        /// Fetch every page instead of one.
        #[arg(long, default_value = "false")]
        all: bool,

        /// Host ID (required for PTR records).
        #[arg(long)]
        host: Option<String>,

        /// Host kind path segment used with --host.
        #[arg(long, default_value = "dedicated_servers")]
        host_kind: String,

        /// Network pool ID (required for subnetworks).
        #[arg(long)]
        pool: Option<String>,

        /// Search pattern filter, where the endpoint supports one.
        #[arg(long)]
        search: Option<String>,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// An SSH public key.
    #[value(name = "ssh-keys", alias = "ssh-key")]
    SshKeys,
    /// A data center location.
    #[value(alias = "location")]
    Locations,
    /// A host (dedicated server and friends).
    #[value(alias = "host")]
    Hosts,
    /// A host's PTR records.
    #[value(name = "ptr-records", alias = "ptr-record")]
    PtrRecords,
    /// A network pool.
    #[value(name = "network-pools", alias = "network-pool")]
    NetworkPools,
    /// A network pool's subnetworks.
    #[value(alias = "subnetwork")]
    Subnetworks,
}
