//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{Host, Location, NetworkPool, SshKey};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

fn labels(labels: &BTreeMap<String, String>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl PrettyPrint for SshKey {
    fn pretty_print(&self) -> String {
        let header = format!("SSH Key: {}", self.name);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Fingerprint:    {}", self.fingerprint),
        ];

        if !self.labels.is_empty() {
            lines.push(format!("Labels:         {}", labels(&self.labels)));
        }

        if let Some(ref created) = self.created {
            lines.push(format!("Created:        {}", timestamp(created)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Location {
    fn pretty_print(&self) -> String {
        let header = format!("Location: {}", self.code);
        let divider = "─".repeat(header.len().max(30));

        [
            header,
            divider,
            format!("ID:             {}", self.id),
            format!("Name:           {}", self.name),
        ]
        .join("\n")
    }
}

impl PrettyPrint for Host {
    fn pretty_print(&self) -> String {
        let header = format!("Host: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Title:          {}", self.title),
            format!("Type:           {}", self.host_type),
            format!("Location:       {}", self.location_code),
            format!(
                "Status:         {} ({}, {})",
                self.status, self.operational_status, self.power_status
            ),
        ];

        if let Some(ref ip) = self.public_ipv4_address {
            lines.push(format!("Public IPv4:    {}", ip));
        }

        if let Some(ref ip) = self.private_ipv4_address {
            lines.push(format!("Private IPv4:   {}", ip));
        }

        if let Some(ref release) = self.scheduled_release {
            lines.push(format!("Release at:     {}", timestamp(release)));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for NetworkPool {
    fn pretty_print(&self) -> String {
        let header = format!("Network Pool: {}", self.id);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![header, divider];

        if let Some(ref title) = self.title {
            lines.push(format!("Title:          {}", title));
        }

        lines.push(format!("CIDR:           {}", self.cidr));
        lines.push(format!("Type:           {}", self.pool_type));

        if !self.location_ids.is_empty() {
            let ids: Vec<String> = self.location_ids.iter().map(i64::to_string).collect();
            lines.push(format!("Locations:      {}", ids.join(", ")));
        }

        if !self.labels.is_empty() {
            lines.push(format!("Labels:         {}", labels(&self.labels)));
        }

        lines.join("\n")
    }
}
