// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use nodeset_catalog::{FileStorageKind, QueryParams, StorageType, TypeKind, TypeRow};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nodeset-catalog")]
#[command(about = "Catalog and search OPC UA nodeset packages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub store: StoreArgs,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<log::Level>,
}

/// Where the catalog lives; each flag overrides config file and environment
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database directory
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Attribute store backend (sled, memory)
    #[arg(long, global = true, value_name = "TYPE")]
    pub storage: Option<StorageType>,

    /// Nodeset file backend (local, memory)
    #[arg(long, global = true, value_name = "KIND")]
    pub files: Option<FileStorageKind>,

    /// Directory for the local file backend
    #[arg(long, global = true, value_name = "DIR")]
    pub files_root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show version information
    Version,

    /// Store a nodeset file together with its metadata
    Ingest {
        /// Nodeset identifier
        id: u32,

        /// Nodeset XML file
        file: PathBuf,

        /// Metadata attribute, repeatable (e.g. --attr title=Robotics)
        #[arg(long = "attr", value_name = "NAME=VALUE", value_parser = parse_attribute)]
        attributes: Vec<(String, String)>,

        /// Declared type, repeatable (e.g. --type object:RobotType:http://opcfoundation.org/UA/Robotics/)
        #[arg(long = "type", value_name = "KIND:BROWSE_NAME:NAMESPACE_URI", value_parser = parse_type_row)]
        types: Vec<(TypeKind, TypeRow)>,
    },

    /// List namespace descriptors
    List {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List nodeset summaries
    Nodesets {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List distinct categories
    Categories {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List distinct contributing organisations
    Organisations {
        #[command(flatten)]
        query: QueryArgs,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Keyword search across metadata and declared types ("*" matches all)
    Search {
        #[arg(required = true)]
        keywords: Vec<String>,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show everything known about one nodeset
    Show {
        id: u32,

        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Fetch a nodeset file (counts as a download)
    Download {
        id: u32,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove all metadata of a nodeset
    Delete {
        id: u32,

        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Paging, filtering and ordering flags shared by the listing commands
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Maximum number of records (defaults to the configured page size)
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Records to skip
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Filter expression, e.g. 'license equals MIT or title like robot'
    #[arg(short = 'w', long = "where", value_name = "EXPR")]
    pub where_clause: Option<String>,

    /// Sort the page by this key (descending)
    #[arg(long, value_name = "KEY")]
    pub order_by: Option<String>,
}

impl QueryArgs {
    pub fn into_params(self, default_limit: i64) -> QueryParams {
        let mut params = QueryParams::new()
            .with_limit(self.limit.unwrap_or(default_limit))
            .with_offset(self.offset);
        params.where_clause = self.where_clause;
        params.order_by = self.order_by;
        params
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

fn parse_attribute(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", raw)),
    }
}

/// `kind:browseName:namespaceUri`; the URI may itself contain colons
fn parse_type_row(raw: &str) -> Result<(TypeKind, TypeRow), String> {
    let mut parts = raw.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(kind), Some(browse_name), Some(uri)) if !browse_name.is_empty() => {
            let kind: TypeKind = kind.parse().map_err(|e| format!("{}", e))?;
            Ok((kind, TypeRow::new(browse_name, browse_name, uri)))
        }
        _ => Err(format!(
            "expected KIND:BROWSE_NAME:NAMESPACE_URI, got '{}'",
            raw
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute() {
        assert_eq!(
            parse_attribute("title=Robotics = Arms").unwrap(),
            ("title".to_string(), "Robotics = Arms".to_string())
        );
        assert!(parse_attribute("=x").is_err());
        assert!(parse_attribute("title").is_err());
    }

    #[test]
    fn test_parse_type_row_keeps_uri_colons() {
        let (kind, row) = parse_type_row("object:RobotType:http://opcfoundation.org/UA/Robotics/")
            .unwrap();
        assert_eq!(kind, TypeKind::ObjectType);
        assert_eq!(row.browse_name, "RobotType");
        assert_eq!(row.namespace_uri, "http://opcfoundation.org/UA/Robotics/");
        assert!(parse_type_row("object:RobotType").is_err());
    }

    #[test]
    fn test_cli_parses_listing_flags() {
        let cli = Cli::parse_from([
            "nodeset-catalog",
            "--storage",
            "memory",
            "nodesets",
            "--limit",
            "-1",
            "--where",
            "license equals MIT",
            "--order-by",
            "version",
        ]);
        assert_eq!(cli.store.storage, Some(StorageType::Memory));
        match cli.command {
            Commands::Nodesets { query, .. } => {
                let params = query.into_params(10);
                assert_eq!(params.limit, -1);
                assert_eq!(params.where_clause.as_deref(), Some("license equals MIT"));
            }
            _ => panic!("expected nodesets command"),
        }
    }
}
