// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Nodeset catalog CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // RUST_LOG can still raise this
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    match cli.command {
        Commands::Version => {
            println!(
                "{} {}",
                "Nodeset Catalog".bold().green(),
                nodeset_catalog::VERSION
            );
            println!("OPC UA nodeset metadata catalog");
            Ok(())
        }

        Commands::Ingest {
            id,
            file,
            attributes,
            types,
        } => cli::handle_ingest(&cli.store, id, file, attributes, types),

        Commands::List { query, format } => cli::handle_list(&cli.store, query, format),

        Commands::Nodesets { query, format } => cli::handle_nodesets(&cli.store, query, format),

        Commands::Categories { query, format } => {
            cli::handle_categories(&cli.store, query, format)
        }

        Commands::Organisations { query, format } => {
            cli::handle_organisations(&cli.store, query, format)
        }

        Commands::Search { keywords, format } => cli::handle_search(&cli.store, keywords, format),

        Commands::Show { id, format } => cli::handle_show(&cli.store, id, format),

        Commands::Download { id, output } => cli::handle_download(&cli.store, id, output),

        Commands::Delete { id, yes } => cli::handle_delete(&cli.store, id, yes),
    }
}
