// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for the nodeset catalog

use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;

use super::commands::{OutputFormat, QueryArgs, StoreArgs};
use super::output::ResultFormatter;
use nodeset_catalog::{CatalogConfig, NodesetCatalog, TypeKind, TypeRow};

type HandlerResult = Result<(), Box<dyn std::error::Error>>;

/// Resolve configuration (file, environment, flags) and open the catalog
fn open_catalog(args: &StoreArgs) -> Result<NodesetCatalog, Box<dyn std::error::Error>> {
    let mut config = CatalogConfig::load(args.config.as_deref())?;

    if let Some(storage) = args.storage {
        config.storage_type = storage;
    }
    if let Some(path) = &args.db_path {
        config.db_path = path.clone();
    }
    if let Some(files) = args.files {
        config.file_storage = files;
    }
    if let Some(root) = &args.files_root {
        config.files_root = root.clone();
    }

    NodesetCatalog::open(config).map_err(|e| format!("Failed to open catalog: {}", e).into())
}

/// Handle the ingest command
pub fn handle_ingest(
    store: &StoreArgs,
    id: u32,
    file: PathBuf,
    attributes: Vec<(String, String)>,
    types: Vec<(TypeKind, TypeRow)>,
) -> HandlerResult {
    let blob = std::fs::read(&file)
        .map_err(|e| format!("Cannot read nodeset file {:?}: {}", file, e))?;

    let catalog = open_catalog(store)?;
    let attribute_count = attributes.len();
    let stored = catalog
        .ingest(id, &blob, attributes, &types)
        .ok_or_else(|| format!("Failed to store nodeset {}", id))?;
    catalog.flush();

    println!(
        "{}",
        format!("Ingested nodeset {} as {}", id, stored).green()
    );
    println!(
        "  {} attribute(s), {} declared type(s)",
        attribute_count,
        types.len()
    );
    Ok(())
}

/// Handle the list command (namespace descriptors)
pub fn handle_list(store: &StoreArgs, query: QueryArgs, format: OutputFormat) -> HandlerResult {
    let catalog = open_catalog(store)?;
    let params = query.into_params(catalog.config().default_limit);
    let namespaces = catalog.namespaces(&params);
    print!("{}", ResultFormatter::format("Namespaces", &namespaces, format));
    Ok(())
}

pub fn handle_nodesets(store: &StoreArgs, query: QueryArgs, format: OutputFormat) -> HandlerResult {
    let catalog = open_catalog(store)?;
    let params = query.into_params(catalog.config().default_limit);
    let nodesets = catalog.nodesets(&params);
    print!("{}", ResultFormatter::format("Nodesets", &nodesets, format));
    Ok(())
}

pub fn handle_categories(
    store: &StoreArgs,
    query: QueryArgs,
    format: OutputFormat,
) -> HandlerResult {
    let catalog = open_catalog(store)?;
    let params = query.into_params(catalog.config().default_limit);
    let categories = catalog.categories(&params);
    print!("{}", ResultFormatter::format("Categories", &categories, format));
    Ok(())
}

pub fn handle_organisations(
    store: &StoreArgs,
    query: QueryArgs,
    format: OutputFormat,
) -> HandlerResult {
    let catalog = open_catalog(store)?;
    let params = query.into_params(catalog.config().default_limit);
    let organisations = catalog.organisations(&params);
    print!(
        "{}",
        ResultFormatter::format("Organisations", &organisations, format)
    );
    Ok(())
}

pub fn handle_search(store: &StoreArgs, keywords: Vec<String>, format: OutputFormat) -> HandlerResult {
    let catalog = open_catalog(store)?;
    let results = catalog.search(keywords.as_slice());
    print!("{}", ResultFormatter::format("Search Results", &results, format));
    Ok(())
}

pub fn handle_show(store: &StoreArgs, id: u32, format: OutputFormat) -> HandlerResult {
    let catalog = open_catalog(store)?;
    match catalog.namespace(id) {
        Some(descriptor) => {
            print!("{}", ResultFormatter::format_descriptor(&descriptor, format));
            Ok(())
        }
        None => Err(format!("Nodeset {} not found", id).into()),
    }
}

/// Handle the download command
pub fn handle_download(store: &StoreArgs, id: u32, output: Option<PathBuf>) -> HandlerResult {
    let catalog = open_catalog(store)?;
    let content = catalog
        .download(id)
        .ok_or_else(|| format!("Nodeset file for {} not found", id))?;
    catalog.flush();

    match output {
        Some(path) => {
            std::fs::write(&path, &content)?;
            eprintln!(
                "{}",
                format!("Wrote {} bytes to {:?}", content.len(), path).green()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&content)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Handle the delete command
pub fn handle_delete(store: &StoreArgs, id: u32, yes: bool) -> HandlerResult {
    if !yes {
        print!("Delete all metadata of nodeset {}? [y/N] ", id);
        std::io::stdout().flush()?;
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim(), "y" | "Y" | "yes") {
            println!("{}", "Aborted".yellow());
            return Ok(());
        }
    }

    let catalog = open_catalog(store)?;
    if catalog.delete(id) {
        catalog.flush();
        println!("{}", format!("Deleted nodeset {}", id).green());
        Ok(())
    } else {
        Err(format!("Nodeset {} was only partially deleted", id).into())
    }
}
