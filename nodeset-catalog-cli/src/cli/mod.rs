// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for the nodeset catalog
//!
//! Argument definitions, command handlers and result formatting.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_categories, handle_delete, handle_download, handle_ingest, handle_list,
    handle_nodesets, handle_organisations, handle_search, handle_show,
};
