// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use super::commands::OutputFormat;
use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use nodeset_catalog::{
    Category, NamespaceDescriptor, NodesetSummary, Organisation, SearchResult,
};
use serde::Serialize;
use url::Url;

/// A record that can be shown as one table row
pub trait Tabular {
    fn headers() -> &'static [&'static str];
    fn cells(&self) -> Vec<String>;
}

fn date(value: &Option<DateTime<Utc>>) -> String {
    value
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn link(value: &Option<Url>) -> String {
    value.as_ref().map(Url::to_string).unwrap_or_default()
}

impl Tabular for NodesetSummary {
    fn headers() -> &'static [&'static str] {
        &["id", "namespace", "published", "modified", "version"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.identifier.to_string(),
            self.namespace_uri.clone().unwrap_or_default(),
            date(&self.publication_date),
            date(&self.last_modified),
            self.version.clone(),
        ]
    }
}

impl Tabular for NamespaceDescriptor {
    fn headers() -> &'static [&'static str] {
        &[
            "id",
            "title",
            "version",
            "license",
            "category",
            "contributor",
            "published",
            "downloads",
        ]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.identifier().to_string(),
            self.title.clone(),
            self.nodeset.version.clone(),
            self.license.to_string(),
            self.category.name.clone(),
            self.contributor.name.clone(),
            date(&self.nodeset.publication_date),
            self.number_of_downloads.to_string(),
        ]
    }
}

impl Tabular for Category {
    fn headers() -> &'static [&'static str] {
        &["name", "description", "icon"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.description.clone(),
            link(&self.icon_url),
        ]
    }
}

impl Tabular for Organisation {
    fn headers() -> &'static [&'static str] {
        &["name", "website", "contact"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            link(&self.website),
            self.contact_email.clone(),
        ]
    }
}

impl Tabular for SearchResult {
    fn headers() -> &'static [&'static str] {
        &["id", "title", "contributor", "license", "version", "published", "namespace"]
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.identifier.to_string(),
            self.title.clone(),
            self.contributor.clone(),
            self.license.clone(),
            self.version.clone(),
            date(&self.publication_date),
            self.namespace_uri.clone(),
        ]
    }
}

/// Result formatter for different output formats
pub struct ResultFormatter;

impl ResultFormatter {
    pub fn format<T: Tabular + Serialize>(title: &str, records: &[T], format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => Self::format_table(title, records),
            OutputFormat::Json => Self::format_json(records),
        }
    }

    fn format_table<T: Tabular>(title: &str, records: &[T]) -> String {
        if records.is_empty() {
            return format!("{}\n", "No results found".yellow());
        }

        let mut output = String::new();
        output.push_str(&format!("{}\n", title.bold().green()));
        output.push_str(&format!("Rows returned: {}\n\n", records.len()));

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            T::headers()
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green))
                .collect::<Vec<_>>(),
        );
        for record in records {
            table.add_row(record.cells());
        }

        output.push_str(&table.to_string());
        output.push('\n');
        output
    }

    fn format_json<T: Serialize>(records: &[T]) -> String {
        serde_json::to_string_pretty(records).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize results to JSON\"}".to_string()
        })
    }

    /// Key/value view of a single descriptor
    pub fn format_descriptor(descriptor: &NamespaceDescriptor, format: OutputFormat) -> String {
        if let OutputFormat::Json = format {
            return serde_json::to_string_pretty(descriptor).unwrap_or_else(|_| {
                "{\"status\": \"error\", \"error\": \"Could not serialize result to JSON\"}"
                    .to_string()
            });
        }

        let fields: Vec<(&str, String)> = vec![
            ("identifier", descriptor.identifier().to_string()),
            (
                "namespace",
                descriptor.nodeset.namespace_uri.clone().unwrap_or_default(),
            ),
            ("title", descriptor.title.clone()),
            ("version", descriptor.nodeset.version.clone()),
            ("published", date(&descriptor.nodeset.publication_date)),
            ("modified", date(&descriptor.nodeset.last_modified)),
            ("license", descriptor.license.to_string()),
            ("license url", link(&descriptor.license_url)),
            ("copyright", descriptor.copyright_text.clone()),
            ("description", descriptor.description.clone()),
            ("category", descriptor.category.name.clone()),
            ("contributor", descriptor.contributor.name.clone()),
            ("documentation", link(&descriptor.documentation_url)),
            ("release notes", link(&descriptor.release_notes_url)),
            ("keywords", descriptor.keywords.join(", ")),
            ("locales", descriptor.supported_locales.join(", ")),
            ("downloads", descriptor.number_of_downloads.to_string()),
        ];

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        for (name, value) in fields {
            table.add_row(vec![Cell::new(name).fg(Color::Green), Cell::new(value)]);
        }
        format!("{}\n", table)
    }
}
