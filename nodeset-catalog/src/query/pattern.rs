// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQL LIKE style patterns
//!
//! `%` matches any run of characters, `_` exactly one, `\` escapes either.
//! Patterns are unanchored (implicitly `%pattern%`) and case-insensitive,
//! and both wildcards match line breaks.

use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct LikePattern {
    regex: Regex,
}

impl LikePattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(&Self::to_regex(pattern))
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()?;
        Ok(Self { regex })
    }

    fn to_regex(pattern: &str) -> String {
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut chars = pattern.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '%' => out.push_str(".*"),
                '_' => out.push('.'),
                '\\' => match chars.next() {
                    Some(next) => out.push_str(&regex::escape(&next.to_string())),
                    None => out.push_str(r"\\"),
                },
                other => out.push_str(&regex::escape(&other.to_string())),
            }
        }
        out
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}
