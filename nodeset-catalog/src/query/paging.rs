// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Offset/limit windows over candidate lists

use std::ops::Range;

/// A resolved page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: usize,
    pub end: usize,
}

impl Page {
    pub const EMPTY: Page = Page { start: 0, end: 0 };

    /// Resolve caller-supplied bounds against `count` candidates
    ///
    /// Negative bounds and an offset past the end give an empty page; a
    /// window running past the end is clamped.
    pub fn resolve(offset: i64, limit: i64, count: usize) -> Page {
        if offset < 0 || limit < 0 {
            return Page::EMPTY;
        }
        let start = match usize::try_from(offset) {
            Ok(start) if start <= count => start,
            _ => return Page::EMPTY,
        };
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Page {
            start,
            end: start.saturating_add(limit).min(count),
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        &items[self.range()]
    }
}
