// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Candidate selection, paging, ordering and keyword search

pub mod filter;
pub mod ordering;
pub mod paging;
pub mod params;
pub mod pattern;
pub mod search;

pub use filter::{Clause, Comparator, FilterEvaluator, FilterExpression};
pub use ordering::{canonical_key, sort_page, Orderable, SortValue};
pub use paging::Page;
pub use params::QueryParams;
pub use pattern::LikePattern;
pub use search::{KeywordSearch, WILDCARD};
