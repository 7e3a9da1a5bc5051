//! Test utilities for nodeset catalog integration tests
//!
//! `CatalogFixture` owns an isolated catalog (sled in a temp directory, or
//! fully in memory) and can seed it with a small sample of nodesets.

#![allow(dead_code)]

pub mod catalog_fixture;
