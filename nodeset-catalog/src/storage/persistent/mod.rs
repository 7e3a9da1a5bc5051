// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Persistent storage backends
//!
//! Trait-based key/value drivers behind the attribute store.
//!
//! ```text
//! AttributeStore (rows, tables, connection lifecycle)
//!     ↓
//! StorageDriver (named trees of ordered byte keys)
//!     ↓
//! Sled | Memory
//! ```

pub mod factory;
pub mod traits;
pub mod types;

pub mod memory;
#[cfg(feature = "sled-backend")]
pub mod sled;

pub use factory::create_storage_driver;
pub use traits::{DynStorageDriver, StorageTree};
pub use types::{StorageDriverError, StorageResult, StorageType};
