// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog tables and their key layout
//!
//! Every table is one storage tree. Keys are the nodeset identifier as four
//! big-endian bytes followed by the row name (attribute name or browse
//! name), so all rows of one nodeset form a contiguous, prefix-scannable
//! range and a name can only appear once per nodeset.

use serde::{Deserialize, Serialize};

/// Globally unique, immutable nodeset identifier
pub type NodesetId = u32;

const ID_LEN: usize = std::mem::size_of::<NodesetId>();

/// The four type-kind tables, in namespace lookup priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    ObjectType,
    VariableType,
    DataType,
    ReferenceType,
}

impl TypeKind {
    /// Priority order used when resolving a nodeset's namespace URI
    pub const PRIORITY: [TypeKind; 4] = [
        TypeKind::ObjectType,
        TypeKind::VariableType,
        TypeKind::DataType,
        TypeKind::ReferenceType,
    ];

    pub fn table(self) -> CatalogTable {
        match self {
            TypeKind::ObjectType => CatalogTable::ObjectTypes,
            TypeKind::VariableType => CatalogTable::VariableTypes,
            TypeKind::DataType => CatalogTable::DataTypes,
            TypeKind::ReferenceType => CatalogTable::ReferenceTypes,
        }
    }
}

impl std::str::FromStr for TypeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "object" | "objecttype" => Ok(TypeKind::ObjectType),
            "variable" | "variabletype" => Ok(TypeKind::VariableType),
            "data" | "datatype" => Ok(TypeKind::DataType),
            "reference" | "referencetype" => Ok(TypeKind::ReferenceType),
            _ => Err(format!(
                "Unknown type kind: {}. Valid options: object, variable, data, reference",
                s
            )),
        }
    }
}

/// Every table the catalog owns, in keyword-search scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogTable {
    Attributes,
    ObjectTypes,
    VariableTypes,
    DataTypes,
    ReferenceTypes,
}

impl CatalogTable {
    pub const ALL: [CatalogTable; 5] = [
        CatalogTable::Attributes,
        CatalogTable::ObjectTypes,
        CatalogTable::VariableTypes,
        CatalogTable::DataTypes,
        CatalogTable::ReferenceTypes,
    ];

    /// Storage tree name
    pub fn tree_name(self) -> &'static str {
        match self {
            CatalogTable::Attributes => "metadata",
            CatalogTable::ObjectTypes => "objecttypes",
            CatalogTable::VariableTypes => "variabletypes",
            CatalogTable::DataTypes => "datatypes",
            CatalogTable::ReferenceTypes => "referencetypes",
        }
    }

    pub fn is_type_table(self) -> bool {
        !matches!(self, CatalogTable::Attributes)
    }
}

/// One row of a type-kind table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRow {
    pub browse_name: String,
    pub value: String,
    pub namespace_uri: String,
}

impl TypeRow {
    pub fn new(
        browse_name: impl Into<String>,
        value: impl Into<String>,
        namespace_uri: impl Into<String>,
    ) -> Self {
        Self {
            browse_name: browse_name.into(),
            value: value.into(),
            namespace_uri: namespace_uri.into(),
        }
    }
}

/// A decoded row from any table: `name` is the attribute name for the
/// attribute table and the browse name for type-kind tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub nodeset_id: NodesetId,
    pub name: String,
    pub value: String,
}

pub(crate) fn id_prefix(id: NodesetId) -> [u8; ID_LEN] {
    id.to_be_bytes()
}

pub(crate) fn row_key(id: NodesetId, name: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(ID_LEN + name.len());
    key.extend_from_slice(&id_prefix(id));
    key.extend_from_slice(name.as_bytes());
    key
}

/// Split a key into identifier and name; `None` for keys shorter than an id
pub(crate) fn split_key(key: &[u8]) -> Option<(NodesetId, String)> {
    if key.len() < ID_LEN {
        return None;
    }
    let (id_bytes, name) = key.split_at(ID_LEN);
    let mut buf = [0u8; ID_LEN];
    buf.copy_from_slice(id_bytes);
    Some((
        NodesetId::from_be_bytes(buf),
        String::from_utf8_lossy(name).into_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key_orders_by_identifier_first() {
        let low = row_key(2, "zzz");
        let high = row_key(10, "aaa");
        assert!(low < high);
    }

    #[test]
    fn test_split_key() {
        let key = row_key(7, "version");
        assert_eq!(split_key(&key), Some((7, "version".to_string())));
        assert_eq!(split_key(&[1, 2]), None);
    }

    #[test]
    fn test_type_kind_parse() {
        assert_eq!("DataType".parse::<TypeKind>(), Ok(TypeKind::DataType));
        assert!("method".parse::<TypeKind>().is_err());
    }
}
