//! Catalog fixture for integration tests
//!
//! Uses only the public `NodesetCatalog` API.

use nodeset_catalog::{NodesetCatalog, NodesetId, TypeKind, TypeRow};

/// Identifiers seeded by [`CatalogFixture::with_sample_data`] that carry attributes
pub const ATTRIBUTED_IDS: [NodesetId; 5] = [1, 2, 3, 4, 5];

/// Seeded identifier that only has a declared type, no attributes
pub const TYPE_ONLY_ID: NodesetId = 6;

pub const SAMPLE_XML: &[u8] = b"<?xml version=\"1.0\"?><UANodeSet/>";

struct SampleNodeset {
    id: NodesetId,
    attributes: &'static [(&'static str, &'static str)],
    types: &'static [(TypeKind, &'static str, &'static str)],
}

const SAMPLES: &[SampleNodeset] = &[
    SampleNodeset {
        id: 1,
        attributes: &[
            ("title", "Robotics"),
            ("license", "MIT"),
            ("version", "1.0.1"),
            ("nodesetcreationtime", "2021-06-01T00:00:00Z"),
            ("addressspacename", "Robotics"),
            ("orgname", "VDMA"),
            ("orgwebsite", "https://www.vdma.org/"),
            ("keywords", "robot, arm"),
        ],
        types: &[(TypeKind::ObjectType, "RobotType", "http://opcfoundation.org/UA/Robotics/")],
    },
    SampleNodeset {
        id: 2,
        attributes: &[
            ("title", "Machine Tools"),
            ("license", "Custom"),
            ("version", "1.0.0"),
            ("nodesetcreationtime", "2022-03-15 08:00:00"),
            ("addressspacename", "Machine Tools"),
            ("orgname", "VDMA"),
            ("orgwebsite", "https://www.vdma.org/"),
        ],
        types: &[(
            TypeKind::VariableType,
            "ToolLifeType",
            "http://opcfoundation.org/UA/MachineTool/",
        )],
    },
    SampleNodeset {
        id: 3,
        attributes: &[
            ("title", "Machinery"),
            ("license", "ApacheLicense20"),
            ("version", "1.2.0"),
            ("nodesetcreationtime", "10/01/2022 00:00:00"),
            ("addressspacename", "Machinery"),
            ("orgname", "OPC Foundation"),
        ],
        types: &[(
            TypeKind::DataType,
            "MachineryItemState",
            "http://opcfoundation.org/UA/Machinery/",
        )],
    },
    SampleNodeset {
        id: 4,
        attributes: &[
            ("title", "Packaging"),
            ("license", "MIT"),
            ("version", "1.0.0"),
            ("nodesetcreationtime", "2020-01-01"),
            ("addressspacename", "Packaging"),
            ("orgname", "OMAC"),
        ],
        types: &[(TypeKind::ObjectType, "PackMLBaseObjectType", "http://opcfoundation.org/UA/PackML/")],
    },
    SampleNodeset {
        id: 5,
        attributes: &[
            ("title", "Plastics and Rubber"),
            ("license", "Custom"),
            ("version", "1.0.2"),
            ("nodesetcreationtime", "2023-05-05T12:00:00Z"),
            ("addressspacename", "Plastics"),
            ("orgname", "EUROMAP"),
        ],
        types: &[(
            TypeKind::ReferenceType,
            "HasExtruder",
            "http://www.euromap.org/euromap83/",
        )],
    },
    SampleNodeset {
        id: TYPE_ONLY_ID,
        attributes: &[],
        types: &[(TypeKind::ObjectType, "GenericDeviceType", "urn:generic")],
    },
];

/// Test fixture with an isolated catalog
pub struct CatalogFixture {
    catalog: NodesetCatalog,
    _temp_dir: Option<tempfile::TempDir>,
}

impl CatalogFixture {
    /// Empty sled-backed catalog in a fresh temp directory
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        let catalog = NodesetCatalog::from_path(temp_dir.path().join("catalog"))?;
        Ok(Self {
            catalog,
            _temp_dir: Some(temp_dir),
        })
    }

    /// Empty catalog with memory store and memory file storage
    pub fn in_memory() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            catalog: NodesetCatalog::in_memory()?,
            _temp_dir: None,
        })
    }

    /// Sled-backed catalog seeded with the sample nodesets
    pub fn with_sample_data() -> Result<Self, Box<dyn std::error::Error>> {
        let fixture = Self::new()?;
        fixture.insert_sample_data()?;
        Ok(fixture)
    }

    pub fn insert_sample_data(&self) -> Result<(), String> {
        for sample in SAMPLES {
            let types: Vec<(TypeKind, TypeRow)> = sample
                .types
                .iter()
                .map(|(kind, name, uri)| (*kind, TypeRow::new(*name, *name, *uri)))
                .collect();
            self.catalog
                .ingest(sample.id, SAMPLE_XML, sample.attributes.iter().copied(), &types)
                .ok_or_else(|| format!("Failed to ingest sample nodeset {}", sample.id))?;
        }
        Ok(())
    }

    pub fn catalog(&self) -> &NodesetCatalog {
        &self.catalog
    }

    /// An identifier that no sample uses
    pub fn unused_id(&self) -> NodesetId {
        fastrand::u32(1_000..1_000_000)
    }
}
