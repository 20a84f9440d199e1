//! Domain model types for persistence operations

use geomap_geometry::Geometry;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storage backend selected at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Parameterized SQL statements against PostGIS
    Sql,
    /// SeaORM entity mapping against PostGIS
    Orm,
    /// Process-owned table, no database
    Memory,
}

impl StorageMode {
    /// Whether this mode needs a database connection
    pub fn requires_database(self) -> bool {
        !matches!(self, StorageMode::Memory)
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageMode::Sql => write!(f, "sql"),
            StorageMode::Orm => write!(f, "orm"),
            StorageMode::Memory => write!(f, "memory"),
        }
    }
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sql" => Ok(StorageMode::Sql),
            "orm" => Ok(StorageMode::Orm),
            "memory" => Ok(StorageMode::Memory),
            _ => Err(format!("Invalid storage mode: {}", s)),
        }
    }
}

/// A stored map object, detached from the store
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ObjectRecord {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Home")]
    pub name: String,
    /// WKT text of the geometry
    #[schema(value_type = String, example = "POINT (30 10)")]
    pub geometry: Geometry,
}

/// Fields of an object that is about to be written
#[derive(Clone, Debug, PartialEq)]
pub struct NewObject {
    pub name: String,
    pub geometry: Geometry,
}

impl NewObject {
    pub fn new(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry,
        }
    }

    pub fn into_record(self, id: i32) -> ObjectRecord {
        ObjectRecord {
            id,
            name: self.name,
            geometry: self.geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomap_geometry::Coord;

    #[test]
    fn test_storage_mode_round_trip() {
        for mode in [StorageMode::Sql, StorageMode::Orm, StorageMode::Memory] {
            assert_eq!(mode.to_string().parse::<StorageMode>().unwrap(), mode);
        }
        assert_eq!("ORM".parse::<StorageMode>().unwrap(), StorageMode::Orm);
        assert!("rocksdb".parse::<StorageMode>().is_err());
        assert!(!StorageMode::Memory.requires_database());
    }

    #[test]
    fn test_record_wire_shape() {
        let record = NewObject::new("A", Geometry::Point(Coord::new(30.0, 10.0))).into_record(1);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            serde_json::json!({"id": 1, "name": "A", "geometry": "POINT (30 10)"})
        );
    }
}
