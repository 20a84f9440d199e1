//! Spatial column converter
//!
//! `SpatialValue` lets a PostGIS `geometry` column map onto a [`Geometry`]. Values
//! are written as EWKT text tagged with the storage SRID and read from any of the
//! text forms PostGIS hands back (hex EWKB when cast to `text`, or WKT/EWKT).

use geomap_common::STORAGE_SRID;
use geomap_geometry::{Geometry, parse_spatial_text, write_ewkt};
use sea_orm::sea_query::{Alias, ArrayType, ColumnType, IntoIden, Value, ValueType, ValueTypeErr};
use sea_orm::{ColIdx, DbErr, QueryResult, TryGetError, TryGetable};

#[derive(Clone, Debug, PartialEq)]
pub struct SpatialValue(pub Geometry);

impl SpatialValue {
    pub fn into_inner(self) -> Geometry {
        self.0
    }
}

impl From<Geometry> for SpatialValue {
    fn from(geometry: Geometry) -> Self {
        SpatialValue(geometry)
    }
}

impl From<SpatialValue> for Value {
    fn from(value: SpatialValue) -> Self {
        Value::String(Some(Box::new(write_ewkt(&value.0, STORAGE_SRID))))
    }
}

impl TryGetable for SpatialValue {
    fn try_get_by<I: ColIdx>(res: &QueryResult, index: I) -> Result<Self, TryGetError> {
        let text = <String as TryGetable>::try_get_by(res, index)?;
        parse_spatial_text(&text).map(SpatialValue).map_err(|e| {
            TryGetError::DbErr(DbErr::Type(format!("undecodable geometry column: {}", e)))
        })
    }
}

impl ValueType for SpatialValue {
    fn try_from(v: Value) -> Result<Self, ValueTypeErr> {
        match v {
            Value::String(Some(text)) => parse_spatial_text(&text)
                .map(SpatialValue)
                .map_err(|_| ValueTypeErr),
            _ => Err(ValueTypeErr),
        }
    }

    fn type_name() -> String {
        stringify!(SpatialValue).to_owned()
    }

    fn array_type() -> ArrayType {
        ArrayType::String
    }

    fn column_type() -> ColumnType {
        ColumnType::Custom(Alias::new("geometry").into_iden())
    }
}
