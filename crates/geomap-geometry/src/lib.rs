//! Geomap Geometry - in-memory geometry model and its text codecs
//!
//! This crate provides:
//! - `Geometry`: the three supported shapes (point, line string, polygon)
//! - WKT reader and writer (`parse`, `write`)
//! - Hex-encoded EWKB decoding for values read back from a PostGIS column
//! - Serde glue so a `Geometry` travels over JSON as its WKT text
//!
//! Nothing in this crate performs I/O.

pub mod error;
pub mod ewkb;
pub mod model;
mod serde_wkt;
pub mod wkt;

pub use error::WktError;
pub use ewkb::decode_hex_ewkb;
pub use model::{Coord, Geometry, GeometryKind};
pub use wkt::{parse, write};

/// Spatial reference identifier for longitude/latitude on WGS84
pub const SRID_WGS84: i32 = 4326;

/// Parse spatial text in any of the forms a store may hand back:
/// hex EWKB, EWKT (`SRID=4326;POINT (1 2)`) or plain WKT.
pub fn parse_spatial_text(text: &str) -> Result<Geometry, WktError> {
    let trimmed = text.trim();
    if ewkb::looks_like_hex(trimmed) {
        decode_hex_ewkb(trimmed)
    } else {
        parse(trimmed)
    }
}

/// Render a geometry as EWKT tagged with the given SRID
pub fn write_ewkt(geometry: &Geometry, srid: i32) -> String {
    format!("SRID={};{}", srid, write(geometry))
}
