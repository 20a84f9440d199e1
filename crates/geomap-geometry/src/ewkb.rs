//! Hex-encoded (E)WKB decoding
//!
//! PostGIS renders a `geometry` value cast to text as hex EWKB. Only 2D points,
//! line strings and polygons are accepted; the embedded SRID, if any, is skipped.

use crate::error::WktError;
use crate::model::{Coord, Geometry};

const WKB_POINT: u32 = 1;
const WKB_LINESTRING: u32 = 2;
const WKB_POLYGON: u32 = 3;

const EWKB_Z_FLAG: u32 = 0x8000_0000;
const EWKB_M_FLAG: u32 = 0x4000_0000;
const EWKB_SRID_FLAG: u32 = 0x2000_0000;

/// Quick check for hex EWKB text (as opposed to WKT)
pub(crate) fn looks_like_hex(text: &str) -> bool {
    text.len() >= 10 && text.len() % 2 == 0 && text.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Decode hex EWKB text into a geometry
pub fn decode_hex_ewkb(text: &str) -> Result<Geometry, WktError> {
    let bytes = const_hex::decode(text.trim())
        .map_err(|e| WktError::InvalidEwkb(format!("bad hex: {}", e)))?;
    let mut cursor = Cursor::new(&bytes);
    let geometry = cursor.geometry()?;
    if cursor.remaining() != 0 {
        return Err(WktError::InvalidEwkb(format!(
            "{} trailing bytes",
            cursor.remaining()
        )));
    }
    Ok(geometry)
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
    little_endian: bool,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            pos: 0,
            little_endian: true,
        }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], WktError> {
        let slice = self
            .bytes
            .get(self.pos..self.pos + N)
            .ok_or_else(|| WktError::InvalidEwkb(format!("truncated at byte {}", self.pos)))?;
        self.pos += N;
        let mut buf = [0u8; N];
        buf.copy_from_slice(slice);
        Ok(buf)
    }

    fn u32(&mut self) -> Result<u32, WktError> {
        let buf = self.take::<4>()?;
        Ok(if self.little_endian {
            u32::from_le_bytes(buf)
        } else {
            u32::from_be_bytes(buf)
        })
    }

    fn f64(&mut self) -> Result<f64, WktError> {
        let buf = self.take::<8>()?;
        let v = if self.little_endian {
            f64::from_le_bytes(buf)
        } else {
            f64::from_be_bytes(buf)
        };
        if !v.is_finite() {
            return Err(WktError::InvalidEwkb(format!("non-finite ordinate {}", v)));
        }
        Ok(v)
    }

    fn coord(&mut self) -> Result<Coord, WktError> {
        Ok(Coord::new(self.f64()?, self.f64()?))
    }

    fn coords(&mut self, min: usize, kind: &'static str) -> Result<Vec<Coord>, WktError> {
        let count = self.u32()? as usize;
        if count < min {
            return Err(WktError::TooFewPoints {
                kind,
                min,
                found: count,
            });
        }
        // 16 bytes per coordinate; reject counts the buffer cannot hold
        if count > self.remaining() / 16 {
            return Err(WktError::InvalidEwkb(format!(
                "point count {} exceeds payload",
                count
            )));
        }
        (0..count).map(|_| self.coord()).collect()
    }

    fn geometry(&mut self) -> Result<Geometry, WktError> {
        let [order] = self.take::<1>()?;
        self.little_endian = match order {
            0 => false,
            1 => true,
            other => {
                return Err(WktError::InvalidEwkb(format!(
                    "unknown byte order {}",
                    other
                )));
            }
        };

        let raw_type = self.u32()?;
        if raw_type & (EWKB_Z_FLAG | EWKB_M_FLAG) != 0 {
            return Err(WktError::UnsupportedType(
                "geometry with Z/M ordinates".to_string(),
            ));
        }
        if raw_type & EWKB_SRID_FLAG != 0 {
            self.u32()?;
        }

        match raw_type & 0x0FFF_FFFF {
            WKB_POINT => Ok(Geometry::Point(self.coord()?)),
            WKB_LINESTRING => Ok(Geometry::LineString(self.coords(2, "LINESTRING")?)),
            WKB_POLYGON => {
                let ring_count = self.u32()? as usize;
                if ring_count == 0 {
                    return Err(WktError::Empty);
                }
                let mut rings = Vec::new();
                for index in 0..ring_count {
                    let ring = self.coords(4, "POLYGON ring")?;
                    if ring.first() != ring.last() {
                        return Err(WktError::UnclosedRing(index));
                    }
                    rings.push(ring);
                }
                Ok(Geometry::Polygon(rings))
            }
            other => Err(WktError::UnsupportedType(format!("WKB type {}", other))),
        }
    }
}
