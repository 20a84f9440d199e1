//! Geometry value types

use std::fmt::{Display, Formatter};

/// A single 2D coordinate (longitude, latitude for SRID 4326)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate equality within an absolute tolerance
    pub fn approx_eq(&self, other: &Coord, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Supported geometry kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    Polygon,
}

impl GeometryKind {
    /// WKT keyword as emitted by the writer
    pub fn keyword(self) -> &'static str {
        match self {
            GeometryKind::Point => "POINT",
            GeometryKind::LineString => "LINESTRING",
            GeometryKind::Polygon => "POLYGON",
        }
    }
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

impl std::str::FromStr for GeometryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "POINT" => Ok(GeometryKind::Point),
            "LINESTRING" => Ok(GeometryKind::LineString),
            "POLYGON" => Ok(GeometryKind::Polygon),
            _ => Err(format!("unsupported geometry type: {}", s)),
        }
    }
}

/// A geometry value.
///
/// Values produced by the WKT reader or the EWKB decoder always satisfy the shape
/// invariants: line strings have at least two points, every polygon ring is closed
/// and has at least four points, and the first ring is the exterior.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coord),
    LineString(Vec<Coord>),
    Polygon(Vec<Vec<Coord>>),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
        }
    }

    /// Iterate every coordinate in storage order
    pub fn coords(&self) -> Box<dyn Iterator<Item = &Coord> + '_> {
        match self {
            Geometry::Point(c) => Box::new(std::iter::once(c)),
            Geometry::LineString(points) => Box::new(points.iter()),
            Geometry::Polygon(rings) => Box::new(rings.iter().flatten()),
        }
    }

    /// Structural equality with per-coordinate tolerance
    pub fn approx_eq(&self, other: &Geometry, tolerance: f64) -> bool {
        match (self, other) {
            (Geometry::Point(a), Geometry::Point(b)) => a.approx_eq(b, tolerance),
            (Geometry::LineString(a), Geometry::LineString(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p.approx_eq(q, tolerance))
            }
            (Geometry::Polygon(a), Geometry::Polygon(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(r, s)| {
                        r.len() == s.len()
                            && r.iter().zip(s).all(|(p, q)| p.approx_eq(q, tolerance))
                    })
            }
            _ => false,
        }
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::wkt::write(self))
    }
}
