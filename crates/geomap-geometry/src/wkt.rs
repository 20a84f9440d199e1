//! WKT reader and writer
//!
//! Grammar accepted by [`parse`] (keywords are case-insensitive, whitespace is free
//! between tokens):
//!
//! ```text
//! geometry   := [ "SRID=" digits ";" ] point | linestring | polygon
//! point      := "POINT" "(" coord ")"
//! linestring := "LINESTRING" coords
//! polygon    := "POLYGON" "(" coords { "," coords } ")"
//! coords     := "(" coord { "," coord } ")"
//! coord      := number number
//! ```
//!
//! [`write`] emits the canonical form `POINT (30 10)`, `LINESTRING (30 10, 10 30)`,
//! `POLYGON ((30 10, 40 40, 20 40, 30 10))`.

use std::fmt::Write as _;

use crate::error::WktError;
use crate::model::{Coord, Geometry, GeometryKind};

const MIN_LINESTRING_POINTS: usize = 2;
const MIN_RING_POINTS: usize = 4;

/// Parse WKT (or EWKT) text into a geometry
pub fn parse(text: &str) -> Result<Geometry, WktError> {
    let mut reader = Reader::new(text);
    reader.skip_srid()?;
    let geometry = reader.geometry()?;
    reader.skip_ws();
    if !reader.at_end() {
        return Err(WktError::TrailingInput(reader.pos));
    }
    Ok(geometry)
}

/// Serialize a geometry as WKT
pub fn write(geometry: &Geometry) -> String {
    let mut out = String::with_capacity(64);
    out.push_str(geometry.kind().keyword());
    out.push(' ');
    match geometry {
        Geometry::Point(c) => {
            out.push('(');
            write_coord(&mut out, c);
            out.push(')');
        }
        Geometry::LineString(points) => write_coords(&mut out, points),
        Geometry::Polygon(rings) => {
            out.push('(');
            for (i, ring) in rings.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_coords(&mut out, ring);
            }
            out.push(')');
        }
    }
    out
}

fn write_coords(out: &mut String, coords: &[Coord]) {
    out.push('(');
    for (i, c) in coords.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_coord(out, c);
    }
    out.push(')');
}

fn write_coord(out: &mut String, c: &Coord) {
    // f64 Display is the shortest text that parses back to the same value
    let _ = write!(out, "{} {}", c.x, c.y);
}

struct Reader<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn found(&self) -> String {
        match self.peek() {
            Some(c) => format!("'{}'", c),
            None => "end of input".to_string(),
        }
    }

    fn expect(&mut self, ch: char, expected: &'static str) -> Result<(), WktError> {
        self.skip_ws();
        match self.peek() {
            Some(c) if c == ch => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(_) => Err(WktError::UnexpectedToken {
                expected,
                found: self.found(),
                position: self.pos,
            }),
            None => Err(WktError::UnexpectedEnd(expected)),
        }
    }

    /// Consume `c` if it is the next non-blank character
    fn accept(&mut self, ch: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(ch) {
            self.pos += ch.len_utf8();
            true
        } else {
            false
        }
    }

    fn word(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !c.is_ascii_alphabetic() {
                break;
            }
            self.pos += 1;
        }
        &self.input[start..self.pos]
    }

    /// Skip an EWKT `SRID=<n>;` prefix if present
    fn skip_srid(&mut self) -> Result<(), WktError> {
        self.skip_ws();
        let rest = &self.input[self.pos..];
        if rest.get(..5).is_some_and(|head| head.eq_ignore_ascii_case("SRID=")) {
            self.pos += 5;
            let start = self.pos;
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.pos += 1;
            }
            if self.pos == start {
                return Err(WktError::UnexpectedToken {
                    expected: "SRID value",
                    found: self.found(),
                    position: self.pos,
                });
            }
            self.expect(';', "';' after SRID")?;
        }
        Ok(())
    }

    fn geometry(&mut self) -> Result<Geometry, WktError> {
        self.skip_ws();
        if self.at_end() {
            return Err(WktError::Empty);
        }
        let position = self.pos;
        let keyword = self.word();
        if keyword.is_empty() {
            return Err(WktError::UnexpectedToken {
                expected: "geometry type",
                found: self.found(),
                position,
            });
        }
        let kind: GeometryKind = keyword
            .parse()
            .map_err(|_| WktError::UnsupportedType(keyword.to_string()))?;

        // EMPTY and dimension qualifiers (Z, M, ZM) have no representation here
        self.skip_ws();
        let qualifier = self.word();
        if qualifier.eq_ignore_ascii_case("EMPTY") {
            return Err(WktError::Empty);
        }
        if !qualifier.is_empty() {
            return Err(WktError::UnsupportedType(format!("{} {}", keyword, qualifier)));
        }

        match kind {
            GeometryKind::Point => {
                self.expect('(', "'('")?;
                let c = self.coord()?;
                self.expect(')', "')'")?;
                Ok(Geometry::Point(c))
            }
            GeometryKind::LineString => {
                let points = self.coord_list()?;
                if points.len() < MIN_LINESTRING_POINTS {
                    return Err(WktError::TooFewPoints {
                        kind: "LINESTRING",
                        min: MIN_LINESTRING_POINTS,
                        found: points.len(),
                    });
                }
                Ok(Geometry::LineString(points))
            }
            GeometryKind::Polygon => {
                self.expect('(', "'('")?;
                let mut rings = vec![self.ring(0)?];
                while self.accept(',') {
                    let index = rings.len();
                    rings.push(self.ring(index)?);
                }
                self.expect(')', "')' or ','")?;
                Ok(Geometry::Polygon(rings))
            }
        }
    }

    fn ring(&mut self, index: usize) -> Result<Vec<Coord>, WktError> {
        let ring = self.coord_list()?;
        if ring.len() < MIN_RING_POINTS {
            return Err(WktError::TooFewPoints {
                kind: "POLYGON ring",
                min: MIN_RING_POINTS,
                found: ring.len(),
            });
        }
        if ring.first() != ring.last() {
            return Err(WktError::UnclosedRing(index));
        }
        Ok(ring)
    }

    fn coord_list(&mut self) -> Result<Vec<Coord>, WktError> {
        self.expect('(', "'('")?;
        let mut coords = vec![self.coord()?];
        while self.accept(',') {
            coords.push(self.coord()?);
        }
        self.expect(')', "')' or ','")?;
        Ok(coords)
    }

    fn coord(&mut self) -> Result<Coord, WktError> {
        self.skip_ws();
        let position = self.pos;
        let mut ordinates = Vec::with_capacity(2);
        loop {
            self.skip_ws();
            match self.peek() {
                Some(c) if c.is_ascii_digit() || matches!(c, '+' | '-' | '.') => {
                    ordinates.push(self.number()?);
                }
                _ => break,
            }
        }
        match ordinates.as_slice() {
            [x, y] => Ok(Coord::new(*x, *y)),
            [] => Err(match self.peek() {
                Some(_) => WktError::UnexpectedToken {
                    expected: "coordinate",
                    found: self.found(),
                    position,
                },
                None => WktError::UnexpectedEnd("coordinate"),
            }),
            other => Err(WktError::CoordinateArity {
                found: other.len(),
                position,
            }),
        }
    }

    fn number(&mut self) -> Result<f64, WktError> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')) {
                break;
            }
            self.pos += 1;
        }
        let literal = &self.input[start..self.pos];
        match literal.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(WktError::InvalidNumber(literal.to_string())),
        }
    }
}
