// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parsed geographic documents
//!
//! A [`GeoDocument`] is the immutable result of parsing a GeoJSON payload.
//! Documents are shared between the content store and displays behind an
//! `Arc` and are never mutated after parsing.

use serde::Deserialize;
use serde_json::{Map, Value};

/// A longitude/latitude pair in degrees.
///
/// Altitude values present in the source are accepted but dropped.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Position {
    /// Longitude in degrees
    pub lon: f64,
    /// Latitude in degrees
    pub lat: f64,
}

impl Position {
    /// Create a position from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Ok(Self::new(*lon, *lat)),
            [_, _, ..] => Err("position contains a non-finite coordinate".to_string()),
            _ => Err(format!(
                "position needs at least 2 coordinates, got {}",
                values.len()
            )),
        }
    }
}

/// GeoJSON geometry objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// A single position
    Point {
        /// Coordinates of the point
        coordinates: Position,
    },
    /// Several unconnected positions
    MultiPoint {
        /// Coordinates of the points
        coordinates: Vec<Position>,
    },
    /// A connected line of positions
    LineString {
        /// Vertices of the line
        coordinates: Vec<Position>,
    },
    /// Several lines
    MultiLineString {
        /// Vertices of each line
        coordinates: Vec<Vec<Position>>,
    },
    /// An outer ring followed by optional holes
    Polygon {
        /// Linear rings of the polygon
        coordinates: Vec<Vec<Position>>,
    },
    /// Several polygons
    MultiPolygon {
        /// Rings of each polygon
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    /// A heterogeneous set of geometries
    GeometryCollection {
        /// Member geometries
        geometries: Vec<Geometry>,
    },
}

impl Geometry {
    /// GeoJSON `type` names that denote a bare geometry.
    pub const TYPE_NAMES: [&'static str; 7] = [
        "Point",
        "MultiPoint",
        "LineString",
        "MultiLineString",
        "Polygon",
        "MultiPolygon",
        "GeometryCollection",
    ];

    /// Append every position of this geometry to `out`.
    pub fn collect_positions(&self, out: &mut Vec<Position>) {
        match self {
            Geometry::Point { coordinates } => out.push(*coordinates),
            Geometry::MultiPoint { coordinates } | Geometry::LineString { coordinates } => {
                out.extend_from_slice(coordinates)
            }
            Geometry::MultiLineString { coordinates } | Geometry::Polygon { coordinates } => {
                coordinates.iter().for_each(|ring| out.extend_from_slice(ring))
            }
            Geometry::MultiPolygon { coordinates } => coordinates
                .iter()
                .flatten()
                .for_each(|ring| out.extend_from_slice(ring)),
            Geometry::GeometryCollection { geometries } => {
                geometries.iter().for_each(|g| g.collect_positions(out))
            }
        }
    }
}

/// A geometry with its properties.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Feature {
    /// Optional feature identifier (string or number)
    #[serde(default)]
    pub id: Option<Value>,
    /// Geometry; `null` is allowed by GeoJSON
    #[serde(default)]
    pub geometry: Option<Geometry>,
    /// Free-form properties
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
}

impl Feature {
    /// Wrap a bare geometry as a feature without properties.
    pub fn from_geometry(geometry: Geometry) -> Self {
        Self {
            id: None,
            geometry: Some(geometry),
            properties: None,
        }
    }
}

/// An axis-aligned extent in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum longitude
    pub west: f64,
    /// Minimum latitude
    pub south: f64,
    /// Maximum longitude (may be less than `west` across the antimeridian)
    pub east: f64,
    /// Maximum latitude
    pub north: f64,
}

impl BoundingBox {
    /// Create a bounding box from its edges.
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }
}

/// An immutable parsed geographic document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoDocument {
    features: Vec<Feature>,
    bbox: Option<BoundingBox>,
}

impl GeoDocument {
    /// Build a document from features and an optional explicit bounding box.
    pub fn new(features: Vec<Feature>, bbox: Option<BoundingBox>) -> Self {
        Self { features, bbox }
    }

    /// Features of the document, in source order.
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// The bounding box declared by the document itself, if any.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.bbox
    }

    /// Whether the document has no features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// All positions of all feature geometries.
    pub fn positions(&self) -> Vec<Position> {
        let mut out = Vec::new();
        for geometry in self.features.iter().filter_map(|f| f.geometry.as_ref()) {
            geometry.collect_positions(&mut out);
        }
        out
    }
}
