//! Feature definitions for the map editor.

mod line;
mod point;
mod polygon;

pub use line::LineFeature;
pub use point::PointFeature;
pub use polygon::PolygonFeature;

use crate::properties::Properties;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for features within a kind's collection.
///
/// Supplied by the rendering surface at creation time (it is the surface's
/// own layer handle) and treated as a foreign key by the store.
pub type FeatureId = i64;

/// A geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Create a new coordinate.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Project onto a planar point (x = longitude, y = latitude).
    pub fn to_point(self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

/// The three feature kinds tracked by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKind {
    Point,
    Line,
    Polygon,
}

impl FeatureKind {
    /// Minimum number of vertices a geometry of this kind must carry.
    pub fn min_vertices(self) -> usize {
        match self {
            FeatureKind::Point => 1,
            FeatureKind::Line => 2,
            FeatureKind::Polygon => 3,
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeatureKind::Point => "point",
            FeatureKind::Line => "line",
            FeatureKind::Polygon => "polygon",
        };
        f.write_str(name)
    }
}

/// A kind-tagged geometry as reported by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates", rename_all = "snake_case")]
pub enum Geometry {
    Point(LatLng),
    Line(Vec<LatLng>),
    Polygon(Vec<LatLng>),
}

impl Geometry {
    /// Get the feature kind of this geometry.
    pub fn kind(&self) -> FeatureKind {
        match self {
            Geometry::Point(_) => FeatureKind::Point,
            Geometry::Line(_) => FeatureKind::Line,
            Geometry::Polygon(_) => FeatureKind::Polygon,
        }
    }
}

/// Exact coordinate-wise equality: identical length, pairwise-equal pairs.
///
/// No reordering and no tolerance window; the seed matcher relies on the
/// rendering surface echoing ingested coordinates back bit-for-bit.
pub fn coordinates_equal(a: &[LatLng], b: &[LatLng]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(p, q)| p == q)
}

/// Drop a duplicated closing vertex from a polygon ring.
///
/// A ring whose last coordinate equals its first is stored without the
/// closing vertex; anything else is returned unchanged.
pub fn normalize_ring(mut ring: Vec<LatLng>) -> Vec<LatLng> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Bounding box of a coordinate sequence, or `None` when empty.
pub fn coordinates_bounds(coords: &[LatLng]) -> Option<Rect> {
    let first = coords.first()?.to_point();
    let mut rect = Rect::from_points(first, first);
    for c in &coords[1..] {
        rect = rect.union_pt(c.to_point());
    }
    Some(rect)
}

/// Common accessors shared by the three feature records.
pub trait FeatureEntity {
    /// Get the surface-supplied identifier.
    fn id(&self) -> FeatureId;

    /// Get the feature kind.
    fn kind(&self) -> FeatureKind;

    /// Get the property mapping.
    fn properties(&self) -> &Properties;

    /// Get the mutable property mapping.
    fn properties_mut(&mut self) -> &mut Properties;

    /// Get the bounding box in (lng, lat) plane coordinates.
    fn bounds(&self) -> Rect;
}

/// Enum wrapper over the three feature records (for snapshots and events).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Feature {
    Point(PointFeature),
    Line(LineFeature),
    Polygon(PolygonFeature),
}

impl Feature {
    pub fn id(&self) -> FeatureId {
        match self {
            Feature::Point(f) => f.id(),
            Feature::Line(f) => f.id(),
            Feature::Polygon(f) => f.id(),
        }
    }

    pub fn kind(&self) -> FeatureKind {
        match self {
            Feature::Point(_) => FeatureKind::Point,
            Feature::Line(_) => FeatureKind::Line,
            Feature::Polygon(_) => FeatureKind::Polygon,
        }
    }

    /// Get the geometry as a kind-tagged value.
    pub fn geometry(&self) -> Geometry {
        match self {
            Feature::Point(f) => Geometry::Point(f.coordinate),
            Feature::Line(f) => Geometry::Line(f.coordinates.clone()),
            Feature::Polygon(f) => Geometry::Polygon(f.ring.clone()),
        }
    }

    pub fn properties(&self) -> &Properties {
        match self {
            Feature::Point(f) => f.properties(),
            Feature::Line(f) => f.properties(),
            Feature::Polygon(f) => f.properties(),
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Feature::Point(f) => f.bounds(),
            Feature::Line(f) => f.bounds(),
            Feature::Polygon(f) => f.bounds(),
        }
    }
}
