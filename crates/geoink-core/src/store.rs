//! Feature store: authoritative CRUD over the three typed collections.

use crate::features::{
    normalize_ring, Feature, FeatureEntity, FeatureId, FeatureKind, Geometry, LatLng, LineFeature,
    PointFeature, PolygonFeature,
};
use crate::properties::Properties;
use kurbo::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no {kind} feature with id {id}")]
    NotFound { kind: FeatureKind, id: FeatureId },
    #[error("{kind} geometry has {len} vertices, minimum is {min}")]
    MalformedGeometry {
        kind: FeatureKind,
        len: usize,
        min: usize,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Owns the three ordered feature collections.
///
/// Ids are supplied by the rendering surface and assumed unique per kind; a
/// second create with a reused id produces a second distinct entry rather
/// than an error. Lookups are linear scans returning the first match, which
/// is fine at editing-session feature counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureStore {
    points: Vec<PointFeature>,
    lines: Vec<LineFeature>,
    polygons: Vec<PolygonFeature>,
}

impl FeatureStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a point feature.
    pub fn add_point(
        &mut self,
        id: FeatureId,
        coordinate: LatLng,
        properties: Properties,
    ) -> &PointFeature {
        log::debug!("add point {id}");
        self.points.push(PointFeature::new(id, coordinate, properties));
        &self.points[self.points.len() - 1]
    }

    /// Add a line feature. Rejects lines with fewer than two vertices.
    pub fn add_line(
        &mut self,
        id: FeatureId,
        coordinates: Vec<LatLng>,
        properties: Properties,
    ) -> StoreResult<&LineFeature> {
        check_vertex_count(FeatureKind::Line, coordinates.len())?;
        log::debug!("add line {id} ({} vertices)", coordinates.len());
        self.lines.push(LineFeature::new(id, coordinates, properties));
        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Add a polygon feature.
    ///
    /// The ring is normalized first (a closing vertex equal to the first is
    /// dropped); rings with fewer than three vertices after normalization
    /// are rejected.
    pub fn add_polygon(
        &mut self,
        id: FeatureId,
        ring: Vec<LatLng>,
        properties: Properties,
    ) -> StoreResult<&PolygonFeature> {
        let ring = normalize_ring(ring);
        check_vertex_count(FeatureKind::Polygon, ring.len())?;
        log::debug!("add polygon {id} ({} vertices)", ring.len());
        self.polygons.push(PolygonFeature::new(id, ring, properties));
        Ok(&self.polygons[self.polygons.len() - 1])
    }

    /// Find a point by id.
    pub fn find_point(&self, id: FeatureId) -> Option<&PointFeature> {
        self.points.iter().find(|f| f.id == id)
    }

    /// Find a line by id.
    pub fn find_line(&self, id: FeatureId) -> Option<&LineFeature> {
        self.lines.iter().find(|f| f.id == id)
    }

    /// Find a polygon by id.
    pub fn find_polygon(&self, id: FeatureId) -> Option<&PolygonFeature> {
        self.polygons.iter().find(|f| f.id == id)
    }

    /// Replace a point's coordinate.
    pub fn edit_point(&mut self, id: FeatureId, coordinate: LatLng) -> StoreResult<()> {
        let point = self
            .points
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound {
                kind: FeatureKind::Point,
                id,
            })?;
        point.coordinate = coordinate;
        Ok(())
    }

    /// Replace a line's coordinates. The new sequence is validated the same
    /// way as at creation.
    pub fn edit_line(&mut self, id: FeatureId, coordinates: Vec<LatLng>) -> StoreResult<()> {
        check_vertex_count(FeatureKind::Line, coordinates.len())?;
        let line = self
            .lines
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound {
                kind: FeatureKind::Line,
                id,
            })?;
        line.coordinates = coordinates;
        Ok(())
    }

    /// Replace a polygon's ring, normalizing and validating the new ring.
    pub fn edit_polygon(&mut self, id: FeatureId, ring: Vec<LatLng>) -> StoreResult<()> {
        let ring = normalize_ring(ring);
        check_vertex_count(FeatureKind::Polygon, ring.len())?;
        let polygon = self
            .polygons
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(StoreError::NotFound {
                kind: FeatureKind::Polygon,
                id,
            })?;
        polygon.ring = ring;
        Ok(())
    }

    /// Remove a point by id.
    pub fn remove_point(&mut self, id: FeatureId) -> StoreResult<()> {
        remove_by_id(&mut self.points, FeatureKind::Point, id)
    }

    /// Remove a line by id.
    pub fn remove_line(&mut self, id: FeatureId) -> StoreResult<()> {
        remove_by_id(&mut self.lines, FeatureKind::Line, id)
    }

    /// Remove a polygon by id.
    pub fn remove_polygon(&mut self, id: FeatureId) -> StoreResult<()> {
        remove_by_id(&mut self.polygons, FeatureKind::Polygon, id)
    }

    /// Create a feature from a kind-tagged geometry, returning a snapshot.
    pub fn create(
        &mut self,
        id: FeatureId,
        geometry: Geometry,
        properties: Properties,
    ) -> StoreResult<Feature> {
        match geometry {
            Geometry::Point(coordinate) => {
                Ok(Feature::Point(self.add_point(id, coordinate, properties).clone()))
            }
            Geometry::Line(coordinates) => {
                Ok(Feature::Line(self.add_line(id, coordinates, properties)?.clone()))
            }
            Geometry::Polygon(ring) => {
                Ok(Feature::Polygon(self.add_polygon(id, ring, properties)?.clone()))
            }
        }
    }

    /// Find a feature of any kind, returning a snapshot.
    pub fn find(&self, kind: FeatureKind, id: FeatureId) -> Option<Feature> {
        match kind {
            FeatureKind::Point => self.find_point(id).cloned().map(Feature::Point),
            FeatureKind::Line => self.find_line(id).cloned().map(Feature::Line),
            FeatureKind::Polygon => self.find_polygon(id).cloned().map(Feature::Polygon),
        }
    }

    /// Replace a feature's geometry wholesale; the kind is taken from the
    /// geometry itself. Id and kind stay immutable for the feature's
    /// lifetime.
    pub fn set_geometry(&mut self, id: FeatureId, geometry: Geometry) -> StoreResult<()> {
        match geometry {
            Geometry::Point(coordinate) => self.edit_point(id, coordinate),
            Geometry::Line(coordinates) => self.edit_line(id, coordinates),
            Geometry::Polygon(ring) => self.edit_polygon(id, ring),
        }
    }

    /// Replace a feature's property mapping wholesale (last writer wins).
    pub fn set_properties(
        &mut self,
        kind: FeatureKind,
        id: FeatureId,
        properties: Properties,
    ) -> StoreResult<()> {
        let not_found = StoreError::NotFound { kind, id };
        let target: &mut Properties = match kind {
            FeatureKind::Point => self
                .points
                .iter_mut()
                .find(|f| f.id == id)
                .map(|f| f.properties_mut())
                .ok_or(not_found)?,
            FeatureKind::Line => self
                .lines
                .iter_mut()
                .find(|f| f.id == id)
                .map(|f| f.properties_mut())
                .ok_or(not_found)?,
            FeatureKind::Polygon => self
                .polygons
                .iter_mut()
                .find(|f| f.id == id)
                .map(|f| f.properties_mut())
                .ok_or(not_found)?,
        };
        *target = properties;
        Ok(())
    }

    /// Read accessor for a feature's property mapping.
    pub fn properties(&self, kind: FeatureKind, id: FeatureId) -> StoreResult<&Properties> {
        let not_found = StoreError::NotFound { kind, id };
        match kind {
            FeatureKind::Point => self.find_point(id).map(|f| &f.properties),
            FeatureKind::Line => self.find_line(id).map(|f| &f.properties),
            FeatureKind::Polygon => self.find_polygon(id).map(|f| &f.properties),
        }
        .ok_or(not_found)
    }

    /// Remove a feature of any kind by id.
    pub fn remove(&mut self, kind: FeatureKind, id: FeatureId) -> StoreResult<()> {
        match kind {
            FeatureKind::Point => self.remove_point(id),
            FeatureKind::Line => self.remove_line(id),
            FeatureKind::Polygon => self.remove_polygon(id),
        }
    }

    /// All points in creation order.
    pub fn points(&self) -> &[PointFeature] {
        &self.points
    }

    /// All lines in creation order.
    pub fn lines(&self) -> &[LineFeature] {
        &self.lines
    }

    /// All polygons in creation order.
    pub fn polygons(&self) -> &[PolygonFeature] {
        &self.polygons
    }

    /// Total number of features across all kinds.
    pub fn len(&self) -> usize {
        self.points.len() + self.lines.len() + self.polygons.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of features of one kind.
    pub fn kind_len(&self, kind: FeatureKind) -> usize {
        match kind {
            FeatureKind::Point => self.points.len(),
            FeatureKind::Line => self.lines.len(),
            FeatureKind::Polygon => self.polygons.len(),
        }
    }

    /// Snapshots of every feature, points first, then lines, then polygons,
    /// each group in creation order.
    pub fn snapshots(&self) -> Vec<Feature> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.points.iter().cloned().map(Feature::Point));
        out.extend(self.lines.iter().cloned().map(Feature::Line));
        out.extend(self.polygons.iter().cloned().map(Feature::Polygon));
        out
    }

    /// Get the bounding box of all features.
    pub fn bounds(&self) -> Option<Rect> {
        let points = self.points.iter().map(FeatureEntity::bounds);
        let lines = self.lines.iter().map(FeatureEntity::bounds);
        let polygons = self.polygons.iter().map(FeatureEntity::bounds);

        let mut result: Option<Rect> = None;
        for bounds in points.chain(lines).chain(polygons) {
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }

    /// Serialize the store to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a store from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

fn check_vertex_count(kind: FeatureKind, len: usize) -> StoreResult<()> {
    let min = kind.min_vertices();
    if len < min {
        return Err(StoreError::MalformedGeometry { kind, len, min });
    }
    Ok(())
}

fn remove_by_id<F: FeatureEntity>(
    collection: &mut Vec<F>,
    kind: FeatureKind,
    id: FeatureId,
) -> StoreResult<()> {
    let index = collection
        .iter()
        .position(|f| f.id() == id)
        .ok_or(StoreError::NotFound { kind, id })?;
    collection.remove(index);
    log::debug!("removed {kind} {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props(pairs: &[(&str, &str)]) -> Properties {
        Properties::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_create_then_find_point() {
        let mut store = FeatureStore::new();
        store.add_point(1, LatLng::new(51.5, -0.09), props(&[("properties", "New point")]));

        let found = store.find_point(1).unwrap();
        assert_eq!(found.id(), 1);
        assert_eq!(found.coordinate, LatLng::new(51.5, -0.09));
        assert_eq!(found.properties.get("properties"), Some("New point"));
    }

    #[test]
    fn test_create_rejects_short_line() {
        let mut store = FeatureStore::new();
        let err = store
            .add_line(1, vec![LatLng::new(1.0, 1.0)], Properties::new())
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::MalformedGeometry {
                kind: FeatureKind::Line,
                len: 1,
                min: 2
            }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_polygon_ring_normalized_on_create() {
        let mut store = FeatureStore::new();
        let ring = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(0.0, 0.0),
        ];
        let polygon = store.add_polygon(1, ring, Properties::new()).unwrap();
        assert_eq!(polygon.vertex_count(), 3);
        assert_eq!(polygon.ring.last(), Some(&LatLng::new(1.0, 1.0)));
    }

    #[test]
    fn test_triangle_ring_collapses_below_minimum() {
        let mut store = FeatureStore::new();
        // Closed triangle ring: dropping the closing vertex leaves 2.
        let ring = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(1.0, 1.0),
            LatLng::new(0.0, 0.0),
        ];
        let err = store.add_polygon(1, ring, Properties::new()).unwrap_err();
        assert!(matches!(err, StoreError::MalformedGeometry { .. }));
    }

    #[test]
    fn test_duplicate_id_creates_second_entry() {
        let mut store = FeatureStore::new();
        store.add_point(1, LatLng::new(0.0, 0.0), Properties::new());
        store.add_point(1, LatLng::new(2.0, 2.0), Properties::new());
        assert_eq!(store.points().len(), 2);
        // find returns the first match
        assert_eq!(store.find_point(1).unwrap().coordinate, LatLng::new(0.0, 0.0));
    }

    #[test]
    fn test_edit_replaces_geometry_only() {
        let mut store = FeatureStore::new();
        store
            .add_line(
                5,
                vec![LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)],
                props(&[("properties", "New Line")]),
            )
            .unwrap();

        store
            .edit_line(5, vec![LatLng::new(3.0, 3.0), LatLng::new(4.0, 4.0)])
            .unwrap();

        let line = store.find_line(5).unwrap();
        assert_eq!(line.id(), 5);
        assert_eq!(line.coordinates[0], LatLng::new(3.0, 3.0));
        assert_eq!(line.properties.get("properties"), Some("New Line"));
    }

    #[test]
    fn test_edit_missing_feature() {
        let mut store = FeatureStore::new();
        let err = store.edit_point(42, LatLng::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::NotFound {
                kind: FeatureKind::Point,
                id: 42
            }
        ));
    }

    #[test]
    fn test_set_properties_leaves_geometry() {
        let mut store = FeatureStore::new();
        store.add_point(1, LatLng::new(5.0, 6.0), props(&[("properties", "New point")]));

        store
            .set_properties(FeatureKind::Point, 1, props(&[("name", "depot")]))
            .unwrap();

        let point = store.find_point(1).unwrap();
        assert_eq!(point.coordinate, LatLng::new(5.0, 6.0));
        assert_eq!(point.properties.get("name"), Some("depot"));
        assert!(point.properties.get("properties").is_none());
    }

    #[test]
    fn test_remove_existing() {
        let mut store = FeatureStore::new();
        store.add_point(1, LatLng::new(0.0, 0.0), Properties::new());
        store.remove_point(1).unwrap();
        assert!(store.find_point(1).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_missing_is_an_error() {
        let mut store = FeatureStore::new();
        store.add_point(1, LatLng::new(0.0, 0.0), Properties::new());
        let err = store.remove_point(2).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 2, .. }));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_bounds_union() {
        let mut store = FeatureStore::new();
        store.add_point(1, LatLng::new(10.0, 20.0), Properties::new());
        store
            .add_line(
                2,
                vec![LatLng::new(-5.0, 0.0), LatLng::new(0.0, 30.0)],
                Properties::new(),
            )
            .unwrap();

        let bounds = store.bounds().unwrap();
        assert!((bounds.x0 - 0.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - -5.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = FeatureStore::new();
        store.add_point(1, LatLng::new(1.5, 2.5), props(&[("properties", "GeoJson Point")]));
        store
            .add_polygon(
                2,
                vec![
                    LatLng::new(0.0, 0.0),
                    LatLng::new(0.0, 1.0),
                    LatLng::new(1.0, 1.0),
                ],
                Properties::new(),
            )
            .unwrap();

        let json = store.to_json().unwrap();
        let restored = FeatureStore::from_json(&json).unwrap();
        assert_eq!(restored.points().len(), 1);
        assert_eq!(restored.polygons().len(), 1);
        assert_eq!(
            restored.find_point(1).unwrap().properties.get("properties"),
            Some("GeoJson Point")
        );
    }
}
