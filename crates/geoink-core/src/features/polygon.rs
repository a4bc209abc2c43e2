//! Polygon feature.

use super::{coordinates_bounds, FeatureEntity, FeatureId, FeatureKind, LatLng};
use crate::properties::Properties;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A polygon ring with its property mapping.
///
/// The ring never stores a duplicated closing vertex; rings are normalized
/// before they reach the store, and the store rejects rings with fewer than
/// three vertices after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonFeature {
    pub(crate) id: FeatureId,
    /// Ring vertices in drawing order, without the closing vertex.
    pub ring: Vec<LatLng>,
    /// Free-form key/value properties.
    pub properties: Properties,
}

impl PolygonFeature {
    /// Create a new polygon feature from an already-normalized ring.
    pub fn new(id: FeatureId, ring: Vec<LatLng>, properties: Properties) -> Self {
        Self {
            id,
            ring,
            properties,
        }
    }

    /// Number of ring vertices.
    pub fn vertex_count(&self) -> usize {
        self.ring.len()
    }
}

impl FeatureEntity for PolygonFeature {
    fn id(&self) -> FeatureId {
        self.id
    }

    fn kind(&self) -> FeatureKind {
        FeatureKind::Polygon
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    fn bounds(&self) -> Rect {
        coordinates_bounds(&self.ring).unwrap_or(Rect::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_creation() {
        let polygon = PolygonFeature::new(
            9,
            vec![
                LatLng::new(0.0, 0.0),
                LatLng::new(0.0, 1.0),
                LatLng::new(1.0, 1.0),
            ],
            Properties::new(),
        );
        assert_eq!(polygon.id(), 9);
        assert_eq!(polygon.kind(), FeatureKind::Polygon);
        assert_eq!(polygon.vertex_count(), 3);
    }
}
