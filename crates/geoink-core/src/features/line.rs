//! Line feature.

use super::{coordinates_bounds, FeatureEntity, FeatureId, FeatureKind, LatLng};
use crate::properties::Properties;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// An ordered coordinate sequence with its property mapping.
///
/// The store only ever holds lines with at least two coordinates; shorter
/// input is rejected at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFeature {
    pub(crate) id: FeatureId,
    /// Vertices in drawing order.
    pub coordinates: Vec<LatLng>,
    /// Free-form key/value properties.
    pub properties: Properties,
}

impl LineFeature {
    /// Create a new line feature.
    pub fn new(id: FeatureId, coordinates: Vec<LatLng>, properties: Properties) -> Self {
        Self {
            id,
            coordinates,
            properties,
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.coordinates.len()
    }
}

impl FeatureEntity for LineFeature {
    fn id(&self) -> FeatureId {
        self.id
    }

    fn kind(&self) -> FeatureKind {
        FeatureKind::Line
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    fn bounds(&self) -> Rect {
        coordinates_bounds(&self.coordinates).unwrap_or(Rect::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_creation() {
        let line = LineFeature::new(
            3,
            vec![LatLng::new(1.0, 1.0), LatLng::new(2.0, 2.0)],
            Properties::new(),
        );
        assert_eq!(line.id(), 3);
        assert_eq!(line.vertex_count(), 2);
    }

    #[test]
    fn test_line_bounds() {
        let line = LineFeature::new(
            1,
            vec![LatLng::new(10.0, 20.0), LatLng::new(50.0, 80.0)],
            Properties::new(),
        );
        let bounds = line.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 50.0).abs() < f64::EPSILON);
    }
}
