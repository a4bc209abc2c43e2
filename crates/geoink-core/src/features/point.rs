//! Point feature.

use super::{FeatureEntity, FeatureId, FeatureKind, LatLng};
use crate::properties::Properties;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// A single marker position with its property mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    pub(crate) id: FeatureId,
    /// Marker position.
    pub coordinate: LatLng,
    /// Free-form key/value properties.
    pub properties: Properties,
}

impl PointFeature {
    /// Create a new point feature.
    pub fn new(id: FeatureId, coordinate: LatLng, properties: Properties) -> Self {
        Self {
            id,
            coordinate,
            properties,
        }
    }
}

impl FeatureEntity for PointFeature {
    fn id(&self) -> FeatureId {
        self.id
    }

    fn kind(&self) -> FeatureKind {
        FeatureKind::Point
    }

    fn properties(&self) -> &Properties {
        &self.properties
    }

    fn properties_mut(&mut self) -> &mut Properties {
        &mut self.properties
    }

    fn bounds(&self) -> Rect {
        let p = self.coordinate.to_point();
        Rect::from_points(p, p)
    }
}
