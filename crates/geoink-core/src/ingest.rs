//! GeoJSON seed ingestion.
//!
//! Converts an already-loaded GeoJSON document into per-kind seed lists for
//! the seed matcher. Reading the file from disk is the caller's concern.

use crate::features::{normalize_ring, LatLng};
use thiserror::Error;

/// Ingestion errors.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing 'features' array")]
    MissingFeatures,
}

/// Geometries from an ingested dataset, grouped by kind in document order.
///
/// These are the geometries the rendering surface is expected to re-emit as
/// drawing-layer objects during its initial paint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedBatch {
    /// Point seeds (only `public_transport = stop_position` features).
    pub points: Vec<LatLng>,
    /// Line seeds, each with at least two vertices.
    pub lines: Vec<Vec<LatLng>>,
    /// Polygon outer rings, closing vertex dropped, at least three vertices.
    pub polygons: Vec<Vec<LatLng>>,
}

impl SeedBatch {
    /// Create an empty batch (a session with no pre-loaded dataset).
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the batch carries no seeds at all.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty() && self.lines.is_empty() && self.polygons.is_empty()
    }

    /// Parse a GeoJSON FeatureCollection into a seed batch.
    ///
    /// GeoJSON positions are `[lng, lat]` and are swapped into `LatLng` here.
    /// Point features are kept only when tagged `public_transport =
    /// stop_position`; lines need at least two positions; polygons contribute
    /// their outer ring, normalized, with at least three vertices remaining.
    /// Individually malformed features are skipped with a warning.
    pub fn from_geojson(json: &str) -> Result<Self, IngestError> {
        let data: serde_json::Value = serde_json::from_str(json)?;

        let features = data
            .get("features")
            .and_then(|f| f.as_array())
            .ok_or(IngestError::MissingFeatures)?;

        let mut batch = Self::new();

        for feature in features {
            let Some(geometry) = feature.get("geometry") else {
                log::warn!("skipping feature without geometry");
                continue;
            };
            let geometry_type = geometry.get("type").and_then(|t| t.as_str()).unwrap_or("");
            let coordinates = geometry.get("coordinates");

            match geometry_type {
                "Point" => {
                    let is_stop = feature
                        .get("properties")
                        .and_then(|p| p.get("public_transport"))
                        .and_then(|v| v.as_str())
                        == Some("stop_position");
                    if !is_stop {
                        continue;
                    }
                    if let Some(coordinate) = coordinates.and_then(parse_position) {
                        batch.points.push(coordinate);
                    } else {
                        log::warn!("skipping Point feature with malformed coordinates");
                    }
                }
                "LineString" => {
                    let Some(coords) = coordinates.and_then(parse_position_sequence) else {
                        log::warn!("skipping LineString feature with malformed coordinates");
                        continue;
                    };
                    if coords.len() >= 2 {
                        batch.lines.push(coords);
                    }
                }
                "Polygon" => {
                    // Outer ring only; holes are not rendered as seeds.
                    let Some(ring) = coordinates
                        .and_then(|c| c.as_array())
                        .and_then(|rings| rings.first())
                        .and_then(parse_position_sequence)
                    else {
                        log::warn!("skipping Polygon feature with malformed coordinates");
                        continue;
                    };
                    let ring = normalize_ring(ring);
                    if ring.len() >= 3 {
                        batch.polygons.push(ring);
                    }
                }
                _ => {}
            }
        }

        Ok(batch)
    }
}

/// Parse a single GeoJSON position (`[lng, lat]`, extra members ignored).
fn parse_position(value: &serde_json::Value) -> Option<LatLng> {
    let position = value.as_array()?;
    let lng = position.first().and_then(|v| v.as_f64())?;
    let lat = position.get(1).and_then(|v| v.as_f64())?;
    Some(LatLng::new(lat, lng))
}

/// Parse an array of GeoJSON positions.
fn parse_position_sequence(value: &serde_json::Value) -> Option<Vec<LatLng>> {
    value.as_array()?.iter().map(parse_position).collect()
}
