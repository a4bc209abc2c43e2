//! GeoInk Core Library
//!
//! Platform-agnostic data management for the GeoInk map feature editor:
//! the feature store, seed matching, and the property editing protocol.
//! Rendering, input capture, and editor widgets live elsewhere and talk to
//! this crate through `EditorSession`.

pub mod editor;
pub mod features;
pub mod ingest;
pub mod properties;
pub mod seed;
pub mod session;
pub mod store;
pub mod style;

pub use editor::PropertyEditor;
pub use features::{
    Feature, FeatureEntity, FeatureId, FeatureKind, Geometry, LatLng, LineFeature, PointFeature,
    PolygonFeature,
};
pub use ingest::{IngestError, SeedBatch};
pub use properties::Properties;
pub use seed::{SeedMatch, SeedMatcher};
pub use session::{AddOutcome, EditorSession, MapEvent};
pub use store::{FeatureStore, StoreError, StoreResult};
pub use style::{Color, LayerStyle};
