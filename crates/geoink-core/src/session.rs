//! Editing session: one owning instance of store plus matcher.
//!
//! All rendering-surface notifications and property-editor saves funnel
//! through a single `EditorSession` constructed once per editing session.
//! Every handler runs its full read-modify-write synchronously, so a
//! single-threaded event dispatch needs no further discipline; a concurrent
//! surface must serialize access to the session (one owning task or a
//! mutex).

use crate::features::{Feature, FeatureId, FeatureKind, Geometry};
use crate::ingest::SeedBatch;
use crate::properties::Properties;
use crate::seed::{SeedMatch, SeedMatcher};
use crate::store::{FeatureStore, StoreResult};
use crate::style::LayerStyle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notifications emitted by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// A layer appeared on the surface, seeded or user-drawn alike.
    ObjectAdded { id: FeatureId, geometry: Geometry },
    /// The user finished drawing a brand-new object.
    ObjectCreated { id: FeatureId, geometry: Geometry },
    /// The user finished an edit pass over one or more objects.
    ObjectsEdited { edits: Vec<(FeatureId, Geometry)> },
    /// The user deleted one or more objects.
    ObjectsDeleted { removals: Vec<(FeatureKind, FeatureId)> },
}

/// Outcome of an `object_added` notification.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The object matched a seed and is now a tracked feature.
    Seeded(Feature),
    /// Not a seed; nothing was created. User-drawn objects arrive separately
    /// through the created path.
    Ignored,
}

/// An editing session over a (possibly empty) ingested dataset.
#[derive(Debug, Clone)]
pub struct EditorSession {
    /// Unique session identifier.
    pub id: String,
    store: FeatureStore,
    matcher: SeedMatcher,
}

impl EditorSession {
    /// Create a session over an ingested seed batch.
    pub fn new(batch: SeedBatch) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            store: FeatureStore::new(),
            matcher: SeedMatcher::new(batch),
        }
    }

    /// The feature store.
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// The mutable feature store.
    pub fn store_mut(&mut self) -> &mut FeatureStore {
        &mut self.store
    }

    /// Check whether every seed of a kind has been bound to a feature.
    pub fn is_fully_matched(&self, kind: FeatureKind) -> bool {
        self.matcher.is_fully_matched(kind)
    }

    /// Seeds of a kind still waiting for their drawing-layer object.
    pub fn pending_seeds(&self, kind: FeatureKind) -> usize {
        self.matcher.pending(kind)
    }

    /// Dispatch a surface notification.
    pub fn handle(&mut self, event: MapEvent) -> StoreResult<()> {
        match event {
            MapEvent::ObjectAdded { id, geometry } => {
                self.object_added(id, geometry)?;
            }
            MapEvent::ObjectCreated { id, geometry } => {
                self.object_created(id, geometry)?;
            }
            MapEvent::ObjectsEdited { edits } => self.objects_edited(edits)?,
            MapEvent::ObjectsDeleted { removals } => self.objects_deleted(&removals)?,
        }
        Ok(())
    }

    /// Seed reconciliation path, invoked for every layer the surface draws.
    ///
    /// A geometry that claims a seed becomes a tracked feature under the
    /// surface's id, with seeded default properties. Everything else is
    /// ignored here: once a kind's seeds are exhausted the surface's
    /// user-drawn layers flow through `object_created` instead.
    pub fn object_added(&mut self, id: FeatureId, geometry: Geometry) -> StoreResult<AddOutcome> {
        match self.matcher.match_object(&geometry) {
            SeedMatch::Claimed(_) => {
                let properties = seeded_defaults(geometry.kind());
                let feature = self.store.create(id, geometry, properties)?;
                Ok(AddOutcome::Seeded(feature))
            }
            SeedMatch::Ignored => Ok(AddOutcome::Ignored),
        }
    }

    /// Direct creation path for a user-drawn object.
    pub fn object_created(&mut self, id: FeatureId, geometry: Geometry) -> StoreResult<Feature> {
        let properties = created_defaults(geometry.kind());
        self.store.create(id, geometry, properties)
    }

    /// Apply a batch of geometry edits. Fails on the first unknown id,
    /// leaving earlier edits in place.
    pub fn objects_edited(&mut self, edits: Vec<(FeatureId, Geometry)>) -> StoreResult<()> {
        for (id, geometry) in edits {
            self.store.set_geometry(id, geometry)?;
        }
        Ok(())
    }

    /// Apply a batch of deletions. Deleting an unknown id is an error, not a
    /// no-op.
    pub fn objects_deleted(&mut self, removals: &[(FeatureKind, FeatureId)]) -> StoreResult<()> {
        for &(kind, id) in removals {
            self.store.remove(kind, id)?;
        }
        Ok(())
    }

    /// Commit a property-editor save and derive the style subset for the
    /// surface to re-apply.
    pub fn save_properties(
        &mut self,
        kind: FeatureKind,
        id: FeatureId,
        properties: Properties,
    ) -> StoreResult<LayerStyle> {
        let style = LayerStyle::from_properties(&properties);
        self.store.set_properties(kind, id, properties)?;
        Ok(style)
    }
}

/// Default properties for a feature bound from the ingested dataset.
fn seeded_defaults(kind: FeatureKind) -> Properties {
    match kind {
        FeatureKind::Point => Properties::from_pairs([("properties", "GeoJson Point")]),
        FeatureKind::Line => Properties::from_pairs([
            ("properties", "GeoJson Line"),
            ("weight", "5"),
            ("color", "#ff0000"),
        ]),
        FeatureKind::Polygon => Properties::from_pairs([
            ("properties", "GeoJson Polygon"),
            ("color", "#0000FF"),
            ("fillColor", "#0000FF"),
        ]),
    }
}

/// Default properties for a feature the user drew directly.
fn created_defaults(kind: FeatureKind) -> Properties {
    match kind {
        FeatureKind::Point => Properties::from_pairs([("properties", "New point")]),
        FeatureKind::Line => {
            Properties::from_pairs([("properties", "New Line"), ("color", "#0000FF")])
        }
        FeatureKind::Polygon => Properties::from_pairs([
            ("properties", "New polygon"),
            ("color", "#0000FF"),
            ("fillColor", "#0000FF"),
        ]),
    }
}
