//! Property editing protocol.
//!
//! The key/value editor works on a local copy of a feature's properties and
//! commits it to the store in one step. Until a save succeeds, the buffer is
//! the source of truth: a failed save leaves the user's in-progress edits
//! intact for retry.

use crate::features::{FeatureId, FeatureKind};
use crate::properties::Properties;
use crate::store::{FeatureStore, StoreResult};
use crate::style::LayerStyle;

/// Local edit buffer for one feature's property mapping.
#[derive(Debug, Clone)]
pub struct PropertyEditor {
    id: FeatureId,
    kind: FeatureKind,
    buffer: Properties,
}

impl PropertyEditor {
    /// Open an editor over a feature's current properties.
    pub fn open(store: &FeatureStore, kind: FeatureKind, id: FeatureId) -> StoreResult<Self> {
        let buffer = store.properties(kind, id)?.clone();
        Ok(Self { id, kind, buffer })
    }

    /// The edited feature's id.
    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// The edited feature's kind.
    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    /// The uncommitted edit buffer, in display order.
    pub fn buffer(&self) -> &Properties {
        &self.buffer
    }

    /// Set a value, adding the key if it is not present yet.
    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.buffer.insert(key, value);
    }

    /// Rename a key within the buffer (atomic remove-old/insert-new; the
    /// entry keeps its slot, collisions are last-write-wins). Nothing
    /// reaches the store until `save`.
    pub fn rename_key(&mut self, old: &str, new: &str) -> bool {
        self.buffer.rename(old, new)
    }

    /// Append a placeholder row named `new_property_<count>` with an empty
    /// value, returning the generated key.
    ///
    /// The count is the current buffer length, so an add after a delete can
    /// regenerate a name that still exists; the existing row is overwritten
    /// in place rather than duplicated.
    pub fn add_row(&mut self) -> String {
        let key = format!("new_property_{}", self.buffer.len());
        self.buffer.insert(key.clone(), "");
        key
    }

    /// Delete a row from the buffer.
    pub fn remove_row(&mut self, key: &str) -> bool {
        self.buffer.remove(key).is_some()
    }

    /// Commit the buffer to the store and derive the style subset the
    /// rendering surface should re-apply.
    ///
    /// On failure the buffer is untouched and the editor can retry.
    pub fn save(&self, store: &mut FeatureStore) -> StoreResult<LayerStyle> {
        store.set_properties(self.kind, self.id, self.buffer.clone())?;
        log::debug!("saved properties for {} {}", self.kind, self.id);
        Ok(LayerStyle::from_properties(&self.buffer))
    }
}
