//! Per-entity bookkeeping of which table slots hold its components.

use crate::component::ComponentTypeId;

/// The `(type key, slot)` pairs owned by one entity.
///
/// A type key appears at most once. Order follows insertion and only affects
/// [`component_types`](Self::component_types).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    entries: Vec<(ComponentTypeId, usize)>,
}

impl EntityRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The slot holding this entity's component of type `key`.
    #[must_use]
    pub fn slot_of(&self, key: ComponentTypeId) -> Option<usize> {
        self.entries
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|&(_, slot)| slot)
    }

    /// Returns `true` if the entity holds a component of type `key`.
    #[must_use]
    pub fn contains(&self, key: ComponentTypeId) -> bool {
        self.slot_of(key).is_some()
    }

    /// Record that the component of type `key` lives in `slot`.
    ///
    /// The caller guarantees `key` is not already present.
    pub fn push(&mut self, key: ComponentTypeId, slot: usize) {
        debug_assert!(!self.contains(key), "duplicate component key in record");
        self.entries.push((key, slot));
    }

    /// Forget the component of type `key`, returning its slot.
    pub fn remove(&mut self, key: ComponentTypeId) -> Option<usize> {
        let position = self.entries.iter().position(|(entry_key, _)| *entry_key == key)?;
        Some(self.entries.remove(position).1)
    }

    /// The type keys held by the entity, in insertion order.
    #[must_use]
    pub fn component_types(&self) -> Vec<ComponentTypeId> {
        self.entries.iter().map(|&(key, _)| key).collect()
    }

    /// Iterate over `(type key, slot)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentTypeId, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of components held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the entity holds no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
