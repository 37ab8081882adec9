//! Entity handles and the handle allocator.
//!
//! An [`Entity`] is an opaque `u64` token. It owns no memory; the registry
//! uses it as a key into its entity map. Handle `0` is reserved as the
//! invalid sentinel and is never issued.

use serde::{Deserialize, Serialize};

/// An opaque entity handle.
///
/// Handles are issued monotonically by [`EntityAllocator`] and are never
/// reused for the lifetime of the allocator, even after the entity is
/// destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity(pub u64);

impl Entity {
    /// The null / invalid entity sentinel.
    pub const INVALID: Entity = Entity(0);

    /// Create an entity from a raw `u64` handle.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` handle.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is a valid (non-zero) handle.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Issues entity handles.
///
/// The handle value equals the number of entities constructed so far, so the
/// first handle is `1` and values are never recycled.
#[derive(Debug)]
pub struct EntityAllocator {
    count: u64,
}

impl EntityAllocator {
    /// Creates a new allocator that has issued no handles.
    #[must_use]
    pub fn new() -> Self {
        Self { count: 0 }
    }

    /// Allocates a fresh entity handle.
    ///
    /// # Panics
    ///
    /// Panics if the `u64` handle space is exhausted.
    pub fn allocate(&mut self) -> Entity {
        self.count = self
            .count
            .checked_add(1)
            .expect("entity handle space exhausted");
        Entity(self.count)
    }

    /// Returns the number of handles issued so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_entity_creation() {
        let e = Entity::from_raw(42);
        assert_eq!(e.id(), 42);
        assert!(e.is_valid());
    }

    #[test]
    fn test_entity_invalid() {
        assert!(!Entity::INVALID.is_valid());
        assert_eq!(Entity::INVALID.id(), 0);
    }

    #[test]
    fn test_entity_display() {
        assert_eq!(Entity::from_raw(7).to_string(), "Entity(7)");
    }

    #[test]
    fn test_allocator_handle_equals_construct_count() {
        let mut alloc = EntityAllocator::new();
        assert_eq!(alloc.count(), 0);
        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        let e3 = alloc.allocate();
        assert_eq!(e1.id(), 1);
        assert_eq!(e2.id(), 2);
        assert_eq!(e3.id(), 3);
        assert_eq!(alloc.count(), 3);
    }

    #[test]
    fn test_allocator_handles_distinct_and_non_zero() {
        let mut alloc = EntityAllocator::new();
        let handles: Vec<Entity> = (0..1000).map(|_| alloc.allocate()).collect();
        assert!(handles.iter().all(|e| e.is_valid()));
        let unique: HashSet<Entity> = handles.iter().copied().collect();
        assert_eq!(unique.len(), handles.len());
    }

    #[test]
    #[should_panic(expected = "entity handle space exhausted")]
    fn test_allocator_exhaustion_is_fatal() {
        let mut alloc = EntityAllocator { count: u64::MAX };
        let _ = alloc.allocate();
    }

    #[test]
    fn test_entity_serializes_as_raw_handle() {
        let json = serde_json::to_string(&Entity::from_raw(999)).unwrap();
        assert_eq!(json, "999");
    }
}
