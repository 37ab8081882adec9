//! The single-threaded entity-component registry.
//!
//! The [`Registry`] owns the handle allocator, one [`EntityRecord`] per live
//! entity, and every component table. It is the only place where the
//! cross-cutting invariants are maintained:
//!
//! - every recorded `(type, slot)` pair points at an occupied slot of that
//!   exact type;
//! - a component type appears at most once per entity;
//! - no two live entities share a slot in the same table.
//!
//! References returned by [`get_component`](Registry::get_component) and
//! [`add_component`](Registry::add_component) are ordinary borrows of the
//! registry, so the borrow checker rules out holding one across a mutating
//! call.

use std::collections::BTreeMap;

use tracing::debug;

use hyper_component::{
    Component, ComponentSet, ComponentTypeId, Entity, EntityAllocator, EntityRecord, Tables,
};

use crate::error::RegistryError;

/// Entity-component storage with query iteration.
///
/// Entities are kept in a map ordered by handle, and handles are issued
/// monotonically, so every iteration visits entities in construction order.
#[derive(Debug, Default)]
pub struct Registry {
    /// Entity handle allocator.
    allocator: EntityAllocator,
    /// Which table slots each live entity owns.
    entities: BTreeMap<Entity, EntityRecord>,
    /// One table per component type.
    tables: Tables,
}

impl Registry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Entity lifecycle --

    /// Issue a fresh entity handle with no components.
    pub fn construct(&mut self) -> Entity {
        let entity = self.allocator.allocate();
        self.entities.insert(entity, EntityRecord::new());
        debug!(%entity, "constructed entity");
        entity
    }

    /// Destroy an entity, dropping all of its components.
    ///
    /// The freed slots return to their tables' free-lists. The handle is not
    /// reissued; later calls with it fail with
    /// [`RegistryError::UnknownEntity`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEntity`] if the entity does not exist.
    pub fn destroy(&mut self, entity: Entity) -> Result<(), RegistryError> {
        let record = self
            .entities
            .remove(&entity)
            .ok_or(RegistryError::UnknownEntity(entity))?;
        for (key, slot) in record.iter() {
            if let Some(table) = self.tables.erased_mut(key) {
                table.remove_slot(slot)?;
            }
        }
        debug!(%entity, components = record.len(), "destroyed entity");
        Ok(())
    }

    /// Returns `true` if the entity exists.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains_key(&entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of handles issued so far, including destroyed entities.
    #[must_use]
    pub fn constructed_count(&self) -> u64 {
        self.allocator.count()
    }

    fn record(&self, entity: Entity) -> Result<&EntityRecord, RegistryError> {
        self.entities
            .get(&entity)
            .ok_or(RegistryError::UnknownEntity(entity))
    }

    // -- Single-component operations --

    /// Attach `value` to `entity` and return a reference to the stored copy.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownEntity`] if the entity does not exist.
    /// - [`RegistryError::TypeKeyCollision`] if `T`'s key belongs to another type.
    /// - [`RegistryError::DuplicateComponent`] if the entity already has a `T`.
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<&mut T, RegistryError> {
        let key = T::component_type_id();
        let record = self
            .entities
            .get_mut(&entity)
            .ok_or(RegistryError::UnknownEntity(entity))?;
        self.tables.check::<T>()?;
        if record.contains(key) {
            return Err(RegistryError::DuplicateComponent {
                entity,
                component: T::type_name(),
            });
        }

        let table = self.tables.get_or_create::<T>()?;
        let slot = table.insert(value);
        record.push(key, slot);
        debug!(%entity, component = T::type_name(), slot, "added component");
        Ok(table.get_mut(slot)?)
    }

    /// Detach the `T` from `entity` and return it.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownEntity`] if the entity does not exist.
    /// - [`RegistryError::TypeKeyCollision`] if `T`'s key belongs to another type.
    /// - [`RegistryError::MissingComponent`] if the entity has no `T`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, RegistryError> {
        let key = T::component_type_id();
        let missing = RegistryError::MissingComponent {
            entity,
            component: T::type_name(),
        };
        let record = self
            .entities
            .get_mut(&entity)
            .ok_or(RegistryError::UnknownEntity(entity))?;
        let table = self.tables.table_mut::<T>()?.ok_or(missing.clone())?;
        let slot = record.slot_of(key).ok_or(missing)?;

        let value = table.remove(slot)?;
        record.remove(key);
        debug!(%entity, component = T::type_name(), slot, "removed component");
        Ok(value)
    }

    /// Borrow the `T` attached to `entity`.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownEntity`] if the entity does not exist.
    /// - [`RegistryError::TypeKeyCollision`] if `T`'s key belongs to another type.
    /// - [`RegistryError::MissingComponent`] if the entity has no `T`.
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, RegistryError> {
        let missing = RegistryError::MissingComponent {
            entity,
            component: T::type_name(),
        };
        let record = self.record(entity)?;
        let table = self.tables.table::<T>()?.ok_or(missing.clone())?;
        let slot = record.slot_of(T::component_type_id()).ok_or(missing)?;
        Ok(table.get(slot)?)
    }

    /// Mutably borrow the `T` attached to `entity`.
    ///
    /// # Errors
    ///
    /// Same as [`get_component`](Self::get_component).
    pub fn get_component_mut<T: Component>(
        &mut self,
        entity: Entity,
    ) -> Result<&mut T, RegistryError> {
        let missing = RegistryError::MissingComponent {
            entity,
            component: T::type_name(),
        };
        let record = self
            .entities
            .get(&entity)
            .ok_or(RegistryError::UnknownEntity(entity))?;
        let table = self.tables.table_mut::<T>()?.ok_or(missing.clone())?;
        let slot = record.slot_of(T::component_type_id()).ok_or(missing)?;
        Ok(table.get_mut(slot)?)
    }

    /// Returns whether `entity` has a `T`. Absence is not an error.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownEntity`] if the entity does not exist.
    /// - [`RegistryError::TypeKeyCollision`] if `T`'s key belongs to another type.
    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool, RegistryError> {
        let record = self.record(entity)?;
        self.tables.check::<T>()?;
        Ok(record.contains(T::component_type_id()))
    }

    /// The table slot holding `entity`'s `T`.
    ///
    /// Slots are per-table and may be reused after a removal.
    ///
    /// # Errors
    ///
    /// Same as [`get_component`](Self::get_component).
    pub fn component_slot<T: Component>(&self, entity: Entity) -> Result<usize, RegistryError> {
        let record = self.record(entity)?;
        self.tables.check::<T>()?;
        record
            .slot_of(T::component_type_id())
            .ok_or(RegistryError::MissingComponent {
                entity,
                component: T::type_name(),
            })
    }

    /// Number of live `T` components across all entities.
    #[must_use]
    pub fn component_count<T: Component>(&self) -> usize {
        match self.tables.table::<T>() {
            Ok(Some(table)) => table.len(),
            _ => 0,
        }
    }

    /// The component type keys held by `entity`, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEntity`] if the entity does not exist.
    pub fn components_of(&self, entity: Entity) -> Result<Vec<ComponentTypeId>, RegistryError> {
        Ok(self.record(entity)?.component_types())
    }

    // -- Multi-component operations --

    /// Returns whether `entity` has every type in `S`, stopping at the first
    /// absence.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownEntity`] if the entity does not exist.
    /// - [`RegistryError::TypeKeyCollision`] if a key in `S` belongs to another type.
    pub fn has_components<S: ComponentSet>(&self, entity: Entity) -> Result<bool, RegistryError> {
        let record = self.record(entity)?;
        S::check(&self.tables)?;
        Ok(S::type_ids().into_iter().all(|key| record.contains(key)))
    }

    /// Detach every type in `S` from `entity`.
    ///
    /// Membership of all types is checked first; if any is absent nothing is
    /// removed.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::UnknownEntity`] if the entity does not exist.
    /// - [`RegistryError::AliasedComponentSet`] if `S` lists a type twice.
    /// - [`RegistryError::TypeKeyCollision`] if a key in `S` belongs to another type.
    /// - [`RegistryError::MissingComponent`] naming the first absent type.
    pub fn remove_components<S: ComponentSet>(
        &mut self,
        entity: Entity,
    ) -> Result<(), RegistryError> {
        let record = self
            .entities
            .get_mut(&entity)
            .ok_or(RegistryError::UnknownEntity(entity))?;
        if let Some(name) = S::aliased_type() {
            return Err(RegistryError::AliasedComponentSet(name));
        }
        S::check(&self.tables)?;

        let keys = S::type_ids();
        for (key, name) in keys.iter().zip(S::type_names()) {
            if !record.contains(*key) {
                return Err(RegistryError::MissingComponent {
                    entity,
                    component: name,
                });
            }
        }

        for key in keys {
            if let (Some(slot), Some(table)) = (record.remove(key), self.tables.erased_mut(key)) {
                table.remove_slot(slot)?;
            }
        }
        debug!(%entity, components = ?S::type_names(), "removed components");
        Ok(())
    }

    // -- Iteration --

    /// Every live entity, in construction order.
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.entities.keys().copied().collect()
    }

    /// Every live entity holding all types in `S`, in construction order.
    ///
    /// Matches exactly the entities [`each_with`](Self::each_with) visits, so
    /// a type whose key is owned by another Rust type matches nothing.
    #[must_use]
    pub fn entities_with<S: ComponentSet>(&self) -> Vec<Entity> {
        self.query::<S>().map(|(entity, _)| entity).collect()
    }

    /// Call `visit` once per live entity, in construction order.
    pub fn each(&self, mut visit: impl FnMut(Entity)) {
        for &entity in self.entities.keys() {
            visit(entity);
        }
    }

    /// Iterate over entities holding all of `S`, yielding shared references
    /// to each listed component.
    pub fn query<S: ComponentSet>(&self) -> impl Iterator<Item = (Entity, S::Ref<'_>)> + '_ {
        let tables = &self.tables;
        self.entities.iter().filter_map(move |(&entity, record)| {
            S::fetch(tables, record).map(|components| (entity, components))
        })
    }

    /// Call `visit` for every entity holding all of `S`, with shared
    /// references to each listed component. Entities missing any type are
    /// skipped.
    pub fn each_with<'a, S, F>(&'a self, mut visit: F)
    where
        S: ComponentSet,
        F: FnMut(Entity, S::Ref<'a>),
    {
        for (entity, components) in self.query::<S>() {
            visit(entity, components);
        }
    }

    /// Call `visit` for every entity holding all of `S`, with mutable
    /// references to each listed component. Entities missing any type are
    /// skipped.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::AliasedComponentSet`] if `S` lists a type twice.
    /// - [`RegistryError::TypeKeyCollision`] if a key in `S` belongs to another type.
    pub fn each_with_mut<S, F>(&mut self, mut visit: F) -> Result<(), RegistryError>
    where
        S: ComponentSet,
        F: for<'a> FnMut(Entity, S::Mut<'a>),
    {
        if let Some(name) = S::aliased_type() {
            return Err(RegistryError::AliasedComponentSet(name));
        }
        S::check(&self.tables)?;

        // A missing table means no entity can hold every type.
        let Some(taken) = S::take(&mut self.tables) else {
            return Ok(());
        };
        let mut guard = TakenTables::<S> {
            tables: &mut self.tables,
            taken: Some(taken),
        };
        if let Some(taken) = guard.taken.as_mut() {
            for (&entity, record) in &self.entities {
                if let Some(components) = S::fetch_mut(taken, record) {
                    visit(entity, components);
                }
            }
        }
        Ok(())
    }
}

/// Puts tables taken for a mutable query back into the map, including when
/// the visitor panics.
struct TakenTables<'t, S: ComponentSet> {
    tables: &'t mut Tables,
    taken: Option<S::Taken>,
}

impl<S: ComponentSet> Drop for TakenTables<'_, S> {
    fn drop(&mut self) {
        if let Some(taken) = self.taken.take() {
            S::restore(self.tables, taken);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Position {
        x: f32,
        y: f32,
    }

    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Velocity {
        x: f32,
        y: f32,
    }

    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Name(String);

    impl Component for Name {
        fn type_name() -> &'static str {
            "Name"
        }
    }

    /// Claims the key of [`Position`] under a different Rust type.
    #[derive(Debug)]
    struct Impostor;

    impl Component for Impostor {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    #[test]
    fn test_construct_issues_distinct_non_zero_handles() {
        let mut registry = Registry::new();
        let a = registry.construct();
        let b = registry.construct();
        assert!(a.is_valid() && b.is_valid());
        assert_ne!(a, b);
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        assert_eq!(registry.entity_count(), 2);
    }

    #[test]
    fn test_add_then_get_returns_inserted_value() {
        let mut registry = Registry::new();
        let e = registry.construct();
        let stored = registry.add_component(e, Position { x: 1.0, y: 2.0 }).unwrap();
        assert_eq!(*stored, Position { x: 1.0, y: 2.0 });
        assert_eq!(
            registry.get_component::<Position>(e),
            Ok(&Position { x: 1.0, y: 2.0 })
        );
    }

    #[test]
    fn test_add_returns_mutable_reference() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap().x = 5.0;
        assert_eq!(registry.get_component::<Position>(e).unwrap().x, 5.0);
    }

    #[test]
    fn test_has_component_tracks_add_and_remove() {
        let mut registry = Registry::new();
        let e = registry.construct();
        assert_eq!(registry.has_component::<Position>(e), Ok(false));
        registry.add_component(e, ORIGIN).unwrap();
        assert_eq!(registry.has_component::<Position>(e), Ok(true));
        registry.remove_component::<Position>(e).unwrap();
        assert_eq!(registry.has_component::<Position>(e), Ok(false));
    }

    #[test]
    fn test_unknown_entity_rejected_everywhere() {
        let mut registry = Registry::new();
        let ghost = Entity::from_raw(42);
        let unknown = Err(RegistryError::UnknownEntity(ghost));

        assert_eq!(registry.add_component(ghost, ORIGIN).map(|p| *p), unknown);
        assert_eq!(registry.remove_component::<Position>(ghost), unknown);
        assert_eq!(registry.get_component::<Position>(ghost).map(|p| *p), unknown);
        assert_eq!(registry.has_component::<Position>(ghost).map(|_| ORIGIN), unknown);
        assert_eq!(
            registry.remove_components::<(Position, Velocity)>(ghost),
            Err(RegistryError::UnknownEntity(ghost))
        );
        assert_eq!(
            registry.destroy(ghost),
            Err(RegistryError::UnknownEntity(ghost))
        );
        assert!(registry.components_of(ghost).is_err());
        assert!(registry.has_components::<(Position,)>(ghost).is_err());
    }

    #[test]
    fn test_invalid_handle_is_unknown() {
        let mut registry = Registry::new();
        registry.construct();
        assert_eq!(
            registry.has_component::<Position>(Entity::INVALID),
            Err(RegistryError::UnknownEntity(Entity::INVALID))
        );
    }

    #[test]
    fn test_duplicate_add_fails_and_keeps_original() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, Position { x: 1.0, y: 1.0 }).unwrap();

        let err = registry
            .add_component(e, Position { x: 9.0, y: 9.0 })
            .map(|p| *p)
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateComponent {
                entity: e,
                component: "Position"
            }
        );
        assert_eq!(
            registry.get_component::<Position>(e),
            Ok(&Position { x: 1.0, y: 1.0 })
        );
        assert_eq!(registry.component_count::<Position>(), 1);
    }

    #[test]
    fn test_remove_missing_fails_without_side_effects() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();

        assert_eq!(
            registry.remove_component::<Velocity>(e),
            Err(RegistryError::MissingComponent {
                entity: e,
                component: "Velocity"
            })
        );
        assert_eq!(registry.components_of(e).unwrap(), vec![Position::component_type_id()]);
        assert_eq!(registry.get_component::<Position>(e), Ok(&ORIGIN));
    }

    #[test]
    fn test_remove_returns_value() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, Name("crate".to_string())).unwrap();
        assert_eq!(
            registry.remove_component::<Name>(e),
            Ok(Name("crate".to_string()))
        );
        assert_eq!(registry.component_count::<Name>(), 0);
    }

    #[test]
    fn test_get_missing_component() {
        let mut registry = Registry::new();
        let e = registry.construct();
        let other = registry.construct();
        registry.add_component(other, ORIGIN).unwrap();
        assert_eq!(
            registry.get_component::<Position>(e),
            Err(RegistryError::MissingComponent {
                entity: e,
                component: "Position"
            })
        );
        assert!(registry.get_component_mut::<Velocity>(e).is_err());
    }

    #[test]
    fn test_get_component_mut_writes_through() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, Velocity { x: 1.0, y: 1.0 }).unwrap();
        registry.get_component_mut::<Velocity>(e).unwrap().y = -3.0;
        assert_eq!(registry.get_component::<Velocity>(e).unwrap().y, -3.0);
    }

    #[test]
    fn test_slot_reuse_has_no_stale_data() {
        let mut registry = Registry::new();
        let a = registry.construct();
        let b = registry.construct();
        registry.add_component(a, Name("first".to_string())).unwrap();
        let slot = registry.component_slot::<Name>(a).unwrap();

        registry.remove_component::<Name>(a).unwrap();
        registry.add_component(b, Name("second".to_string())).unwrap();

        assert_eq!(registry.component_slot::<Name>(b), Ok(slot));
        assert_eq!(registry.get_component::<Name>(b), Ok(&Name("second".to_string())));
        assert_eq!(registry.has_component::<Name>(a), Ok(false));
    }

    #[test]
    fn test_slots_are_per_table() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();
        registry.add_component(e, Velocity { x: 0.0, y: 0.0 }).unwrap();
        assert_eq!(registry.component_slot::<Position>(e), Ok(0));
        assert_eq!(registry.component_slot::<Velocity>(e), Ok(0));
    }

    #[test]
    fn test_has_components_requires_all() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();
        assert_eq!(registry.has_components::<(Position,)>(e), Ok(true));
        assert_eq!(registry.has_components::<(Position, Velocity)>(e), Ok(false));
        registry.add_component(e, Velocity { x: 1.0, y: 1.0 }).unwrap();
        assert_eq!(registry.has_components::<(Velocity, Position)>(e), Ok(true));
    }

    #[test]
    fn test_remove_components_all_or_nothing() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();

        assert_eq!(
            registry.remove_components::<(Position, Velocity)>(e),
            Err(RegistryError::MissingComponent {
                entity: e,
                component: "Velocity"
            })
        );
        assert_eq!(registry.get_component::<Position>(e), Ok(&ORIGIN));

        registry.add_component(e, Velocity { x: 1.0, y: 1.0 }).unwrap();
        registry.add_component(e, Name("n".to_string())).unwrap();
        registry.remove_components::<(Position, Velocity)>(e).unwrap();
        assert_eq!(registry.components_of(e).unwrap(), vec![Name::component_type_id()]);
        assert_eq!(registry.component_count::<Position>(), 0);
        assert_eq!(registry.component_count::<Velocity>(), 0);
    }

    #[test]
    fn test_remove_components_rejects_aliased_set() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();
        assert_eq!(
            registry.remove_components::<(Position, Position)>(e),
            Err(RegistryError::AliasedComponentSet("Position"))
        );
        assert_eq!(registry.has_component::<Position>(e), Ok(true));
    }

    #[test]
    fn test_key_collision_is_an_error() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();

        let err = registry.add_component(e, Impostor).map(|_| ()).unwrap_err();
        assert!(matches!(err, RegistryError::TypeKeyCollision(_)));
        assert!(registry.get_component::<Impostor>(e).is_err());
        assert!(registry.remove_component::<Impostor>(e).is_err());
        assert_eq!(registry.get_component::<Position>(e), Ok(&ORIGIN));
    }

    #[test]
    fn test_key_collision_matches_nothing_in_listings() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();

        assert!(matches!(
            registry.has_components::<(Impostor,)>(e),
            Err(RegistryError::TypeKeyCollision(_))
        ));
        let mut visits = 0;
        registry.each_with::<(Impostor,), _>(|_, _| visits += 1);
        assert_eq!(visits, 0);
        assert!(registry.entities_with::<(Impostor,)>().is_empty());
        assert_eq!(registry.entities_with::<(Position,)>(), vec![e]);
    }

    #[test]
    fn test_each_visits_every_entity_in_order() {
        let mut registry = Registry::new();
        let expected: Vec<Entity> = (0..5).map(|_| registry.construct()).collect();
        let mut seen = Vec::new();
        registry.each(|e| seen.push(e));
        assert_eq!(seen, expected);
        assert_eq!(registry.entities(), expected);
    }

    #[test]
    fn test_each_with_visits_only_full_matches() {
        let mut registry = Registry::new();
        let both = registry.construct();
        let only_position = registry.construct();
        let only_velocity = registry.construct();
        let both_again = registry.construct();

        for e in [both, only_position, both_again] {
            registry.add_component(e, ORIGIN).unwrap();
        }
        for e in [both, only_velocity, both_again] {
            registry.add_component(e, Velocity { x: 1.0, y: 1.0 }).unwrap();
        }

        let mut seen = Vec::new();
        registry.each_with::<(Position, Velocity), _>(|e, (p, v)| {
            assert_eq!(*p, ORIGIN);
            assert_eq!(v.x, 1.0);
            seen.push(e);
        });
        assert_eq!(seen, vec![both, both_again]);
        assert_eq!(
            registry.entities_with::<(Position, Velocity)>(),
            vec![both, both_again]
        );
        assert_eq!(
            registry.entities_with::<(Position,)>(),
            vec![both, only_position, both_again]
        );
    }

    #[test]
    fn test_query_iterator() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, Name("a".to_string())).unwrap();
        let names: Vec<&str> = registry
            .query::<(Name,)>()
            .map(|(_, (name,))| name.0.as_str())
            .collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_each_with_mut_mutates_in_place() {
        let mut registry = Registry::new();
        let mover = registry.construct();
        let statue = registry.construct();
        registry.add_component(mover, ORIGIN).unwrap();
        registry.add_component(mover, Velocity { x: 1.0, y: 2.0 }).unwrap();
        registry.add_component(statue, ORIGIN).unwrap();

        for _ in 0..3 {
            registry
                .each_with_mut::<(Position, Velocity), _>(|_, (p, v)| {
                    p.x += v.x;
                    p.y += v.y;
                })
                .unwrap();
        }

        assert_eq!(
            registry.get_component::<Position>(mover),
            Ok(&Position { x: 3.0, y: 6.0 })
        );
        assert_eq!(registry.get_component::<Position>(statue), Ok(&ORIGIN));
    }

    #[test]
    fn test_each_with_mut_without_table_visits_nothing() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();
        let mut visits = 0;
        registry
            .each_with_mut::<(Position, Velocity), _>(|_, _| visits += 1)
            .unwrap();
        assert_eq!(visits, 0);
        assert_eq!(registry.get_component::<Position>(e), Ok(&ORIGIN));
    }

    #[test]
    fn test_each_with_mut_rejects_aliased_set() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();
        assert_eq!(
            registry.each_with_mut::<(Position, Position), _>(|_, _| {}),
            Err(RegistryError::AliasedComponentSet("Position"))
        );
    }

    #[test]
    fn test_each_with_mut_restores_tables_after_panic() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, ORIGIN).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = registry.each_with_mut::<(Position,), _>(|_, _| panic!("visitor failed"));
        }));
        assert!(result.is_err());
        assert_eq!(registry.get_component::<Position>(e), Ok(&ORIGIN));
    }

    #[test]
    fn test_destroy_frees_slots_and_retires_handle() {
        let mut registry = Registry::new();
        let doomed = registry.construct();
        registry.add_component(doomed, ORIGIN).unwrap();
        registry.add_component(doomed, Name("x".to_string())).unwrap();

        registry.destroy(doomed).unwrap();
        assert!(!registry.contains(doomed));
        assert_eq!(registry.entity_count(), 0);
        assert_eq!(registry.component_count::<Position>(), 0);
        assert_eq!(registry.component_count::<Name>(), 0);

        let next = registry.construct();
        assert_ne!(next, doomed);
        assert_eq!(next.id(), 2);
        assert_eq!(registry.constructed_count(), 2);
        assert_eq!(
            registry.get_component::<Position>(doomed),
            Err(RegistryError::UnknownEntity(doomed))
        );
    }

    #[test]
    fn test_components_of_in_insertion_order() {
        let mut registry = Registry::new();
        let e = registry.construct();
        registry.add_component(e, Velocity { x: 0.0, y: 0.0 }).unwrap();
        registry.add_component(e, ORIGIN).unwrap();
        assert_eq!(
            registry.components_of(e).unwrap(),
            vec![Velocity::component_type_id(), Position::component_type_id()]
        );
    }
}
