//! A lock-guarded registry handle for use across threads.
//!
//! [`SharedRegistry`] wraps a [`Registry`] in an `Arc<RwLock<_>>`. Each method
//! takes the lock once, does its work, and releases it before returning, so
//! no operation ever re-acquires a lock it already holds. Borrowing methods
//! take a closure instead of returning a reference, because a reference
//! cannot outlive the guard.
//!
//! Calling back into the same `SharedRegistry` from inside [`read`],
//! [`write`], [`with_component`] or [`with_component_mut`] deadlocks and is
//! not supported. [`each`] is the exception: it releases the lock before the
//! visitor runs.
//!
//! [`read`]: SharedRegistry::read
//! [`write`]: SharedRegistry::write
//! [`with_component`]: SharedRegistry::with_component
//! [`with_component_mut`]: SharedRegistry::with_component_mut
//! [`each`]: SharedRegistry::each

use std::sync::Arc;

use parking_lot::RwLock;

use hyper_component::{Component, ComponentSet, Entity};

use crate::error::RegistryError;
use crate::registry::Registry;

/// Cloneable, thread-safe handle to a [`Registry`].
#[derive(Debug, Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<RwLock<Registry>>,
}

impl SharedRegistry {
    /// Create a handle around an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing registry.
    #[must_use]
    pub fn from_registry(registry: Registry) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    /// See [`Registry::construct`].
    pub fn construct(&self) -> Entity {
        self.inner.write().construct()
    }

    /// See [`Registry::destroy`].
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownEntity`] if the entity does not exist.
    pub fn destroy(&self, entity: Entity) -> Result<(), RegistryError> {
        self.inner.write().destroy(entity)
    }

    /// See [`Registry::contains`].
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.inner.read().contains(entity)
    }

    /// See [`Registry::entity_count`].
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.inner.read().entity_count()
    }

    /// Attach `value` to `entity`.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::add_component`].
    pub fn add_component<T: Component>(&self, entity: Entity, value: T) -> Result<(), RegistryError> {
        self.inner.write().add_component(entity, value).map(drop)
    }

    /// See [`Registry::remove_component`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::remove_component`].
    pub fn remove_component<T: Component>(&self, entity: Entity) -> Result<T, RegistryError> {
        self.inner.write().remove_component(entity)
    }

    /// See [`Registry::remove_components`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::remove_components`].
    pub fn remove_components<S: ComponentSet>(&self, entity: Entity) -> Result<(), RegistryError> {
        self.inner.write().remove_components::<S>(entity)
    }

    /// A copy of `entity`'s `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::get_component`].
    pub fn get_cloned<T: Component + Clone>(&self, entity: Entity) -> Result<T, RegistryError> {
        self.inner.read().get_component::<T>(entity).cloned()
    }

    /// Run `f` on `entity`'s `T` while holding the read lock.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::get_component`].
    pub fn with_component<T: Component, R>(
        &self,
        entity: Entity,
        f: impl FnOnce(&T) -> R,
    ) -> Result<R, RegistryError> {
        let registry = self.inner.read();
        Ok(f(registry.get_component::<T>(entity)?))
    }

    /// Run `f` on `entity`'s `T` while holding the write lock.
    ///
    /// # Errors
    ///
    /// Same as [`Registry::get_component_mut`].
    pub fn with_component_mut<T: Component, R>(
        &self,
        entity: Entity,
        f: impl FnOnce(&mut T) -> R,
    ) -> Result<R, RegistryError> {
        let mut registry = self.inner.write();
        Ok(f(registry.get_component_mut::<T>(entity)?))
    }

    /// See [`Registry::has_component`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::has_component`].
    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool, RegistryError> {
        self.inner.read().has_component::<T>(entity)
    }

    /// See [`Registry::has_components`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::has_components`].
    pub fn has_components<S: ComponentSet>(&self, entity: Entity) -> Result<bool, RegistryError> {
        self.inner.read().has_components::<S>(entity)
    }

    /// See [`Registry::entities`].
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.inner.read().entities()
    }

    /// See [`Registry::entities_with`].
    #[must_use]
    pub fn entities_with<S: ComponentSet>(&self) -> Vec<Entity> {
        self.inner.read().entities_with::<S>()
    }

    /// Call `visit` for every entity live at the time of the call.
    ///
    /// The handle list is snapshotted under the lock and the visitor runs
    /// with the lock released, so it may call back into this registry.
    /// Entities destroyed mid-iteration are still visited.
    pub fn each(&self, mut visit: impl FnMut(Entity)) {
        let snapshot = self.entities();
        for entity in snapshot {
            visit(entity);
        }
    }

    /// Run `f` with shared access to the whole registry.
    pub fn read<R>(&self, f: impl FnOnce(&Registry) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` with exclusive access to the whole registry.
    pub fn write<R>(&self, f: impl FnOnce(&mut Registry) -> R) -> R {
        f(&mut self.inner.write())
    }
}

impl From<Registry> for SharedRegistry {
    fn from(registry: Registry) -> Self {
        Self::from_registry(registry)
    }
}
