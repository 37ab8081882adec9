//! The system host.
//!
//! A [`World`] owns a [`Registry`] and at most one instance of each system
//! type. Systems are kept in registration order and every fan-out call visits
//! them in that order.

use std::any::{TypeId, type_name};

use tracing::{info, trace};

use hyper_component::{Component, ComponentSet, Entity};
use hyper_registry::{Registry, RegistryError};

use crate::error::SystemError;
use crate::set::SystemSet;
use crate::system::{System, SystemObject};

struct SystemEntry {
    type_id: TypeId,
    name: &'static str,
    system: Box<dyn SystemObject>,
}

/// A registry plus the systems that operate on it.
#[derive(Default)]
pub struct World {
    registry: Registry,
    systems: Vec<SystemEntry>,
}

impl World {
    /// Create a world with an empty registry and no systems.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a world around an existing registry.
    #[must_use]
    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            systems: Vec::new(),
        }
    }

    /// Returns a reference to the registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns a mutable reference to the registry.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    // -- Registry shortcuts --

    /// See [`Registry::construct`].
    pub fn construct(&mut self) -> Entity {
        self.registry.construct()
    }

    /// See [`Registry::add_component`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::add_component`].
    pub fn add_component<T: Component>(
        &mut self,
        entity: Entity,
        value: T,
    ) -> Result<&mut T, RegistryError> {
        self.registry.add_component(entity, value)
    }

    /// See [`Registry::remove_component`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::remove_component`].
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, RegistryError> {
        self.registry.remove_component(entity)
    }

    /// See [`Registry::get_component`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::get_component`].
    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, RegistryError> {
        self.registry.get_component(entity)
    }

    /// See [`Registry::has_component`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::has_component`].
    pub fn has_component<T: Component>(&self, entity: Entity) -> Result<bool, RegistryError> {
        self.registry.has_component::<T>(entity)
    }

    /// See [`Registry::remove_components`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::remove_components`].
    pub fn remove_components<S: ComponentSet>(&mut self, entity: Entity) -> Result<(), RegistryError> {
        self.registry.remove_components::<S>(entity)
    }

    /// See [`Registry::has_components`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::has_components`].
    pub fn has_components<S: ComponentSet>(&self, entity: Entity) -> Result<bool, RegistryError> {
        self.registry.has_components::<S>(entity)
    }

    /// See [`Registry::entities`].
    #[must_use]
    pub fn entities(&self) -> Vec<Entity> {
        self.registry.entities()
    }

    /// See [`Registry::entities_with`].
    #[must_use]
    pub fn entities_with<S: ComponentSet>(&self) -> Vec<Entity> {
        self.registry.entities_with::<S>()
    }

    /// See [`Registry::each`].
    pub fn each(&self, visit: impl FnMut(Entity)) {
        self.registry.each(visit);
    }

    /// See [`Registry::each_with`].
    pub fn each_with<'a, S, F>(&'a self, visit: F)
    where
        S: ComponentSet,
        F: FnMut(Entity, S::Ref<'a>),
    {
        self.registry.each_with::<S, F>(visit);
    }

    /// See [`Registry::each_with_mut`].
    ///
    /// # Errors
    ///
    /// Same as [`Registry::each_with_mut`].
    pub fn each_with_mut<S, F>(&mut self, visit: F) -> Result<(), RegistryError>
    where
        S: ComponentSet,
        F: for<'a> FnMut(Entity, S::Mut<'a>),
    {
        self.registry.each_with_mut::<S, F>(visit)
    }

    // -- Systems --

    fn position<T: System>(&self) -> Option<usize> {
        let id = TypeId::of::<T>();
        self.systems.iter().position(|entry| entry.type_id == id)
    }

    /// Register `system` and return a reference to the stored instance.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::DuplicateSystem`] if a `T` is already
    /// registered. The existing instance is kept.
    pub fn add_system<T: System>(&mut self, system: T) -> Result<&mut T, SystemError> {
        let name = system.name();
        if self.has_system::<T>() {
            return Err(SystemError::DuplicateSystem(name));
        }

        self.systems.push(SystemEntry {
            type_id: TypeId::of::<T>(),
            name,
            system: Box::new(system),
        });
        info!(system = name, count = self.systems.len(), "registered system");

        self.systems
            .last_mut()
            .and_then(|entry| entry.system.as_any_mut().downcast_mut::<T>())
            .ok_or(SystemError::UnknownSystem(name))
    }

    /// Unregister the `T` and hand it back.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::UnknownSystem`] if no `T` is registered.
    pub fn remove_system<T: System>(&mut self) -> Result<T, SystemError> {
        let unknown = SystemError::UnknownSystem(type_name::<T>());
        let index = self.position::<T>().ok_or(unknown.clone())?;
        let entry = self.systems.remove(index);
        info!(system = entry.name, "removed system");
        entry
            .system
            .into_any()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| unknown)
    }

    /// Unregister every type in `S`.
    ///
    /// Presence of all types is checked first; if any is missing nothing is
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::UnknownSystem`] naming the first missing type.
    pub fn remove_systems<S: SystemSet>(&mut self) -> Result<(), SystemError> {
        let ids = S::type_ids();
        for (id, name) in ids.iter().zip(S::type_names()) {
            if !self.systems.iter().any(|entry| entry.type_id == *id) {
                return Err(SystemError::UnknownSystem(name));
            }
        }
        self.systems.retain(|entry| {
            let keep = !ids.contains(&entry.type_id);
            if !keep {
                info!(system = entry.name, "removed system");
            }
            keep
        });
        Ok(())
    }

    /// Borrow the registered `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::UnknownSystem`] if no `T` is registered.
    pub fn get_system<T: System>(&self) -> Result<&T, SystemError> {
        self.position::<T>()
            .and_then(|index| self.systems[index].system.as_any().downcast_ref::<T>())
            .ok_or(SystemError::UnknownSystem(type_name::<T>()))
    }

    /// Mutably borrow the registered `T`.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::UnknownSystem`] if no `T` is registered.
    pub fn get_system_mut<T: System>(&mut self) -> Result<&mut T, SystemError> {
        let index = self
            .position::<T>()
            .ok_or(SystemError::UnknownSystem(type_name::<T>()))?;
        self.systems[index]
            .system
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(SystemError::UnknownSystem(type_name::<T>()))
    }

    /// Returns `true` if a `T` is registered.
    #[must_use]
    pub fn has_system<T: System>(&self) -> bool {
        self.position::<T>().is_some()
    }

    /// Returns `true` if every type in `S` is registered.
    #[must_use]
    pub fn has_systems<S: SystemSet>(&self) -> bool {
        S::type_ids()
            .iter()
            .all(|id| self.systems.iter().any(|entry| entry.type_id == *id))
    }

    /// Names of the registered systems, in registration order.
    #[must_use]
    pub fn system_names(&self) -> Vec<&'static str> {
        self.systems.iter().map(|entry| entry.name).collect()
    }

    /// Number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    // -- Fan-out --

    /// Call [`System::on_tick`] on every system.
    pub fn on_tick(&mut self, tick: u64) {
        trace!(tick, systems = self.systems.len(), "on_tick");
        for entry in &mut self.systems {
            entry.system.on_tick(&mut self.registry, tick);
        }
    }

    /// Call [`System::on_update`] on every system.
    pub fn on_update(&mut self, dt: f64) {
        trace!(dt, systems = self.systems.len(), "on_update");
        for entry in &mut self.systems {
            entry.system.on_update(&mut self.registry, dt);
        }
    }

    /// Call [`System::on_render`] on every system.
    pub fn on_render(&mut self) {
        trace!(systems = self.systems.len(), "on_render");
        for entry in &mut self.systems {
            entry.system.on_render(&mut self.registry);
        }
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("registry", &self.registry)
            .field("systems", &self.system_names())
            .finish()
    }
}
