//! The type-erased table map.
//!
//! [`Tables`] owns one boxed [`ErasedTable`] per component type key and
//! hands out typed views by downcasting. It also supports temporarily taking
//! a table out of the map, which is how several tables are borrowed mutably
//! at once without aliasing.

use std::collections::HashMap;

use crate::component::{Component, ComponentTypeId};
use crate::table::{ComponentTable, ErasedTable};

/// Two distinct component types produced the same [`ComponentTypeId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("component type key {key} is owned by '{existing}' and cannot be used for '{requested}'")]
pub struct TypeKeyCollision {
    /// The colliding key.
    pub key: ComponentTypeId,
    /// Name of the type that created the table.
    pub existing: &'static str,
    /// Name of the type that asked for it.
    pub requested: &'static str,
}

/// All component tables, keyed by component type.
#[derive(Default)]
pub struct Tables {
    tables: HashMap<ComponentTypeId, Box<dyn ErasedTable>>,
}

impl Tables {
    /// Create an empty table map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tables created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if no table exists yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns `true` if a table exists for `key`.
    #[must_use]
    pub fn contains_key(&self, key: ComponentTypeId) -> bool {
        self.tables.contains_key(&key)
    }

    /// Returns `true` if the table for `T`'s key exists and stores `T`.
    #[must_use]
    pub fn holds<T: Component>(&self) -> bool {
        self.tables
            .get(&T::component_type_id())
            .is_some_and(|table| table.as_any().is::<ComponentTable<T>>())
    }

    /// Fail if `T`'s key is already owned by another type.
    ///
    /// # Errors
    ///
    /// Returns [`TypeKeyCollision`] on a key clash.
    pub fn check<T: Component>(&self) -> Result<(), TypeKeyCollision> {
        self.table::<T>().map(drop)
    }

    /// Typed view of the table for `T`, or `None` if it was never created.
    ///
    /// # Errors
    ///
    /// Returns [`TypeKeyCollision`] if the key belongs to another type.
    pub fn table<T: Component>(&self) -> Result<Option<&ComponentTable<T>>, TypeKeyCollision> {
        let key = T::component_type_id();
        let Some(table) = self.tables.get(&key) else {
            return Ok(None);
        };
        table
            .as_any()
            .downcast_ref::<ComponentTable<T>>()
            .map(Some)
            .ok_or(TypeKeyCollision {
                key,
                existing: table.component_name(),
                requested: T::type_name(),
            })
    }

    /// Mutable typed view of the table for `T`, or `None` if it was never
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`TypeKeyCollision`] if the key belongs to another type.
    pub fn table_mut<T: Component>(
        &mut self,
    ) -> Result<Option<&mut ComponentTable<T>>, TypeKeyCollision> {
        let key = T::component_type_id();
        let Some(table) = self.tables.get_mut(&key) else {
            return Ok(None);
        };
        let existing = table.component_name();
        table
            .as_any_mut()
            .downcast_mut::<ComponentTable<T>>()
            .map(Some)
            .ok_or(TypeKeyCollision {
                key,
                existing,
                requested: T::type_name(),
            })
    }

    /// Typed view of the table for `T`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`TypeKeyCollision`] if the key belongs to another type.
    pub fn get_or_create<T: Component>(
        &mut self,
    ) -> Result<&mut ComponentTable<T>, TypeKeyCollision> {
        let key = T::component_type_id();
        let table = self
            .tables
            .entry(key)
            .or_insert_with(|| Box::new(ComponentTable::<T>::new()));
        let existing = table.component_name();
        table
            .as_any_mut()
            .downcast_mut::<ComponentTable<T>>()
            .ok_or(TypeKeyCollision {
                key,
                existing,
                requested: T::type_name(),
            })
    }

    /// Borrow the `T` stored in `slot`, if the table and slot exist.
    #[must_use]
    pub fn get<T: Component>(&self, slot: usize) -> Option<&T> {
        self.table::<T>().ok().flatten()?.get(slot).ok()
    }

    /// Mutably borrow the `T` stored in `slot`, if the table and slot exist.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, slot: usize) -> Option<&mut T> {
        self.table_mut::<T>().ok().flatten()?.get_mut(slot).ok()
    }

    /// Type-erased view of the table for `key`.
    #[must_use]
    pub fn erased(&self, key: ComponentTypeId) -> Option<&dyn ErasedTable> {
        self.tables.get(&key).map(|table| table.as_ref())
    }

    /// Mutable type-erased view of the table for `key`.
    #[must_use]
    pub fn erased_mut(&mut self, key: ComponentTypeId) -> Option<&mut Box<dyn ErasedTable>> {
        self.tables.get_mut(&key)
    }

    /// Remove the table for `T` from the map so it can be borrowed
    /// independently. Must be returned with [`put`](Self::put).
    ///
    /// Returns `None` and leaves the map untouched if the table is missing
    /// or stores another type.
    pub fn take<T: Component>(&mut self) -> Option<Box<ComponentTable<T>>> {
        let key = T::component_type_id();
        let table = self.tables.remove(&key)?;
        if !table.as_any().is::<ComponentTable<T>>() {
            self.tables.insert(key, table);
            return None;
        }
        table.into_any().downcast::<ComponentTable<T>>().ok()
    }

    /// Return a table previously removed with [`take`](Self::take).
    pub fn put<T: Component>(&mut self, table: Box<ComponentTable<T>>) {
        self.tables.insert(T::component_type_id(), table);
    }

    /// Iterate over every table in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn ErasedTable> {
        self.tables.values().map(|table| table.as_ref())
    }
}

impl std::fmt::Debug for Tables {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for table in self.tables.values() {
            map.entry(&table.component_name(), &table.len());
        }
        map.finish()
    }
}
