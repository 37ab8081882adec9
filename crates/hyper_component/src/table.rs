//! Per-type component tables with free-slot recycling.
//!
//! A [`ComponentTable`] stores every instance of one component type in a
//! dense vector of slots. Removing a component empties its slot and pushes
//! the index onto a free-list; the next insert pops from that list before
//! growing the vector. Indices stay stable once assigned.

use std::any::{Any, TypeId};

use crate::component::{Component, ComponentMeta, ComponentTypeId};

/// Errors raised by slot-level table access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    /// The slot index is past the end of the table.
    #[error("slot {index} is out of range (table has {len} slots)")]
    SlotOutOfRange {
        /// The requested slot.
        index: usize,
        /// Number of slots in the table.
        len: usize,
    },

    /// The slot exists but holds no component.
    #[error("slot {0} is vacant")]
    SlotVacant(usize),
}

/// Dense, free-list-backed storage for one component type.
#[derive(Debug)]
pub struct ComponentTable<T> {
    slots: Vec<Option<T>>,
    free: Vec<usize>,
}

impl<T> ComponentTable<T> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Store `value`, reusing a freed slot when one is available.
    ///
    /// Returns the slot index.
    pub fn insert(&mut self, value: T) -> usize {
        match self.free.pop() {
            Some(index) => {
                debug_assert!(self.slots[index].is_none(), "free-list slot is occupied");
                self.slots[index] = Some(value);
                index
            }
            None => {
                self.slots.push(Some(value));
                self.slots.len() - 1
            }
        }
    }

    /// Empty slot `index` and return its value. The index becomes available
    /// to the next [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the slot is out of range or already vacant.
    pub fn remove(&mut self, index: usize) -> Result<T, TableError> {
        let len = self.slots.len();
        let value = self
            .slots
            .get_mut(index)
            .ok_or(TableError::SlotOutOfRange { index, len })?
            .take()
            .ok_or(TableError::SlotVacant(index))?;
        self.free.push(index);
        Ok(value)
    }

    /// Borrow the component in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the slot is out of range or vacant.
    pub fn get(&self, index: usize) -> Result<&T, TableError> {
        let len = self.slots.len();
        self.slots
            .get(index)
            .ok_or(TableError::SlotOutOfRange { index, len })?
            .as_ref()
            .ok_or(TableError::SlotVacant(index))
    }

    /// Mutably borrow the component in slot `index`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the slot is out of range or vacant.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, TableError> {
        let len = self.slots.len();
        self.slots
            .get_mut(index)
            .ok_or(TableError::SlotOutOfRange { index, len })?
            .as_mut()
            .ok_or(TableError::SlotVacant(index))
    }

    /// Returns `true` if slot `index` holds a component.
    #[must_use]
    pub fn is_occupied(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Returns `true` if no slot is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total number of slots, occupied or free.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots waiting on the free-list.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Iterate over occupied slots as `(index, &value)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|value| (index, value)))
    }
}

impl<T> Default for ComponentTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The type-erased face of a [`ComponentTable`].
///
/// The registry stores tables of unrelated types side by side behind this
/// trait and downcasts to the concrete table when a typed borrow is needed.
pub trait ErasedTable: Send + Sync {
    /// Metadata of the component type stored in this table.
    fn meta(&self) -> ComponentMeta;

    /// The table key.
    fn type_key(&self) -> ComponentTypeId {
        self.meta().type_id
    }

    /// The component name the key was derived from.
    fn component_name(&self) -> &'static str {
        self.meta().name
    }

    /// The Rust type identity of the stored component.
    fn rust_type(&self) -> TypeId {
        self.meta().rust_type
    }

    /// Number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is occupied.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empty slot `index`, dropping its value.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if the slot is out of range or already vacant.
    fn remove_slot(&mut self, index: usize) -> Result<(), TableError>;

    /// Upcast for typed downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Owned upcast for typed downcasting.
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Component> ErasedTable for ComponentTable<T> {
    fn meta(&self) -> ComponentMeta {
        T::meta()
    }

    fn len(&self) -> usize {
        ComponentTable::len(self)
    }

    fn remove_slot(&mut self, index: usize) -> Result<(), TableError> {
        self.remove(index).map(drop)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}
