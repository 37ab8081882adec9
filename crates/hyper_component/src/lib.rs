//! # hyper_component
//!
//! The storage layer of the Hyper ECS: what an entity is, what a component
//! is, and where component data lives.
//!
//! This crate provides:
//!
//! - [`Entity`]: opaque, never-reused `u64` handles.
//! - [`EntityAllocator`]: issues handles equal to the construct count.
//! - [`Component`] trait and [`ComponentTypeId`]: FNV-1a type keys.
//! - [`ComponentTable`]: dense per-type slots with free-list recycling.
//! - [`Tables`]: the type-erased map of all tables.
//! - [`EntityRecord`]: which `(type, slot)` pairs an entity owns.
//! - [`ComponentSet`]: tuples of component types for multi-type access.

pub mod component;
pub mod entity;
pub mod record;
pub mod set;
pub mod storage;
pub mod table;

pub use component::{Component, ComponentMeta, ComponentTypeId};
pub use entity::{Entity, EntityAllocator};
pub use record::EntityRecord;
pub use set::ComponentSet;
pub use storage::{Tables, TypeKeyCollision};
pub use table::{ComponentTable, ErasedTable, TableError};
