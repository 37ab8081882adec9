//! # hyper_system
//!
//! Systems and the host that drives them.
//!
//! A [`System`] reacts to three lifecycle calls (tick, update, render) with
//! mutable access to the [`Registry`](hyper_registry::Registry). A [`World`]
//! owns the registry and one instance per system type, and a [`TickLoop`]
//! drives the world at a fixed rate configured by [`TickConfig`].

pub mod config;
pub mod error;
pub mod set;
pub mod system;
pub mod tick;
pub mod world;

pub use config::TickConfig;
pub use error::SystemError;
pub use set::SystemSet;
pub use system::System;
pub use tick::TickLoop;
pub use world::World;
