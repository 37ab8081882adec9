//! The system trait.

use std::any::Any;

use hyper_registry::Registry;

/// A unit of behaviour driven by the [`World`](crate::World).
///
/// Each hook receives the registry by mutable reference. All three default to
/// doing nothing, so a system only implements the phases it cares about.
///
/// ```
/// use hyper_registry::Registry;
/// use hyper_system::System;
///
/// struct CountTicks(u64);
///
/// impl System for CountTicks {
///     fn on_tick(&mut self, _registry: &mut Registry, _tick: u64) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait System: Send + 'static {
    /// Human-readable name used in logs and errors.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Called once per fixed tick with the 1-based tick index.
    fn on_tick(&mut self, registry: &mut Registry, tick: u64) {
        let _ = (registry, tick);
    }

    /// Called once per frame with the elapsed time in seconds.
    fn on_update(&mut self, registry: &mut Registry, dt: f64) {
        let _ = (registry, dt);
    }

    /// Called once per rendered frame.
    fn on_render(&mut self, registry: &mut Registry) {
        let _ = registry;
    }
}

/// Object-safe extension of [`System`] that allows downcasting a boxed
/// system back to its concrete type.
pub(crate) trait SystemObject: System {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: System> SystemObject for T {
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
