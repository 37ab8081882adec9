//! Entity-component registry.
//!
//! [`Registry`] is the single-threaded store: it constructs entities,
//! attaches and detaches components, and iterates entities matching a
//! [`ComponentSet`](hyper_component::ComponentSet). [`SharedRegistry`] wraps
//! it behind one lock for access from several threads.
//!
//! ```
//! use hyper_component::Component;
//! use hyper_registry::Registry;
//!
//! #[derive(Debug, PartialEq)]
//! struct Position(f32, f32);
//! impl Component for Position {}
//!
//! #[derive(Debug, PartialEq)]
//! struct Velocity(f32, f32);
//! impl Component for Velocity {}
//!
//! let mut registry = Registry::new();
//! let e = registry.construct();
//! registry.add_component(e, Position(0.0, 0.0))?;
//! registry.add_component(e, Velocity(1.0, 1.0))?;
//!
//! registry.each_with_mut::<(Position, Velocity), _>(|_, (p, v)| {
//!     p.0 += v.0;
//!     p.1 += v.1;
//! })?;
//! assert_eq!(registry.get_component::<Position>(e)?, &Position(1.0, 1.0));
//! # Ok::<(), hyper_registry::RegistryError>(())
//! ```

pub mod error;
pub mod registry;
pub mod shared;

pub use error::RegistryError;
pub use registry::Registry;
pub use shared::SharedRegistry;
