//! Registry error types.

use hyper_component::{Entity, TableError, TypeKeyCollision};

/// Errors returned by [`Registry`](crate::Registry) and
/// [`SharedRegistry`](crate::SharedRegistry) operations.
///
/// Every variant is detected before any mutation, so a failed call leaves
/// the registry exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The handle was never constructed, or has been destroyed.
    #[error("{0} does not exist")]
    UnknownEntity(Entity),

    /// The entity already holds a component of this type.
    #[error("{entity} already has component '{component}'")]
    DuplicateComponent {
        /// The entity addressed.
        entity: Entity,
        /// Name of the component type.
        component: &'static str,
    },

    /// The entity does not hold a component of this type.
    #[error("{entity} does not have component '{component}'")]
    MissingComponent {
        /// The entity addressed.
        entity: Entity,
        /// Name of the component type.
        component: &'static str,
    },

    /// Two component types share a type key.
    #[error(transparent)]
    TypeKeyCollision(#[from] TypeKeyCollision),

    /// A component set names the same type twice.
    #[error("component set lists '{0}' more than once")]
    AliasedComponentSet(&'static str),

    /// A recorded slot did not match its table.
    #[error("component storage is inconsistent: {0}")]
    Storage(#[from] TableError),
}
