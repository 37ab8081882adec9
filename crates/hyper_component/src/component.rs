//! Core [`Component`] trait and its type key.
//!
//! Every piece of data attached to an entity must implement [`Component`].
//! The trait requires `Send + Sync + 'static` so component tables can live
//! behind the guarded registry's lock and be shared across threads.
//!
//! ## Type keys
//!
//! [`ComponentTypeId`] is derived from the component's **type name** using the
//! FNV-1a 64-bit hash. The key selects the component table for that type. Two
//! distinct Rust types that hash to the same key are a configuration error;
//! the registry detects it by comparing the stored [`std::any::TypeId`].

use std::any::TypeId;

use serde::{Deserialize, Serialize};

/// A stable identifier for a component type, derived from its name with
/// FNV-1a 64-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct ComponentTypeId(pub u64);

impl ComponentTypeId {
    /// FNV-1a 64-bit offset basis.
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

    /// FNV-1a 64-bit prime.
    const FNV_PRIME: u64 = 0x0100_0000_01b3;

    /// Compute the [`ComponentTypeId`] from a component name.
    ///
    /// # Algorithm (FNV-1a 64-bit)
    ///
    /// ```text
    /// hash = 0xcbf29ce484222325          (offset basis)
    /// for each byte in name.as_bytes():
    ///     hash = hash XOR byte
    ///     hash = hash * 0x00000100000001b3  (prime)
    /// return hash
    /// ```
    #[must_use]
    pub const fn from_name(name: &str) -> Self {
        let bytes = name.as_bytes();
        let mut hash = Self::FNV_OFFSET_BASIS;
        let mut i = 0;
        while i < bytes.len() {
            hash ^= bytes[i] as u64;
            hash = hash.wrapping_mul(Self::FNV_PRIME);
            i += 1;
        }
        Self(hash)
    }

    /// Compute the [`ComponentTypeId`] for a component type `T`.
    #[must_use]
    pub fn of<T: Component>() -> Self {
        T::component_type_id()
    }
}

impl std::fmt::Display for ComponentTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Metadata about a component type, kept by its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentMeta {
    /// The table key.
    pub type_id: ComponentTypeId,
    /// The human-readable name the key was hashed from.
    pub name: &'static str,
    /// The Rust type identity, used to detect key collisions.
    pub rust_type: TypeId,
    /// Memory layout of one instance.
    pub layout: std::alloc::Layout,
}

/// The core component trait.
///
/// # Examples
///
/// ```rust
/// use hyper_component::Component;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Health {
///     current: f32,
///     max: f32,
/// }
///
/// impl Component for Health {
///     fn type_name() -> &'static str { "Health" }
/// }
/// ```
pub trait Component: Send + Sync + 'static {
    /// A name for this component type.
    ///
    /// Defaults to the fully qualified Rust type name. Override it with a
    /// short stable name when the key must not change across refactors.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the [`ComponentTypeId`] for this component.
    fn component_type_id() -> ComponentTypeId {
        ComponentTypeId::from_name(Self::type_name())
    }

    /// Returns the [`ComponentMeta`] descriptor for this component type.
    fn meta() -> ComponentMeta
    where
        Self: Sized,
    {
        ComponentMeta {
            type_id: Self::component_type_id(),
            name: Self::type_name(),
            rust_type: TypeId::of::<Self>(),
            layout: std::alloc::Layout::new::<Self>(),
        }
    }
}
