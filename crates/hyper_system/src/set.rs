//! Compile-time lists of system types for bulk lookup and removal.

use std::any::{TypeId, type_name};

use crate::system::System;

/// A tuple of system types, `(A,)` through `(A, B, C, D, E, F, G, H)`.
pub trait SystemSet: 'static {
    /// Type identities in declaration order.
    fn type_ids() -> Vec<TypeId>;

    /// Type names in declaration order.
    fn type_names() -> Vec<&'static str>;
}

macro_rules! impl_system_set {
    ($($name:ident),+) => {
        impl<$($name: System),+> SystemSet for ($($name,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$name>()),+]
            }

            fn type_names() -> Vec<&'static str> {
                vec![$(type_name::<$name>()),+]
            }
        }
    };
}

impl_system_set!(A);
impl_system_set!(A, B);
impl_system_set!(A, B, C);
impl_system_set!(A, B, C, D);
impl_system_set!(A, B, C, D, E);
impl_system_set!(A, B, C, D, E, F);
impl_system_set!(A, B, C, D, E, F, G);
impl_system_set!(A, B, C, D, E, F, G, H);
