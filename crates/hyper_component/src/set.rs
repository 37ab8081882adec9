//! Compile-time lists of component types.
//!
//! A [`ComponentSet`] is a tuple of component types, `(A,)` through
//! `(A, B, C, D, E, F, G, H)`. The registry uses it for every multi-type
//! operation: membership checks, bulk removal, and queries that hand out one
//! reference per listed type.

use crate::component::{Component, ComponentTypeId};
use crate::record::EntityRecord;
use crate::storage::{Tables, TypeKeyCollision};
use crate::table::ComponentTable;

/// A tuple of component types queried or removed together.
pub trait ComponentSet: 'static {
    /// Shared references to each listed component, e.g. `(&A, &B)`.
    type Ref<'a>;

    /// Mutable references to each listed component, e.g. `(&mut A, &mut B)`.
    type Mut<'a>;

    /// The listed tables while they are taken out of a [`Tables`] map.
    type Taken;

    /// Type keys in declaration order.
    fn type_ids() -> Vec<ComponentTypeId>;

    /// Type names in declaration order.
    fn type_names() -> Vec<&'static str>;

    /// The name of the first type listed more than once, if any.
    fn aliased_type() -> Option<&'static str> {
        let ids = Self::type_ids();
        let names = Self::type_names();
        ids.iter()
            .enumerate()
            .find(|&(i, id)| ids[..i].contains(id))
            .map(|(i, _)| names[i])
    }

    /// Fail if any listed type's key is owned by another type.
    ///
    /// # Errors
    ///
    /// Returns the first [`TypeKeyCollision`] found.
    fn check(tables: &Tables) -> Result<(), TypeKeyCollision>;

    /// Borrow every listed component of the entity described by `record`.
    ///
    /// Returns `None` if any one of them is missing.
    fn fetch<'a>(tables: &'a Tables, record: &EntityRecord) -> Option<Self::Ref<'a>>;

    /// Take every listed table out of `tables`.
    ///
    /// Returns `None` and leaves `tables` untouched if the set is aliased or
    /// any table is missing.
    fn take(tables: &mut Tables) -> Option<Self::Taken>;

    /// Mutably borrow every listed component of the entity described by
    /// `record` from tables obtained with [`take`](Self::take).
    fn fetch_mut<'a>(taken: &'a mut Self::Taken, record: &EntityRecord) -> Option<Self::Mut<'a>>;

    /// Put tables obtained with [`take`](Self::take) back.
    fn restore(tables: &mut Tables, taken: Self::Taken);
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            type Ref<'a> = ($(&'a $name,)+);
            type Mut<'a> = ($(&'a mut $name,)+);
            type Taken = ($(Box<ComponentTable<$name>>,)+);

            fn type_ids() -> Vec<ComponentTypeId> {
                vec![$(<$name as Component>::component_type_id()),+]
            }

            fn type_names() -> Vec<&'static str> {
                vec![$(<$name as Component>::type_name()),+]
            }

            fn check(tables: &Tables) -> Result<(), TypeKeyCollision> {
                $(tables.check::<$name>()?;)+
                Ok(())
            }

            fn fetch<'a>(tables: &'a Tables, record: &EntityRecord) -> Option<Self::Ref<'a>> {
                Some(($(
                    tables.get::<$name>(record.slot_of(<$name as Component>::component_type_id())?)?,
                )+))
            }

            fn take(tables: &mut Tables) -> Option<Self::Taken> {
                if Self::aliased_type().is_some() {
                    return None;
                }
                if ![$(tables.holds::<$name>()),+].iter().all(|held| *held) {
                    return None;
                }
                Some(($(tables.take::<$name>()?,)+))
            }

            #[allow(non_snake_case)]
            fn fetch_mut<'a>(
                taken: &'a mut Self::Taken,
                record: &EntityRecord,
            ) -> Option<Self::Mut<'a>> {
                let ($($name,)+) = taken;
                Some(($(
                    $name
                        .get_mut(record.slot_of(<$name as Component>::component_type_id())?)
                        .ok()?,
                )+))
            }

            #[allow(non_snake_case)]
            fn restore(tables: &mut Tables, taken: Self::Taken) {
                let ($($name,)+) = taken;
                $(tables.put($name);)+
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Position(i32);

    impl Component for Position {
        fn type_name() -> &'static str {
            "Position"
        }
    }

    #[derive(Debug, PartialEq)]
    struct Velocity(i32);

    impl Component for Velocity {
        fn type_name() -> &'static str {
            "Velocity"
        }
    }

    fn populated() -> (Tables, EntityRecord) {
        let mut tables = Tables::new();
        let mut record = EntityRecord::new();
        let p = tables.get_or_create::<Position>().unwrap().insert(Position(1));
        let v = tables.get_or_create::<Velocity>().unwrap().insert(Velocity(2));
        record.push(Position::component_type_id(), p);
        record.push(Velocity::component_type_id(), v);
        (tables, record)
    }

    #[test]
    fn test_type_ids_in_declaration_order() {
        assert_eq!(
            <(Velocity, Position)>::type_ids(),
            vec![Velocity::component_type_id(), Position::component_type_id()]
        );
        assert_eq!(<(Position,)>::type_names(), vec!["Position"]);
    }

    #[test]
    fn test_aliased_type_detected() {
        assert_eq!(<(Position, Velocity)>::aliased_type(), None);
        assert_eq!(<(Position, Velocity, Position)>::aliased_type(), Some("Position"));
    }

    #[test]
    fn test_fetch_all_present() {
        let (tables, record) = populated();
        let (p, v) = <(Position, Velocity)>::fetch(&tables, &record).unwrap();
        assert_eq!((p, v), (&Position(1), &Velocity(2)));
    }

    #[test]
    fn test_fetch_missing_component_is_none() {
        let (tables, mut record) = populated();
        record.remove(Velocity::component_type_id());
        assert!(<(Position, Velocity)>::fetch(&tables, &record).is_none());
        assert!(<(Position,)>::fetch(&tables, &record).is_some());
    }

    #[test]
    fn test_take_fetch_mut_restore() {
        let (mut tables, record) = populated();
        let mut taken = <(Position, Velocity)>::take(&mut tables).unwrap();
        assert!(tables.is_empty());
        {
            let (p, v) = <(Position, Velocity)>::fetch_mut(&mut taken, &record).unwrap();
            p.0 += v.0;
            v.0 = 0;
        }
        <(Position, Velocity)>::restore(&mut tables, taken);

        assert_eq!(tables.len(), 2);
        assert_eq!(tables.get::<Position>(0), Some(&Position(3)));
        assert_eq!(tables.get::<Velocity>(0), Some(&Velocity(0)));
    }

    #[test]
    fn test_take_with_missing_table_leaves_map_untouched() {
        let mut tables = Tables::new();
        tables.get_or_create::<Position>().unwrap();
        assert!(<(Position, Velocity)>::take(&mut tables).is_none());
        assert!(tables.holds::<Position>());
    }

    #[test]
    fn test_take_aliased_set_refused() {
        let (mut tables, _) = populated();
        assert!(<(Position, Position)>::take(&mut tables).is_none());
        assert_eq!(tables.len(), 2);
    }
}
