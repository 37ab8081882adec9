//! Registry behaviour exercised through the public API only.

use hyper_component::{Component, Entity};
use hyper_registry::{Registry, RegistryError, SharedRegistry};

#[derive(Debug, Clone, Copy, PartialEq)]
struct Position {
    x: i32,
    y: i32,
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Velocity {
    x: i32,
    y: i32,
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Label(String);

impl Component for Label {}

fn visit_moving(registry: &Registry) -> Vec<(Entity, Position, Velocity)> {
    let mut seen = Vec::new();
    registry.each_with::<(Position, Velocity), _>(|e, (p, v)| seen.push((e, *p, *v)));
    seen
}

#[test]
fn test_position_velocity_scenario() {
    let mut registry = Registry::new();
    let e1 = registry.construct();
    registry.add_component(e1, Position { x: 0, y: 0 }).unwrap();
    registry.add_component(e1, Velocity { x: 1, y: 1 }).unwrap();

    assert_eq!(
        visit_moving(&registry),
        vec![(e1, Position { x: 0, y: 0 }, Velocity { x: 1, y: 1 })]
    );

    registry.remove_component::<Velocity>(e1).unwrap();
    assert!(visit_moving(&registry).is_empty());
    assert_eq!(
        registry.get_component::<Position>(e1),
        Ok(&Position { x: 0, y: 0 })
    );
}

#[test]
fn test_handles_distinct_and_non_zero() {
    let mut registry = Registry::new();
    let mut handles: Vec<Entity> = (0..500).map(|_| registry.construct()).collect();
    assert!(handles.iter().all(|e| e.id() != 0));
    let before = handles.len();
    handles.sort();
    handles.dedup();
    assert_eq!(handles.len(), before);
}

#[test]
fn test_churn_keeps_values_independent() {
    let mut registry = Registry::new();
    let entities: Vec<Entity> = (0..10).map(|_| registry.construct()).collect();
    for (i, &e) in entities.iter().enumerate() {
        registry.add_component(e, Label(format!("label-{i}"))).unwrap();
    }

    // Free every other slot, then refill with fresh values on the same entities.
    for &e in entities.iter().step_by(2) {
        registry.remove_component::<Label>(e).unwrap();
    }
    for &e in entities.iter().step_by(2) {
        registry.add_component(e, Label(format!("fresh-{}", e.id()))).unwrap();
    }

    assert_eq!(registry.component_count::<Label>(), 10);
    for (i, &e) in entities.iter().enumerate() {
        let expected = if i % 2 == 0 {
            format!("fresh-{}", e.id())
        } else {
            format!("label-{i}")
        };
        assert_eq!(registry.get_component::<Label>(e), Ok(&Label(expected)));
    }
}

#[test]
fn test_each_with_skips_partial_matches_in_order() {
    let mut registry = Registry::new();
    let mut expected = Vec::new();
    for i in 0..12 {
        let e = registry.construct();
        registry.add_component(e, Position { x: i, y: 0 }).unwrap();
        if i % 3 == 0 {
            registry.add_component(e, Velocity { x: 0, y: i }).unwrap();
            expected.push(e);
        }
    }
    let visited: Vec<Entity> = visit_moving(&registry).into_iter().map(|(e, ..)| e).collect();
    assert_eq!(visited, expected);
    assert_eq!(registry.entities_with::<(Velocity, Position)>(), expected);
}

#[test]
fn test_failed_operations_leave_state_unchanged() {
    let mut registry = Registry::new();
    let e = registry.construct();
    registry.add_component(e, Position { x: 4, y: 2 }).unwrap();
    let before = registry.components_of(e).unwrap();

    assert!(registry.add_component(e, Position { x: 0, y: 0 }).is_err());
    assert!(registry.remove_component::<Velocity>(e).is_err());
    assert_eq!(
        registry.remove_components::<(Position, Velocity)>(e),
        Err(RegistryError::MissingComponent {
            entity: e,
            component: "Velocity"
        })
    );

    assert_eq!(registry.components_of(e).unwrap(), before);
    assert_eq!(
        registry.get_component::<Position>(e),
        Ok(&Position { x: 4, y: 2 })
    );
}

#[test]
fn test_shared_registry_matches_single_threaded_semantics() {
    let shared = SharedRegistry::new();
    let e1 = shared.construct();
    shared.add_component(e1, Position { x: 0, y: 0 }).unwrap();
    shared.add_component(e1, Velocity { x: 1, y: 1 }).unwrap();
    assert_eq!(shared.has_components::<(Position, Velocity)>(e1), Ok(true));

    shared.remove_component::<Velocity>(e1).unwrap();
    assert!(shared.entities_with::<(Position, Velocity)>().is_empty());
    assert_eq!(shared.get_cloned::<Position>(e1), Ok(Position { x: 0, y: 0 }));

    shared.destroy(e1).unwrap();
    assert!(!shared.contains(e1));
    assert_eq!(
        shared.has_component::<Position>(e1),
        Err(RegistryError::UnknownEntity(e1))
    );
}
