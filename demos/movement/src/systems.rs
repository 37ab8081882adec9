//! The systems driven by the movement demo.

use glam::Vec2;
use tracing::{debug, info, warn};

use components::{Health, Name, Position, Velocity};
use hyper_component::Entity;
use hyper_registry::{Registry, RegistryError};
use hyper_system::System;
use hyper_utilities::Random;

/// Spawns a named mover with a random velocity every `interval` ticks.
pub struct SpawnSystem {
    random: Random,
    interval: u64,
    spawned: u64,
}

impl SpawnSystem {
    #[must_use]
    pub fn new(random: Random, interval: u64) -> Self {
        Self {
            random,
            interval: interval.max(1),
            spawned: 0,
        }
    }
}

impl System for SpawnSystem {
    fn name(&self) -> &'static str {
        "spawn"
    }

    fn on_tick(&mut self, registry: &mut Registry, tick: u64) {
        if tick.saturating_sub(1) % self.interval != 0 {
            return;
        }

        self.spawned += 1;
        let entity = registry.construct();
        let velocity = Velocity::new(
            self.random.float_range(-2.0, 2.0),
            self.random.float_range(-2.0, 2.0),
        );
        let health = Health::full(self.random.int_range(20, 60) as f32);
        let name = Name::new(format!("mover-{}", self.spawned));

        match spawn_mover(registry, entity, name, velocity, health) {
            Ok(()) => debug!(%entity, tick, hp = health.max, "spawned mover"),
            Err(error) => {
                warn!(%entity, %error, "failed to spawn mover");
                if let Err(error) = registry.destroy(entity) {
                    warn!(%entity, %error, "failed to discard partial mover");
                }
            }
        }
    }
}

fn spawn_mover(
    registry: &mut Registry,
    entity: Entity,
    name: Name,
    velocity: Velocity,
    health: Health,
) -> Result<(), RegistryError> {
    registry.add_component(entity, name)?;
    registry.add_component(entity, Position::ORIGIN)?;
    registry.add_component(entity, velocity)?;
    registry.add_component(entity, health)?;
    Ok(())
}

/// Integrates velocity into position on every update.
pub struct MovementSystem;

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn on_update(&mut self, registry: &mut Registry, dt: f64) {
        let dt = dt as f32;
        if let Err(error) = registry
            .each_with_mut::<(Position, Velocity), _>(|_, (position, velocity)| {
                velocity.integrate(position, dt);
            })
        {
            warn!(%error, "movement query failed");
        }
    }
}

/// Damages movers by their distance from the origin and destroys the dead.
pub struct DecaySystem {
    /// Damage per world unit of distance, per tick.
    pub rate: f32,
}

impl System for DecaySystem {
    fn name(&self) -> &'static str {
        "decay"
    }

    fn on_tick(&mut self, registry: &mut Registry, tick: u64) {
        let rate = self.rate;
        let mut dead = Vec::new();
        let result = registry.each_with_mut::<(Position, Health), _>(|entity, (position, health)| {
            health.damage(position.value.distance(Vec2::ZERO) * rate);
            if !health.is_alive() {
                dead.push(entity);
            }
        });
        if let Err(error) = result {
            warn!(%error, "decay query failed");
            return;
        }

        for entity in dead {
            let name = registry
                .get_component::<Name>(entity)
                .map(|name| name.value.clone())
                .unwrap_or_default();
            if let Err(error) = registry.destroy(entity) {
                warn!(%entity, %error, "failed to destroy mover");
            } else {
                info!(%entity, name = %name, tick, "mover expired");
            }
        }
    }
}

/// Logs a summary of the live movers every `interval` rendered frames.
pub struct ReportSystem {
    interval: u64,
    frames: u64,
}

impl ReportSystem {
    #[must_use]
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
        }
    }
}

impl System for ReportSystem {
    fn name(&self) -> &'static str {
        "report"
    }

    fn on_render(&mut self, registry: &mut Registry) {
        self.frames += 1;
        if self.frames % self.interval != 0 {
            return;
        }

        let mut farthest = 0.0f32;
        registry.each_with::<(Position,), _>(|_, (position,)| {
            farthest = farthest.max(position.value.length());
        });
        info!(
            frame = self.frames,
            entities = registry.entity_count(),
            movers = registry.component_count::<Velocity>(),
            farthest,
            "world report"
        );
    }
}

/// One line per live mover: name, position and remaining health.
#[must_use]
pub fn summary(registry: &Registry) -> Vec<String> {
    let mut lines = Vec::new();
    registry.each_with::<(Name, Position, Health), _>(|entity, (name, position, health)| {
        lines.push(format!(
            "{entity} {} at ({:.2}, {:.2}) hp {:.1}/{:.1}",
            name.value, position.value.x, position.value.y, health.current, health.max
        ));
    });
    lines
}
