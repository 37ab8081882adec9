//! Fixed-timestep tick loop.
//!
//! Each tick runs three phases against the [`World`]:
//!
//! 1. Advance the tick counter and fan out `on_tick`.
//! 2. Fan out `on_update` with the fixed timestep.
//! 3. Fan out `on_render`, unless rendering is disabled.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::TickConfig;
use crate::error::SystemError;
use crate::world::World;

/// Drives a [`World`] at a fixed rate.
#[derive(Debug)]
pub struct TickLoop {
    /// Number of ticks completed so far.
    tick: u64,
    /// Tick configuration.
    config: TickConfig,
    /// The world being driven.
    world: World,
}

impl TickLoop {
    /// Create a tick loop around `world`.
    #[must_use]
    pub fn new(world: World, config: TickConfig) -> Self {
        Self {
            tick: 0,
            config,
            world,
        }
    }

    /// Returns the number of ticks completed so far.
    #[must_use]
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Returns the loop configuration.
    #[must_use]
    pub fn config(&self) -> &TickConfig {
        &self.config
    }

    /// Returns a reference to the world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Returns a mutable reference to the world.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Consume the loop and return its world.
    #[must_use]
    pub fn into_world(self) -> World {
        self.world
    }

    /// Run one tick with timestep `dt` seconds, without sleeping.
    pub fn step(&mut self, dt: f64) {
        self.tick += 1;
        debug!(tick = self.tick, dt, "tick start");

        self.world.on_tick(self.tick);
        self.world.on_update(dt);
        if self.config.render {
            self.world.on_render();
        }
    }

    /// Run ticks at the configured rate until `max_ticks` have completed, or
    /// forever if it is zero.
    ///
    /// Returns the number of ticks run by this call.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::InvalidTickRate`] if the tick rate is not a
    /// positive finite number.
    pub fn run(&mut self) -> Result<u64, SystemError> {
        let tick_duration = self.config.tick_duration()?;
        let dt = tick_duration.as_secs_f64();
        let mut tick_count = 0u64;

        info!(
            tick_rate = self.config.tick_rate,
            max_ticks = self.config.max_ticks,
            systems = self.world.system_count(),
            "starting tick loop"
        );

        loop {
            let start = Instant::now();
            self.step(dt);

            tick_count += 1;
            if self.config.max_ticks > 0 && tick_count >= self.config.max_ticks {
                info!(ticks = tick_count, "tick loop complete");
                return Ok(tick_count);
            }

            let elapsed = start.elapsed();
            if elapsed < tick_duration {
                std::thread::sleep(tick_duration - elapsed);
            } else {
                warn!(
                    tick = self.tick,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = tick_duration.as_millis() as u64,
                    "tick exceeded time budget"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use hyper_registry::Registry;

    use super::*;
    use crate::system::System;

    #[derive(Default)]
    struct Phases(Vec<&'static str>);

    impl System for Phases {
        fn on_tick(&mut self, _registry: &mut Registry, _tick: u64) {
            self.0.push("tick");
        }

        fn on_update(&mut self, _registry: &mut Registry, _dt: f64) {
            self.0.push("update");
        }

        fn on_render(&mut self, _registry: &mut Registry) {
            self.0.push("render");
        }
    }

    fn phases(tick_loop: &TickLoop) -> Vec<&'static str> {
        tick_loop.world().get_system::<Phases>().unwrap().0.clone()
    }

    #[test]
    fn test_step_advances_counter() {
        let mut tick_loop = TickLoop::new(World::new(), TickConfig::default());
        assert_eq!(tick_loop.tick(), 0);
        tick_loop.step(1.0 / 60.0);
        assert_eq!(tick_loop.tick(), 1);
        tick_loop.step(1.0 / 60.0);
        assert_eq!(tick_loop.tick(), 2);
    }

    #[test]
    fn test_step_runs_phases_in_order() {
        let mut world = World::new();
        world.add_system(Phases::default()).unwrap();
        let mut tick_loop = TickLoop::new(world, TickConfig::default());
        tick_loop.step(0.1);
        assert_eq!(phases(&tick_loop), vec!["tick", "update", "render"]);
    }

    #[test]
    fn test_render_can_be_disabled() {
        let mut world = World::new();
        world.add_system(Phases::default()).unwrap();
        let mut tick_loop = TickLoop::new(world, TickConfig::new().with_render(false));
        tick_loop.step(0.1);
        assert_eq!(phases(&tick_loop), vec!["tick", "update"]);
    }

    #[test]
    fn test_run_limited_ticks() {
        let config = TickConfig::new().with_tick_rate(1000.0).with_max_ticks(5);
        let mut tick_loop = TickLoop::new(World::new(), config);
        assert_eq!(tick_loop.run(), Ok(5));
        assert_eq!(tick_loop.tick(), 5);
    }

    #[test]
    fn test_run_rejects_invalid_rate() {
        let config = TickConfig::new().with_tick_rate(f64::NAN).with_max_ticks(1);
        let mut tick_loop = TickLoop::new(World::new(), config);
        assert!(matches!(
            tick_loop.run(),
            Err(SystemError::InvalidTickRate(_))
        ));
        assert_eq!(tick_loop.tick(), 0);
    }
}
