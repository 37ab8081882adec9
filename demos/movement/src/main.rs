//! # movement
//!
//! Spawns movers with random velocities, integrates them on a fixed tick,
//! and retires them as they drift away from the origin.
//!
//! ## Environment
//!
//! - `HYPER_TICK_RATE`, `HYPER_MAX_TICKS`, `HYPER_RENDER`: tick loop settings
//!   (defaults to 300 ticks when `HYPER_MAX_TICKS` is unset).
//! - `HYPER_SEED`: seed for the spawn generator. Entropy when unset.
//! - `HYPER_REPORT`: optional path that receives one line per surviving mover.
//! - `RUST_LOG`: log filter, on top of the default `movement=info`.

mod systems;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hyper_system::config::MAX_TICKS_VAR;
use hyper_system::{TickConfig, TickLoop, World};
use hyper_utilities::{Random, files};

use systems::{DecaySystem, MovementSystem, ReportSystem, SpawnSystem};

const DEFAULT_MAX_TICKS: u64 = 300;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("movement=info".parse()?))
        .init();

    let mut config = TickConfig::from_env();
    if std::env::var_os(MAX_TICKS_VAR).is_none() {
        config = config.with_max_ticks(DEFAULT_MAX_TICKS);
    }

    let random = match std::env::var("HYPER_SEED") {
        Ok(raw) => {
            let seed = raw
                .trim()
                .parse()
                .with_context(|| format!("HYPER_SEED must be an unsigned integer, got {raw:?}"))?;
            Random::seeded(seed)
        }
        Err(_) => Random::from_entropy(),
    };

    let mut world = World::new();
    world.add_system(SpawnSystem::new(random, 20))?;
    world.add_system(MovementSystem)?;
    world.add_system(DecaySystem { rate: 0.05 })?;
    world.add_system(ReportSystem::new(60))?;
    info!(systems = ?world.system_names(), "movement demo starting");

    let mut tick_loop = TickLoop::new(world, config);
    let ticks = tick_loop.run()?;

    let world = tick_loop.into_world();
    let survivors = systems::summary(world.registry());
    info!(
        ticks,
        survivors = survivors.len(),
        constructed = world.registry().constructed_count(),
        "movement demo finished"
    );

    if let Ok(path) = std::env::var("HYPER_REPORT") {
        files::write_lines(&path, &survivors)
            .with_context(|| format!("failed to write report to {path}"))?;
        info!(path = %path, "wrote report");
    }

    Ok(())
}
