//! Tick loop configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::SystemError;

/// Environment variable holding the target ticks per second.
pub const TICK_RATE_VAR: &str = "HYPER_TICK_RATE";
/// Environment variable holding the tick limit (0 = unlimited).
pub const MAX_TICKS_VAR: &str = "HYPER_MAX_TICKS";
/// Environment variable toggling the render phase.
pub const RENDER_VAR: &str = "HYPER_RENDER";

/// Configuration for the fixed-timestep tick loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Target ticks per second.
    pub tick_rate: f64,
    /// Maximum number of ticks to run (0 = unlimited).
    pub max_ticks: u64,
    /// Whether each tick ends with a render phase.
    pub render: bool,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            max_ticks: 0,
            render: true,
        }
    }
}

impl TickConfig {
    /// Create the default configuration: 60 Hz, unlimited, rendering on.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target ticks per second.
    #[must_use]
    pub fn with_tick_rate(mut self, tick_rate: f64) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Set the tick limit (0 = unlimited).
    #[must_use]
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Enable or disable the render phase.
    #[must_use]
    pub fn with_render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Read overrides from `HYPER_TICK_RATE`, `HYPER_MAX_TICKS` and
    /// `HYPER_RENDER`, keeping the default for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), but reads values through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(rate) = parse_var::<f64>(&lookup, TICK_RATE_VAR) {
            if rate.is_finite() && rate > 0.0 {
                config.tick_rate = rate;
            } else {
                warn!(var = TICK_RATE_VAR, rate, "ignoring non-positive tick rate");
            }
        }
        if let Some(max_ticks) = parse_var(&lookup, MAX_TICKS_VAR) {
            config.max_ticks = max_ticks;
        }
        if let Some(render) = lookup(RENDER_VAR) {
            match render.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => config.render = true,
                "0" | "false" | "no" | "off" => config.render = false,
                other => warn!(var = RENDER_VAR, value = other, "ignoring unrecognised flag"),
            }
        }
        config
    }

    /// The wall-clock budget of one tick.
    ///
    /// # Errors
    ///
    /// Returns [`SystemError::InvalidTickRate`] unless the rate is finite and
    /// positive.
    pub fn tick_duration(&self) -> Result<Duration, SystemError> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(SystemError::InvalidTickRate(self.tick_rate));
        }
        Ok(Duration::from_secs_f64(1.0 / self.tick_rate))
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    let parsed = raw.trim().parse().ok();
    if parsed.is_none() {
        warn!(var = key, value = %raw, "ignoring unparsable value");
    }
    parsed
}
