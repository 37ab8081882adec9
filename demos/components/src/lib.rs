//! Example component definitions for the Hyper ECS demos.
//!
//! Any `Send + Sync + 'static` type can be a component. These override
//! [`Component::type_name`] with a short name so log lines and errors stay
//! readable.

use glam::Vec2;
use hyper_component::Component;
use serde::{Deserialize, Serialize};

/// A 2D position in world units.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// Coordinates in world units.
    pub value: Vec2,
}

impl Position {
    /// The origin.
    pub const ORIGIN: Self = Self { value: Vec2::ZERO };

    /// Create a position at `(x, y)`.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            value: Vec2::new(x, y),
        }
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// A 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Velocity {
    /// Linear velocity.
    pub linear: Vec2,
}

impl Velocity {
    /// Zero velocity.
    pub const ZERO: Self = Self { linear: Vec2::ZERO };

    /// Create a new velocity.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            linear: Vec2::new(x, y),
        }
    }

    /// Apply this velocity to `position` over `dt` seconds.
    pub fn integrate(&self, position: &mut Position, dt: f32) {
        position.value += self.linear * dt;
    }
}

impl Default for Velocity {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Component for Velocity {
    fn type_name() -> &'static str {
        "Velocity"
    }
}

/// Current and maximum hit points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Health {
    /// Current hit points.
    pub current: f32,
    /// Maximum hit points.
    pub max: f32,
}

impl Health {
    /// Full health with `max` hit points.
    #[must_use]
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Returns `true` while any hit points remain.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current > 0.0
    }

    /// Apply damage, clamping to zero.
    pub fn damage(&mut self, amount: f32) {
        self.current = (self.current - amount).max(0.0);
    }

    /// Heal, clamping to max.
    pub fn heal(&mut self, amount: f32) {
        self.current = (self.current + amount).min(self.max);
    }
}

impl Component for Health {
    fn type_name() -> &'static str {
        "Health"
    }
}

/// Display name, for logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Name {
    /// The name as shown in logs.
    pub value: String,
}

impl Name {
    /// Create a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { value: name.into() }
    }
}

impl Component for Name {
    fn type_name() -> &'static str {
        "Name"
    }
}
