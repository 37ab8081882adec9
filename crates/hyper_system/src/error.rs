//! System host error types.

/// Errors returned by [`World`](crate::World) and
/// [`TickLoop`](crate::TickLoop).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SystemError {
    /// A system of this type is already registered.
    #[error("system '{0}' is already registered")]
    DuplicateSystem(&'static str),

    /// No system of this type is registered.
    #[error("system '{0}' is not registered")]
    UnknownSystem(&'static str),

    /// The tick rate is zero, negative, or not finite.
    #[error("tick rate must be a positive number of ticks per second, got {0}")]
    InvalidTickRate(f64),
}
