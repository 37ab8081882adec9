//! Services used next to the ECS core: a seeded random number generator and
//! line-oriented file helpers.

pub mod files;
pub mod random;

pub use files::FileError;
pub use random::Random;
