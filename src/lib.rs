//! Bubble Sim - fixed-step simulation core for a bubble-shooting platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinetics, collisions, NPC boundaries, game state)
//! - `score`: Score sink fed by the collision passes
//! - `tuning`: Data-driven physics and gameplay constants
//! - `error`: Errors for the fallible edges (tuning load/validation)

pub mod error;
pub mod score;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use score::ScoreCounter;
pub use tuning::Tuning;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep, measured in steps (one step = 1/60 s)
    pub const SIM_DT: f32 = 1.0;
    /// Steps per second of game time
    pub const STEPS_PER_SECOND: f32 = 60.0;

    /// Standard grid cell size (pixels)
    pub const BLOCK_SIZE: f32 = 31.0;

    /// Tolerance for positional comparisons
    pub const EPSILON: f32 = 1e-3;
}
