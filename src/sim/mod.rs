//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by collection order, normalized by entity ID)
//! - No rendering or platform dependencies

pub mod ai;
pub mod body;
pub mod boundary;
pub mod collision;
pub mod intent;
pub mod kinetics;
pub mod level;
pub mod lifecycle;
pub mod resolve;
pub mod state;
pub mod tick;
pub mod vector;

pub use body::{Body, Element};
pub use boundary::{MovementBounds, floor_boundaries, movement_boundaries, obstacle_boundaries};
pub use collision::{Collision, Side, classify};
pub use level::Level;
pub use state::{
    Action, Bubble, BubbleAction, Direction, Entity, Fruit, GameEvent, GamePhase, GameState, Npc,
    Platform, Player, Powerup, RngState,
};
pub use tick::{TickInput, tick};
