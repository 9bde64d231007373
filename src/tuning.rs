//! Data-driven game balance
//!
//! All physics and gameplay constants the simulation reads. Loaded from JSON;
//! missing fields fall back to their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{BLOCK_SIZE, EPSILON};
use crate::error::SimError;

/// Physics and gameplay tuning (units: pixels and simulation steps)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Grid cell size
    pub block_size: f32,
    /// Half-width of the broad-phase box filter
    pub collision_radius: f32,
    /// Horizontal extent of the level (walls at 0 and level_width)
    pub level_width: f32,

    // === Kinetics ===
    /// Vertical acceleration per step for gravity-affected entities
    pub gravity: f32,
    /// Terminal falling speed
    pub max_fall_speed: f32,

    // === Player ===
    pub player_speed: f32,
    /// Upward impulse for jumps and bubble bounce-offs
    pub player_jump: f32,
    pub player_friction: f32,

    // === NPC ===
    pub npc_speed: f32,
    /// Per-step probability that a standing NPC jumps
    pub npc_jump_chance: f32,

    // === Bubble ===
    pub bubble_speed: f32,
    pub bubble_friction: f32,
    /// Constant-magnitude impulse for bubble/bubble and bubble/wall bounces
    pub bubble_bounce: f32,
    /// Lifetime in steps
    pub bubble_lifetime: f32,

    // === Score ===
    pub fruit_reward: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            collision_radius: BLOCK_SIZE,
            level_width: 20.0 * BLOCK_SIZE,

            gravity: 0.3,
            max_fall_speed: 8.0,

            player_speed: 4.0,
            player_jump: 10.0,
            player_friction: 0.5,

            npc_speed: 2.0,
            npc_jump_chance: 0.005,

            bubble_speed: 8.0,
            bubble_friction: 0.1,
            bubble_bounce: 2.0,
            bubble_lifetime: 180.0,

            fruit_reward: 100,
        }
    }
}

impl Tuning {
    /// Parse tuning from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), SimError> {
        // Grid scans step by one block and match positions within EPSILON
        if !(self.block_size > EPSILON) {
            log::warn!("Rejected tuning block_size = {}", self.block_size);
            return Err(SimError::InvalidTuning {
                name: "block_size",
                value: self.block_size,
                expected: "> 0.001",
            });
        }

        let non_negative = [
            ("collision_radius", self.collision_radius),
            ("level_width", self.level_width),
            ("max_fall_speed", self.max_fall_speed),
            ("player_friction", self.player_friction),
            ("bubble_friction", self.bubble_friction),
            ("bubble_lifetime", self.bubble_lifetime),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                log::warn!("Rejected tuning {} = {}", name, value);
                return Err(SimError::InvalidTuning {
                    name,
                    value,
                    expected: ">= 0",
                });
            }
        }

        if !(0.0..=1.0).contains(&self.npc_jump_chance) {
            log::warn!("Rejected tuning npc_jump_chance = {}", self.npc_jump_chance);
            return Err(SimError::InvalidTuning {
                name: "npc_jump_chance",
                value: self.npc_jump_chance,
                expected: "within [0, 1]",
            });
        }

        Ok(())
    }
}
