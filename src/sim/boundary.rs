//! NPC movement boundaries
//!
//! Works out how far an enemy can walk left and right without stepping off
//! the end of its floor or into an obstacle on its own row. The level's side
//! walls at x = 0 and x = `level_width` count as obstacles.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Platform;
use crate::consts::EPSILON;
use crate::tuning::Tuning;

/// Horizontal patrol interval, as two points on the NPC's row
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovementBounds {
    pub left: Vec2,
    pub right: Vec2,
}

impl MovementBounds {
    /// Whether `x` lies within the bounds (inclusive)
    pub fn contains(&self, x: f32) -> bool {
        x >= self.left.x && x <= self.right.x
    }

    /// Whether there is no room to move at all
    pub fn is_empty(&self) -> bool {
        self.left.x > self.right.x
    }
}

/// Platforms whose center lies on the row at `y`
fn row(platforms: &[Platform], y: f32, block: f32) -> impl Iterator<Item = &Platform> {
    platforms
        .iter()
        .filter(move |p| (p.body.pos.y - y).abs() < block / 2.0)
}

/// Left and right X of the contiguous floor run directly beneath `pos`.
///
/// Returns `None` when there is no platform under the NPC.
pub fn floor_boundaries(pos: Vec2, platforms: &[Platform], block: f32) -> Option<(f32, f32)> {
    let floor_y = pos.y + block;
    let floor: Vec<f32> = row(platforms, floor_y, block)
        .map(|p| p.body.pos.x)
        .collect();

    let under = floor
        .iter()
        .copied()
        .find(|x| (x - pos.x).abs() <= block / 2.0)?;
    let has_block_at = |x: f32| floor.iter().any(|fx| (fx - x).abs() <= EPSILON);

    // A run can't be longer than the row, whatever the block size
    let mut left = under;
    for _ in 0..floor.len() {
        if !has_block_at(left - block) {
            break;
        }
        left -= block;
    }
    let mut right = under;
    for _ in 0..floor.len() {
        if !has_block_at(right + block) {
            break;
        }
        right += block;
    }

    Some((left, right))
}

/// Nearest obstacles strictly left and right of `pos` on its own row, inset
/// by one block. Level walls bound the search.
pub fn obstacle_boundaries(
    pos: Vec2,
    platforms: &[Platform],
    block: f32,
    level_width: f32,
) -> (f32, f32) {
    let mut left = 0.0_f32;
    let mut right = level_width;

    for platform in row(platforms, pos.y, block) {
        let x = platform.body.pos.x;
        if x < pos.x && x > left {
            left = x;
        }
        if x > pos.x && x < right {
            right = x;
        }
    }

    (left + block, right - block)
}

/// The tighter of the floor and obstacle boundaries on each side
pub fn movement_boundaries(pos: Vec2, platforms: &[Platform], tuning: &Tuning) -> MovementBounds {
    let block = tuning.block_size;
    let (mut left, mut right) = obstacle_boundaries(pos, platforms, block, tuning.level_width);

    if let Some((floor_left, floor_right)) = floor_boundaries(pos, platforms, block) {
        left = left.max(floor_left);
        right = right.min(floor_right);
    }

    MovementBounds {
        left: Vec2::new(left, pos.y),
        right: Vec2::new(right, pos.y),
    }
}
