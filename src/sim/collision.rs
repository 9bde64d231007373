//! Directional collision classification between axis-aligned boxes
//!
//! Overlap alone cannot tell which side was struck once two boxes overlap on
//! both axes, so the subject's position before this step's integration
//! (recorded by kinetics in `Body::prev_pos`) is compared against the
//! obstacle's edges. Speeds are not used: an earlier pass may already have
//! changed them.

use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::consts::EPSILON;

/// Side of the obstacle that the subject struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Subject came down onto the obstacle
    Top,
    /// Subject came up into the obstacle
    Bottom,
    /// Subject came in from the obstacle's left
    Left,
    /// Subject came in from the obstacle's right
    Right,
}

/// Result of comparing a moving subject against an obstacle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    /// Current overlap along X (<= 0 means apart)
    pub overlap_x: f32,
    /// Current overlap along Y (<= 0 means apart)
    pub overlap_y: f32,
    prev_top: f32,
    prev_bottom: f32,
    prev_left: f32,
    prev_right: f32,
    obstacle_top: f32,
    obstacle_bottom: f32,
    obstacle_left: f32,
    obstacle_right: f32,
}

impl Collision {
    /// Classify `subject` (already integrated this step) against `obstacle`
    pub fn new(subject: &Body, obstacle: &Body) -> Self {
        let overlap_x = subject.right().min(obstacle.right()) - subject.left().max(obstacle.left());
        let overlap_y = subject.bottom().min(obstacle.bottom()) - subject.top().max(obstacle.top());

        let prev = subject.prev_pos;
        let half = subject.size / 2.0;

        Self {
            overlap_x,
            overlap_y,
            prev_top: prev.y - half.y,
            prev_bottom: prev.y + half.y,
            prev_left: prev.x - half.x,
            prev_right: prev.x + half.x,
            obstacle_top: obstacle.top(),
            obstacle_bottom: obstacle.bottom(),
            obstacle_left: obstacle.left(),
            obstacle_right: obstacle.right(),
        }
    }

    /// Boxes overlap on both axes, regardless of side
    #[inline]
    pub fn colliding(&self) -> bool {
        self.overlap_x > 0.0 && self.overlap_y > 0.0
    }

    /// Subject was above the obstacle before this step
    pub fn colliding_from_top(&self) -> bool {
        self.colliding() && self.prev_bottom <= self.obstacle_top + EPSILON
    }

    /// Subject was below the obstacle before this step
    pub fn colliding_from_bottom(&self) -> bool {
        self.colliding() && self.prev_top >= self.obstacle_bottom - EPSILON
    }

    /// Subject was left of the obstacle before this step
    pub fn colliding_from_left(&self) -> bool {
        self.colliding() && self.prev_right <= self.obstacle_left + EPSILON
    }

    /// Subject was right of the obstacle before this step
    pub fn colliding_from_right(&self) -> bool {
        self.colliding() && self.prev_left >= self.obstacle_right - EPSILON
    }

    /// First struck side, checking top, bottom, left, right in that order
    pub fn side(&self) -> Option<Side> {
        if self.colliding_from_top() {
            Some(Side::Top)
        } else if self.colliding_from_bottom() {
            Some(Side::Bottom)
        } else if self.colliding_from_left() {
            Some(Side::Left)
        } else if self.colliding_from_right() {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// Shorthand for `Collision::new(subject, obstacle).side()`
pub fn classify(subject: &Body, obstacle: &Body) -> Option<Side> {
    Collision::new(subject, obstacle).side()
}
