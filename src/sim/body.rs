//! Shared geometric and kinematic record of every level element
//!
//! Edges are always derived from `pos` and `size` on demand; nothing caches a
//! bounding box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vector;

/// Position (center), size, speed, friction and gravity flag of an element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center of the element
    pub pos: Vec2,
    /// Center before this step's integration
    pub prev_pos: Vec2,
    /// Width and height (non-negative)
    pub size: Vec2,
    pub speed: Vec2,
    /// Per-axis speed decay per step (non-negative)
    pub friction: Vec2,
    /// Whether gravity accumulates on the vertical speed
    pub gravity: bool,
}

impl Body {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x >= 0.0 && size.y >= 0.0, "negative size {size:?}");
        Self {
            pos,
            prev_pos: pos,
            size,
            speed: Vec2::ZERO,
            friction: Vec2::ZERO,
            gravity: false,
        }
    }

    pub fn with_gravity(mut self, gravity: bool) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_friction(mut self, friction: Vec2) -> Self {
        debug_assert!(
            friction.x >= 0.0 && friction.y >= 0.0,
            "negative friction {friction:?}"
        );
        self.friction = friction;
        self
    }

    pub fn with_speed(mut self, speed: Vec2) -> Self {
        self.speed = speed;
        self
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Horizontal speed
    #[inline]
    pub fn h_speed(&self) -> f32 {
        self.speed.x
    }

    /// Vertical speed (positive is downward)
    #[inline]
    pub fn v_speed(&self) -> f32 {
        self.speed.y
    }

    /// Distance between the centers of two bodies
    pub fn distance(&self, other: &Body) -> f32 {
        vector::distance(self.pos, other.pos)
    }

    /// Whether `other`'s center lies within a circle of `range` around this center
    pub fn in_radius_range_of(&self, other: &Body, range: f32) -> bool {
        self.distance(other) <= range
    }

    /// Whether `other`'s center lies within the axis-aligned square of
    /// half-width `range` centered on this body.
    ///
    /// Broad-phase only: this is not a shape overlap test.
    pub fn in_box_range_of(&self, other: &Body, range: f32) -> bool {
        let in_x = other.pos.x >= self.pos.x - range && other.pos.x <= self.pos.x + range;
        let in_y = other.pos.y >= self.pos.y - range && other.pos.y <= self.pos.y + range;
        in_x && in_y
    }

    /// Place this body so its right edge touches `other`'s left edge
    pub fn snap_left(&mut self, other: &Body) {
        self.pos.x = other.left() - self.size.x / 2.0;
    }

    /// Place this body so its left edge touches `other`'s right edge
    pub fn snap_right(&mut self, other: &Body) {
        self.pos.x = other.right() + self.size.x / 2.0;
    }

    /// Place this body so its bottom edge rests on `other`'s top edge
    pub fn snap_top(&mut self, other: &Body) {
        self.pos.y = other.top() - self.size.y / 2.0;
    }

    /// Place this body so its top edge touches `other`'s bottom edge
    pub fn snap_bottom(&mut self, other: &Body) {
        self.pos.y = other.bottom() + self.size.y / 2.0;
    }

    pub fn stop_vertically(&mut self) {
        self.speed.y = 0.0;
    }

    pub fn stop_horizontally(&mut self) {
        self.speed.x = 0.0;
    }
}

/// Uniform access to the body of any level element
pub trait Element {
    /// Stable identifier, unique within a level
    fn id(&self) -> u32;
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
}
