//! 2D vector helpers
//!
//! Positions, sizes and speeds are `glam::Vec2`; sum, difference and scaling
//! come from its operators. This adds the tolerant comparisons the simulation
//! relies on.

use glam::Vec2;

use crate::consts::EPSILON;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Component-wise equality within `eps`
#[inline]
pub fn approx_eq_eps(a: Vec2, b: Vec2, eps: f32) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

/// Component-wise equality within the default [`EPSILON`]
#[inline]
pub fn approx_eq(a: Vec2, b: Vec2) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

/// Scalar equality within the default [`EPSILON`]
#[inline]
pub fn approx_eq_f32(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}
