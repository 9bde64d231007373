//! Kinetics integrator
//!
//! Advances dynamic elements each step. Order per element: friction is
//! applied in place first, then the position moves by the damped speed.
//! Platforms are static and never touched here.

use super::body::{Body, Element};
use super::level::Level;
use crate::tuning::Tuning;

/// Move a body by its speed over `delta`, remembering where it started
#[inline]
pub fn integrate(body: &mut Body, delta: f32) {
    body.prev_pos = body.pos;
    body.pos += body.speed * delta;
}

/// Undo [`integrate`] for the current speed
#[inline]
pub fn revert_move(body: &mut Body, delta: f32) {
    body.pos -= body.speed * delta;
}

/// Decay one speed component toward zero without crossing it
#[inline]
fn decay(speed: f32, friction: f32, delta: f32) -> f32 {
    let amount = friction * delta;
    if speed.abs() <= amount {
        0.0
    } else {
        speed - speed.signum() * amount
    }
}

/// Reduce each speed component's magnitude by `friction * delta`, snapping
/// to zero instead of reversing.
pub fn apply_friction(body: &mut Body, delta: f32) {
    body.speed.x = decay(body.speed.x, body.friction.x, delta);
    body.speed.y = decay(body.speed.y, body.friction.y, delta);
}

/// Accumulate gravity on the vertical speed, capped at terminal speed
pub fn apply_gravity(body: &mut Body, gravity: f32, max_fall_speed: f32, delta: f32) {
    if body.gravity && body.speed.y < max_fall_speed {
        body.speed.y = (body.speed.y + gravity * delta).min(max_fall_speed);
    }
}

/// Friction then integration for a single body
pub fn step(body: &mut Body, delta: f32) {
    apply_friction(body, delta);
    integrate(body, delta);
}

/// Run `f` over the body of every dynamic element in the level
fn for_each_dynamic(level: &mut Level, mut f: impl FnMut(&mut Body)) {
    level.players.iter_mut().for_each(|e| f(e.body_mut()));
    level.npcs.iter_mut().for_each(|e| f(e.body_mut()));
    level.fruits.iter_mut().for_each(|e| f(e.body_mut()));
    level.bubbles.iter_mut().for_each(|e| f(e.body_mut()));
    level.powerups.iter_mut().for_each(|e| f(e.body_mut()));
}

/// Apply friction and integrate every dynamic element
pub fn modify(level: &mut Level, delta: f32) {
    for_each_dynamic(level, |body| step(body, delta));
}

/// Apply gravity to every dynamic element that has it
pub fn apply_gravity_level(level: &mut Level, tuning: &Tuning, delta: f32) {
    for_each_dynamic(level, |body| {
        apply_gravity(body, tuning.gravity, tuning.max_fall_speed, delta)
    });
}
