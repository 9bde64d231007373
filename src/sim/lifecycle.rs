//! Bubble lifetimes

use super::level::Level;
use super::state::GameEvent;

/// Age every bubble by `delta` and drop the ones whose lifetime ran out
pub fn expire_bubbles(level: &mut Level, delta: f32, events: &mut Vec<GameEvent>) {
    level.bubbles.retain_mut(|bubble| {
        bubble.decrease_lifetime(delta);
        if bubble.expired() {
            log::trace!("Bubble {} expired", bubble.id);
            events.push(GameEvent::BubbleExpired {
                bubble_id: bubble.id,
            });
            false
        } else {
            true
        }
    });
}
