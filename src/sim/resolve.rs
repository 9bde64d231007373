//! Collision resolution passes
//!
//! Runs after kinetics, in a fixed order. Later passes observe what earlier
//! ones did: an enemy trapped in pass 5 is gone for the next tick, a fruit
//! collected in pass 3 cannot be collected twice.
//!
//! 1. player/bubble and bubble/bubble
//! 2. everything dynamic against platforms
//! 3. player/fruit
//! 4. player/enemy
//! 5. bubble/enemy
//!
//! No pass removes from a collection while iterating it: removals are either
//! done through `retain` or collected and applied after the scan.

use glam::Vec2;

use super::body::Body;
use super::collision::{Collision, Side};
use super::level::Level;
use super::state::{Fruit, GameEvent};
use crate::score::ScoreCounter;
use crate::tuning::Tuning;

/// Run every collision pass in order
pub fn detect_collisions(
    level: &mut Level,
    score: &mut ScoreCounter,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    detect_bubbles(level, tuning, events);
    detect_platforms(level, tuning, events);
    detect_player_fruit(level, score, tuning, events);
    detect_player_enemy(level, tuning, events);
    detect_bubble_enemy(level, tuning, events);
}

/// Pass 1: players bounce off bubbles they land on; overlapping bubbles repel.
///
/// Only bubbles present when the pass starts are considered.
pub fn detect_bubbles(level: &mut Level, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let count = level.bubbles.len();
    if count == 0 {
        return;
    }
    let range = tuning.collision_radius;

    for player in level.players.iter_mut() {
        for bubble in &level.bubbles[..count] {
            if !bubble.body.in_box_range_of(&player.body, range) {
                continue;
            }
            let collision = Collision::new(&player.body, &bubble.body);
            if collision.colliding_from_top() && player.body.v_speed() > 0.0 {
                player.body.stop_vertically();
                player.body.snap_top(&bubble.body);
                player.body.speed.y = -tuning.player_jump;
                log::debug!("Player {} bounced on bubble {}", player.id, bubble.id);
                events.push(GameEvent::PlayerBounced {
                    player_id: player.id,
                    bubble_id: bubble.id,
                });
                // One bounce per player per tick
                break;
            }
        }
    }

    for i in 0..count {
        for j in (i + 1)..count {
            let a = level.bubbles[i].body;
            let b = level.bubbles[j].body;
            if !a.in_box_range_of(&b, range) || !Collision::new(&a, &b).colliding() {
                continue;
            }
            // The bubble further right is pushed right
            let (left, right) = if b.pos.x < a.pos.x { (j, i) } else { (i, j) };
            level.bubbles[left].body.speed.x = -tuning.bubble_bounce;
            level.bubbles[right].body.speed.x = tuning.bubble_bounce;
            events.push(GameEvent::BubblesRepelled {
                left_id: level.bubbles[left].id,
                right_id: level.bubbles[right].id,
            });
        }
    }
}

/// Land a falling body on top of a platform
fn land(body: &mut Body, platform: &Body, side: Option<Side>) -> bool {
    if side == Some(Side::Top) && body.v_speed() > 0.0 {
        body.stop_vertically();
        body.snap_top(platform);
        true
    } else {
        false
    }
}

/// Players and NPCs: land on any platform, bump heads on and stop at walls
fn resolve_walker(body: &mut Body, platform: &Body, passable: bool, side: Option<Side>) {
    if land(body, platform, side) || passable {
        return;
    }
    match side {
        Some(Side::Bottom) if body.v_speed() < 0.0 => {
            body.stop_vertically();
            body.snap_bottom(platform);
        }
        Some(Side::Left) if body.h_speed() > 0.0 => {
            body.stop_horizontally();
            body.snap_left(platform);
        }
        Some(Side::Right) if body.h_speed() < 0.0 => {
            body.stop_horizontally();
            body.snap_right(platform);
        }
        _ => {}
    }
}

/// Falling bubbles rest on tops; bubbles are reflected off undersides and walls
fn resolve_bubble(body: &mut Body, platform: &Body, passable: bool, side: Side, bounce: f32) -> bool {
    match side {
        Side::Top => {
            land(body, platform, Some(side));
            false
        }
        Side::Bottom => {
            body.speed.y = bounce;
            body.snap_bottom(platform);
            true
        }
        Side::Left if !passable => {
            body.speed.x = -bounce;
            body.snap_left(platform);
            true
        }
        Side::Right if !passable => {
            body.speed.x = bounce;
            body.snap_right(platform);
            true
        }
        Side::Left | Side::Right => false,
    }
}

/// Pass 2: resolve every dynamic element against nearby platforms
pub fn detect_platforms(
    level: &mut Level,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    if level.platforms.is_empty() {
        return;
    }
    let range = tuning.collision_radius;

    for platform in &level.platforms {
        let pb = &platform.body;

        for player in level.players.iter_mut() {
            if pb.in_box_range_of(&player.body, range) {
                let side = Collision::new(&player.body, pb).side();
                resolve_walker(&mut player.body, pb, platform.passable, side);
            }
        }

        for npc in level.npcs.iter_mut() {
            if pb.in_box_range_of(&npc.body, range) {
                let side = Collision::new(&npc.body, pb).side();
                resolve_walker(&mut npc.body, pb, platform.passable, side);
            }
        }

        for fruit in level.fruits.iter_mut() {
            if pb.in_box_range_of(&fruit.body, range) {
                let side = Collision::new(&fruit.body, pb).side();
                land(&mut fruit.body, pb, side);
            }
        }

        for powerup in level.powerups.iter_mut() {
            if pb.in_box_range_of(&powerup.body, range) {
                let side = Collision::new(&powerup.body, pb).side();
                land(&mut powerup.body, pb, side);
            }
        }

        for bubble in level.bubbles.iter_mut() {
            if !pb.in_box_range_of(&bubble.body, range) {
                continue;
            }
            let Some(side) = Collision::new(&bubble.body, pb).side() else {
                continue;
            };
            if resolve_bubble(&mut bubble.body, pb, platform.passable, side, tuning.bubble_bounce) {
                events.push(GameEvent::BubbleBounced {
                    bubble_id: bubble.id,
                    platform_id: platform.id,
                });
            }
        }
    }
}

/// Pass 3: players collect overlapping fruit
pub fn detect_player_fruit(
    level: &mut Level,
    score: &mut ScoreCounter,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    if level.fruits.is_empty() {
        return;
    }
    let range = tuning.collision_radius;

    for player in level.players.iter().filter(|p| p.alive) {
        level.fruits.retain(|fruit| {
            let hit = fruit.body.in_box_range_of(&player.body, range)
                && Collision::new(&player.body, &fruit.body).colliding();
            if hit {
                score.update_score(tuning.fruit_reward);
                log::debug!("Player {} collected fruit {}", player.id, fruit.id);
                events.push(GameEvent::FruitCollected {
                    player_id: player.id,
                    fruit_id: fruit.id,
                    reward: tuning.fruit_reward,
                });
            }
            !hit
        });
    }
}

/// Pass 4: touching an enemy kills the player
pub fn detect_player_enemy(
    level: &mut Level,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    if level.npcs.is_empty() {
        return;
    }
    let range = tuning.collision_radius;

    for player in level.players.iter_mut().filter(|p| p.alive) {
        let killer = level.npcs.iter().find(|npc| {
            npc.body.in_box_range_of(&player.body, range)
                && Collision::new(&player.body, &npc.body).colliding()
        });
        if let Some(npc) = killer {
            player.alive = false;
            log::info!("Player {} killed by enemy {}", player.id, npc.id);
            events.push(GameEvent::PlayerKilled {
                player_id: player.id,
                npc_id: npc.id,
            });
        }
    }
}

/// Pass 5: a bubble touching an enemy removes both and drops a fruit where
/// the enemy was. Each bubble traps at most one enemy.
pub fn detect_bubble_enemy(
    level: &mut Level,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    if level.bubbles.is_empty() || level.npcs.is_empty() {
        return;
    }
    let range = tuning.collision_radius;

    // (bubble index, npc index)
    let mut trapped: Vec<(usize, usize)> = Vec::new();
    let mut bubble_used = vec![false; level.bubbles.len()];

    for (ni, npc) in level.npcs.iter().enumerate() {
        let hit = level.bubbles.iter().enumerate().find(|(bi, bubble)| {
            !bubble_used[*bi]
                && npc.body.in_box_range_of(&bubble.body, range)
                && Collision::new(&bubble.body, &npc.body).colliding()
        });
        if let Some((bi, _)) = hit {
            bubble_used[bi] = true;
            trapped.push((bi, ni));
        }
    }

    if trapped.is_empty() {
        return;
    }

    let mut bubble_ids = Vec::with_capacity(trapped.len());
    let mut npc_ids = Vec::with_capacity(trapped.len());
    for (bi, ni) in trapped {
        let bubble_id = level.bubbles[bi].id;
        let npc_id = level.npcs[ni].id;
        let pos = level.npcs[ni].body.pos;

        let fruit_id = level.next_entity_id();
        level
            .fruits
            .push(Fruit::new(fruit_id, pos, Vec2::splat(tuning.block_size)));

        log::debug!("Bubble {} trapped enemy {} -> fruit {}", bubble_id, npc_id, fruit_id);
        events.push(GameEvent::EnemyTrapped {
            bubble_id,
            npc_id,
            fruit_id,
        });
        bubble_ids.push(bubble_id);
        npc_ids.push(npc_id);
    }

    level.bubbles.retain(|b| !bubble_ids.contains(&b.id));
    level.npcs.retain(|n| !npc_ids.contains(&n.id));
}
