//! Movement intent
//!
//! Turns queued actions into speed changes. Every queued action is consumed
//! here, once per tick, before gravity and kinetics run.

use glam::Vec2;

use super::level::Level;
use super::state::{Action, Bubble, BubbleAction, Direction, GameEvent};
use crate::tuning::Tuning;

/// NPC jumps are a little weaker than the player's
const NPC_JUMP_DAMPING: f32 = 1.1;

/// Consume every queued action in the level.
///
/// Bubbles fired this tick are appended after all players have been read,
/// and start moving on the next tick when their own action is consumed.
pub fn apply_actions(level: &mut Level, tuning: &Tuning, events: &mut Vec<GameEvent>) {
    let mut shots: Vec<(u32, Vec2, Direction)> = Vec::new();

    for player in level.players.iter_mut() {
        player.firing = false;
        let actions = player.take_actions();
        if !player.alive {
            continue;
        }
        for action in actions {
            match action {
                Action::MoveLeft | Action::MoveRight => {
                    if let Some(dir) = action.direction() {
                        player.body.speed.x = dir.sign() * tuning.player_speed;
                    }
                }
                Action::Jump => {
                    if player.body.speed.y == 0.0 {
                        player.body.speed.y = -tuning.player_jump;
                    }
                }
                Action::Shoot => {
                    player.firing = true;
                    let dir = player.last_move;
                    let pos = player.body.pos + Vec2::new(dir.sign() * tuning.block_size, 0.0);
                    shots.push((player.id, pos, dir));
                }
            }
        }
    }

    for npc in level.npcs.iter_mut() {
        for action in npc.take_actions() {
            match action {
                Action::MoveLeft | Action::MoveRight => {
                    if let Some(dir) = action.direction() {
                        npc.facing = dir;
                        npc.body.speed.x = dir.sign() * tuning.npc_speed;
                    }
                }
                Action::Jump => {
                    if npc.body.speed.y == 0.0 {
                        npc.body.speed.y = -tuning.player_jump / NPC_JUMP_DAMPING;
                    }
                }
                Action::Shoot => {}
            }
        }
    }

    for bubble in level.bubbles.iter_mut() {
        match bubble.take_action() {
            Some(BubbleAction::MoveLeft) => bubble.body.speed.x = -tuning.bubble_speed,
            Some(BubbleAction::MoveRight) => bubble.body.speed.x = tuning.bubble_speed,
            None => {}
        }
    }

    for (player_id, pos, dir) in shots {
        let id = level.next_entity_id();
        let mut bubble = Bubble::new(id, pos, Vec2::splat(tuning.block_size), tuning);
        bubble.add_action(BubbleAction::from(dir));
        level.add_element(bubble);
        log::debug!("Player {} shot bubble {}", player_id, id);
        events.push(GameEvent::BubbleShot {
            player_id,
            bubble_id: id,
        });
    }
}
