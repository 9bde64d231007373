//! Enemy patrol behavior
//!
//! Each enemy walks back and forth inside its movement boundaries, turning
//! around at either end, and now and then jumps when standing.

use super::boundary::movement_boundaries;
use super::level::Level;
use super::state::{Action, Direction, RngState};
use crate::tuning::Tuning;

/// Queue this tick's actions for every enemy
pub fn patrol(level: &mut Level, tuning: &Tuning, rng: &mut RngState) {
    let platforms = &level.platforms;

    for npc in level.npcs.iter_mut() {
        let bounds = movement_boundaries(npc.body.pos, platforms, tuning);
        if bounds.is_empty() {
            continue;
        }

        let x = npc.body.pos.x;
        if x <= bounds.left.x {
            npc.facing = Direction::Right;
        } else if x >= bounds.right.x {
            npc.facing = Direction::Left;
        }

        npc.add_action(match npc.facing {
            Direction::Left => Action::MoveLeft,
            Direction::Right => Action::MoveRight,
        });

        // Only standing enemies draw, so the RNG stream depends on state alone
        if npc.body.speed.y == 0.0 && rng.next_f32() < tuning.npc_jump_chance {
            npc.add_action(Action::Jump);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BLOCK_SIZE;
    use crate::sim::state::{Npc, Platform};
    use glam::Vec2;

    fn floor_level(xs: &[f32]) -> Level {
        let mut level = Level::new();
        for &x in xs {
            let id = level.next_entity_id();
            level.add_element(Platform::new(id, Vec2::new(x, 31.0), Vec2::splat(BLOCK_SIZE), true));
        }
        level
    }

    fn add_npc(level: &mut Level, x: f32) {
        let id = level.next_entity_id();
        level.add_element(Npc::new(id, Vec2::new(x, 0.0), Vec2::splat(BLOCK_SIZE)));
    }

    fn no_jumps() -> Tuning {
        Tuning {
            npc_jump_chance: 0.0,
            level_width: 155.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_walks_in_facing_direction() {
        let mut level = floor_level(&[0.0, 31.0, 62.0, 93.0, 124.0, 155.0]);
        add_npc(&mut level, 62.0);
        let mut rng = RngState::new(1);

        patrol(&mut level, &no_jumps(), &mut rng);

        assert!(level.npcs[0].has_action(Action::MoveRight));
        assert!(!level.npcs[0].has_action(Action::MoveLeft));
    }

    #[test]
    fn test_turns_around_at_bounds() {
        let mut level = floor_level(&[0.0, 31.0, 62.0, 93.0, 124.0, 155.0]);
        // Walls inset the patrol to [31, 124]
        add_npc(&mut level, 124.0);
        add_npc(&mut level, 31.0);
        level.npcs[1].facing = Direction::Left;
        let mut rng = RngState::new(1);

        patrol(&mut level, &no_jumps(), &mut rng);

        assert_eq!(level.npcs[0].facing, Direction::Left);
        assert!(level.npcs[0].has_action(Action::MoveLeft));
        assert_eq!(level.npcs[1].facing, Direction::Right);
        assert!(level.npcs[1].has_action(Action::MoveRight));
    }

    #[test]
    fn test_boxed_in_enemy_stays_put() {
        let mut level = Level::new();
        for x in [40.0, 80.0] {
            let id = level.next_entity_id();
            level.add_element(Platform::new(id, Vec2::new(x, 0.0), Vec2::splat(BLOCK_SIZE), false));
        }
        add_npc(&mut level, 60.0);
        let mut rng = RngState::new(1);

        patrol(&mut level, &no_jumps(), &mut rng);

        assert!(!level.npcs[0].has_action(Action::MoveLeft));
        assert!(!level.npcs[0].has_action(Action::MoveRight));
    }

    #[test]
    fn test_jump_chance() {
        let tuning = Tuning {
            npc_jump_chance: 1.0,
            ..no_jumps()
        };
        let mut level = floor_level(&[0.0, 31.0, 62.0, 93.0]);
        add_npc(&mut level, 62.0);
        let mut rng = RngState::new(7);

        patrol(&mut level, &tuning, &mut rng);
        assert!(level.npcs[0].has_action(Action::Jump));
        assert_eq!(rng.draws, 1);

        // Airborne enemies neither jump nor consume randomness
        level.npcs[0].clear_actions();
        level.npcs[0].body.speed.y = 2.0;
        patrol(&mut level, &tuning, &mut rng);
        assert!(!level.npcs[0].has_action(Action::Jump));
        assert_eq!(rng.draws, 1);
    }
}
