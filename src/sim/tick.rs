//! Fixed timestep simulation tick
//!
//! Advances the level by one step: AI and input queue actions, actions turn
//! into speeds, kinetics moves everything, then the collision passes and the
//! bubble lifecycle run against the moved state.

use super::state::{Action, GameEvent, GamePhase, GameState};
use super::{ai, intent, kinetics, lifecycle, resolve};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Actions to queue, keyed by player number
    pub actions: Vec<(u32, Action)>,
}

impl TickInput {
    /// Input that queues a single action for one player
    pub fn press(player: u32, action: Action) -> Self {
        Self {
            actions: vec![(player, action)],
        }
    }

    /// Queue another action
    pub fn with(mut self, player: u32, action: Action) -> Self {
        self.actions.push((player, action));
        self
    }
}

/// Advance the game state by one fixed timestep, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        return events;
    }

    state.time_ticks += 1;

    for &(number, action) in &input.actions {
        for player in state.level.players.iter_mut().filter(|p| p.number == number) {
            player.add_action(action);
        }
    }

    ai::patrol(&mut state.level, &state.tuning, &mut state.rng_state);
    intent::apply_actions(&mut state.level, &state.tuning, &mut events);

    kinetics::apply_gravity_level(&mut state.level, &state.tuning, dt);
    kinetics::modify(&mut state.level, dt);

    resolve::detect_collisions(&mut state.level, &mut state.score, &state.tuning, &mut events);
    lifecycle::expire_bubbles(&mut state.level, dt, &mut events);

    // Ensure deterministic ordering
    state.level.normalize_order();

    if state.all_players_dead() {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over after {} ticks, score {}",
            state.time_ticks,
            state.score
        );
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BLOCK_SIZE, SIM_DT};
    use crate::sim::level::Level;
    use crate::sim::state::{Bubble, Fruit, Npc, Platform, Player};
    use crate::sim::vector::approx_eq_f32;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn state_with(level: Level) -> GameState {
        GameState::new(level, Tuning::default(), 12345)
    }

    fn add_player(level: &mut Level, pos: Vec2, number: u32) -> u32 {
        let id = level.next_entity_id();
        let mut player = Player::new(id, pos, Vec2::splat(BLOCK_SIZE), &Tuning::default());
        player.number = number;
        level.add_element(player);
        id
    }

    fn add_npc(level: &mut Level, pos: Vec2) -> u32 {
        let id = level.next_entity_id();
        level.add_element(Npc::new(id, pos, Vec2::splat(BLOCK_SIZE)));
        id
    }

    /// A walled room with a solid floor row at y = 31
    fn demo_level() -> Level {
        let mut level = Level::new();
        for i in 0..=20 {
            let id = level.next_entity_id();
            level.add_element(Platform::new(
                id,
                Vec2::new(i as f32 * BLOCK_SIZE, BLOCK_SIZE),
                Vec2::splat(BLOCK_SIZE),
                false,
            ));
        }
        for x in [0.0, 620.0] {
            let id = level.next_entity_id();
            level.add_element(Platform::new(id, Vec2::new(x, 0.0), Vec2::splat(BLOCK_SIZE), false));
        }
        add_player(&mut level, Vec2::new(93.0, 0.0), 0);
        add_npc(&mut level, Vec2::new(310.0, 0.0));
        add_npc(&mut level, Vec2::new(496.0, 0.0));
        level
    }

    fn scripted_input(t: u64) -> TickInput {
        match t % 40 {
            0..=14 => TickInput::press(0, Action::MoveRight),
            15 => TickInput::press(0, Action::Shoot),
            20 => TickInput::press(0, Action::Jump),
            25..=34 => TickInput::press(0, Action::MoveLeft),
            _ => TickInput::default(),
        }
    }

    #[test]
    fn test_player_lands_on_platform() {
        let mut level = Level::new();
        let id = level.next_entity_id();
        let mut player = Player::new(id, Vec2::ZERO, Vec2::splat(32.0), &Tuning::default());
        player.body.speed.y = 40.0;
        level.add_element(player);
        let id = level.next_entity_id();
        level.add_element(Platform::new(id, Vec2::new(0.0, 64.0), Vec2::splat(32.0), false));
        let mut state = state_with(level);

        tick(&mut state, &TickInput::default(), SIM_DT);

        let player = &state.level.players[0];
        assert!(approx_eq_f32(player.body.pos.y, 32.0));
        assert_eq!(player.body.speed.y, 0.0);
    }

    #[test]
    fn test_player_rests_on_floor() {
        let mut state = state_with(demo_level());

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }

        let player = &state.level.players[0];
        assert!(approx_eq_f32(player.body.pos.y, 0.0));
        assert_eq!(player.body.speed.y, 0.0);
    }

    #[test]
    fn test_approaching_bubbles_repel() {
        let mut level = Level::new();
        let small = Vec2::splat(16.0);
        let tuning = Tuning::default();
        let mut left = Bubble::new(level.next_entity_id(), Vec2::new(0.0, 0.0), small, &tuning);
        left.body.speed.x = 4.0;
        let left_id = left.id;
        level.add_element(left);
        let mut right = Bubble::new(level.next_entity_id(), Vec2::new(20.0, 0.0), small, &tuning);
        right.body.speed.x = -4.0;
        let right_id = right.id;
        level.add_element(right);
        let mut state = state_with(level);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);

        let bounce = state.tuning.bubble_bounce;
        assert_eq!(state.level.bubbles[0].body.speed.x, -bounce);
        assert_eq!(state.level.bubbles[1].body.speed.x, bounce);
        assert!(events.contains(&GameEvent::BubblesRepelled { left_id, right_id }));
    }

    #[test]
    fn test_trapped_enemy_drops_exactly_one_fruit() {
        let mut level = Level::new();
        let npc = add_npc(&mut level, Vec2::new(100.0, 0.0));
        let id = level.next_entity_id();
        level.add_element(Bubble::new(
            id,
            Vec2::new(110.0, 0.0),
            Vec2::splat(BLOCK_SIZE),
            &Tuning::default(),
        ));
        let mut state = state_with(level);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.level.npcs.is_empty());
        assert!(state.level.bubbles.is_empty());
        assert_eq!(state.level.fruits.len(), 1);
        assert!(events.iter().any(|e| matches!(e, GameEvent::EnemyTrapped { npc_id, .. } if *npc_id == npc)));

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.level.fruits.len(), 1);
        assert!(events.is_empty());
    }

    #[test]
    fn test_fruit_scores_once() {
        let mut level = Level::new();
        add_player(&mut level, Vec2::ZERO, 0);
        let id = level.next_entity_id();
        level.add_element(Fruit::new(id, Vec2::new(10.0, 0.0), Vec2::splat(BLOCK_SIZE)));
        let mut state = state_with(level);

        tick(&mut state, &TickInput::default(), SIM_DT);
        tick(&mut state, &TickInput::default(), SIM_DT);

        assert_eq!(state.score.score(), 100);
        assert!(state.level.fruits.is_empty());
    }

    #[test]
    fn test_shoot_launches_bubble_next_tick() {
        let mut level = Level::new();
        add_player(&mut level, Vec2::new(100.0, 0.0), 0);
        let mut state = state_with(level);

        let events = tick(&mut state, &TickInput::press(0, Action::Shoot), SIM_DT);
        assert_eq!(state.level.bubbles.len(), 1);
        assert!(matches!(events[0], GameEvent::BubbleShot { .. }));
        assert!(approx_eq_f32(state.level.bubbles[0].body.pos.x, 100.0 + BLOCK_SIZE));
        assert!(state.level.players[0].firing);

        tick(&mut state, &TickInput::default(), SIM_DT);
        let expected = state.tuning.bubble_speed - state.tuning.bubble_friction;
        assert!(approx_eq_f32(state.level.bubbles[0].body.speed.x, expected));
    }

    #[test]
    fn test_input_routed_by_player_number() {
        let mut level = Level::new();
        add_player(&mut level, Vec2::new(100.0, 0.0), 0);
        add_player(&mut level, Vec2::new(300.0, 0.0), 1);
        let mut state = state_with(level);

        tick(&mut state, &TickInput::press(1, Action::MoveLeft), SIM_DT);

        assert_eq!(state.level.players[0].body.speed.x, 0.0);
        assert!(state.level.players[1].body.speed.x < 0.0);
    }

    #[test]
    fn test_game_over_freezes_state() {
        let mut level = Level::new();
        add_player(&mut level, Vec2::ZERO, 0);
        add_npc(&mut level, Vec2::new(20.0, 0.0));
        let mut state = state_with(level);

        let events = tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerKilled { .. })));
        assert_eq!(state.phase, GamePhase::GameOver);

        let events = tick(&mut state, &TickInput::press(0, Action::MoveRight), SIM_DT);
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, 1);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = state_with(demo_level());
        let mut state2 = state_with(demo_level());

        for t in 0..240 {
            let input = scripted_input(t);
            let events1 = tick(&mut state1, &input, SIM_DT);
            let events2 = tick(&mut state2, &input, SIM_DT);
            assert_eq!(events1, events2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }

    #[test]
    fn test_snapshot_resumes_identically() {
        let mut original = state_with(demo_level());
        for t in 0..100 {
            tick(&mut original, &scripted_input(t), SIM_DT);
        }

        let json = serde_json::to_string(&original).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();

        for t in 100..200 {
            let a = tick(&mut original, &scripted_input(t), SIM_DT);
            let b = tick(&mut restored, &scripted_input(t), SIM_DT);
            assert_eq!(a, b);
        }
        assert_eq!(
            serde_json::to_string(&original).unwrap(),
            serde_json::to_string(&restored).unwrap()
        );
    }
}
