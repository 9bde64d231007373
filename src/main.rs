//! Bubble Sim headless runner
//!
//! Builds a small demo level, drives player one with a scripted input loop
//! and logs what happens. Usage: `bubble-sim [tuning.json] [ticks]`.
//! Verbosity is controlled with `RUST_LOG`.

use std::process::ExitCode;

use glam::Vec2;

use bubble_sim::Tuning;
use bubble_sim::consts::{SIM_DT, STEPS_PER_SECOND};
use bubble_sim::sim::{
    Action, GameEvent, GamePhase, GameState, Level, Npc, Platform, Player, TickInput, tick,
};

const DEFAULT_TICKS: u64 = 600;
const DEFAULT_SEED: u64 = 12345;

/// Solid floor along the bottom, walls on both sides and a passable ledge
fn demo_level(tuning: &Tuning) -> Level {
    let block = tuning.block_size;
    let size = Vec2::splat(block);
    let columns = (tuning.level_width / block).round() as i32;
    let floor_y = 14.0 * block;
    let ledge_y = 10.0 * block;

    let mut level = Level::new();

    for col in 0..=columns {
        let id = level.next_entity_id();
        level.add_element(Platform::new(id, Vec2::new(col as f32 * block, floor_y), size, false));
    }
    for row in 1..14 {
        for col in [0, columns] {
            let id = level.next_entity_id();
            let pos = Vec2::new(col as f32 * block, row as f32 * block);
            level.add_element(Platform::new(id, pos, size, false));
        }
    }
    for col in 6..=14 {
        let id = level.next_entity_id();
        level.add_element(Platform::new(id, Vec2::new(col as f32 * block, ledge_y), size, true));
    }

    let id = level.next_entity_id();
    level.add_element(Player::new(id, Vec2::new(3.0 * block, floor_y - block), size, tuning));

    for pos in [
        Vec2::new(10.0 * block, ledge_y - block),
        Vec2::new(16.0 * block, floor_y - block),
    ] {
        let id = level.next_entity_id();
        level.add_element(Npc::new(id, pos, size));
    }

    level
}

/// Walk back and forth, shooting and jumping on a fixed rhythm
fn scripted_input(t: u64) -> TickInput {
    match t % 90 {
        0..=29 => TickInput::press(0, Action::MoveRight),
        30 | 75 => TickInput::press(0, Action::Shoot),
        45 => TickInput::press(0, Action::Jump),
        50..=74 => TickInput::press(0, Action::MoveLeft),
        _ => TickInput::default(),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Failed to load tuning from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };
    let ticks = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::warn!("Invalid tick count ({}), using {}", e, DEFAULT_TICKS);
            DEFAULT_TICKS
        }
        None => DEFAULT_TICKS,
    };

    let level = demo_level(&tuning);
    log::info!(
        "Bubble Sim starting: {} platforms, {} enemies, {} ticks",
        level.platforms.len(),
        level.npcs.len(),
        ticks
    );

    let mut state = GameState::new(level, tuning, DEFAULT_SEED);
    state.level.normalize_order();

    for t in 0..ticks {
        for event in tick(&mut state, &scripted_input(t), SIM_DT) {
            match event {
                GameEvent::FruitCollected { .. }
                | GameEvent::EnemyTrapped { .. }
                | GameEvent::PlayerKilled { .. } => log::info!("t={} {:?}", state.time_ticks, event),
                _ => log::debug!("t={} {:?}", state.time_ticks, event),
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks ({:.1}s): score {}, {} enemies left, {} fruit on the floor",
        state.time_ticks,
        state.time_ticks as f32 / STEPS_PER_SECOND,
        state.score,
        state.level.npcs.len(),
        state.level.fruits.len()
    );
    println!("{}", state.score);

    ExitCode::SUCCESS
}
