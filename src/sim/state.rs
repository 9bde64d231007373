//! Game state and core simulation types
//!
//! Entity variants share a [`Body`]; the level owns them in per-variant
//! collections. Everything that must survive a save/restore lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::{Body, Element};
use super::level::Level;
use crate::score::ScoreCounter;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Every player has died
    GameOver,
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    /// -1 for left, +1 for right
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// Discrete action queued on a player or NPC for the next step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Shoot,
}

impl Action {
    /// Horizontal direction of a move action
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::MoveLeft => Some(Direction::Left),
            Action::MoveRight => Some(Direction::Right),
            Action::Jump | Action::Shoot => None,
        }
    }
}

/// The only action a bubble can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleAction {
    MoveLeft,
    MoveRight,
}

impl From<Direction> for BubbleAction {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => BubbleAction::MoveLeft,
            Direction::Right => BubbleAction::MoveRight,
        }
    }
}

/// Set of distinct queued actions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionQueue {
    actions: Vec<Action>,
}

impl ActionQueue {
    /// Queue an action; duplicates are ignored
    pub fn add(&mut self, action: Action) {
        if !self.has(action) {
            self.actions.push(action);
        }
    }

    pub fn has(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn remove(&mut self, action: Action) {
        self.actions.retain(|a| *a != action);
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Remove and return every queued action in insertion order
    pub fn drain(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

/// A static block of level geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: u32,
    pub body: Body,
    /// Passable platforms are floors you can jump through; walls are not passable
    pub passable: bool,
}

impl Platform {
    pub fn new(id: u32, pos: Vec2, size: Vec2, passable: bool) -> Self {
        Self {
            id,
            body: Body::new(pos, size),
            passable,
        }
    }
}

/// A player-controlled character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub body: Body,
    /// Player slot (0 for the first player)
    pub number: u32,
    pub alive: bool,
    pub firing: bool,
    /// Last horizontal move; shots travel this way
    pub last_move: Direction,
    actions: ActionQueue,
}

impl Player {
    pub fn new(id: u32, pos: Vec2, size: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            body: Body::new(pos, size)
                .with_gravity(true)
                .with_friction(Vec2::new(tuning.player_friction, 0.0)),
            number: 0,
            alive: true,
            firing: false,
            last_move: Direction::Right,
            actions: ActionQueue::default(),
        }
    }

    /// Queue an action; horizontal moves also update `last_move`
    pub fn add_action(&mut self, action: Action) {
        self.actions.add(action);
        self.set_last_move(action);
    }

    pub fn has_action(&self, action: Action) -> bool {
        self.actions.has(action)
    }

    pub fn remove_action(&mut self, action: Action) {
        self.actions.remove(action);
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    pub fn take_actions(&mut self) -> Vec<Action> {
        self.actions.drain()
    }

    /// Record the facing of a horizontal move; other actions are ignored
    pub fn set_last_move(&mut self, action: Action) {
        if let Some(dir) = action.direction() {
            self.last_move = dir;
        }
    }
}

/// An enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Npc {
    pub id: u32,
    pub body: Body,
    pub life: i32,
    pub status: i32,
    pub has_fruit: bool,
    /// Current patrol direction
    pub facing: Direction,
    actions: ActionQueue,
}

impl Npc {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos, size).with_gravity(true),
            life: 1,
            status: 0,
            has_fruit: true,
            facing: Direction::Right,
            actions: ActionQueue::default(),
        }
    }

    pub fn add_action(&mut self, action: Action) {
        self.actions.add(action);
    }

    pub fn has_action(&self, action: Action) -> bool {
        self.actions.has(action)
    }

    pub fn remove_action(&mut self, action: Action) {
        self.actions.remove(action);
    }

    pub fn clear_actions(&mut self) {
        self.actions.clear();
    }

    pub fn take_actions(&mut self) -> Vec<Action> {
        self.actions.drain()
    }
}

/// A pickup worth points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fruit {
    pub id: u32,
    pub body: Body,
}

impl Fruit {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos, size).with_gravity(true),
        }
    }
}

/// A projectile shot by a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub id: u32,
    pub body: Body,
    /// Steps left before the bubble despawns
    pub lifetime: f32,
    action: Option<BubbleAction>,
}

impl Bubble {
    pub fn new(id: u32, pos: Vec2, size: Vec2, tuning: &Tuning) -> Self {
        Self {
            id,
            body: Body::new(pos, size).with_friction(Vec2::new(tuning.bubble_friction, 0.0)),
            lifetime: tuning.bubble_lifetime,
            action: None,
        }
    }

    /// Replace the queued action; a bubble moves one way only
    pub fn add_action(&mut self, action: BubbleAction) {
        self.action = Some(action);
    }

    pub fn has_action(&self, action: BubbleAction) -> bool {
        self.action == Some(action)
    }

    pub fn clear_actions(&mut self) {
        self.action = None;
    }

    pub fn take_action(&mut self) -> Option<BubbleAction> {
        self.action.take()
    }

    pub fn decrease_lifetime(&mut self, delta: f32) {
        self.lifetime -= delta;
    }

    pub fn expired(&self) -> bool {
        self.lifetime <= 0.0
    }
}

/// A power-up pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub body: Body,
}

impl Powerup {
    pub fn new(id: u32, pos: Vec2, size: Vec2) -> Self {
        Self {
            id,
            body: Body::new(pos, size).with_gravity(true),
        }
    }
}

macro_rules! impl_element {
    ($($ty:ty),*) => {
        $(
            impl Element for $ty {
                fn id(&self) -> u32 {
                    self.id
                }
                fn body(&self) -> &Body {
                    &self.body
                }
                fn body_mut(&mut self) -> &mut Body {
                    &mut self.body
                }
            }
        )*
    };
}

impl_element!(Platform, Player, Npc, Fruit, Bubble, Powerup);

/// Any level element, used when handing entities to the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Entity {
    Platform(Platform),
    Player(Player),
    Npc(Npc),
    Fruit(Fruit),
    Bubble(Bubble),
    Powerup(Powerup),
}

impl Entity {
    pub fn id(&self) -> u32 {
        match self {
            Entity::Platform(e) => e.id,
            Entity::Player(e) => e.id,
            Entity::Npc(e) => e.id,
            Entity::Fruit(e) => e.id,
            Entity::Bubble(e) => e.id,
            Entity::Powerup(e) => e.id,
        }
    }
}

macro_rules! impl_into_entity {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Entity {
                fn from(e: $variant) -> Self {
                    Entity::$variant(e)
                }
            }
        )*
    };
}

impl_into_entity!(Platform, Player, Npc, Fruit, Bubble, Powerup);

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player landed on a bubble and bounced off it
    PlayerBounced { player_id: u32, bubble_id: u32 },
    /// Two overlapping bubbles were pushed apart
    BubblesRepelled { left_id: u32, right_id: u32 },
    /// A bubble hit a platform and was reflected
    BubbleBounced { bubble_id: u32, platform_id: u32 },
    FruitCollected {
        player_id: u32,
        fruit_id: u32,
        reward: i32,
    },
    PlayerKilled { player_id: u32, npc_id: u32 },
    /// A bubble caught an enemy, which turned into fruit
    EnemyTrapped {
        bubble_id: u32,
        npc_id: u32,
        fruit_id: u32,
    },
    BubbleExpired { bubble_id: u32 },
    BubbleShot { player_id: u32, bubble_id: u32 },
}

/// Seeded RNG that survives serialization by replaying its draw count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub draws: u64,
    #[serde(skip)]
    rng: Option<Pcg32>,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            draws: 0,
            rng: None,
        }
    }

    /// Uniform sample in [0, 1)
    pub fn next_f32(&mut self) -> f32 {
        let draws = self.draws;
        let seed = self.seed;
        let rng = self.rng.get_or_insert_with(|| {
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..draws {
                let _: f32 = rng.random();
            }
            rng
        });
        self.draws += 1;
        rng.random()
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub level: Level,
    pub score: ScoreCounter,
    pub tuning: Tuning,
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
}

impl GameState {
    pub fn new(level: Level, tuning: Tuning, seed: u64) -> Self {
        Self {
            level,
            score: ScoreCounter::new(),
            tuning,
            rng_state: RngState::new(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
        }
    }

    /// Whether the level has players and none of them is alive
    pub fn all_players_dead(&self) -> bool {
        !self.level.players.is_empty() && self.level.players.iter().all(|p| !p.alive)
    }
}
