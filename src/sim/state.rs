//! Game state and shared simulation types
//!
//! `GameState` owns every entity collection and the score ledger. Only the
//! tick orchestrator mutates it during a frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::effects::{Explosion, GravityField, Shield};
use super::emp::Emp;
use super::enemy::Enemy;
use super::projectile::{Beam, Bomb};
use super::rect::Field;
use super::score::ScoreLedger;
use crate::assets::SpriteSizes;
use crate::consts::AVATAR_START;
use crate::settings::Settings;

/// Lifecycle decision returned by per-frame entity updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Alive,
    Expired,
}

impl Lifecycle {
    #[inline]
    pub fn from_alive(alive: bool) -> Self {
        if alive {
            Lifecycle::Alive
        } else {
            Lifecycle::Expired
        }
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    /// The avatar was hit outside hyper mode; the session is over
    Defeated,
}

/// Player-triggered abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Fire,
    SpreadFire,
    Hyper,
    Shield,
    Emp,
    Gravity,
}

/// What removed a bomb or enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cause {
    Shield,
    Beam,
    Avatar,
    Gravity,
}

/// Notable things that happened during the last tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    BombDropped { id: u32, enemy_id: u32 },
    EnemyDestroyed { id: u32, cause: Cause },
    BombDestroyed { id: u32, cause: Cause },
    AbilityUsed(Ability),
    AbilityRefused(Ability),
    HyperExpired,
    AvatarDefeated { bomb_id: u32 },
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub field: Field,
    pub sprites: SpriteSizes,
    /// Beams per fan shot
    pub spread_count: usize,
    /// Simulation frame counter
    pub frame: u64,
    pub phase: GamePhase,
    pub score: ScoreLedger,
    pub avatar: Avatar,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub explosions: Vec<Explosion>,
    /// At most one shield exists at a time
    pub shield: Option<Shield>,
    pub gravity_fields: Vec<GravityField>,
    pub emp: Emp,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given settings and seed
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let field = settings.field;
        let sprites = settings.sprites;
        // Keep the start position inside small custom fields
        let start = Vec2::new(
            AVATAR_START.0.min(field.width - sprites.avatar.x / 2.0),
            AVATAR_START.1.min(field.height - sprites.avatar.y / 2.0),
        );

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            field,
            sprites,
            spread_count: settings.spread_count,
            frame: 0,
            phase: GamePhase::Playing,
            score: ScoreLedger::default(),
            avatar: Avatar::new(start, sprites.avatar),
            enemies: Vec::new(),
            bombs: Vec::new(),
            beams: Vec::new(),
            explosions: Vec::new(),
            shield: None,
            gravity_fields: Vec::new(),
            emp: Emp::default(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Defeated
    }

    /// Spawn an explosion centered on `center`
    pub fn explode_at(&mut self, center: Vec2, life: i32) {
        self.explosions
            .push(Explosion::at(center, life, self.sprites.explosion));
    }
}
