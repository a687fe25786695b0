//! Musou Shooter - a fixed-step 2D arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, abilities, collisions, score)
//! - `render`: Render collaborator interface and frame drawing
//! - `session`: Input/clock collaborators and the session loop
//! - `autopilot`: Deterministic demo input policy
//! - `settings`: Field dimensions and tunables
//! - `assets`: Asset collaborator and resolved sprite sizes

pub mod assets;
pub mod autopilot;
pub mod error;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SettingsResult};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default play-field dimensions
    pub const FIELD_WIDTH: f32 = 1100.0;
    pub const FIELD_HEIGHT: f32 = 650.0;

    /// Fixed simulation rate (steps per second)
    pub const FRAME_RATE: u32 = 50;
    /// Visible pause after a lethal hit (2 seconds at 50 Hz)
    pub const GAME_OVER_DELAY_FRAMES: u32 = 100;

    /// Avatar movement (pixels per frame)
    pub const AVATAR_SPEED: f32 = 10.0;
    pub const AVATAR_BOOST_SPEED: f32 = 20.0;
    pub const AVATAR_START: (f32, f32) = (900.0, 400.0);

    /// Projectile speeds (pixels per frame)
    pub const BEAM_SPEED: f32 = 10.0;
    pub const BOMB_SPEED: f32 = 6.0;
    /// Bomb radius range (inclusive)
    pub const BOMB_RADIUS_MIN: u32 = 10;
    pub const BOMB_RADIUS_MAX: u32 = 50;
    pub const BOMB_COLORS: u8 = 6;

    /// Enemy spawning and behaviour
    pub const ENEMY_SPAWN_PERIOD: u64 = 200;
    pub const ENEMY_DESCENT_SPEED: f32 = 6.0;
    pub const ENEMY_STOP_MIN: u32 = 50;
    pub const ENEMY_DROP_INTERVAL_MIN: u32 = 50;
    pub const ENEMY_DROP_INTERVAL_MAX: u32 = 300;
    pub const ENEMY_VARIANTS: u8 = 3;

    /// Ability costs and lifetimes (frames)
    pub const HYPER_COST: u64 = 100;
    pub const HYPER_LIFE: u32 = 500;
    pub const SHIELD_COST: u64 = 50;
    pub const SHIELD_LIFE: i32 = 400;
    /// EMP needs a balance strictly above its cost
    pub const EMP_COST: u64 = 20;
    pub const EMP_OVERLAY_FRAMES: u32 = 3;
    pub const GRAVITY_COST: u64 = 200;
    pub const GRAVITY_LIFE: i32 = 400;

    /// Beam fan
    pub const SPREAD_COUNT: usize = 5;
    pub const SPREAD_HALF_ARC_DEG: f32 = 50.0;

    /// Score awards
    pub const BOMB_POINTS: u64 = 1;
    pub const ENEMY_POINTS: u64 = 10;

    /// Explosion lifetimes (frames)
    pub const BOMB_EXPLOSION_LIFE: i32 = 50;
    pub const ENEMY_EXPLOSION_LIFE: i32 = 100;

    /// Score HUD anchor, measured from the bottom-left corner
    pub const SCORE_HUD_OFFSET: (f32, f32) = (100.0, 50.0);
}

/// Unit vector for an angle in degrees, counter-clockwise with screen y pointing down
#[inline]
pub fn heading_to_vector(angle_deg: f32) -> glam::Vec2 {
    let rad = angle_deg.to_radians();
    glam::Vec2::new(rad.cos(), -rad.sin())
}

/// Angle in degrees of a screen-space vector (inverse of `heading_to_vector`)
#[inline]
pub fn vector_to_heading(v: glam::Vec2) -> f32 {
    (-v.y).atan2(v.x).to_degrees()
}
