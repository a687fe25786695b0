//! The player-controlled avatar

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::{Field, Rect};
use super::tick::HeldKeys;
use crate::consts::{AVATAR_BOOST_SPEED, AVATAR_SPEED};

/// One of the 8 directions the avatar can face (screen space, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    #[default]
    East,
    NorthEast,
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
}

impl Facing {
    pub const ALL: [Facing; 8] = [
        Facing::East,
        Facing::NorthEast,
        Facing::North,
        Facing::NorthWest,
        Facing::West,
        Facing::SouthWest,
        Facing::South,
        Facing::SouthEast,
    ];

    /// Facing for a summed movement delta; `None` for no movement
    pub fn from_delta(dx: i8, dy: i8) -> Option<Self> {
        let facing = match (dx.signum(), dy.signum()) {
            (1, 0) => Facing::East,
            (1, -1) => Facing::NorthEast,
            (0, -1) => Facing::North,
            (-1, -1) => Facing::NorthWest,
            (-1, 0) => Facing::West,
            (-1, 1) => Facing::SouthWest,
            (0, 1) => Facing::South,
            (1, 1) => Facing::SouthEast,
            _ => return None,
        };
        Some(facing)
    }

    /// Grid delta, each component in {-1, 0, 1}
    pub fn delta(self) -> (i8, i8) {
        match self {
            Facing::East => (1, 0),
            Facing::NorthEast => (1, -1),
            Facing::North => (0, -1),
            Facing::NorthWest => (-1, -1),
            Facing::West => (-1, 0),
            Facing::SouthWest => (-1, 1),
            Facing::South => (0, 1),
            Facing::SouthEast => (1, 1),
        }
    }

    /// The grid delta as a vector (diagonals are not normalized)
    pub fn offset(self) -> Vec2 {
        let (dx, dy) = self.delta();
        Vec2::new(dx as f32, dy as f32)
    }

    /// Heading in degrees, counter-clockwise from east
    pub fn angle_deg(self) -> f32 {
        match self {
            Facing::East => 0.0,
            Facing::NorthEast => 45.0,
            Facing::North => 90.0,
            Facing::NorthWest => 135.0,
            Facing::West => 180.0,
            Facing::SouthWest => -135.0,
            Facing::South => -90.0,
            Facing::SouthEast => -45.0,
        }
    }

    /// Index of the pre-rendered orientation sprite
    pub fn sprite_index(self) -> usize {
        self as usize
    }
}

/// Avatar invulnerability state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AvatarState {
    #[default]
    Normal,
    /// Invulnerable to bombs until the countdown runs out
    Hyper { frames_left: u32 },
}

/// Cosmetic expression swapped in by game events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    Neutral,
    /// Shown after shooting down an enemy, until the avatar next moves
    Happy,
    /// Shown after a lethal hit
    Sad,
}

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    pub rect: Rect,
    pub facing: Facing,
    /// Speed used on the last update
    pub speed: f32,
    pub state: AvatarState,
    pub mood: Mood,
}

impl Avatar {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, size),
            facing: Facing::East,
            speed: AVATAR_SPEED,
            state: AvatarState::Normal,
            mood: Mood::Neutral,
        }
    }

    #[inline]
    pub fn is_hyper(&self) -> bool {
        matches!(self.state, AvatarState::Hyper { .. })
    }

    /// Enter hyper mode. Only allowed from `Normal`.
    pub fn enter_hyper(&mut self, frames: u32) -> bool {
        if self.is_hyper() {
            return false;
        }
        self.state = AvatarState::Hyper {
            frames_left: frames,
        };
        true
    }

    /// Advance one frame: move from held keys, update facing, tick hyper mode.
    ///
    /// Returns true if hyper mode ran out this frame.
    pub fn update(&mut self, held: &HeldKeys, field: &Field) -> bool {
        self.speed = if held.boost {
            AVATAR_BOOST_SPEED
        } else {
            AVATAR_SPEED
        };

        let (dx, dy) = held.movement();
        let step = Vec2::new(dx as f32, dy as f32) * self.speed;
        let moved = self.rect.translated(step);
        // A move that leaves the field on either axis is dropped entirely
        if field.contains(&moved) {
            self.rect = moved;
        }

        if let Some(facing) = Facing::from_delta(dx, dy) {
            self.facing = facing;
            if self.mood == Mood::Happy {
                self.mood = Mood::Neutral;
            }
        }

        if let AvatarState::Hyper { frames_left } = &mut self.state {
            *frames_left = frames_left.saturating_sub(1);
            if *frames_left == 0 {
                self.state = AvatarState::Normal;
                return true;
            }
        }
        false
    }
}
