//! Timed entities: explosions, the shield and gravity fields

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::rect::{Field, Rect, rotated_extent};
use super::state::Lifecycle;

/// Explosion left behind by a destroyed bomb or enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub rect: Rect,
    /// Frames left; removed once negative
    pub life: i32,
}

impl Explosion {
    pub fn at(center: Vec2, life: i32, size: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, size),
            life,
        }
    }

    pub fn advance(&mut self) -> Lifecycle {
        self.life -= 1;
        Lifecycle::from_alive(self.life >= 0)
    }

    /// Which of the two alternating images to show (flips every 10 frames)
    pub fn frame(&self) -> usize {
        (self.life.max(0) / 10 % 2) as usize
    }
}

/// A barrier raised in front of the avatar that destroys bombs it touches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub rect: Rect,
    /// Orientation in degrees, taken from the avatar's facing
    pub angle: f32,
    pub life: i32,
}

impl Shield {
    /// Raise a shield one avatar size ahead of the avatar, across its facing.
    ///
    /// The shield is `thickness` wide and twice the avatar height long
    /// before rotation.
    pub fn raise(avatar: &Avatar, life: i32, thickness: f32) -> Self {
        let angle = avatar.facing.angle_deg();
        let size = Vec2::new(thickness, avatar.rect.size.y * 2.0);
        let center = avatar.rect.center + avatar.rect.size * avatar.facing.offset();
        Self {
            rect: Rect::from_center(center, rotated_extent(size, angle)),
            angle,
            life,
        }
    }

    pub fn advance(&mut self) -> Lifecycle {
        self.life -= 1;
        Lifecycle::from_alive(self.life >= 0)
    }
}

/// Field-wide effect that pulls down every bomb and enemy it overlaps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityField {
    pub rect: Rect,
    pub life: i32,
}

impl GravityField {
    pub fn covering(field: &Field, life: i32) -> Self {
        Self {
            rect: field.as_rect(),
            life,
        }
    }

    pub fn advance(&mut self) -> Lifecycle {
        self.life -= 1;
        Lifecycle::from_alive(self.life >= 0)
    }
}
