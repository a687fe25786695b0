//! Straight-line projectiles: enemy bombs and avatar beams
//!
//! Both move at a fixed velocity and despawn once they leave the field.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::enemy::Enemy;
use super::rect::{Field, Rect, direction_to, rotated_extent};
use super::state::Lifecycle;
use crate::consts::*;
use crate::heading_to_vector;

/// Bomb armed state; EMP flips `Active` to `Inactive` once
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BombState {
    #[default]
    Active,
    /// Disarmed by an EMP: half speed, no score or explosion when shot
    Inactive,
}

/// A bomb dropped by a stopped enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub rect: Rect,
    /// Unit direction, fixed at drop time
    pub vel: Vec2,
    pub speed: f32,
    pub state: BombState,
    /// Palette index for the renderer
    pub color: u8,
}

impl Bomb {
    /// Drop from the bottom of `enemy`, aimed at where `avatar` is right now.
    ///
    /// The aim is never updated afterwards.
    pub fn drop_from(id: u32, enemy: &Enemy, avatar: &Avatar, rng: &mut impl Rng) -> Self {
        let radius = rng.random_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX) as f32;
        let color = rng.random_range(0..BOMB_COLORS);
        // Coincident centers would leave no direction to aim in; fall straight down
        let vel = direction_to(&enemy.rect, &avatar.rect).unwrap_or(Vec2::Y);
        let center = Vec2::new(
            enemy.rect.center.x,
            enemy.rect.center.y + enemy.rect.size.y / 2.0,
        );

        Self {
            id,
            rect: Rect::from_center(center, Vec2::splat(radius * 2.0)),
            vel,
            speed: BOMB_SPEED,
            state: BombState::Active,
            color,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == BombState::Active
    }

    pub fn advance(&mut self, field: &Field) -> Lifecycle {
        self.rect = self.rect.translated(self.vel * self.speed);
        Lifecycle::from_alive(field.contains(&self.rect))
    }

    /// Halve speed and mark inactive. Returns false if already inactive.
    pub fn disarm(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        self.speed /= 2.0;
        self.state = BombState::Inactive;
        true
    }
}

/// A beam fired by the avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub rect: Rect,
    /// Heading in degrees, counter-clockwise from east
    pub angle: f32,
    pub vel: Vec2,
    pub speed: f32,
}

impl Beam {
    /// Fire along the avatar's facing, rotated by `offset_deg`.
    ///
    /// `size` is the unrotated beam sprite size; the hitbox is its rotated
    /// extent. The beam starts one avatar size away from the avatar center.
    pub fn fire(id: u32, avatar: &Avatar, offset_deg: f32, size: Vec2) -> Self {
        let angle = avatar.facing.angle_deg() + offset_deg;
        let vel = heading_to_vector(angle);
        let center = avatar.rect.center + avatar.rect.size * vel;

        Self {
            id,
            rect: Rect::from_center(center, rotated_extent(size, angle)),
            angle,
            vel,
            speed: BEAM_SPEED,
        }
    }

    pub fn advance(&mut self, field: &Field) -> Lifecycle {
        self.rect = self.rect.translated(self.vel * self.speed);
        Lifecycle::from_alive(field.contains(&self.rect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::avatar::Facing;
    use crate::sim::enemy::EnemyState;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn stopped_enemy_at(x: f32, y: f32) -> Enemy {
        Enemy {
            id: 1,
            rect: Rect::from_center(Vec2::new(x, y), Vec2::new(40.0, 40.0)),
            vy: 0.0,
            stop_altitude: y,
            state: EnemyState::Stopped,
            drop_interval: Some(50),
            emp_disabled: false,
            variant: 0,
        }
    }

    #[test]
    fn test_bomb_aims_at_avatar_once() {
        let mut rng = Pcg32::seed_from_u64(1);
        let enemy = stopped_enemy_at(100.0, 100.0);
        let mut avatar = Avatar::new(Vec2::new(400.0, 500.0), Vec2::new(40.0, 40.0));
        let mut bomb = Bomb::drop_from(2, &enemy, &avatar, &mut rng);

        assert!((bomb.vel - Vec2::new(0.6, 0.8)).length() < 1e-5);
        assert_eq!(bomb.rect.center, Vec2::new(100.0, 120.0));
        let diameter = bomb.rect.size.x;
        assert!((20.0..=100.0).contains(&diameter));
        assert!(bomb.color < BOMB_COLORS);

        // Moving the avatar afterwards does not re-aim the bomb
        avatar.rect.center = Vec2::new(50.0, 600.0);
        let vel = bomb.vel;
        bomb.advance(&Field::default());
        assert_eq!(bomb.vel, vel);
    }

    #[test]
    fn test_bomb_with_coincident_centers_falls() {
        let mut rng = Pcg32::seed_from_u64(1);
        let enemy = stopped_enemy_at(300.0, 300.0);
        let avatar = Avatar::new(Vec2::new(300.0, 300.0), Vec2::new(40.0, 40.0));
        let bomb = Bomb::drop_from(2, &enemy, &avatar, &mut rng);
        assert_eq!(bomb.vel, Vec2::Y);
    }

    #[test]
    fn test_disarm_halves_speed_once() {
        let mut rng = Pcg32::seed_from_u64(3);
        let enemy = stopped_enemy_at(100.0, 100.0);
        let avatar = Avatar::new(Vec2::new(400.0, 500.0), Vec2::new(40.0, 40.0));
        let mut bomb = Bomb::drop_from(2, &enemy, &avatar, &mut rng);

        assert!(bomb.disarm());
        assert_eq!(bomb.speed, BOMB_SPEED / 2.0);
        assert!(!bomb.disarm());
        assert_eq!(bomb.speed, BOMB_SPEED / 2.0);
        assert_eq!(bomb.state, BombState::Inactive);
    }

    #[test]
    fn test_beam_leaves_field() {
        let field = Field::new(300.0, 300.0);
        let mut avatar = Avatar::new(Vec2::new(150.0, 150.0), Vec2::new(20.0, 20.0));
        avatar.facing = Facing::North;
        let mut beam = Beam::fire(1, &avatar, 0.0, Vec2::new(30.0, 10.0));

        assert!((beam.vel - Vec2::new(0.0, -1.0)).length() < 1e-6);
        assert!((beam.rect.center.y - 130.0).abs() < 1e-4);
        // Rotated a quarter turn: tall and thin
        assert!((beam.rect.size.x - 10.0).abs() < 1e-4);

        let mut frames = 0;
        while beam.advance(&field) == Lifecycle::Alive {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(beam.rect.top() < 0.0);
    }

    #[test]
    fn test_beam_offset_rotates_heading() {
        let avatar = Avatar::new(Vec2::new(500.0, 300.0), Vec2::new(20.0, 20.0));
        let beam = Beam::fire(1, &avatar, 90.0, Vec2::new(30.0, 10.0));
        assert_eq!(beam.angle, 90.0);
        assert!(beam.vel.y < -0.99);
    }
}
