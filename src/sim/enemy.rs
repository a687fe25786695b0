//! Descending enemies that stop and drop bombs

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::rect::{Field, Rect};
use crate::consts::*;

/// Enemy movement state. `Descending -> Stopped` is one-way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyState {
    #[default]
    Descending,
    Stopped,
}

/// An enemy ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    /// Vertical speed (pixels per frame), zero once stopped
    pub vy: f32,
    /// Stops once its center passes this y
    pub stop_altitude: f32,
    pub state: EnemyState,
    /// Frames between bomb drops; `None` once disabled by an EMP
    pub drop_interval: Option<u32>,
    pub emp_disabled: bool,
    /// Which alien sprite to draw
    pub variant: u8,
}

impl Enemy {
    /// Spawn at a random x on the top edge with a random stop altitude and
    /// drop interval
    pub fn spawn(id: u32, rng: &mut impl Rng, field: &Field, size: Vec2) -> Self {
        let x = rng.random_range(0..=field.width as u32) as f32;
        let max_stop = ((field.height / 2.0) as u32).max(ENEMY_STOP_MIN);
        let stop_altitude = rng.random_range(ENEMY_STOP_MIN..=max_stop) as f32;
        let drop_interval = rng.random_range(ENEMY_DROP_INTERVAL_MIN..=ENEMY_DROP_INTERVAL_MAX);
        let variant = rng.random_range(0..ENEMY_VARIANTS);

        Self {
            id,
            rect: Rect::from_center(Vec2::new(x, 0.0), size),
            vy: ENEMY_DESCENT_SPEED,
            stop_altitude,
            state: EnemyState::Descending,
            drop_interval: Some(drop_interval),
            emp_disabled: false,
            variant,
        }
    }

    /// Advance one frame: stop once past the stop altitude, then move
    pub fn advance(&mut self) {
        if self.rect.center.y > self.stop_altitude {
            self.vy = 0.0;
            self.state = EnemyState::Stopped;
        }
        self.rect.center.y += self.vy;
    }

    /// Whether this enemy drops a bomb on global frame `frame`
    pub fn drops_bomb(&self, frame: u64) -> bool {
        match (self.state, self.drop_interval) {
            (EnemyState::Stopped, Some(interval)) => frame % interval as u64 == 0,
            _ => false,
        }
    }

    /// Stop bomb dropping for good. Returns false if already disabled.
    pub fn disable(&mut self) -> bool {
        if self.emp_disabled {
            return false;
        }
        self.drop_interval = None;
        self.emp_disabled = true;
        true
    }
}
