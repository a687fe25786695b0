//! EMP pulse: disables every live enemy's bomb bay and disarms live bombs
//!
//! Effects are set-membership operations: enemies and bombs already hit stay
//! as they are, so repeated pulses only reach newcomers.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::projectile::Bomb;

/// What a single pulse changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmpReport {
    pub enemies_disabled: usize,
    pub bombs_disarmed: usize,
}

/// EMP controller; only the visible overlay has state of its own
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Emp {
    /// Overlay currently shown
    pub visible: bool,
    /// Frames of overlay left
    pub overlay_frames: u32,
}

impl Emp {
    pub fn activate(
        &mut self,
        enemies: &mut [Enemy],
        bombs: &mut [Bomb],
        overlay_frames: u32,
    ) -> EmpReport {
        let enemies_disabled = enemies.iter_mut().map(Enemy::disable).filter(|&hit| hit).count();
        let bombs_disarmed = bombs.iter_mut().map(Bomb::disarm).filter(|&hit| hit).count();

        self.visible = true;
        self.overlay_frames = overlay_frames;

        EmpReport {
            enemies_disabled,
            bombs_disarmed,
        }
    }

    /// Count down one shown overlay frame, hiding it when the timer runs out.
    ///
    /// Called at the start of the following frame, after the overlay was drawn.
    pub fn update(&mut self) {
        if !self.visible {
            return;
        }
        self.overlay_frames = self.overlay_frames.saturating_sub(1);
        if self.overlay_frames == 0 {
            self.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::avatar::Avatar;
    use crate::sim::enemy::EnemyState;
    use crate::sim::projectile::BombState;
    use crate::sim::rect::Rect;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy(id: u32) -> Enemy {
        Enemy {
            id,
            rect: Rect::from_center(Vec2::new(100.0 * id as f32, 80.0), Vec2::new(40.0, 40.0)),
            vy: 0.0,
            stop_altitude: 80.0,
            state: EnemyState::Stopped,
            drop_interval: Some(60),
            emp_disabled: false,
            variant: 0,
        }
    }

    #[test]
    fn test_pulse_is_cumulative() {
        let mut rng = Pcg32::seed_from_u64(5);
        let avatar = Avatar::new(Vec2::new(600.0, 500.0), Vec2::new(40.0, 40.0));
        let mut enemies = vec![enemy(1), enemy(2)];
        let mut bombs = vec![Bomb::drop_from(10, &enemies[0], &avatar, &mut rng)];
        let mut emp = Emp::default();

        let first = emp.activate(&mut enemies, &mut bombs, 3);
        assert_eq!(first.enemies_disabled, 2);
        assert_eq!(first.bombs_disarmed, 1);
        assert!(enemies.iter().all(|e| e.emp_disabled && e.drop_interval.is_none()));
        assert_eq!(bombs[0].state, BombState::Inactive);
        let halved = bombs[0].speed;

        // A newcomer is affected, old members are left alone
        enemies.push(enemy(3));
        bombs.push(Bomb::drop_from(11, &enemies[2], &avatar, &mut rng));
        let second = emp.activate(&mut enemies, &mut bombs, 3);
        assert_eq!(second.enemies_disabled, 1);
        assert_eq!(second.bombs_disarmed, 1);
        assert_eq!(bombs[0].speed, halved);
    }

    #[test]
    fn test_overlay_timer_counts_down() {
        let mut emp = Emp::default();
        emp.activate(&mut [], &mut [], 3);
        assert!(emp.visible);
        emp.update();
        emp.update();
        assert!(emp.visible);
        emp.update();
        assert!(!emp.visible);
        emp.update();
        assert_eq!(emp.overlay_frames, 0);
    }

    #[test]
    fn test_overlay_drawn_for_three_frames() {
        use crate::consts::EMP_OVERLAY_FRAMES;
        use crate::render::{RecordingRenderer, SpriteKind, draw_frame};
        use crate::settings::Settings;
        use crate::sim::score::ScoreLedger;
        use crate::sim::state::GameState;
        use crate::sim::tick::{Key, TickInput, tick};

        let mut state = GameState::new(&Settings::default(), 8);
        state.score = ScoreLedger::new(100);
        state.frame = 1;
        let mut renderer = RecordingRenderer::new();

        let mut drawn = 0;
        tick(&mut state, &TickInput::default().press(Key::Emp));
        for _ in 0..6 {
            draw_frame(&state, &mut renderer);
            drawn += renderer.count(|k| matches!(k, SpriteKind::EmpOverlay));
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(drawn, EMP_OVERLAY_FRAMES as usize);
        assert!(!state.emp.visible);
    }
}
