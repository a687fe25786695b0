//! Demo autopilot
//!
//! A simple deterministic policy that plays the game headless: line up under
//! the lowest enemy, turn north and shoot, dodge bombs that get close, and
//! spend score on abilities when they are affordable and useful.

use crate::consts::*;
use crate::session::InputSource;
use crate::sim::{Bomb, Facing, GameState, HeldKeys, Key, TickInput};

/// Bombs closer than this to the avatar center are threats
const DANGER_RADIUS: f32 = 160.0;
/// Horizontal alignment slack when lining up a shot
const AIM_SLACK: f32 = 12.0;
/// Live bombs needed before an EMP is worth it
const EMP_BOMB_THRESHOLD: usize = 4;
/// Enemies on the field before summoning a gravity field
const GRAVITY_ENEMY_THRESHOLD: usize = 3;

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Frames between shots
    pub fire_cooldown: u64,
    /// Every n-th shot is a fan
    pub spread_every: u32,
    /// Altitude the avatar drifts back to between shots
    pub home_y: f32,
    next_fire: u64,
    shots: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            fire_cooldown: 8,
            spread_every: 4,
            home_y: AVATAR_START.1,
            next_fire: 0,
            shots: 0,
        }
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn nearest_threat<'a>(&self, state: &'a GameState) -> Option<&'a Bomb> {
        let me = state.avatar.rect.center;
        state
            .bombs
            .iter()
            .filter(|b| b.is_active())
            .filter(|b| b.rect.center.distance(me) < DANGER_RADIUS + b.rect.size.x / 2.0)
            .min_by(|a, b| {
                a.rect
                    .center
                    .distance(me)
                    .partial_cmp(&b.rect.center.distance(me))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    /// Pick an ability to spend score on, if any
    fn pick_ability(&self, state: &GameState, threatened: bool) -> Option<Key> {
        let score = state.score.balance();
        let live_bombs = state.bombs.iter().filter(|b| b.is_active()).count();

        if state.enemies.len() >= GRAVITY_ENEMY_THRESHOLD && score >= GRAVITY_COST {
            return Some(Key::Gravity);
        }
        if threatened {
            if state.shield.is_none() && score >= SHIELD_COST {
                return Some(Key::Shield);
            }
            if !state.avatar.is_hyper() && score >= HYPER_COST {
                return Some(Key::Hyper);
            }
        }
        if live_bombs >= EMP_BOMB_THRESHOLD && score > EMP_COST {
            return Some(Key::Emp);
        }
        None
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let avatar = &state.avatar;
        let me = avatar.rect.center;
        let threat = self.nearest_threat(state);
        let protected = avatar.is_hyper() || state.shield.is_some();

        let mut held = HeldKeys::default();
        let mut input = TickInput::default();

        if let Some(key) = self.pick_ability(state, threat.is_some()) {
            input = input.press(key);
        }

        if let (Some(bomb), false) = (threat, protected) {
            // Run sideways, away from the bomb, at full speed
            let away = if bomb.rect.center.x > me.x {
                Key::Left
            } else {
                Key::Right
            };
            held = held.with(away).with(Key::Boost);
            if me.y < self.home_y {
                held = held.with(Key::Down);
            }
            input.held = held;
            return input;
        }

        // Line up under the lowest enemy
        let target = state
            .enemies
            .iter()
            .filter(|e| !e.emp_disabled)
            .max_by(|a, b| {
                a.rect
                    .center
                    .y
                    .partial_cmp(&b.rect.center.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|e| e.rect.center);

        let Some(target) = target else {
            if me.y < self.home_y - AVATAR_SPEED {
                held = held.with(Key::Down);
            }
            input.held = held;
            return input;
        };

        let dx = target.x - me.x;
        if dx.abs() > AIM_SLACK {
            held = held.with(if dx > 0.0 { Key::Right } else { Key::Left });
            if me.y < self.home_y - AVATAR_SPEED {
                held = held.with(Key::Down);
            }
        } else if avatar.facing != Facing::North {
            // One step up turns the avatar to face the enemy
            held = held.with(Key::Up);
        } else if state.frame >= self.next_fire && target.y < me.y {
            self.shots += 1;
            if self.spread_every > 0 && self.shots % self.spread_every == 0 {
                held = held.with(Key::Boost);
            }
            input = input.press(Key::Fire);
            self.next_fire = state.frame + self.fire_cooldown;
        }

        input.held = held;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{BombState, Enemy, EnemyState, Rect, ScoreLedger};
    use glam::Vec2;

    fn enemy_at(id: u32, center: Vec2) -> Enemy {
        Enemy {
            id,
            rect: Rect::from_center(center, Vec2::new(80.0, 72.0)),
            vy: 0.0,
            stop_altitude: center.y,
            state: EnemyState::Stopped,
            drop_interval: None,
            emp_disabled: false,
            variant: 0,
        }
    }

    fn bomb_at(id: u32, center: Vec2) -> Bomb {
        Bomb {
            id,
            rect: Rect::from_center(center, Vec2::splat(20.0)),
            vel: Vec2::Y,
            speed: BOMB_SPEED,
            state: BombState::Active,
            color: 0,
        }
    }

    #[test]
    fn test_moves_toward_enemy() {
        let mut state = GameState::new(&Settings::default(), 5);
        state.enemies.push(enemy_at(1, Vec2::new(300.0, 100.0)));
        let input = Autopilot::new().poll(&state);
        assert!(input.held.left);
        assert!(!input.held.right);
        assert!(input.pressed.is_empty());
    }

    #[test]
    fn test_turns_north_then_fires() {
        let mut state = GameState::new(&Settings::default(), 5);
        let x = state.avatar.rect.center.x;
        state.enemies.push(enemy_at(1, Vec2::new(x, 100.0)));
        let mut pilot = Autopilot::new();

        let input = pilot.poll(&state);
        assert!(input.held.up);

        state.avatar.facing = Facing::North;
        let input = pilot.poll(&state);
        assert_eq!(input.pressed, vec![Key::Fire]);
        // Cooldown holds the next shot
        let input = pilot.poll(&state);
        assert!(input.pressed.is_empty());
    }

    #[test]
    fn test_dodges_close_bomb() {
        let mut state = GameState::new(&Settings::default(), 5);
        let me = state.avatar.rect.center;
        state.bombs.push(bomb_at(1, me + Vec2::new(30.0, -60.0)));
        let input = Autopilot::new().poll(&state);
        assert!(input.held.left);
        assert!(input.held.boost);
    }

    #[test]
    fn test_raises_shield_when_threatened_and_affordable() {
        let mut state = GameState::new(&Settings::default(), 5);
        state.score = ScoreLedger::new(SHIELD_COST);
        let me = state.avatar.rect.center;
        state.bombs.push(bomb_at(1, me + Vec2::new(-30.0, -60.0)));
        let input = Autopilot::new().poll(&state);
        assert_eq!(input.pressed, vec![Key::Shield]);
    }

    #[test]
    fn test_broke_autopilot_buys_nothing() {
        let mut state = GameState::new(&Settings::default(), 5);
        for i in 0..5 {
            state.enemies.push(enemy_at(i, Vec2::new(100.0 + 150.0 * i as f32, 100.0)));
        }
        let input = Autopilot::new().poll(&state);
        assert!(input.pressed.is_empty());
    }
}
