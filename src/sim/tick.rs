//! Fixed-step simulation tick
//!
//! One call advances the game by exactly one frame:
//! EMP overlay timer -> input triggers -> enemy spawn timer -> entity updates
//! -> collision rules.

use serde::{Deserialize, Serialize};

use super::abilities::activate;
use super::avatar::Mood;
use super::collision::{Removal, group_collide, take_touching};
use super::enemy::Enemy;
use super::projectile::Bomb;
use super::state::{Ability, Cause, GameEvent, GamePhase, GameState, Lifecycle};
use crate::consts::*;

/// Keys the simulation understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Speed boost while held; turns Fire into a fan shot
    Boost,
    Fire,
    Hyper,
    Shield,
    Emp,
    Gravity,
    Quit,
}

/// Snapshot of the held movement/modifier keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

impl HeldKeys {
    /// Builder: the same snapshot with `key` held too
    pub fn with(mut self, key: Key) -> Self {
        self.set(key, true);
        self
    }

    /// Set a key's held state; keys that are never held are ignored
    pub fn set(&mut self, key: Key, held: bool) {
        match key {
            Key::Up => self.up = held,
            Key::Down => self.down = held,
            Key::Left => self.left = held,
            Key::Right => self.right = held,
            Key::Boost => self.boost = held,
            _ => {}
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.up,
            Key::Down => self.down,
            Key::Left => self.left,
            Key::Right => self.right,
            Key::Boost => self.boost,
            _ => false,
        }
    }

    /// Sum of the unit deltas of every held direction key
    pub fn movement(&self) -> (i8, i8) {
        let mut dx = 0;
        let mut dy = 0;
        if self.up {
            dy -= 1;
        }
        if self.down {
            dy += 1;
        }
        if self.left {
            dx -= 1;
        }
        if self.right {
            dx += 1;
        }
        (dx, dy)
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub held: HeldKeys,
    /// Key presses this frame, in order
    pub pressed: Vec<Key>,
    pub quit: bool,
}

impl TickInput {
    pub fn holding(held: HeldKeys) -> Self {
        Self {
            held,
            ..Default::default()
        }
    }

    /// Builder: add a key press event
    pub fn press(mut self, key: Key) -> Self {
        if key == Key::Quit {
            self.quit = true;
        } else {
            self.pressed.push(key);
        }
        self
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.events.clear();

    // The overlay timer counts frames already shown, so an EMP triggered
    // this tick stays visible for its full run
    state.emp.update();
    apply_triggers(state, input);

    if state.frame % ENEMY_SPAWN_PERIOD == 0 {
        spawn_enemy(state);
    }

    update_entities(state, input);
    resolve_collisions(state);

    state.frame += 1;
}

fn apply_triggers(state: &mut GameState, input: &TickInput) {
    for &key in &input.pressed {
        let ability = match key {
            Key::Fire if input.held.boost => Ability::SpreadFire,
            Key::Fire => Ability::Fire,
            Key::Hyper => Ability::Hyper,
            Key::Shield => Ability::Shield,
            Key::Emp => Ability::Emp,
            Key::Gravity => Ability::Gravity,
            _ => continue,
        };
        activate(state, ability);
    }
}

fn spawn_enemy(state: &mut GameState) {
    let id = state.next_entity_id();
    let enemy = Enemy::spawn(id, &mut state.rng, &state.field, state.sprites.enemy);
    log::debug!(
        "frame {}: enemy {} spawned at x={}, stops at y={}",
        state.frame,
        id,
        enemy.rect.center.x,
        enemy.stop_altitude
    );
    state.enemies.push(enemy);
    state.events.push(GameEvent::EnemySpawned { id });
}

fn update_entities(state: &mut GameState, input: &TickInput) {
    let field = state.field;

    if state.avatar.update(&input.held, &field) {
        state.events.push(GameEvent::HyperExpired);
    }

    for enemy in &mut state.enemies {
        enemy.advance();
    }

    // Stopped enemies drop bombs aimed at the avatar's current position
    for i in 0..state.enemies.len() {
        if !state.enemies[i].drops_bomb(state.frame) {
            continue;
        }
        let id = state.next_entity_id();
        let bomb = Bomb::drop_from(id, &state.enemies[i], &state.avatar, &mut state.rng);
        let enemy_id = state.enemies[i].id;
        state.bombs.push(bomb);
        state.events.push(GameEvent::BombDropped { id, enemy_id });
    }

    state
        .bombs
        .retain_mut(|bomb| bomb.advance(&field) == Lifecycle::Alive);
    state
        .beams
        .retain_mut(|beam| beam.advance(&field) == Lifecycle::Alive);
    state
        .explosions
        .retain_mut(|exp| exp.advance() == Lifecycle::Alive);
    state
        .gravity_fields
        .retain_mut(|gravity| gravity.advance() == Lifecycle::Alive);
    if state
        .shield
        .as_mut()
        .is_some_and(|shield| shield.advance() == Lifecycle::Expired)
    {
        state.shield = None;
    }
}

/// Collision rules in their fixed order. Beams get to intercept bombs
/// before the avatar's lethal-hit check runs.
fn resolve_collisions(state: &mut GameState) {
    // 1. Bomb x Shield: bomb destroyed, shield stays
    if let Some(area) = state.shield.as_ref().map(|shield| shield.rect) {
        for bomb in take_touching(&mut state.bombs, &area) {
            destroy_bomb(state, &bomb, Cause::Shield);
        }
    }

    // 2. Enemy x Beam: both destroyed
    let shot = group_collide(&mut state.enemies, &mut state.beams, Removal::Both);
    for enemy in shot {
        destroy_enemy(state, &enemy, Cause::Beam);
        state.avatar.mood = Mood::Happy;
    }

    // 3. Bomb x Beam: both destroyed; disarmed bombs vanish without a trace
    let shot = group_collide(&mut state.bombs, &mut state.beams, Removal::Both);
    for bomb in shot {
        if bomb.is_active() {
            destroy_bomb(state, &bomb, Cause::Beam);
        } else {
            state.events.push(GameEvent::BombDestroyed {
                id: bomb.id,
                cause: Cause::Beam,
            });
        }
    }

    // 4. Avatar x Bomb: every touching bomb is consumed. Only an armed bomb
    // is lethal; disarmed ones fizzle without score or explosion.
    let hits = take_touching(&mut state.bombs, &state.avatar);
    if state.avatar.is_hyper() {
        for bomb in &hits {
            destroy_bomb(state, bomb, Cause::Avatar);
        }
    } else if let Some(lethal) = hits.iter().find(|bomb| bomb.is_active()) {
        defeat(state, lethal.id);
        return;
    } else {
        for bomb in &hits {
            state.events.push(GameEvent::BombDestroyed {
                id: bomb.id,
                cause: Cause::Avatar,
            });
        }
    }

    // 5 & 6. Gravity fields pull down bombs, then enemies
    for i in 0..state.gravity_fields.len() {
        let area = state.gravity_fields[i].rect;
        for bomb in take_touching(&mut state.bombs, &area) {
            destroy_bomb(state, &bomb, Cause::Gravity);
        }
        for enemy in take_touching(&mut state.enemies, &area) {
            destroy_enemy(state, &enemy, Cause::Gravity);
        }
    }
}

fn destroy_bomb(state: &mut GameState, bomb: &Bomb, cause: Cause) {
    state.score.credit(BOMB_POINTS);
    state.explode_at(bomb.rect.center, BOMB_EXPLOSION_LIFE);
    state.events.push(GameEvent::BombDestroyed { id: bomb.id, cause });
}

fn destroy_enemy(state: &mut GameState, enemy: &Enemy, cause: Cause) {
    state.score.credit(ENEMY_POINTS);
    state.explode_at(enemy.rect.center, ENEMY_EXPLOSION_LIFE);
    log::debug!("frame {}: enemy {} destroyed by {:?}", state.frame, enemy.id, cause);
    state.events.push(GameEvent::EnemyDestroyed { id: enemy.id, cause });
}

fn defeat(state: &mut GameState, bomb_id: u32) {
    state.phase = GamePhase::Defeated;
    state.avatar.mood = Mood::Sad;
    state.events.push(GameEvent::AvatarDefeated { bomb_id });
    log::info!(
        "Avatar hit by bomb {} on frame {} with score {}",
        bomb_id,
        state.frame,
        state.score.balance()
    );
}
