//! Ability activation
//!
//! Every paid ability debits the score ledger first and does nothing else
//! if the debit is refused.

use super::effects::{GravityField, Shield};
use super::projectile::Beam;
use super::state::{Ability, GameEvent, GameState};
use crate::consts::*;

/// Generates a fan of beam headings spread evenly around the facing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadBeam {
    pub count: usize,
    pub half_arc_deg: f32,
}

impl SpreadBeam {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            half_arc_deg: SPREAD_HALF_ARC_DEG,
        }
    }

    /// Heading offsets in degrees, evenly spaced over `±half_arc_deg`.
    ///
    /// A single beam goes straight ahead; odd counts always include 0.
    pub fn offsets(&self) -> Vec<f32> {
        if self.count <= 1 {
            return vec![0.0];
        }
        let span = 2.0 * self.half_arc_deg;
        let steps = (self.count - 1) as f32;
        (0..self.count)
            .map(|i| -self.half_arc_deg + span * i as f32 / steps)
            .collect()
    }
}

/// Try to activate `ability`. Returns true if it took effect.
pub fn activate(state: &mut GameState, ability: Ability) -> bool {
    let used = match ability {
        Ability::Fire => {
            fire_beam(state, 0.0);
            true
        }
        Ability::SpreadFire => {
            for offset in SpreadBeam::new(state.spread_count).offsets() {
                fire_beam(state, offset);
            }
            true
        }
        Ability::Hyper => activate_hyper(state),
        Ability::Shield => raise_shield(state),
        Ability::Emp => trigger_emp(state),
        Ability::Gravity => summon_gravity(state),
    };

    if used {
        log::debug!(
            "frame {}: {:?} used, score {}",
            state.frame,
            ability,
            state.score.balance()
        );
        state.events.push(GameEvent::AbilityUsed(ability));
    } else {
        log::debug!(
            "frame {}: {:?} refused, score {}",
            state.frame,
            ability,
            state.score.balance()
        );
        state.events.push(GameEvent::AbilityRefused(ability));
    }
    used
}

fn fire_beam(state: &mut GameState, offset_deg: f32) {
    let id = state.next_entity_id();
    let beam = Beam::fire(id, &state.avatar, offset_deg, state.sprites.beam);
    state.beams.push(beam);
}

/// Hyper mode: only from normal state; also fires one beam
fn activate_hyper(state: &mut GameState) -> bool {
    if state.avatar.is_hyper() || !state.score.debit(HYPER_COST) {
        return false;
    }
    state.avatar.enter_hyper(HYPER_LIFE);
    fire_beam(state, 0.0);
    true
}

/// Shield: refused while one is still up
fn raise_shield(state: &mut GameState) -> bool {
    if state.shield.is_some() || !state.score.debit(SHIELD_COST) {
        return false;
    }
    state.shield = Some(Shield::raise(
        &state.avatar,
        SHIELD_LIFE,
        state.sprites.shield_thickness,
    ));
    true
}

/// EMP: needs a balance strictly above its cost
fn trigger_emp(state: &mut GameState) -> bool {
    if !state.score.debit_strict(EMP_COST) {
        return false;
    }
    let report = state
        .emp
        .activate(&mut state.enemies, &mut state.bombs, EMP_OVERLAY_FRAMES);
    log::debug!(
        "EMP disabled {} enemies, disarmed {} bombs",
        report.enemies_disabled,
        report.bombs_disarmed
    );
    true
}

fn summon_gravity(state: &mut GameState) -> bool {
    if !state.score.debit(GRAVITY_COST) {
        return false;
    }
    state
        .gravity_fields
        .push(GravityField::covering(&state.field, GRAVITY_LIFE));
    true
}
