//! Deterministic simulation module
//!
//! Every gameplay rule lives here, behind [`tick`]. Given the same seed and
//! the same inputs, two runs produce identical states: one fixed step per
//! tick, all randomness from the state's RNG, collections walked in
//! insertion order. Nothing in here draws or touches the platform.

pub mod abilities;
pub mod avatar;
pub mod collision;
pub mod effects;
pub mod emp;
pub mod enemy;
pub mod projectile;
pub mod rect;
pub mod score;
pub mod state;
pub mod tick;

pub use abilities::{SpreadBeam, activate};
pub use avatar::{Avatar, AvatarState, Facing, Mood};
pub use collision::{Collider, Removal, group_collide, take_touching};
pub use effects::{Explosion, GravityField, Shield};
pub use emp::{Emp, EmpReport};
pub use enemy::{Enemy, EnemyState};
pub use projectile::{Beam, Bomb, BombState};
pub use rect::{Field, Rect, direction_to, rotated_extent};
pub use score::ScoreLedger;
pub use state::{Ability, Cause, GameEvent, GamePhase, GameState, Lifecycle};
pub use tick::{HeldKeys, Key, TickInput, tick};
