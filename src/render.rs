//! Render collaborator interface
//!
//! The simulation never draws. After each tick the session walks the state
//! and hands the renderer one [`Sprite`] per visible thing, back to front,
//! then presents the frame. Pixel content is entirely up to the renderer.

use glam::Vec2;

use crate::consts::SCORE_HUD_OFFSET;
use crate::sim::{AvatarState, Facing, GameState, Mood, Rect};

/// What to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpriteKind {
    Background,
    Beam,
    /// One of the alien images; `disabled` asks for the EMP filter
    Enemy { variant: u8, disabled: bool },
    /// Filled circle; `armed` is false once an EMP has hit it
    Bomb { color: u8, armed: bool },
    GravityField,
    /// `frame` picks one of the two alternating explosion images
    Explosion { frame: usize },
    /// `hyper` asks for the damage filter
    Avatar {
        facing: Facing,
        mood: Mood,
        hyper: bool,
    },
    /// Translucent full-field flash while an EMP is visible
    EmpOverlay,
    Shield,
    Score { value: u64 },
}

/// A sprite placed on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
    /// Rotation in degrees, counter-clockwise
    pub angle: f32,
}

impl Sprite {
    fn upright(kind: SpriteKind, rect: Rect) -> Self {
        Self {
            kind,
            rect,
            angle: 0.0,
        }
    }
}

/// Drawing surface supplied by the platform layer
pub trait Renderer {
    fn draw_sprite(&mut self, sprite: &Sprite);
    fn present(&mut self);
}

/// Draw the whole frame, back to front, and present it
pub fn draw_frame(state: &GameState, renderer: &mut impl Renderer) {
    let field_rect = state.field.as_rect();
    renderer.draw_sprite(&Sprite::upright(SpriteKind::Background, field_rect));

    for beam in &state.beams {
        renderer.draw_sprite(&Sprite {
            kind: SpriteKind::Beam,
            rect: beam.rect,
            angle: beam.angle,
        });
    }
    for enemy in &state.enemies {
        let kind = SpriteKind::Enemy {
            variant: enemy.variant,
            disabled: enemy.emp_disabled,
        };
        renderer.draw_sprite(&Sprite::upright(kind, enemy.rect));
    }
    for bomb in &state.bombs {
        let kind = SpriteKind::Bomb {
            color: bomb.color,
            armed: bomb.is_active(),
        };
        renderer.draw_sprite(&Sprite::upright(kind, bomb.rect));
    }
    for gravity in &state.gravity_fields {
        renderer.draw_sprite(&Sprite::upright(SpriteKind::GravityField, gravity.rect));
    }
    for explosion in &state.explosions {
        let kind = SpriteKind::Explosion {
            frame: explosion.frame(),
        };
        renderer.draw_sprite(&Sprite::upright(kind, explosion.rect));
    }

    let avatar = &state.avatar;
    renderer.draw_sprite(&Sprite::upright(
        SpriteKind::Avatar {
            facing: avatar.facing,
            mood: avatar.mood,
            hyper: matches!(avatar.state, AvatarState::Hyper { .. }),
        },
        avatar.rect,
    ));

    if state.emp.visible {
        renderer.draw_sprite(&Sprite::upright(SpriteKind::EmpOverlay, field_rect));
    }
    if let Some(shield) = &state.shield {
        renderer.draw_sprite(&Sprite {
            kind: SpriteKind::Shield,
            rect: shield.rect,
            angle: shield.angle,
        });
    }

    let hud = Vec2::new(SCORE_HUD_OFFSET.0, state.field.height - SCORE_HUD_OFFSET.1);
    renderer.draw_sprite(&Sprite::upright(
        SpriteKind::Score {
            value: state.score.balance(),
        },
        Rect::from_center(hud, Vec2::ZERO),
    ));

    renderer.present();
}

/// Renderer that keeps the last presented frame in memory
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pending: Vec<Sprite>,
    /// Sprites of the most recently presented frame
    pub last_frame: Vec<Sprite>,
    pub frames_presented: u64,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sprites in the last frame whose kind matches
    pub fn count(&self, matches: impl Fn(&SpriteKind) -> bool) -> usize {
        self.last_frame.iter().filter(|s| matches(&s.kind)).count()
    }
}

impl Renderer for RecordingRenderer {
    fn draw_sprite(&mut self, sprite: &Sprite) {
        self.pending.push(*sprite);
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        log::trace!(
            "frame {} presented with {} sprites",
            self.frames_presented,
            self.last_frame.len()
        );
    }
}
