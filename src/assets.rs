//! Asset collaborator interface
//!
//! The simulation never looks at pixels. It only needs the bounding size of
//! each sprite, resolved once when a session starts.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Sprites whose bounding size comes from an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Avatar,
    Enemy,
    Beam,
    Explosion,
}

/// Resolves asset identifiers to the bounding size of the loaded image
pub trait Assets {
    /// Size of the image, or `None` if the asset is unknown
    fn bounds(&self, id: AssetId) -> Option<Vec2>;
}

/// Bounding sizes used by the simulation for collisions and bounds checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub avatar: Vec2,
    pub enemy: Vec2,
    /// Unrotated beam size, pointing along +x
    pub beam: Vec2,
    pub explosion: Vec2,
    /// Shield length is twice the avatar height; this is its width
    pub shield_thickness: f32,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            avatar: Vec2::new(88.0, 80.0),
            enemy: Vec2::new(80.0, 72.0),
            beam: Vec2::new(90.0, 24.0),
            explosion: Vec2::new(100.0, 100.0),
            shield_thickness: 20.0,
        }
    }
}

impl SpriteSizes {
    /// Ask the asset collaborator for every sprite size, keeping the default
    /// for anything it cannot resolve
    pub fn resolve(assets: &impl Assets) -> Self {
        let mut sizes = Self::default();
        let slots = [
            (AssetId::Avatar, &mut sizes.avatar),
            (AssetId::Enemy, &mut sizes.enemy),
            (AssetId::Beam, &mut sizes.beam),
            (AssetId::Explosion, &mut sizes.explosion),
        ];
        for (id, slot) in slots {
            match assets.bounds(id) {
                Some(size) if size.x > 0.0 && size.y > 0.0 => *slot = size,
                Some(size) => log::warn!("Ignoring degenerate size {size} for {id:?}"),
                None => log::warn!("No asset for {id:?}, using default size {}", *slot),
            }
        }
        sizes
    }

    /// True when every size is strictly positive
    pub fn is_valid(&self) -> bool {
        [self.avatar, self.enemy, self.beam, self.explosion]
            .iter()
            .all(|s| s.x > 0.0 && s.y > 0.0)
            && self.shield_thickness > 0.0
    }
}

/// Asset collaborator backed by the built-in sizes, for headless runs
#[derive(Debug, Clone, Default)]
pub struct BuiltinAssets {
    pub sizes: SpriteSizes,
}

impl Assets for BuiltinAssets {
    fn bounds(&self, id: AssetId) -> Option<Vec2> {
        Some(match id {
            AssetId::Avatar => self.sizes.avatar,
            AssetId::Enemy => self.sizes.enemy,
            AssetId::Beam => self.sizes.beam,
            AssetId::Explosion => self.sizes.explosion,
        })
    }
}
