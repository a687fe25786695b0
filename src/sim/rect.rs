//! Axis-aligned bounding boxes and the play-field rectangle
//!
//! Screen coordinates: origin at the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// An axis-aligned rectangle stored by center and full size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    pub fn from_corner(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(left + width / 2.0, top + height / 2.0),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Same rectangle shifted by `delta`
    #[inline]
    pub fn translated(&self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            size: self.size,
        }
    }

    /// Strict overlap test: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// The play-field rectangle, anchored at the origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Per-axis containment: `(x_ok, y_ok)` is true on an axis iff the box
    /// lies fully inside the field on that axis
    pub fn in_bounds(&self, rect: &Rect) -> (bool, bool) {
        let x_ok = rect.left() >= 0.0 && rect.right() <= self.width;
        let y_ok = rect.top() >= 0.0 && rect.bottom() <= self.height;
        (x_ok, y_ok)
    }

    /// True iff the box is fully inside the field on both axes
    #[inline]
    pub fn contains(&self, rect: &Rect) -> bool {
        self.in_bounds(rect) == (true, true)
    }

    /// The whole field as a rectangle
    pub fn as_rect(&self) -> Rect {
        Rect::from_corner(0.0, 0.0, self.width, self.height)
    }
}

/// Unit vector from the center of `origin` toward the center of `target`.
///
/// Returns `None` when both centers coincide.
pub fn direction_to(origin: &Rect, target: &Rect) -> Option<Vec2> {
    let diff = target.center - origin.center;
    let len = diff.length();
    if len <= f32::EPSILON {
        return None;
    }
    Some(diff / len)
}

/// Axis-aligned extent of a `size` box rotated by `angle_deg`
pub fn rotated_extent(size: Vec2, angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
