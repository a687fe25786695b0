//! Pairwise bounding-box collision queries
//!
//! Each rule runs one query between two named collections. Which side is
//! removed on contact is a parameter of the rule, and removal happens while
//! the query runs, so an entity consumed early in a pass cannot hit again
//! later in the same pass.

use super::avatar::Avatar;
use super::effects::{GravityField, Shield};
use super::enemy::Enemy;
use super::projectile::{Beam, Bomb};
use super::rect::Rect;

/// Anything with a bounding box
pub trait Collider {
    fn bounds(&self) -> &Rect;

    #[inline]
    fn touches(&self, other: &impl Collider) -> bool {
        self.bounds().intersects(other.bounds())
    }
}

macro_rules! impl_collider {
    ($($ty:ty),*) => {
        $(impl Collider for $ty {
            #[inline]
            fn bounds(&self) -> &Rect {
                &self.rect
            }
        })*
    };
}

impl_collider!(Avatar, Enemy, Bomb, Beam, Shield, GravityField);

impl Collider for Rect {
    #[inline]
    fn bounds(&self) -> &Rect {
        self
    }
}

/// Which side of a group-vs-group rule is removed on contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// Only the member of the first group goes
    FirstOnly,
    /// Both the first-group member and everything it touched go
    Both,
}

/// Remove every member of `first` that touches any member of `second`.
///
/// Members of `first` are visited in order. With [`Removal::Both`] the
/// touched members of `second` are removed immediately, before the next
/// member of `first` is tested. Returns the removed members of `first`.
pub fn group_collide<A: Collider, B: Collider>(
    first: &mut Vec<A>,
    second: &mut Vec<B>,
    removal: Removal,
) -> Vec<A> {
    let mut hit = Vec::new();
    let mut kept = Vec::with_capacity(first.len());

    for a in std::mem::take(first) {
        if !second.iter().any(|b| a.touches(b)) {
            kept.push(a);
            continue;
        }
        if removal == Removal::Both {
            second.retain(|b| !a.touches(b));
        }
        hit.push(a);
    }

    *first = kept;
    hit
}

/// Remove and return every member of `group` touching `target`
pub fn take_touching<T: Collider>(group: &mut Vec<T>, target: &impl Collider) -> Vec<T> {
    let (hit, kept): (Vec<T>, Vec<T>) = std::mem::take(group)
        .into_iter()
        .partition(|member| member.touches(target));
    *group = kept;
    hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn square(x: f32, y: f32) -> Rect {
        Rect::from_center(Vec2::new(x, y), Vec2::splat(10.0))
    }

    #[test]
    fn test_group_collide_both_consumes_second() {
        // One projectile overlapping two targets: only the first target dies
        let mut targets = vec![square(0.0, 0.0), square(6.0, 0.0)];
        let mut shots = vec![square(3.0, 0.0)];
        let hit = group_collide(&mut targets, &mut shots, Removal::Both);
        assert_eq!(hit.len(), 1);
        assert_eq!(hit[0].center.x, 0.0);
        assert_eq!(targets.len(), 1);
        assert!(shots.is_empty());
    }

    #[test]
    fn test_group_collide_first_only_keeps_second() {
        let mut targets = vec![square(0.0, 0.0), square(6.0, 0.0), square(100.0, 0.0)];
        let mut walls = vec![square(3.0, 0.0)];
        let hit = group_collide(&mut targets, &mut walls, Removal::FirstOnly);
        assert_eq!(hit.len(), 2);
        assert_eq!(targets.len(), 1);
        assert_eq!(walls.len(), 1);
    }

    #[test]
    fn test_group_collide_preserves_order() {
        let mut targets = vec![square(0.0, 0.0), square(50.0, 0.0), square(100.0, 0.0)];
        let mut shots = vec![square(50.0, 0.0)];
        group_collide(&mut targets, &mut shots, Removal::Both);
        let xs: Vec<f32> = targets.iter().map(|r| r.center.x).collect();
        assert_eq!(xs, vec![0.0, 100.0]);
    }

    #[test]
    fn test_take_touching() {
        let mut group = vec![square(0.0, 0.0), square(30.0, 0.0), square(5.0, 5.0)];
        let taken = take_touching(&mut group, &square(2.0, 2.0));
        assert_eq!(taken.len(), 2);
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].center.x, 30.0);
    }
}
