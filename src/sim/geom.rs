//! Axis-aligned rectangles and overlap tests
//!
//! Every obstacle check in the game (truck vs barriers, bins vs barriers and
//! gate, truck vs bins for pickup, bin placement) goes through `intersects`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of `size` placed at `pos`
    #[inline]
    pub fn at(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        intersects(self, other)
    }
}

/// Strict AABB overlap: rectangles that only share an edge do not intersect
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && a.x + a.width > b.x && a.y < b.y + b.height && a.y + a.height > b.y
}

/// True if `rect` overlaps any rectangle in `rects` (false for an empty set)
pub fn collides_any(rect: &Rect, rects: &[Rect]) -> bool {
    rects.iter().any(|other| intersects(rect, other))
}

/// Largest position an entity of `size` may occupy inside `arena`
#[inline]
pub fn max_position(arena: Vec2, size: Vec2) -> Vec2 {
    (arena - size).max(Vec2::ZERO)
}

/// Clamp a position so an entity of `size` stays inside `arena`
#[inline]
pub fn clamp_to_arena(pos: Vec2, size: Vec2, arena: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, max_position(arena, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(intersects(&a, &b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
    }

    #[test]
    fn test_contained_rect_intersects() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 5.0, 5.0);
        assert!(intersects(&outer, &inner));
    }

    #[test]
    fn test_collides_any() {
        let rect = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert!(!collides_any(&rect, &[]));

        let walls = [Rect::new(0.0, 0.0, 5.0, 5.0), Rect::new(55.0, 0.0, 5.0, 100.0)];
        assert!(collides_any(&rect, &walls));
        assert!(!collides_any(&rect, &walls[..1]));
    }

    #[test]
    fn test_clamp_to_arena() {
        let arena = Vec2::new(600.0, 400.0);
        let size = Vec2::new(80.0, 40.0);
        assert_eq!(clamp_to_arena(Vec2::new(-5.0, 500.0), size, arena), Vec2::new(0.0, 360.0));
        assert_eq!(clamp_to_arena(Vec2::new(700.0, 10.0), size, arena), Vec2::new(520.0, 10.0));
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.0f32..200.0, 0.0f32..200.0)
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn intersects_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
        }

        #[test]
        fn collides_any_matches_single_checks(rect in rect_strategy(), others in prop::collection::vec(rect_strategy(), 0..6)) {
            let expected = others.iter().any(|o| intersects(&rect, o));
            prop_assert_eq!(collides_any(&rect, &others), expected);
        }
    }
}
