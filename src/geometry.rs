//! Pixel-space rectangles and the collision resolver used while dragging.
//!
//! All coordinates are container-local `f64` pixels. The resolver is a
//! single-axis minimal-translation heuristic: each pairwise step moves the
//! rectangle along one axis only, and the multi-body pass is order dependent
//! and capped, so callers must still clamp the result to the container.

use serde::{Deserialize, Serialize};

use crate::constants::MAX_COLLISION_PASSES;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset that moves `origin` onto `self`.
    pub fn delta_from(self, origin: Point) -> Offset {
        Offset {
            dx: self.x - origin.x,
            dy: self.y - origin.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const ZERO: Offset = Offset { dx: 0.0, dy: 0.0 };

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

impl std::ops::AddAssign for Offset {
    fn add_assign(&mut self, rhs: Offset) {
        self.dx += rhs.dx;
        self.dy += rhs.dy;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn translate(self, offset: Offset) -> Rect {
        Rect {
            x: self.x + offset.dx,
            y: self.y + offset.dy,
            ..self
        }
    }

    /// Half-open containment: the right and bottom edges are outside.
    pub fn contains(&self, point: Point) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 {
            return false;
        }
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// True when both rectangles overlap with positive extent on both axes.
/// Rectangles that only share an edge do not intersect.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// Smallest single-axis translation that moves `a` off `b`.
///
/// The axis with the smaller overlap wins (ties go to the vertical axis);
/// within that axis the shorter direction wins (ties push right/down).
pub fn resolve_collision(a: &Rect, b: &Rect) -> Offset {
    if !intersects(a, b) {
        return Offset::ZERO;
    }
    let overlap_left = a.right() - b.x;
    let overlap_right = b.right() - a.x;
    let overlap_top = a.bottom() - b.y;
    let overlap_bottom = b.bottom() - a.y;
    let min_x = overlap_left.min(overlap_right);
    let min_y = overlap_top.min(overlap_bottom);
    if min_x < min_y {
        let dx = if overlap_left < overlap_right {
            -overlap_left
        } else {
            overlap_right
        };
        Offset { dx, dy: 0.0 }
    } else {
        let dy = if overlap_top < overlap_bottom {
            -overlap_top
        } else {
            overlap_bottom
        };
        Offset { dx: 0.0, dy }
    }
}

/// Pushes `moving` away from every rectangle in `others` except `exclude`,
/// accumulating the displacement over at most `MAX_COLLISION_PASSES` passes.
///
/// Stops early after a pass that moved nothing. The outcome depends on the
/// order of `others` and is not guaranteed to be collision free.
pub fn resolve_collisions_with_others<Id: PartialEq>(
    moving: Rect,
    others: &[(Id, Rect)],
    exclude: &Id,
) -> Offset {
    let mut total = Offset::ZERO;
    let mut current = moving;
    for _ in 0..MAX_COLLISION_PASSES {
        let mut moved = false;
        for (id, bounds) in others {
            if id == exclude {
                continue;
            }
            let step = resolve_collision(&current, bounds);
            if !step.is_zero() {
                current = current.translate(step);
                total += step;
                moved = true;
            }
        }
        if !moved {
            break;
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let right = Rect::new(100.0, 0.0, 50.0, 50.0);
        let below = Rect::new(0.0, 100.0, 50.0, 50.0);
        assert!(!intersects(&a, &right));
        assert!(!intersects(&a, &below));
        assert!(intersects(&a, &Rect::new(99.0, 99.0, 10.0, 10.0)));
    }

    #[test]
    fn disjoint_rects_resolve_to_zero() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(50.0, 50.0, 10.0, 10.0);
        assert_eq!(resolve_collision(&a, &b), Offset::ZERO);
    }

    #[test]
    fn resolves_along_smaller_overlap_axis() {
        // 10px horizontal overlap, 80px vertical overlap -> push left.
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(90.0, 20.0, 100.0, 100.0);
        let off = resolve_collision(&a, &b);
        assert_eq!(off, Offset { dx: -10.0, dy: 0.0 });
        assert!(!intersects(&a.translate(off), &b));
    }

    #[test]
    fn vertical_overlap_pushes_up_or_down() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 95.0, 100.0, 100.0);
        assert_eq!(resolve_collision(&a, &b), Offset { dx: 0.0, dy: -5.0 });
        let c = Rect::new(0.0, -95.0, 100.0, 100.0);
        assert_eq!(resolve_collision(&a, &c), Offset { dx: 0.0, dy: 5.0 });
    }

    #[test]
    fn identical_rects_push_down() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let off = resolve_collision(&a, &a);
        assert_eq!(off, Offset { dx: 0.0, dy: 100.0 });
    }

    #[test]
    fn nudged_duplicate_separates_horizontally() {
        let a = Rect::new(1.0, 0.0, 100.0, 100.0);
        let b = Rect::new(0.0, 0.0, 100.0, 100.0);
        let others = vec![("b", b)];
        let off = resolve_collisions_with_others(a, &others, &"a");
        assert!(!off.is_zero());
        assert!(!intersects(&a.translate(off), &b));
    }

    #[test]
    fn excluded_id_is_skipped() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let others = vec![("a", a)];
        assert_eq!(resolve_collisions_with_others(a, &others, &"a"), Offset::ZERO);
    }

    #[test]
    fn multi_body_accumulates_displacement() {
        let moving = Rect::new(40.0, 0.0, 100.0, 50.0);
        let others = vec![
            (1u8, Rect::new(0.0, 0.0, 50.0, 50.0)),
            (2u8, Rect::new(200.0, 0.0, 50.0, 50.0)),
        ];
        let off = resolve_collisions_with_others(moving, &others, &0u8);
        let placed = moving.translate(off);
        for (_, other) in &others {
            assert!(!intersects(&placed, other));
        }
    }

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(r.contains(Point::new(10.0, 10.0)));
        assert!(!r.contains(Point::new(30.0, 15.0)));
        assert!(!Rect::new(0.0, 0.0, 0.0, 10.0).contains(Point::new(0.0, 0.0)));
    }
}
