//! Shape primitives for the course
//!
//! Obstacles are axis-aligned rectangles; the face obstacle and its
//! apertures are ellipses. Everything here is pure geometry with no
//! knowledge of the ball or the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, origin at top-left (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Bottom-right corner
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.pos.x && p.x <= self.max().x && p.y >= self.pos.y && p.y <= self.max().y
    }

    /// Overlap test against the ball's bounding square
    pub fn overlaps_ball(&self, center: Vec2, radius: f32) -> bool {
        center.x + radius > self.pos.x
            && center.x - radius < self.max().x
            && center.y + radius > self.pos.y
            && center.y - radius < self.max().y
    }

    pub fn overlaps_rect(&self, other: &Rect) -> bool {
        !(self.pos.x > other.max().x
            || self.max().x < other.pos.x
            || self.pos.y > other.max().y
            || self.max().y < other.pos.y)
    }
}

/// Ellipse with independent semi-axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Vec2,
    pub radii: Vec2,
}

impl Ellipse {
    pub fn new(cx: f32, cy: f32, rx: f32, ry: f32) -> Self {
        Self {
            center: Vec2::new(cx, cy),
            radii: Vec2::new(rx, ry),
        }
    }

    /// The ellipse inscribed in a rectangle
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            center: rect.center(),
            radii: rect.size / 2.0,
        }
    }

    /// Normalized ellipse distance: `(dx/rx)^2 + (dy/ry)^2`, so values
    /// below 1 are inside
    pub fn normalized_distance(&self, p: Vec2) -> f32 {
        let d = p - self.center;
        (d.x * d.x) / (self.radii.x * self.radii.x) + (d.y * d.y) / (self.radii.y * self.radii.y)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.normalized_distance(p) <= 1.0
    }

    /// Point on the boundary at the given angle from center
    pub fn boundary_point(&self, angle: f32) -> Vec2 {
        self.center + Vec2::new(self.radii.x * angle.cos(), self.radii.y * angle.sin())
    }

    /// Outward surface normal at `p`: the gradient of the implicit
    /// equation, normalized. Degenerate gradients (p at the center)
    /// come back as zero.
    pub fn outward_normal(&self, p: Vec2) -> Vec2 {
        let d = p - self.center;
        Vec2::new(
            2.0 * d.x / (self.radii.x * self.radii.x),
            2.0 * d.y / (self.radii.y * self.radii.y),
        )
        .normalize_or_zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_and_overlap() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(Vec2::new(60.0, 45.0)));
        assert!(!rect.contains(Vec2::new(5.0, 45.0)));

        // Ball square straddling the left edge
        assert!(rect.overlaps_ball(Vec2::new(5.0, 45.0), 8.0));
        // Ball fully clear of the rectangle
        assert!(!rect.overlaps_ball(Vec2::new(5.0, 45.0), 4.0));
    }

    #[test]
    fn rect_rect_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 5.0, 5.0);
        assert!(a.overlaps_rect(&b));
        assert!(b.overlaps_rect(&a));
        assert!(!a.overlaps_rect(&c));
    }

    #[test]
    fn ellipse_distance() {
        let e = Ellipse::new(100.0, 100.0, 50.0, 25.0);
        assert_eq!(e.normalized_distance(Vec2::new(100.0, 100.0)), 0.0);
        assert!((e.normalized_distance(Vec2::new(150.0, 100.0)) - 1.0).abs() < 1e-6);
        assert!((e.normalized_distance(Vec2::new(100.0, 125.0)) - 1.0).abs() < 1e-6);
        assert!(e.contains(Vec2::new(120.0, 110.0)));
        assert!(!e.contains(Vec2::new(160.0, 100.0)));
    }

    #[test]
    fn ellipse_boundary_and_normal() {
        let e = Ellipse::new(100.0, 100.0, 50.0, 25.0);

        let right = e.boundary_point(0.0);
        assert!((right - Vec2::new(150.0, 100.0)).length() < 1e-4);

        let n = e.outward_normal(Vec2::new(150.0, 100.0));
        assert!((n - Vec2::X).length() < 1e-4);

        let n = e.outward_normal(Vec2::new(100.0, 125.0));
        assert!((n - Vec2::Y).length() < 1e-4);

        // Degenerate: the center has no normal
        assert_eq!(e.outward_normal(e.center), Vec2::ZERO);
    }
}
