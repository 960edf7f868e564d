//! Axis-aligned rectangles in screen space
//!
//! Screen space has its origin in the top-left corner with y growing downward,
//! so `min` is the top-left corner and `max` the bottom-right.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle from its top-left corner and size (negative sizes are flipped)
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        let other = origin + size;
        Self {
            min: origin.min(other),
            max: origin.max(other),
        }
    }

    /// Square of edge `size` centered on `center`
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = Vec2::splat(size.abs() / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True if the rectangle encloses no area
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Overlap test with positive area: rectangles that only share an edge
    /// do not intersect, and neither does an empty rectangle.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_square() {
        let r = Rect::centered(Vec2::new(100.0, 300.0), 13.0);
        assert_eq!(r.min, Vec2::new(93.5, 293.5));
        assert_eq!(r.max, Vec2::new(106.5, 306.5));
        assert_eq!(r.width(), 13.0);
    }

    #[test]
    fn test_overlap() {
        let a = Rect::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::from_origin_size(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_shared_edge_is_not_overlap() {
        let a = Rect::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::from_origin_size(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_disjoint() {
        let a = Rect::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Rect::from_origin_size(Vec2::new(0.0, 50.0), Vec2::new(10.0, 10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_empty_never_intersects() {
        let a = Rect::from_origin_size(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let flat = Rect::from_origin_size(Vec2::new(2.0, 2.0), Vec2::new(5.0, 0.0));
        assert!(flat.is_empty());
        assert!(!a.intersects(&flat));
    }

    #[test]
    fn test_negative_size_is_normalized() {
        let r = Rect::from_origin_size(Vec2::new(10.0, 10.0), Vec2::new(-4.0, -6.0));
        assert_eq!(r.min, Vec2::new(6.0, 4.0));
        assert_eq!(r.max, Vec2::new(10.0, 10.0));
    }
}
