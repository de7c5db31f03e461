//! Axis-aligned rectangle geometry
//!
//! Screen space: x grows right, y grows down. A rect spans
//! `[left, right] x [top, bottom]`.

use glam::Vec2;
use serde::Serialize;

use crate::clamp;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + w,
            bottom: y + h,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    /// Closest point on (or inside) the rect to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp(p.x, self.left, self.right),
            clamp(p.y, self.top, self.bottom),
        )
    }

    /// Shift the rect by `offset`
    #[cfg(test)]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            left: self.left + offset.x,
            top: self.top + offset.y,
            right: self.right + offset.x,
            bottom: self.bottom + offset.y,
        }
    }
}

/// True iff the squared distance from `center` to the closest point of
/// `rect` is at most `radius²`
pub fn circle_intersects_rect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    (center - closest).length_squared() <= radius * radius
}

/// Axis along which a ball should reflect off a rect it overlaps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImpactAxis {
    /// Side hit: invert horizontal velocity
    Horizontal,
    /// Top/bottom hit: invert vertical velocity
    Vertical,
}

/// Approximate the axis of impact by comparing how deep the center sits
/// from the nearest vertical edge against the nearest horizontal edge.
pub fn impact_axis(center: Vec2, rect: &Rect) -> ImpactAxis {
    let left = center.x - rect.left;
    let right = rect.right - center.x;
    let top = center.y - rect.top;
    let bottom = rect.bottom - center.y;

    if left.min(right) < top.min(bottom) {
        ImpactAxis::Horizontal
    } else {
        ImpactAxis::Vertical
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_circle_fully_inside() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(circle_intersects_rect(Vec2::new(50.0, 25.0), 5.0, &rect));
    }

    #[test]
    fn test_circle_tangent() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        // Exactly radius away from the right edge
        assert!(circle_intersects_rect(Vec2::new(110.0, 25.0), 10.0, &rect));
        // Exactly radius away from the top edge
        assert!(circle_intersects_rect(Vec2::new(50.0, -4.0), 4.0, &rect));
    }

    #[test]
    fn test_circle_clearly_outside() {
        let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(!circle_intersects_rect(Vec2::new(200.0, 25.0), 10.0, &rect));
        // Near a corner but diagonal distance exceeds radius
        assert!(!circle_intersects_rect(Vec2::new(108.0, 58.0), 10.0, &rect));
    }

    #[test]
    fn test_impact_axis() {
        let rect = Rect::new(0.0, 0.0, 70.0, 20.0);
        // Just inside the left edge, vertically centered
        assert_eq!(impact_axis(Vec2::new(1.0, 10.0), &rect), ImpactAxis::Horizontal);
        // Just inside the top edge, horizontally centered
        assert_eq!(impact_axis(Vec2::new(35.0, 1.0), &rect), ImpactAxis::Vertical);
        // Below the rect, centered: vertical
        assert_eq!(impact_axis(Vec2::new(35.0, 24.0), &rect), ImpactAxis::Vertical);
    }

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 40.0);
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
    }

    proptest! {
        #[test]
        fn intersection_is_translation_invariant(
            cx in -200.0f32..200.0,
            cy in -200.0f32..200.0,
            r in 1.0f32..50.0,
            dx in -500.0f32..500.0,
            dy in -500.0f32..500.0,
        ) {
            // Integer offsets keep the float arithmetic exact
            let offset = Vec2::new(dx.round(), dy.round());
            let center = Vec2::new(cx.round(), cy.round());
            let rect = Rect::new(0.0, 0.0, 64.0, 32.0);
            let a = circle_intersects_rect(center, r.round(), &rect);
            let b = circle_intersects_rect(center + offset, r.round(), &rect.translated(offset));
            prop_assert_eq!(a, b);
        }

        #[test]
        fn intersection_matches_min_distance(
            cx in -200.0f32..200.0,
            cy in -200.0f32..200.0,
            r in 1.0f32..50.0,
        ) {
            let rect = Rect::new(0.0, 0.0, 64.0, 32.0);
            let center = Vec2::new(cx, cy);
            let dist = (center - rect.closest_point(center)).length();
            // Skip the knife-edge band where sqrt rounding decides
            prop_assume!((dist - r).abs() > 1e-3);
            prop_assert_eq!(circle_intersects_rect(center, r, &rect), dist <= r);
        }
    }
}
