//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in normalized device
//! coordinates: field pixel (0, 0) maps to (-1, 1), (width, height) to (1, -1).

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::{Rect, Scene};

/// Segments used for ball and pickup circles
pub const CIRCLE_SEGMENTS: u32 = 16;

/// Maps field pixels to normalized device coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn to_ndc(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            p.x / self.width * 2.0 - 1.0,
            1.0 - p.y / self.height * 2.0,
        )
    }
}

/// Generate vertices for a filled rectangle
pub fn rect(view: &Viewport, r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let tl = view.to_ndc(Vec2::new(r.left, r.top));
    let br = view.to_ndc(Vec2::new(r.right, r.bottom));

    vec![
        Vertex::new(tl.x, tl.y, color),
        Vertex::new(br.x, tl.y, color),
        Vertex::new(tl.x, br.y, color),
        Vertex::new(tl.x, br.y, color),
        Vertex::new(br.x, tl.y, color),
        Vertex::new(br.x, br.y, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(
    view: &Viewport,
    center: Vec2,
    radius: f32,
    color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);
    let c = view.to_ndc(center);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let p1 = view.to_ndc(center + Vec2::new(theta1.cos(), theta1.sin()) * radius);
        let p2 = view.to_ndc(center + Vec2::new(theta2.cos(), theta2.sin()) * radius);

        // Triangle from center to edge
        vertices.push(Vertex::new(c.x, c.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Tessellate a whole scene, back to front: bricks, paddle, pickups, balls.
/// HUD text is left to the caller.
pub fn scene(scene: &Scene) -> Vec<Vertex> {
    if scene.width <= 0.0 || scene.height <= 0.0 {
        return Vec::new();
    }
    let view = Viewport {
        width: scene.width,
        height: scene.height,
    };
    let mut vertices = Vec::new();

    for brick in &scene.bricks {
        vertices.extend(rect(&view, &brick.rect, brick.color.to_rgba()));
    }
    vertices.extend(rect(&view, &scene.paddle.rect, scene.paddle.color.to_rgba()));
    for pickup in &scene.pickups {
        vertices.extend(circle(
            &view,
            pickup.center,
            pickup.radius,
            pickup.color.to_rgba(),
            CIRCLE_SEGMENTS,
        ));
    }
    for ball in &scene.balls {
        vertices.extend(circle(
            &view,
            ball.center,
            ball.radius,
            ball.color.to_rgba(),
            CIRCLE_SEGMENTS,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_viewport_corners() {
        let view = Viewport {
            width: 800.0,
            height: 600.0,
        };
        assert_eq!(view.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(view.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(view.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn test_scene_vertex_count() {
        let state = GameState::new(8);
        let scene_desc = Scene::capture(&state);
        let vertices = scene(&scene_desc);
        let expected = (scene_desc.bricks.len() + 1) * 6
            + (scene_desc.balls.len() + scene_desc.pickups.len()) * CIRCLE_SEGMENTS as usize * 3;
        assert_eq!(vertices.len(), expected);

        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), vertices.len() * Vertex::STRIDE);
    }
}
