//! Renderable scene description emitted after every simulation step
//!
//! The presentation side draws exactly what is here and nothing else.

use glam::Vec2;
use serde::Serialize;

use super::geom::Rect;
use super::powerups::CATALOG;
use super::state::GameState;

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Normalized RGBA for GPU vertex colors
    pub fn to_rgba(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneRect {
    pub rect: Rect,
    pub color: Color,
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneCircle {
    pub center: Vec2,
    pub radius: f32,
    pub color: Color,
}

/// HUD values
#[derive(Debug, Clone, Serialize)]
pub struct Hud {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    /// Active timed effects as (name, frames remaining)
    pub effects: Vec<(&'static str, u32)>,
    pub message: Option<String>,
}

impl Hud {
    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn lives_text(&self) -> String {
        format!("Lives: {}", self.lives)
    }

    pub fn level_text(&self) -> String {
        format!("Level: {}", self.level)
    }
}

pub const GAME_OVER_MESSAGE: &str = "GAME OVER! Press R to Restart";

/// One frame's worth of drawables
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    pub bricks: Vec<SceneRect>,
    pub paddle: SceneRect,
    pub balls: Vec<SceneCircle>,
    pub pickups: Vec<SceneCircle>,
    pub hud: Hud,
}

pub const PADDLE_COLOR: Color = Color::rgb(230, 230, 230);
pub const BALL_COLOR: Color = Color::WHITE;

impl Scene {
    /// Snapshot the drawable parts of the state
    pub fn capture(state: &GameState) -> Self {
        let bricks = state
            .bricks
            .iter()
            .map(|(_, b)| SceneRect {
                rect: b.rect,
                color: b.color(),
            })
            .collect();

        let balls = state
            .balls
            .iter()
            .map(|(_, b)| SceneCircle {
                center: b.pos,
                radius: b.radius,
                color: BALL_COLOR,
            })
            .collect();

        let pickups = state
            .powerups
            .falling
            .iter()
            .map(|(_, p)| SceneCircle {
                center: p.pos,
                radius: crate::consts::POWERUP_RADIUS,
                color: CATALOG[p.index].color,
            })
            .collect();

        let effects = state
            .powerups
            .active
            .iter()
            .map(|(_, a)| (CATALOG[a.index].name, a.remaining))
            .collect();

        Self {
            width: state.field.x,
            height: state.field.y,
            bricks,
            paddle: SceneRect {
                rect: state.paddle.rect(),
                color: PADDLE_COLOR,
            },
            balls,
            pickups,
            hud: Hud {
                score: state.score,
                lives: state.lives,
                level: state.level,
                effects,
                message: state.game_over.then(|| GAME_OVER_MESSAGE.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_new_game() {
        let state = GameState::new(42);
        let scene = Scene::capture(&state);
        assert_eq!(scene.bricks.len(), state.bricks.alive_count());
        assert_eq!(scene.balls.len(), 1);
        assert!(scene.pickups.is_empty());
        assert_eq!(scene.hud.score, 0);
        assert_eq!(scene.hud.lives, 3);
        assert_eq!(scene.hud.level, 1);
        assert!(scene.hud.message.is_none());
        assert_eq!(scene.hud.score_text(), "Score: 0");
    }

    #[test]
    fn test_capture_game_over_message() {
        let mut state = GameState::new(42);
        state.game_over = true;
        let scene = Scene::capture(&state);
        assert_eq!(scene.hud.message.as_deref(), Some(GAME_OVER_MESSAGE));
    }

    #[test]
    fn test_scene_serializes() {
        let state = GameState::new(42);
        let json = serde_json::to_string(&Scene::capture(&state)).unwrap_or_default();
        assert!(json.contains("\"hud\""));
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(Color::WHITE.to_rgba(), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(Color::rgb(0, 0, 0).to_rgba(), [0.0, 0.0, 0.0, 1.0]);
    }
}
