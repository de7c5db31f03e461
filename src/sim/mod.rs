//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-locked: one `tick` = one frame, velocities in pixels/frame
//! - Seeded RNG only
//! - Stable iteration order (by slot index)
//! - No rendering or platform dependencies

pub mod bricks;
pub mod collision;
pub mod geom;
pub mod levels;
pub mod pool;
pub mod powerups;
pub mod scene;
pub mod state;
pub mod tick;

pub use bricks::{Brick, BrickField, BrickHit, DropRule, brick_color};
pub use collision::{bounce_angle_factor, paddle_bounce_velocity, resolve_bricks, resolve_paddle};
pub use geom::{ImpactAxis, Rect, circle_intersects_rect, impact_axis};
pub use levels::{LEVELS, LevelCheck, LevelDef, LevelDirector, LevelPhase, level_def};
pub use pool::Pool;
pub use powerups::{
    ActivePowerUp, CATALOG, FallingPowerUp, PowerUpDef, PowerUpKind, PowerUpRuntime,
};
pub use scene::{Color, Hud, Scene, SceneCircle, SceneRect};
pub use state::{Ball, BallSet, GameState, Paddle, SimConfig, Toggles};
pub use tick::{TickInput, step, tick};
