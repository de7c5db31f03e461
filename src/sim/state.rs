//! Game state and core simulation types
//!
//! Everything the frame step mutates lives in one `GameState` aggregate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bricks::BrickField;
use super::geom::Rect;
use super::levels::{LevelDirector, level_def};
use super::pool::Pool;
use super::powerups::PowerUpRuntime;
use crate::clamp;
use crate::consts::*;

/// A ball entity
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Radius before timed modifiers; set by big/wrecking ball until the
    /// ball set is reset
    pub base_radius: f32,
    /// Horizontal spin, in [-1, 1]
    pub spin: f32,
    /// Bricks the ball may pass through before it needs a reflecting hit
    pub penetrate_max: u32,
    pub penetrate_count: u32,
    /// Penetration budget before timed modifiers
    pub base_penetrate_max: u32,
    /// Held on the paddle by the sticky effect
    pub stuck: bool,
}

impl Ball {
    /// A fresh ball resting on the paddle
    pub fn new(slot: usize, paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: launch_velocity(slot),
            radius: BALL_RADIUS,
            base_radius: BALL_RADIUS,
            spin: 0.0,
            penetrate_max: 0,
            penetrate_count: 0,
            base_penetrate_max: 0,
            stuck: false,
        };
        ball.pin_to(paddle);
        ball
    }

    /// Rest the ball on top of the paddle, horizontally centered
    pub fn pin_to(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.center_x(), paddle.pos.y - self.radius - 1.0);
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Recompute radius and penetration budget from the base geometry and
    /// the timed modifiers currently in effect. The remaining budget never
    /// exceeds the new maximum.
    pub fn apply_geometry(&mut self, shrink: bool, pierce: bool) {
        self.radius = if shrink {
            self.base_radius * SMALL_BALL_SCALE
        } else {
            self.base_radius
        };
        self.penetrate_max = if pierce {
            self.base_penetrate_max.max(PIERCE_PENETRATION)
        } else {
            self.base_penetrate_max
        };
        self.penetrate_count = self.penetrate_count.min(self.penetrate_max);
    }
}

/// Launch velocity for a ball slot: up, with horizontal bias alternating by
/// slot parity
pub fn launch_velocity(slot: usize) -> Vec2 {
    let dir = if slot % 2 == 0 { 1.0 } else { -1.0 };
    Vec2::new(dir * BALL_SPEED, -BALL_SPEED)
}

/// Fixed-capacity ball arena; occupancy = alive
pub type BallSet = Pool<Ball, MAX_BALLS>;

/// The player's paddle. `pos` is the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal velocity, derived each frame as the post-clamp delta
    pub vx: f32,
    /// Width before effect scaling
    pub base_width: f32,
    pub wide: bool,
    pub narrow: bool,
}

impl Paddle {
    pub fn new(field: Vec2) -> Self {
        let mut paddle = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            vx: 0.0,
            base_width: PADDLE_WIDTH,
            wide: false,
            narrow: false,
        };
        paddle.recenter(field);
        paddle
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x * 0.5
    }

    /// Center horizontally and sit at the bottom of the field
    pub fn recenter(&mut self, field: Vec2) {
        self.pos.x = (field.x - self.size.x) * 0.5;
        self.pos.y = field.y - PADDLE_BOTTOM_OFFSET;
        self.pos.x = clamp(self.pos.x, 0.0, field.x - self.size.x);
    }

    /// Apply held movement input for one frame
    pub fn update(&mut self, left: bool, right: bool, field_width: f32) {
        let prev_x = self.pos.x;
        if left {
            self.pos.x -= PADDLE_SPEED;
        }
        if right {
            self.pos.x += PADDLE_SPEED;
        }
        self.pos.x = clamp(self.pos.x, 0.0, field_width - self.size.x);
        self.vx = self.pos.x - prev_x;
    }

    /// Width multiplier from the active width effects
    pub fn width_scale(&self) -> f32 {
        let mut scale = 1.0;
        if self.wide {
            scale *= PADDLE_WIDE_FACTOR;
        }
        if self.narrow {
            scale *= PADDLE_NARROW_FACTOR;
        }
        scale
    }

    /// Recompute width from the base, keeping the paddle centered where it is
    pub fn apply_width(&mut self, field_width: f32) {
        let center = self.center_x();
        self.size.x = self.base_width * self.width_scale();
        self.pos.x = clamp(center - self.size.x * 0.5, 0.0, field_width - self.size.x);
    }
}

/// Cross-cutting toggles owned by power-ups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggles {
    pub spin: bool,
    pub sticky: bool,
    pub invulnerable: bool,
}

/// Construction parameters for a game
#[derive(Debug, Clone)]
pub struct SimConfig {
    pub seed: u64,
    pub field: Vec2,
    pub starting_lives: u8,
    pub starting_level: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            field: Vec2::new(FIELD_WIDTH, FIELD_HEIGHT),
            starting_lives: STARTING_LIVES,
            starting_level: 1,
        }
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub rng: Pcg32,
    /// Playable width/height
    pub field: Vec2,
    pub score: u64,
    pub lives: u8,
    /// Current level number (1-based)
    pub level: u32,
    pub game_over: bool,
    /// Balls move under their own velocity
    pub launched: bool,
    pub toggles: Toggles,
    /// Ball count the last multi-ball pickup asked for
    pub ball_target: usize,
    pub paddle: Paddle,
    pub balls: BallSet,
    pub bricks: BrickField,
    pub powerups: PowerUpRuntime,
    pub director: LevelDirector,
    /// Simulation frame counter
    pub frame: u64,
}

impl GameState {
    /// New game on the default field
    pub fn new(seed: u64) -> Self {
        Self::with_config(SimConfig {
            seed,
            ..SimConfig::default()
        })
    }

    pub fn with_config(config: SimConfig) -> Self {
        let field = config.field;
        let mut state = Self {
            rng: Pcg32::seed_from_u64(config.seed),
            field,
            score: 0,
            lives: config.starting_lives,
            level: config.starting_level.max(1),
            game_over: false,
            launched: false,
            toggles: Toggles::default(),
            ball_target: 1,
            paddle: Paddle::new(field),
            balls: BallSet::new(),
            bricks: BrickField::default(),
            powerups: PowerUpRuntime::default(),
            director: LevelDirector::default(),
            frame: 0,
            config,
        };
        state.build_level();
        state.reset_balls();
        log::info!(
            "New game: seed={}, field={}x{}, lives={}",
            state.config.seed,
            field.x,
            field.y,
            state.lives
        );
        state
    }

    /// Reinitialize score, lives, level, paddle, balls, bricks and power-ups.
    /// The RNG stream continues.
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = self.config.starting_lives;
        self.level = self.config.starting_level.max(1);
        self.game_over = false;
        self.toggles = Toggles::default();
        self.paddle = Paddle::new(self.field);
        self.powerups = PowerUpRuntime::default();
        self.director.reset();
        self.build_level();
        self.reset_balls();
        log::info!("Game restarted");
    }

    /// Populate the brick field from the current level's template
    pub fn build_level(&mut self) {
        let def = level_def(self.level);
        self.bricks = BrickField::from_level(def, self.field.x, &mut self.rng);
        log::info!(
            "Level {} ({}): {} bricks",
            self.level,
            def.name,
            self.bricks.alive_count()
        );
    }

    /// Back to a single fresh ball on the paddle, awaiting launch
    pub fn reset_balls(&mut self) {
        self.balls.clear();
        self.balls.insert_at(0, Ball::new(0, &self.paddle));
        self.launched = false;
        self.ball_target = 1;
    }

    /// Adapt to new field dimensions
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.field = Vec2::new(width, height);
        self.paddle.recenter(self.field);
        self.bricks.relayout(width);

        let paddle = &self.paddle;
        let launched = self.launched;
        for (_, ball) in self.balls.iter_mut() {
            if !launched || ball.stuck {
                ball.pin_to(paddle);
            } else {
                ball.pos.x = clamp(ball.pos.x, ball.radius, width - ball.radius);
                ball.pos.y = clamp(ball.pos.y, ball.radius, height);
            }
        }
        for (_, pickup) in self.powerups.falling.iter_mut() {
            pickup.pos.x = clamp(pickup.pos.x, 0.0, width);
        }
        log::debug!("Field resized to {}x{}", width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_defaults() {
        let state = GameState::new(1);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(!state.launched);
        assert!(!state.game_over);
        assert_eq!(state.balls.len(), 1);
        assert!(state.bricks.alive_count() > 0);
    }

    #[test]
    fn test_paddle_clamped_to_field() {
        let mut paddle = Paddle::new(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
        for _ in 0..200 {
            paddle.update(true, false, FIELD_WIDTH);
        }
        assert_eq!(paddle.pos.x, 0.0);
        for _ in 0..200 {
            paddle.update(false, true, FIELD_WIDTH);
        }
        assert_eq!(paddle.pos.x, FIELD_WIDTH - paddle.size.x);
    }

    #[test]
    fn test_paddle_velocity_is_post_clamp_delta() {
        let mut paddle = Paddle::new(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
        paddle.update(false, true, FIELD_WIDTH);
        assert_eq!(paddle.vx, PADDLE_SPEED);
        paddle.pos.x = 1.0;
        paddle.update(true, false, FIELD_WIDTH);
        assert_eq!(paddle.vx, -1.0);
        paddle.update(false, false, FIELD_WIDTH);
        assert_eq!(paddle.vx, 0.0);
    }

    #[test]
    fn test_paddle_width_restores_exactly() {
        let mut paddle = Paddle::new(Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
        paddle.wide = true;
        paddle.apply_width(FIELD_WIDTH);
        paddle.narrow = true;
        paddle.apply_width(FIELD_WIDTH);
        paddle.wide = false;
        paddle.apply_width(FIELD_WIDTH);
        paddle.narrow = false;
        paddle.apply_width(FIELD_WIDTH);
        assert_eq!(paddle.size.x, PADDLE_WIDTH);
    }

    #[test]
    fn test_launch_velocity_alternates() {
        assert!(launch_velocity(0).x > 0.0);
        assert!(launch_velocity(1).x < 0.0);
        assert!(launch_velocity(2).y < 0.0);
    }

    #[test]
    fn test_resize_recenters() {
        let mut state = GameState::new(3);
        state.resize(1000.0, 700.0);
        assert!((state.paddle.center_x() - 500.0).abs() < 0.001);
        assert_eq!(state.paddle.pos.y, 700.0 - PADDLE_BOTTOM_OFFSET);
        let ball = state.balls.get(0).map(|b| b.pos).unwrap_or_default();
        assert!((ball.x - 500.0).abs() < 0.001);
    }

    #[test]
    fn test_resize_ignores_degenerate() {
        let mut state = GameState::new(3);
        state.resize(0.0, 600.0);
        assert_eq!(state.field, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT));
    }
}
