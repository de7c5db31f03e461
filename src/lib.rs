//! BreakBlocks - A brick-breaking arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddle, balls, bricks, power-ups, levels)
//! - `renderer`: Scene tessellation into GPU-ready vertices
//! - `platform`: Fixed-step frame clock for the presentation side
//! - `settings`: Runtime configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

/// Game configuration constants
///
/// All simulation units are pixels and frames.
pub mod consts {
    /// Target frame rate of the presentation loop
    pub const TARGET_FPS: u32 = 60;
    /// Maximum simulation frames run per presentation frame
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Default playfield dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Distance from the bottom edge to the paddle top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    pub const BALL_SPEED: f32 = 5.0;
    /// Ball arena capacity
    pub const MAX_BALLS: usize = 6;

    /// Maximum paddle bounce angle (degrees from vertical)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 70.0;
    /// Half-width fraction treated as the soft center of the paddle
    pub const BOUNCE_DEAD_ZONE: f32 = 0.2;
    /// Linear angle factor inside the dead zone
    pub const BOUNCE_DEAD_ZONE_GAIN: f32 = 0.25;

    /// Spin: horizontal acceleration per unit of spin per frame
    pub const SPIN_ACCEL: f32 = 0.05;
    /// Spin: per-frame decay multiplier
    pub const SPIN_DECAY: f32 = 0.995;
    /// Spin: paddle velocity to spin transfer
    pub const SPIN_TRANSFER: f32 = 0.05;
    /// Spin: extra horizontal kick on a vertical brick reflection
    pub const SPIN_BRICK_KICK: f32 = 0.2;

    /// Brick grid
    pub const BRICK_ROWS: usize = 6;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GAP: f32 = 6.0;
    pub const BRICK_TOP: f32 = 40.0;
    pub const BRICK_MAX_HITS: u8 = 5;

    /// Scoring
    pub const SCORE_BRICK_DESTROYED: u64 = 100;
    pub const SCORE_BRICK_DAMAGED: u64 = 25;

    /// Player
    pub const STARTING_LIVES: u8 = 3;

    /// Power-ups
    pub const MAX_FALLING_POWERUPS: usize = 32;
    pub const MAX_ACTIVE_POWERUPS: usize = 10;
    pub const POWERUP_FALL_SPEED: f32 = 2.5;
    pub const POWERUP_RADIUS: f32 = 8.0;
    /// Chance that a brick with a random drop rule spawns a pickup
    pub const RANDOM_DROP_CHANCE: f64 = 0.2;
    /// Number of pickups spawned by the chaos burst
    pub const CHAOS_BURST_COUNT: usize = 20;
    /// Default duration of timed effects (10 seconds at 60 Hz)
    pub const POWERUP_DURATION: u32 = 600;

    /// Effect magnitudes
    pub const BALL_FAST_FACTOR: f32 = 1.5;
    pub const BALL_SLOW_FACTOR: f32 = 0.7;
    pub const PADDLE_WIDE_FACTOR: f32 = 1.5;
    pub const PADDLE_NARROW_FACTOR: f32 = 0.7;
    pub const BIG_BALL_SCALE: f32 = 1.6;
    pub const BIG_BALL_PENETRATION: u32 = 1;
    pub const WRECKING_BALL_SCALE: f32 = 2.5;
    pub const WRECKING_BALL_PENETRATION: u32 = 4;
    pub const SMALL_BALL_SCALE: f32 = 0.6;
    pub const PIERCE_PENETRATION: u32 = 3;
}

/// Bound `v` to `[lo, hi]`.
///
/// Unlike `f32::clamp` this never panics when `lo > hi` (a paddle wider than
/// the field); `lo` wins in that case.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    if v > hi {
        return hi.max(lo);
    }
    if v < lo {
        return lo;
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clamp_basic() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_inverted_range() {
        assert_eq!(clamp(3.0, 0.0, -20.0), 0.0);
        assert_eq!(clamp(-30.0, 0.0, -20.0), 0.0);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_range(v in -1.0e6f32..1.0e6, lo in -1.0e3f32..0.0, span in 0.0f32..1.0e3) {
            let hi = lo + span;
            let c = clamp(v, lo, hi);
            prop_assert!(c >= lo && c <= hi);
        }
    }
}
