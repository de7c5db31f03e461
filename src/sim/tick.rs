//! Per-frame simulation step
//!
//! One call advances the game by exactly one frame, in a fixed order:
//! input, paddle, balls, paddle collision, brick collision, falling pickups,
//! effect countdown, level check.

use super::collision::{resolve_bricks, resolve_paddle};
use super::levels::LevelCheck;
use super::powerups;
use super::scene::Scene;
use super::state::{GameState, launch_velocity};
use crate::consts::*;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move paddle left (held)
    pub left: bool,
    /// Move paddle right (held)
    pub right: bool,
    /// Launch balls resting on the paddle
    pub launch: bool,
    /// Restart after game over
    pub restart: bool,
    /// Idle/demo mode - the simulation steers the paddle itself
    pub autopilot: bool,
}

/// Advance one frame and emit the resulting scene
pub fn step(state: &mut GameState, input: &TickInput) -> Scene {
    tick(state, input);
    Scene::capture(state)
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.game_over {
        if input.restart {
            state.restart();
        }
        return;
    }

    let input = if input.autopilot {
        autopilot(state, input)
    } else {
        input.clone()
    };

    state.frame += 1;

    if input.launch && !state.launched && !state.director.is_pending() {
        state.launched = true;
    }

    state.paddle.update(input.left, input.right, state.field.x);

    update_balls(state);
    if state.game_over {
        return;
    }

    if state.launched {
        resolve_paddle(state);
        resolve_bricks(state);
    }

    powerups::update_falling(state);
    powerups::update_active(state);

    check_level(state);
}

/// Integrate free balls, pin resting ones, and handle ball loss
fn update_balls(state: &mut GameState) {
    let speed_scale = powerups::speed_scale(state);
    let field = state.field;
    let launched = state.launched;
    let invulnerable = state.toggles.invulnerable;
    let paddle = &state.paddle;
    let mut lost: Vec<usize> = Vec::new();

    for (slot, ball) in state.balls.iter_mut() {
        if ball.stuck && launched {
            ball.stuck = false;
            ball.vel = launch_velocity(slot) * speed_scale;
        }
        if !launched || ball.stuck {
            ball.pin_to(paddle);
            continue;
        }

        ball.vel.x += ball.spin * SPIN_ACCEL;
        ball.spin *= SPIN_DECAY;
        ball.pos += ball.vel;

        if ball.pos.x - ball.radius < 0.0 {
            ball.pos.x = ball.radius;
            ball.vel.x = ball.vel.x.abs();
        }
        if ball.pos.x + ball.radius > field.x {
            ball.pos.x = field.x - ball.radius;
            ball.vel.x = -ball.vel.x.abs();
        }
        if ball.pos.y - ball.radius < 0.0 {
            ball.pos.y = ball.radius;
            ball.vel.y = ball.vel.y.abs();
        }
        if invulnerable {
            if ball.pos.y + ball.radius > field.y {
                ball.pos.y = field.y - ball.radius;
                ball.vel.y = -ball.vel.y.abs();
            }
        } else if ball.pos.y - ball.radius > field.y {
            lost.push(slot);
        }
    }

    for slot in lost {
        state.balls.remove(slot);
    }

    if launched && state.balls.is_empty() {
        lose_life(state);
    }
}

fn lose_life(state: &mut GameState) {
    state.lives = state.lives.saturating_sub(1);
    if state.lives == 0 {
        state.game_over = true;
        state.launched = false;
        log::info!("Game over: score {} on level {}", state.score, state.level);
        return;
    }
    log::info!("Ball lost, {} lives left", state.lives);
    powerups::clear_active(state);
    state.reset_balls();
}

fn check_level(state: &mut GameState) {
    match state
        .director
        .check(state.bricks.is_cleared(), state.launched)
    {
        LevelCheck::Continue => {}
        LevelCheck::Cleared => {
            state.launched = false;
            log::info!("Level {} cleared", state.level);
        }
        LevelCheck::Advance => {
            state.level += 1;
            powerups::clear_active(state);
            state.powerups.falling.clear();
            state.build_level();
            state.reset_balls();
        }
    }
}

/// Substitute steering input: chase the lowest descending ball, or the
/// lowest pickup when no ball is coming down. Launches automatically.
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let descending = state
        .balls
        .iter()
        .filter(|(_, b)| !b.stuck && b.vel.y > 0.0)
        .map(|(_, b)| b.pos)
        .max_by(|a, b| a.y.total_cmp(&b.y));

    let pickup = state
        .powerups
        .falling
        .iter()
        .map(|(_, p)| p.pos)
        .max_by(|a, b| a.y.total_cmp(&b.y));

    let target = match (state.launched, descending, pickup) {
        (true, Some(ball), _) => Some(ball.x),
        (_, _, Some(p)) => Some(p.x),
        _ => None,
    };

    let center = state.paddle.center_x();
    // Aim slightly off center so bounces are not all vertical
    let aim = state.paddle.size.x * 0.15;
    let (left, right) = match target {
        Some(x) if x + aim < center - PADDLE_SPEED => (true, false),
        Some(x) if x + aim > center + PADDLE_SPEED => (false, true),
        _ => (false, false),
    };

    TickInput {
        left,
        right,
        launch: !state.launched,
        ..input.clone()
    }
}
