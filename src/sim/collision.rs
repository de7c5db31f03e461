//! Collision detection and response
//!
//! Ball vs paddle remaps the bounce direction from where the ball struck the
//! paddle while keeping its speed. Ball vs brick uses a penetration-depth
//! heuristic to pick the reflection axis.

use glam::Vec2;

use super::bricks::BrickHit;
use super::geom::{ImpactAxis, circle_intersects_rect, impact_axis};
use super::powerups;
use super::state::{GameState, Paddle};
use crate::clamp;
use crate::consts::*;

/// Normalized hit offset in [-1, 1]: 0 = paddle center, ±1 = edges
pub fn hit_offset(ball_x: f32, paddle: &Paddle) -> f32 {
    let half = paddle.size.x * 0.5;
    if half <= 0.0 {
        return 0.0;
    }
    clamp((ball_x - paddle.center_x()) / half, -1.0, 1.0)
}

/// Map a hit offset to a signed angle factor in [-1, 1].
///
/// Inside the dead zone the response is a gentle linear slope; outside it is
/// quadratic in the offset rescaled past the dead zone.
pub fn bounce_angle_factor(h: f32) -> f32 {
    if h.abs() < BOUNCE_DEAD_ZONE {
        return h * BOUNCE_DEAD_ZONE_GAIN;
    }
    let t = (h.abs() - BOUNCE_DEAD_ZONE) / (1.0 - BOUNCE_DEAD_ZONE);
    h.signum() * t * t
}

/// Outgoing velocity for a paddle hit at offset `h`, at the given speed
pub fn paddle_bounce_velocity(h: f32, speed: f32) -> Vec2 {
    let angle = bounce_angle_factor(h) * MAX_BOUNCE_ANGLE_DEG.to_radians();
    Vec2::new(angle.sin(), -angle.cos()) * speed
}

/// Resolve descending balls against the paddle
pub fn resolve_paddle(state: &mut GameState) {
    let paddle = &state.paddle;
    let rect = paddle.rect();

    for (_, ball) in state.balls.iter_mut() {
        if ball.stuck || ball.vel.y <= 0.0 {
            continue;
        }
        if !circle_intersects_rect(ball.pos, ball.radius, &rect) {
            continue;
        }

        if state.toggles.sticky {
            // Catching freezes every ball until the next launch
            ball.stuck = true;
            ball.vel = Vec2::ZERO;
            ball.pin_to(paddle);
            state.launched = false;
            continue;
        }

        ball.pos.y = rect.top - ball.radius;
        let h = hit_offset(ball.pos.x, paddle);
        ball.vel = paddle_bounce_velocity(h, ball.speed());

        if state.toggles.spin {
            ball.spin = clamp(ball.spin + paddle.vx * SPIN_TRANSFER, -1.0, 1.0);
        }
    }
}

/// Resolve balls against bricks: at most one brick per ball per frame,
/// scanning in grid order
pub fn resolve_bricks(state: &mut GameState) {
    let mut drops = Vec::new();

    for (_, ball) in state.balls.iter_mut() {
        if ball.stuck {
            continue;
        }
        let Some((slot, rect)) = state
            .bricks
            .iter()
            .find(|(_, b)| circle_intersects_rect(ball.pos, ball.radius, &b.rect))
            .map(|(slot, b)| (slot, b.rect))
        else {
            continue;
        };

        if ball.penetrate_count > 0 {
            ball.penetrate_count -= 1;
            if let Some(BrickHit::Destroyed { center, drop }) = state.bricks.destroy(slot) {
                state.score += SCORE_BRICK_DESTROYED;
                drops.push((center, drop));
            }
            continue;
        }

        match state.bricks.hit(slot) {
            Some(BrickHit::Destroyed { center, drop }) => {
                state.score += SCORE_BRICK_DESTROYED;
                drops.push((center, drop));
            }
            Some(BrickHit::Damaged { .. }) => state.score += SCORE_BRICK_DAMAGED,
            None => continue,
        }

        match impact_axis(ball.pos, &rect) {
            ImpactAxis::Horizontal => ball.vel.x = -ball.vel.x,
            ImpactAxis::Vertical => {
                ball.vel.y = -ball.vel.y;
                ball.vel.x += ball.spin * SPIN_BRICK_KICK;
                ball.penetrate_count = ball.penetrate_max;
            }
        }
    }

    for (center, drop) in drops {
        powerups::spawn_drop(state, center, drop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::bricks::{BrickField, DropRule};
    use crate::sim::state::Ball;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_center_hit_is_vertical() {
        let v = paddle_bounce_velocity(0.0, 7.0);
        assert!(v.x.abs() < EPS);
        assert!((v.y + 7.0).abs() < EPS);
    }

    #[test]
    fn test_edge_hit_is_max_angle() {
        let v = paddle_bounce_velocity(1.0, 10.0);
        let angle = v.x.atan2(-v.y).to_degrees();
        assert!((angle - MAX_BOUNCE_ANGLE_DEG).abs() < 1e-3);

        let v = paddle_bounce_velocity(-1.0, 10.0);
        let angle = v.x.atan2(-v.y).to_degrees();
        assert!((angle + MAX_BOUNCE_ANGLE_DEG).abs() < 1e-3);
    }

    #[test]
    fn test_dead_zone_is_gentle() {
        assert!((bounce_angle_factor(0.1) - 0.025).abs() < EPS);
        assert!((bounce_angle_factor(-0.1) + 0.025).abs() < EPS);
        // Just past the dead zone the quadratic starts near zero
        assert!(bounce_angle_factor(0.21).abs() < 0.01);
        assert!((bounce_angle_factor(0.6) - 0.25).abs() < EPS);
    }

    #[test]
    fn test_hit_offset_clamped() {
        let state = GameState::new(1);
        let paddle = &state.paddle;
        assert_eq!(hit_offset(paddle.center_x(), paddle), 0.0);
        assert_eq!(hit_offset(paddle.pos.x - 50.0, paddle), -1.0);
        assert_eq!(hit_offset(paddle.pos.x + paddle.size.x + 50.0, paddle), 1.0);
    }

    fn state_with_ball(ball: Ball) -> GameState {
        let mut state = GameState::new(5);
        state.bricks = BrickField::default();
        state.balls.clear();
        state.balls.insert_at(0, ball);
        state.launched = true;
        state
    }

    fn ball_at(pos: Vec2, vel: Vec2) -> Ball {
        Ball {
            pos,
            vel,
            radius: BALL_RADIUS,
            base_radius: BALL_RADIUS,
            spin: 0.0,
            penetrate_max: 0,
            penetrate_count: 0,
            base_penetrate_max: 0,
            stuck: false,
        }
    }

    #[test]
    fn test_paddle_bounce_center() {
        let fresh = GameState::new(5);
        let paddle = fresh.paddle.clone();
        let pos = Vec2::new(paddle.center_x(), paddle.pos.y + 1.0);
        let mut state = state_with_ball(ball_at(pos, Vec2::new(3.0, 4.0)));
        resolve_paddle(&mut state);

        let ball = state.balls.get(0).cloned().unwrap_or_else(|| ball_at(Vec2::ZERO, Vec2::ZERO));
        assert!(ball.vel.x.abs() < EPS);
        assert!((ball.vel.y + 5.0).abs() < EPS);
        assert_eq!(ball.pos.y, paddle.pos.y - BALL_RADIUS);
    }

    #[test]
    fn test_rising_ball_ignores_paddle() {
        let fresh = GameState::new(5);
        let pos = Vec2::new(fresh.paddle.center_x(), fresh.paddle.pos.y + 1.0);
        let mut state = state_with_ball(ball_at(pos, Vec2::new(0.0, -5.0)));
        resolve_paddle(&mut state);
        assert_eq!(state.balls.get(0).map(|b| b.vel), Some(Vec2::new(0.0, -5.0)));
    }

    #[test]
    fn test_sticky_catch_freezes() {
        let fresh = GameState::new(5);
        let pos = Vec2::new(fresh.paddle.center_x(), fresh.paddle.pos.y + 1.0);
        let mut state = state_with_ball(ball_at(pos, Vec2::new(1.0, 5.0)));
        state.toggles.sticky = true;
        resolve_paddle(&mut state);
        assert!(!state.launched);
        assert_eq!(state.balls.get(0).map(|b| b.stuck), Some(true));
    }

    #[test]
    fn test_spin_transfer_clamped() {
        let fresh = GameState::new(5);
        let pos = Vec2::new(fresh.paddle.center_x(), fresh.paddle.pos.y + 1.0);
        let mut ball = ball_at(pos, Vec2::new(0.0, 5.0));
        ball.spin = 0.99;
        let mut state = state_with_ball(ball);
        state.toggles.spin = true;
        state.paddle.vx = PADDLE_SPEED;
        resolve_paddle(&mut state);
        assert_eq!(state.balls.get(0).map(|b| b.spin), Some(1.0));
    }

    #[test]
    fn test_brick_scoring_sequence() {
        let mut state = state_with_ball(ball_at(Vec2::ZERO, Vec2::ZERO));
        state.bricks.place(0, 0, state.field.x, 1, DropRule::Never);
        state.bricks.place(0, 2, state.field.x, 3, DropRule::Never);
        let one_hit = state.bricks.get(0).map(|b| b.rect).unwrap_or(crate::sim::Rect::new(0.0, 0.0, 0.0, 0.0));
        let three_hit = state.bricks.get(2).map(|b| b.rect).unwrap_or(one_hit);

        let strike = |state: &mut GameState, target: &crate::sim::Rect| {
            let pos = Vec2::new(target.center().x, target.bottom + BALL_RADIUS - 1.0);
            state.balls.insert_at(0, ball_at(pos, Vec2::new(0.0, -5.0)));
            resolve_bricks(state);
        };

        strike(&mut state, &one_hit);
        assert_eq!(state.score, 100);
        assert!(state.bricks.get(0).is_none());

        strike(&mut state, &three_hit);
        assert_eq!(state.score, 125);
        strike(&mut state, &three_hit);
        assert_eq!(state.score, 150);
        strike(&mut state, &three_hit);
        assert_eq!(state.score, 250);
        assert!(state.bricks.is_cleared());
    }

    #[test]
    fn test_vertical_reflection_rearms_penetration() {
        let mut state = state_with_ball(ball_at(Vec2::ZERO, Vec2::ZERO));
        state.bricks.place(2, 4, state.field.x, 2, DropRule::Never);
        let rect = state.bricks.get(2 * BRICK_COLS + 4).map(|b| b.rect);
        let Some(rect) = rect else { return };

        let mut ball = ball_at(
            Vec2::new(rect.center().x, rect.bottom + BALL_RADIUS - 1.0),
            Vec2::new(1.0, -5.0),
        );
        ball.penetrate_max = 2;
        ball.spin = 0.5;
        state.balls.insert_at(0, ball);
        resolve_bricks(&mut state);

        let ball = state.balls.get(0).cloned();
        assert!(ball.as_ref().is_some_and(|b| b.vel.y > 0.0));
        assert!(ball.as_ref().is_some_and(|b| (b.vel.x - 1.1).abs() < EPS));
        assert!(ball.is_some_and(|b| b.penetrate_count == 2));
    }

    #[test]
    fn test_penetrating_ball_destroys_without_reflecting() {
        let mut state = state_with_ball(ball_at(Vec2::ZERO, Vec2::ZERO));
        state.bricks.place(1, 1, state.field.x, 4, DropRule::Never);
        let Some(rect) = state.bricks.get(BRICK_COLS + 1).map(|b| b.rect) else {
            return;
        };
        let mut ball = ball_at(rect.center(), Vec2::new(0.0, -5.0));
        ball.penetrate_max = 3;
        ball.penetrate_count = 3;
        state.balls.insert_at(0, ball);
        resolve_bricks(&mut state);

        assert!(state.bricks.is_cleared());
        assert_eq!(state.score, SCORE_BRICK_DESTROYED);
        let ball = state.balls.get(0).cloned();
        assert!(ball.is_some_and(|b| b.vel == Vec2::new(0.0, -5.0) && b.penetrate_count == 2));
    }

    #[test]
    fn test_one_brick_per_ball_per_frame() {
        let mut state = state_with_ball(ball_at(Vec2::ZERO, Vec2::ZERO));
        state.bricks.place(0, 0, state.field.x, 1, DropRule::Never);
        state.bricks.place(0, 1, state.field.x, 1, DropRule::Never);
        let (Some(a), Some(b)) = (state.bricks.get(0).map(|b| b.rect), state.bricks.get(1).map(|b| b.rect)) else {
            return;
        };
        // In the gap between the two bricks, touching both
        let pos = Vec2::new((a.right + b.left) * 0.5, a.center().y);
        state.balls.insert_at(0, ball_at(pos, Vec2::new(0.0, -5.0)));
        resolve_bricks(&mut state);
        assert_eq!(state.bricks.alive_count(), 1);
        assert!(state.bricks.get(0).is_none());
    }

    proptest! {
        #[test]
        fn paddle_bounce_preserves_speed(h in -1.0f32..=1.0, speed in 0.5f32..50.0) {
            let v = paddle_bounce_velocity(h, speed);
            prop_assert!((v.length() - speed).abs() < speed * 1e-5);
            prop_assert!(v.y < 0.0);
        }

        #[test]
        fn bounce_factor_is_odd_and_bounded(h in 0.0f32..=1.0) {
            let f = bounce_angle_factor(h);
            prop_assert!((f + bounce_angle_factor(-h)).abs() < 1e-6);
            prop_assert!((0.0..=1.0).contains(&f));
        }
    }
}
