//! Power-up catalog and runtime
//!
//! The catalog is a static table indexed by `PowerUpKind as usize`. At runtime
//! there are two bounded pools: pickups falling through the world, and active
//! slots counting down timed effects. A timed effect occupies at most one slot;
//! collecting it again only refreshes the countdown.

use glam::Vec2;
use rand::Rng;

use super::bricks::DropRule;
use super::geom::circle_intersects_rect;
use super::pool::Pool;
use super::scene::Color;
use super::state::{GameState, launch_velocity};
use crate::consts::*;

/// Every effect a pickup can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    SpeedUp,
    SlowDown,
    BigBall,
    WreckingBall,
    Spin,
    TripleBall,
    SixBall,
    WidePaddle,
    NarrowPaddle,
    Sticky,
    Invulnerable,
    ExtraLife,
    Chaos,
    Pierce,
    ShrinkBall,
}

/// Static catalog entry
#[derive(Debug)]
pub struct PowerUpDef {
    pub kind: PowerUpKind,
    pub name: &'static str,
    pub color: Color,
    /// 0 = instant, otherwise frames until revert
    pub duration: u32,
}

impl PowerUpDef {
    pub fn is_timed(&self) -> bool {
        self.duration > 0
    }
}

const fn def(kind: PowerUpKind, name: &'static str, color: Color, duration: u32) -> PowerUpDef {
    PowerUpDef {
        kind,
        name,
        color,
        duration,
    }
}

/// Catalog, in `PowerUpKind` discriminant order
pub static CATALOG: [PowerUpDef; 15] = [
    def(PowerUpKind::SpeedUp, "Speed Up", Color::rgb(255, 255, 0), POWERUP_DURATION),
    def(PowerUpKind::SlowDown, "Slow Down", Color::rgb(0, 0, 255), POWERUP_DURATION),
    def(PowerUpKind::BigBall, "Big Ball", Color::rgb(0, 255, 0), 0),
    def(PowerUpKind::WreckingBall, "Wrecking Ball", Color::rgb(120, 60, 0), 0),
    def(PowerUpKind::Spin, "Spin", Color::rgb(0, 255, 200), POWERUP_DURATION),
    def(PowerUpKind::TripleBall, "Triple Ball", Color::rgb(255, 255, 255), 0),
    def(PowerUpKind::SixBall, "Six Ball", Color::rgb(200, 200, 255), 0),
    def(PowerUpKind::WidePaddle, "Wide Paddle", Color::rgb(255, 0, 255), POWERUP_DURATION),
    def(PowerUpKind::NarrowPaddle, "Narrow Paddle", Color::rgb(128, 0, 128), POWERUP_DURATION),
    def(PowerUpKind::Sticky, "Sticky Paddle", Color::rgb(255, 128, 0), POWERUP_DURATION),
    def(PowerUpKind::Invulnerable, "Invulnerable", Color::rgb(255, 215, 0), POWERUP_DURATION),
    def(PowerUpKind::ExtraLife, "Extra Life", Color::rgb(255, 100, 150), 0),
    def(PowerUpKind::Chaos, "Chaos", Color::rgb(255, 0, 0), 0),
    def(PowerUpKind::Pierce, "Pierce", Color::rgb(180, 180, 180), POWERUP_DURATION),
    def(PowerUpKind::ShrinkBall, "Shrink Ball", Color::rgb(100, 0, 0), POWERUP_DURATION),
];

impl PowerUpKind {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn def(self) -> &'static PowerUpDef {
        &CATALOG[self.index()]
    }
}

/// A pickup falling through the world
#[derive(Debug, Clone, PartialEq)]
pub struct FallingPowerUp {
    pub pos: Vec2,
    /// Catalog index
    pub index: usize,
}

/// A timed effect in progress
#[derive(Debug, Clone, PartialEq)]
pub struct ActivePowerUp {
    /// Catalog index
    pub index: usize,
    pub remaining: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PowerUpRuntime {
    pub falling: Pool<FallingPowerUp, MAX_FALLING_POWERUPS>,
    pub active: Pool<ActivePowerUp, MAX_ACTIVE_POWERUPS>,
}

impl PowerUpRuntime {
    /// Slot of the active entry for a catalog index, if any
    pub fn active_slot(&self, index: usize) -> Option<usize> {
        self.active
            .iter()
            .find(|(_, a)| a.index == index)
            .map(|(slot, _)| slot)
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.active_slot(kind.index()).is_some()
    }
}

/// Spawn a pickup at `pos`. `None` picks a uniformly random catalog entry;
/// an out-of-range index is ignored, as is a spawn with the pool full.
pub fn spawn(state: &mut GameState, pos: Vec2, index: Option<usize>) {
    let index = match index {
        Some(i) if i < CATALOG.len() => i,
        Some(i) => {
            log::debug!("Ignoring drop of unknown power-up index {}", i);
            return;
        }
        None => state.rng.random_range(0..CATALOG.len()),
    };
    if state
        .powerups
        .falling
        .insert(FallingPowerUp { pos, index })
        .is_none()
    {
        log::trace!("Pickup pool full, dropped {}", CATALOG[index].name);
    }
}

/// Evaluate a destroyed brick's drop rule
pub fn spawn_drop(state: &mut GameState, pos: Vec2, rule: DropRule) {
    match rule {
        DropRule::Never => {}
        DropRule::Guaranteed(index) => spawn(state, pos, Some(index)),
        DropRule::Random => {
            if state.rng.random_bool(RANDOM_DROP_CHANCE) {
                spawn(state, pos, None);
            }
        }
    }
}

/// Move falling pickups; collect those touching the paddle
pub fn update_falling(state: &mut GameState) {
    let paddle = state.paddle.rect();
    let bottom = state.field.y;
    let mut collected: Vec<usize> = Vec::new();

    state.powerups.falling.retain(|_, p| {
        p.pos.y += POWERUP_FALL_SPEED;
        if p.pos.y > bottom {
            return false;
        }
        if circle_intersects_rect(p.pos, POWERUP_RADIUS, &paddle) {
            collected.push(p.index);
            return false;
        }
        true
    });

    for index in collected {
        collect(state, index);
    }
}

/// Apply a collected pickup
pub fn collect(state: &mut GameState, index: usize) {
    let Some(def) = CATALOG.get(index) else {
        return;
    };

    if !def.is_timed() {
        log::debug!("Power-up: {}", def.name);
        apply(state, def.kind);
        return;
    }

    if let Some(slot) = state.powerups.active_slot(index) {
        if let Some(active) = state.powerups.active.get_mut(slot) {
            active.remaining = def.duration;
        }
        log::debug!("Power-up refreshed: {}", def.name);
        return;
    }

    let claimed = state.powerups.active.insert(ActivePowerUp {
        index,
        remaining: def.duration,
    });
    if claimed.is_none() {
        log::debug!("No free effect slot, dropped {}", def.name);
        return;
    }
    log::debug!("Power-up active: {} ({} frames)", def.name, def.duration);
    apply(state, def.kind);
}

/// Count down active effects; revert and free those that expire
pub fn update_active(state: &mut GameState) {
    let mut expired: Vec<PowerUpKind> = Vec::new();
    state.powerups.active.retain(|_, a| {
        a.remaining = a.remaining.saturating_sub(1);
        if a.remaining == 0 {
            expired.push(CATALOG[a.index].kind);
            return false;
        }
        true
    });

    for kind in expired {
        log::debug!("Power-up expired: {}", kind.def().name);
        revert(state, kind);
    }
}

/// Revert and free every active effect
pub fn clear_active(state: &mut GameState) {
    let kinds: Vec<PowerUpKind> = state
        .powerups
        .active
        .iter()
        .map(|(_, a)| CATALOG[a.index].kind)
        .collect();
    state.powerups.active.clear();
    for kind in kinds {
        revert(state, kind);
    }
}

/// Product of the active ball-speed factors
pub fn speed_scale(state: &GameState) -> f32 {
    let mut scale = 1.0;
    if state.powerups.is_active(PowerUpKind::SpeedUp) {
        scale *= BALL_FAST_FACTOR;
    }
    if state.powerups.is_active(PowerUpKind::SlowDown) {
        scale *= BALL_SLOW_FACTOR;
    }
    scale
}

fn scale_ball_speed(state: &mut GameState, factor: f32) {
    for (_, ball) in state.balls.iter_mut() {
        ball.vel *= factor;
    }
}

fn unscale_ball_speed(state: &mut GameState, factor: f32) {
    for (_, ball) in state.balls.iter_mut() {
        ball.vel /= factor;
    }
}

/// Lasting geometry change: survives timed modifiers, lost on ball reset
fn set_base_geometry(state: &mut GameState, radius_scale: f32, penetration: u32) {
    for (_, ball) in state.balls.iter_mut() {
        ball.base_radius = BALL_RADIUS * radius_scale;
        ball.base_penetrate_max = penetration;
    }
    refresh_ball_geometry(state, true);
}

/// Recompute every ball's geometry from the active shrink/pierce effects.
/// `rearm` refills the penetration budget.
fn refresh_ball_geometry(state: &mut GameState, rearm: bool) {
    let shrink = state.powerups.is_active(PowerUpKind::ShrinkBall);
    let pierce = state.powerups.is_active(PowerUpKind::Pierce);
    for (_, ball) in state.balls.iter_mut() {
        ball.apply_geometry(shrink, pierce);
        if rearm {
            ball.penetrate_count = ball.penetrate_max;
        }
    }
}

/// Fill free ball slots up to `target` with clones of the first ball,
/// alternating horizontal direction by slot parity
fn materialize_balls(state: &mut GameState, target: usize) {
    state.ball_target = target;
    let Some((_, template)) = state.balls.first() else {
        return;
    };
    let template = template.clone();
    let missing = target.saturating_sub(state.balls.len());
    let slots: Vec<usize> = state.balls.free_slots().take(missing).collect();
    for slot in slots {
        let mut ball = template.clone();
        if ball.vel.x == 0.0 {
            // Straight-line template: slot's launch angle, same speed
            let fan = launch_velocity(slot).normalize_or_zero() * template.speed();
            ball.vel = Vec2::new(fan.x, fan.y.abs().copysign(template.vel.y));
        } else {
            let dir = if slot % 2 == 0 { 1.0 } else { -1.0 };
            ball.vel.x = ball.vel.x.abs() * dir;
        }
        state.balls.insert_at(slot, ball);
    }
}

fn chaos_burst(state: &mut GameState) {
    let width = state.field.x.max(2.0 * POWERUP_RADIUS);
    for _ in 0..CHAOS_BURST_COUNT {
        let x = state
            .rng
            .random_range(POWERUP_RADIUS..=width - POWERUP_RADIUS);
        spawn(state, Vec2::new(x, 0.0), None);
    }
}

/// Apply an effect
pub fn apply(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::SpeedUp => scale_ball_speed(state, BALL_FAST_FACTOR),
        PowerUpKind::SlowDown => scale_ball_speed(state, BALL_SLOW_FACTOR),
        PowerUpKind::BigBall => set_base_geometry(state, BIG_BALL_SCALE, BIG_BALL_PENETRATION),
        PowerUpKind::WreckingBall => {
            set_base_geometry(state, WRECKING_BALL_SCALE, WRECKING_BALL_PENETRATION)
        }
        PowerUpKind::ShrinkBall => refresh_ball_geometry(state, false),
        PowerUpKind::Pierce => refresh_ball_geometry(state, true),
        PowerUpKind::Spin => state.toggles.spin = true,
        PowerUpKind::TripleBall => materialize_balls(state, 3),
        PowerUpKind::SixBall => materialize_balls(state, MAX_BALLS),
        PowerUpKind::WidePaddle => {
            state.paddle.wide = true;
            state.paddle.apply_width(state.field.x);
        }
        PowerUpKind::NarrowPaddle => {
            state.paddle.narrow = true;
            state.paddle.apply_width(state.field.x);
        }
        PowerUpKind::Sticky => state.toggles.sticky = true,
        PowerUpKind::Invulnerable => state.toggles.invulnerable = true,
        PowerUpKind::ExtraLife => state.lives = state.lives.saturating_add(1),
        PowerUpKind::Chaos => chaos_burst(state),
    }
}

/// Undo a timed effect. Instant effects have nothing to revert.
pub fn revert(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::SpeedUp => unscale_ball_speed(state, BALL_FAST_FACTOR),
        PowerUpKind::SlowDown => unscale_ball_speed(state, BALL_SLOW_FACTOR),
        PowerUpKind::ShrinkBall | PowerUpKind::Pierce => refresh_ball_geometry(state, false),
        PowerUpKind::Spin => state.toggles.spin = false,
        PowerUpKind::WidePaddle => {
            state.paddle.wide = false;
            state.paddle.apply_width(state.field.x);
        }
        PowerUpKind::NarrowPaddle => {
            state.paddle.narrow = false;
            state.paddle.apply_width(state.field.x);
        }
        PowerUpKind::Sticky => release_stuck_balls(state),
        PowerUpKind::Invulnerable => state.toggles.invulnerable = false,
        PowerUpKind::BigBall
        | PowerUpKind::WreckingBall
        | PowerUpKind::TripleBall
        | PowerUpKind::SixBall
        | PowerUpKind::ExtraLife
        | PowerUpKind::Chaos => {}
    }
}

/// Sticky expiry: stuck balls leave the paddle instead of waiting forever
fn release_stuck_balls(state: &mut GameState) {
    state.toggles.sticky = false;
    let scale = speed_scale(state);
    let mut released = false;
    for (slot, ball) in state.balls.iter_mut() {
        if !ball.stuck {
            continue;
        }
        ball.stuck = false;
        if ball.vel == Vec2::ZERO {
            ball.vel = launch_velocity(slot) * scale;
        }
        released = true;
    }
    if released && !state.director.is_pending() && !state.game_over {
        state.launched = true;
    }
}
