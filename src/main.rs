//! BreakBlocks entry point
//!
//! Native headless runner: loads settings, drives the simulation at the
//! target frame rate with the autopilot, and prints the final scene as JSON.
//!
//! Usage: `breakblocks [settings.json]`

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use breakblocks::Settings;
use breakblocks::platform::FrameClock;
use breakblocks::renderer;
use breakblocks::sim::{GameState, Scene, TickInput, step};

fn load_settings() -> Settings {
    let Some(path) = std::env::args().nth(1) else {
        return Settings::default();
    };
    match Settings::load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("{} ({}), using defaults", e, path);
            Settings::default()
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("BreakBlocks (native) starting...");

    let settings = load_settings();
    let mut state = GameState::with_config(settings.sim_config(clock_seed()));
    let mut clock = FrameClock::new(settings.target_fps);
    let input = TickInput {
        autopilot: settings.autopilot,
        ..Default::default()
    };

    let mut scene = Scene::capture(&state);
    let mut last = Instant::now();
    let mut last_level = state.level;

    loop {
        std::thread::sleep(Duration::from_secs_f32(clock.frame_dt()));
        let now = Instant::now();
        let frames = clock.advance((now - last).as_secs_f32());
        last = now;

        for _ in 0..frames {
            scene = step(&mut state, &input);
        }

        if state.level != last_level {
            last_level = state.level;
            log::info!("{} | {}", scene.hud.score_text(), scene.hud.level_text());
        }

        let limit_reached = settings.max_frames.is_some_and(|max| state.frame >= max);
        if state.game_over || limit_reached {
            break;
        }
    }

    let vertices = renderer::tessellate(&scene);
    log::info!(
        "Finished after {} frames: {} | {} | {} ({} vertices, {} bytes in last frame)",
        state.frame,
        scene.hud.score_text(),
        scene.hud.lives_text(),
        scene.hud.level_text(),
        vertices.len(),
        vertices.len() * renderer::Vertex::STRIDE
    );
    if let Some(message) = &scene.hud.message {
        log::info!("{}", message);
    }

    match serde_json::to_string_pretty(&scene) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize scene: {}", e),
    }
}
