//! Fixed-step frame clock

use crate::consts::MAX_SUBSTEPS;

/// Longest wall-clock gap accepted in one update (seconds)
const MAX_FRAME_GAP: f32 = 0.1;

/// Accumulates measured time and releases whole simulation frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_dt: f32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_dt: 1.0 / target_fps.max(1) as f32,
            accumulator: 0.0,
        }
    }

    /// Seconds per simulation frame
    pub fn frame_dt(&self) -> f32 {
        self.frame_dt
    }

    /// Feed elapsed wall time; returns how many frames to simulate now.
    /// Large gaps are clamped and at most `MAX_SUBSTEPS` frames are released
    /// to prevent a spiral of death.
    pub fn advance(&mut self, elapsed: f32) -> u32 {
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_GAP);

        let mut frames = 0;
        while self.accumulator >= self.frame_dt && frames < MAX_SUBSTEPS {
            self.accumulator -= self.frame_dt;
            frames += 1;
        }
        if frames == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(self.frame_dt);
        }
        frames
    }
}
