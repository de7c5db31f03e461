//! Level templates and progression

use crate::consts::{BRICK_COLS, BRICK_ROWS};

/// Immutable per-level template
#[derive(Debug)]
pub struct LevelDef {
    pub name: &'static str,
    /// Base hit count per cell, 0 = no brick
    pub layout: [[u8; BRICK_COLS]; BRICK_ROWS],
    /// Drop rule per cell: -1 never, 0 random, N = catalog index N-1
    pub drops: [[i8; BRICK_COLS]; BRICK_ROWS],
    /// Descent pressure: frames between steps (0 = off). Not yet consumed.
    pub descent_interval: u32,
    /// Descent pressure: pixels per step. Not yet consumed.
    pub descent_amount: f32,
}

const R: i8 = 0;
const N: i8 = -1;

/// Authored levels, 1-based by level number
pub static LEVELS: [LevelDef; 4] = [
    LevelDef {
        name: "Warm Up",
        layout: [
            [2, 2, 2, 2, 2, 2, 2, 2, 2, 2],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ],
        drops: [
            [R, R, R, R, 12, R, R, R, R, R],
            [R, R, R, R, R, R, R, R, R, R],
            [R, 6, R, R, R, R, R, R, 8, R],
            [R, R, R, R, R, R, R, R, R, R],
            [N, N, N, N, N, N, N, N, N, N],
            [N, N, N, N, N, N, N, N, N, N],
        ],
        descent_interval: 0,
        descent_amount: 0.0,
    },
    LevelDef {
        name: "Checkerboard",
        layout: [
            [3, 0, 3, 0, 3, 3, 0, 3, 0, 3],
            [0, 2, 0, 2, 0, 0, 2, 0, 2, 0],
            [2, 0, 2, 0, 2, 2, 0, 2, 0, 2],
            [0, 1, 0, 1, 0, 0, 1, 0, 1, 0],
            [1, 0, 1, 0, 1, 1, 0, 1, 0, 1],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
        ],
        drops: [
            [R, N, R, N, 4, 3, N, R, N, R],
            [N, R, N, R, N, N, R, N, R, N],
            [R, N, R, N, 10, 5, N, R, N, R],
            [N, R, N, R, N, N, R, N, R, N],
            [R, N, R, N, R, R, N, R, N, R],
            [N, N, N, N, N, N, N, N, N, N],
        ],
        descent_interval: 0,
        descent_amount: 0.0,
    },
    LevelDef {
        name: "Pyramid",
        layout: [
            [0, 0, 0, 0, 4, 4, 0, 0, 0, 0],
            [0, 0, 0, 3, 3, 3, 3, 0, 0, 0],
            [0, 0, 3, 3, 2, 2, 3, 3, 0, 0],
            [0, 2, 2, 2, 2, 2, 2, 2, 2, 0],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            [1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
        ],
        drops: [
            [N, N, N, N, 4, 11, N, N, N, N],
            [N, N, N, R, R, R, R, N, N, N],
            [N, N, R, R, 13, 7, R, R, N, N],
            [N, R, R, R, R, R, R, R, R, N],
            [R, R, R, R, R, R, R, R, R, R],
            [R, R, R, R, R, R, R, R, R, R],
        ],
        descent_interval: 1800,
        descent_amount: 10.0,
    },
    LevelDef {
        name: "Fortress",
        layout: [
            [5, 5, 5, 5, 5, 5, 5, 5, 5, 5],
            [5, 1, 1, 1, 1, 1, 1, 1, 1, 5],
            [4, 1, 3, 3, 3, 3, 3, 3, 1, 4],
            [4, 1, 3, 0, 0, 0, 0, 3, 1, 4],
            [3, 1, 3, 3, 3, 3, 3, 3, 1, 3],
            [3, 2, 2, 2, 2, 2, 2, 2, 2, 3],
        ],
        drops: [
            [N, N, N, N, 14, 14, N, N, N, N],
            [N, R, R, R, R, R, R, R, R, N],
            [N, R, 5, R, R, R, R, 9, R, N],
            [N, R, R, N, N, N, N, R, R, N],
            [N, R, R, R, 12, 6, R, R, R, N],
            [R, R, R, R, R, R, R, R, R, R],
        ],
        descent_interval: 1200,
        descent_amount: 12.0,
    },
];

/// Number of authored levels
pub fn level_count() -> u32 {
    LEVELS.len() as u32
}

/// Template for a level number, clamped to `[1, level_count()]`
pub fn level_def(level: u32) -> &'static LevelDef {
    let index = level.clamp(1, level_count()) - 1;
    &LEVELS[index as usize]
}

/// Level progression latch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelPhase {
    /// Bricks remain (or the level has just been built)
    #[default]
    Idle,
    /// All bricks were cleared; the advance happens on the next frame
    PendingAdvance,
}

/// What the level check decided this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCheck {
    Continue,
    /// Field just cleared; balls are frozen until the next frame
    Cleared,
    /// Advance to the next level now
    Advance,
}

/// Detects clearance and defers the advance by one frame
#[derive(Debug, Clone, Default)]
pub struct LevelDirector {
    pub phase: LevelPhase,
}

impl LevelDirector {
    /// Evaluate completion for this frame.
    ///
    /// The caller freezes balls on `Cleared` and rebuilds the level on
    /// `Advance`. The advance is only reported once balls are not launched.
    pub fn check(&mut self, cleared: bool, launched: bool) -> LevelCheck {
        match self.phase {
            LevelPhase::Idle if cleared => {
                self.phase = LevelPhase::PendingAdvance;
                LevelCheck::Cleared
            }
            LevelPhase::Idle => LevelCheck::Continue,
            LevelPhase::PendingAdvance if !launched => {
                self.phase = LevelPhase::Idle;
                LevelCheck::Advance
            }
            LevelPhase::PendingAdvance => LevelCheck::Continue,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.phase == LevelPhase::PendingAdvance
    }

    pub fn reset(&mut self) {
        self.phase = LevelPhase::Idle;
    }
}
