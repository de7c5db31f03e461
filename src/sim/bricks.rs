//! Brick field: the grid of destructible targets

use glam::Vec2;
use rand::Rng;

use super::geom::Rect;
use super::levels::LevelDef;
use super::pool::Pool;
use super::scene::Color;
use crate::consts::*;

/// Total brick slots in the grid
pub const BRICK_SLOTS: usize = BRICK_ROWS * BRICK_COLS;

/// What happens when a brick is destroyed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRule {
    /// Never drops a pickup
    Never,
    /// Drops a uniformly random pickup with `RANDOM_DROP_CHANCE`
    Random,
    /// Always drops the pickup at this catalog index
    Guaranteed(usize),
}

impl DropRule {
    /// Decode a level-table cell: negative = never, 0 = random, N = catalog index N-1
    pub fn from_cell(cell: i8) -> Self {
        match cell {
            c if c < 0 => DropRule::Never,
            0 => DropRule::Random,
            c => DropRule::Guaranteed(c as usize - 1),
        }
    }
}

/// Display color for a brick with `hits` remaining
pub fn brick_color(hits: u8) -> Color {
    match hits {
        1 => Color::rgb(200, 200, 200), // light gray
        2 => Color::rgb(0, 200, 255),   // cyan
        3 => Color::rgb(0, 180, 0),     // green
        4 => Color::rgb(255, 180, 0),   // orange
        5 => Color::rgb(255, 0, 0),     // red
        _ => Color::WHITE,
    }
}

/// A single brick
#[derive(Debug, Clone)]
pub struct Brick {
    pub rect: Rect,
    /// Hits remaining; always >= 1 while the brick is in the field
    pub hits: u8,
    pub drop: DropRule,
}

impl Brick {
    pub fn color(&self) -> Color {
        brick_color(self.hits)
    }
}

/// Result of striking a brick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BrickHit {
    /// Brick survived with this many hits left
    Damaged { remaining: u8 },
    /// Brick was removed from the field
    Destroyed { center: Vec2, drop: DropRule },
}

/// Grid of bricks, slot = row * BRICK_COLS + col
#[derive(Debug, Clone, Default)]
pub struct BrickField {
    bricks: Pool<Brick, BRICK_SLOTS>,
}

/// Left edge of the grid when centered in a field of `field_width`
pub fn grid_origin_x(field_width: f32) -> f32 {
    let total = BRICK_COLS as f32 * BRICK_WIDTH + (BRICK_COLS as f32 - 1.0) * BRICK_GAP;
    (field_width - total) * 0.5
}

fn cell_rect(origin_x: f32, row: usize, col: usize) -> Rect {
    Rect::new(
        origin_x + col as f32 * (BRICK_WIDTH + BRICK_GAP),
        BRICK_TOP + row as f32 * (BRICK_HEIGHT + BRICK_GAP),
        BRICK_WIDTH,
        BRICK_HEIGHT,
    )
}

impl BrickField {
    /// Instantiate a level template. Each present cell gets a random 0/+1
    /// bonus on its base hit count, clamped to `[1, BRICK_MAX_HITS]`.
    pub fn from_level<R: Rng>(def: &LevelDef, field_width: f32, rng: &mut R) -> Self {
        let origin_x = grid_origin_x(field_width);
        let mut bricks = Pool::new();

        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                let base = def.layout[row][col];
                if base == 0 {
                    continue;
                }
                let bonus: u8 = rng.random_range(0..=1);
                let hits = base.saturating_add(bonus).clamp(1, BRICK_MAX_HITS);
                bricks.insert_at(
                    row * BRICK_COLS + col,
                    Brick {
                        rect: cell_rect(origin_x, row, col),
                        hits,
                        drop: DropRule::from_cell(def.drops[row][col]),
                    },
                );
            }
        }

        Self { bricks }
    }

    /// Place a brick directly (level editors and tests)
    pub fn place(&mut self, row: usize, col: usize, field_width: f32, hits: u8, drop: DropRule) {
        if row >= BRICK_ROWS || col >= BRICK_COLS || hits == 0 {
            return;
        }
        self.bricks.insert_at(
            row * BRICK_COLS + col,
            Brick {
                rect: cell_rect(grid_origin_x(field_width), row, col),
                hits: hits.min(BRICK_MAX_HITS),
                drop,
            },
        );
    }

    pub fn clear(&mut self) {
        self.bricks.clear();
    }

    /// Re-center the grid horizontally for a new field width
    pub fn relayout(&mut self, field_width: f32) {
        let origin_x = grid_origin_x(field_width);
        for (slot, brick) in self.bricks.iter_mut() {
            brick.rect = cell_rect(origin_x, slot / BRICK_COLS, slot % BRICK_COLS);
        }
    }

    pub fn is_cleared(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.bricks.len()
    }

    pub fn get(&self, slot: usize) -> Option<&Brick> {
        self.bricks.get(slot)
    }

    /// Alive bricks in grid order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Brick)> {
        self.bricks.iter()
    }

    /// Apply one hit. Returns `None` if the slot is empty.
    pub fn hit(&mut self, slot: usize) -> Option<BrickHit> {
        let brick = self.bricks.get_mut(slot)?;
        brick.hits = brick.hits.saturating_sub(1);
        if brick.hits > 0 {
            return Some(BrickHit::Damaged {
                remaining: brick.hits,
            });
        }
        self.destroy(slot)
    }

    /// Remove a brick regardless of its remaining hits
    pub fn destroy(&mut self, slot: usize) -> Option<BrickHit> {
        let brick = self.bricks.remove(slot)?;
        Some(BrickHit::Destroyed {
            center: brick.rect.center(),
            drop: brick.drop,
        })
    }
}
