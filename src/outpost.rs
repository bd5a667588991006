//! Destructible shield structures.
//!
//! Each base is a fixed grid of small blocks; a hit removes a short
//! horizontal span from the struck row and the two rows below it, which
//! approximates a round blast crater out of rectangular slices. The
//! outpost aggregates the three bases guarding the player.

use crate::error::{ConfigError, ConfigResult};
use crate::geometry::Position;
use crate::surface::{Color, Surface};

/// Blocks removed per affected row on a hit.
const SPLASH_SPAN: usize = 4;
/// Rows affected by one hit: the struck row and the two below it.
const SPLASH_ROWS: usize = 3;

/// Static description of one base's block grid.
#[derive(Clone, Copy, Debug)]
pub struct BaseConfig {
    pub top_left: Position,
    /// Blocks per row.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// Edge length of one square block in pixels.
    pub block_size: f32,
    pub color: Color,
}

/// One destructible shield: a grid of block positions.
pub struct Base {
    top_left: Position,
    width: usize,
    height: usize,
    block_size: f32,
    color: Color,
    block_rows: Vec<Vec<Position>>,
}

impl Base {
    pub fn new(config: BaseConfig) -> ConfigResult<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(ConfigError::EmptyBlockGrid {
                width: config.width,
                height: config.height,
            });
        }
        let mut base = Self {
            top_left: config.top_left,
            width: config.width,
            height: config.height,
            block_size: config.block_size,
            color: config.color,
            block_rows: Vec::new(),
        };
        base.regenerate();
        Ok(base)
    }

    /// Rebuild the full undamaged grid, discarding all prior damage.
    pub fn regenerate(&mut self) {
        self.block_rows = (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| {
                        Position::new(
                            self.top_left.x + col as f32 * self.block_size,
                            self.top_left.y + row as f32 * self.block_size,
                        )
                    })
                    .collect()
            })
            .collect();
    }

    pub fn block_rows(&self) -> &[Vec<Position>] {
        &self.block_rows
    }

    pub fn block_size(&self) -> f32 {
        self.block_size
    }

    /// Remove the splash footprint anchored at `(row, col)`: up to
    /// `SPLASH_SPAN` blocks from that row and the same span from the next
    /// `SPLASH_ROWS - 1` rows. Rows past the grid are skipped; a column
    /// start past a row's current end removes nothing from that row.
    pub fn remove_block(&mut self, row: usize, col: usize) {
        for r in row..row + SPLASH_ROWS {
            let Some(blocks) = self.block_rows.get_mut(r) else {
                break;
            };
            if col >= blocks.len() {
                continue;
            }
            let end = (col + SPLASH_SPAN).min(blocks.len());
            blocks.drain(col..end);
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for row in &self.block_rows {
            for block in row {
                surface.fill_rect(
                    block.x,
                    block.y,
                    self.block_size,
                    self.block_size,
                    self.color,
                );
            }
        }
    }
}

/// Horizontal positions of the three bases.
const BASE_LOCATIONS: [f32; 3] = [250.0, 550.0, 850.0];
/// Distance of the base tops above the bottom of the canvas.
const BASE_VERTICAL_OFFSET: f32 = 300.0;
const BASE_WIDTH: usize = 20;
const BASE_HEIGHT: usize = 10;
const BASE_BLOCK_SIZE: f32 = 4.0;
const BASE_COLOR: Color = Color::rgb(0x77, 0x77, 0x77);

/// The fixed group of shields between the armada and the player.
pub struct Outpost {
    bases: Vec<Base>,
}

impl Outpost {
    pub fn new(canvas_h: f32) -> ConfigResult<Self> {
        let base_y = canvas_h - BASE_VERTICAL_OFFSET;
        let bases = BASE_LOCATIONS
            .iter()
            .map(|&base_x| {
                Base::new(BaseConfig {
                    top_left: Position::new(base_x, base_y),
                    width: BASE_WIDTH,
                    height: BASE_HEIGHT,
                    block_size: BASE_BLOCK_SIZE,
                    color: BASE_COLOR,
                })
            })
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(Self { bases })
    }

    pub fn bases(&self) -> &[Base] {
        &self.bases
    }

    pub fn remove_block(&mut self, base: usize, row: usize, col: usize) {
        if let Some(base) = self.bases.get_mut(base) {
            base.remove_block(row, col);
        }
    }

    /// Repair every base to its undamaged state.
    pub fn reset(&mut self) {
        for base in &mut self.bases {
            base.regenerate();
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        for base in &self.bases {
            base.render(surface);
        }
    }
}
