//! The enemy formation: a fixed grid of ships that advances as a unit,
//! reverses and drops a step at the canvas edges, speeds up as it
//! thins out, and reports the two session-ending conditions.

use crate::assets::ImageCache;
use crate::error::ConfigResult;
use crate::geometry::Position;
use crate::sprite::{Sprite, SpriteConfig};
use crate::surface::Surface;

/// Ships per row.
const PER_ROW: usize = 11;
/// Rows in the formation.
const ROWS: usize = 5;
/// Horizontal step per move, in pixels.
const STRIDE: f32 = 20.0;
/// Boundary margin on both canvas edges.
const PADDING: f32 = 100.0;
/// Vertical drop per descent step.
const Y_SHIFT: f32 = 32.0;
/// Move-cadence ticks contributed by each live ship.
const TICKS_PER_SHIP: u32 = 1;
/// Height of the protected band above the bottom edge; a visible ship
/// entering it ends the session.
const PLAYER_BAND: f32 = 96.0;
/// Grid pitch between neighbouring spawn positions.
const SPACING: f32 = 64.0;
/// Nominal ship edge length, used to centre the grid.
const SHIP_WIDTH: f32 = 32.0;

const SHEET_W: f32 = 64.0;
const SHEET_H: f32 = 32.0;
const FRAME_COUNT: u32 = 2;
const TICKS_PER_FRAME: u32 = 60;

/// Session-level outcome of one armada think step, delivered
/// synchronously from [`Armada::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArmadaEvent {
    /// Every ship was destroyed; the formation has already reset itself.
    AllDestroyed,
    /// A ship entered the player band; the formation has already reset
    /// itself and the session is over.
    ReachedPlayer,
}

/// One formation member: its score value and its sprite.
pub struct Ship {
    points: u32,
    sprite: Sprite,
}

impl Ship {
    pub fn points(&self) -> u32 {
        self.points
    }

    pub fn position(&self) -> Position {
        self.sprite.position()
    }

    pub fn is_visible(&self) -> bool {
        self.sprite.is_visible()
    }
}

pub struct Armada {
    ships: Vec<Ship>,
    /// Spawn position per ship, same order as `ships`; read-only after
    /// construction.
    spawn_positions: Vec<Position>,
    ship_count: usize,
    direction: Position,
    shift_down: bool,
    shift_back: bool,
    ticks: u32,
    ticks_per_move: u32,
    canvas_w: f32,
    canvas_h: f32,
}

impl Armada {
    pub fn new(canvas_w: f32, canvas_h: f32) -> ConfigResult<Self> {
        let armada_width = (PER_ROW + 1) as f32 * SPACING + SHIP_WIDTH;
        let x_start = (canvas_w - armada_width) / 2.0;

        let mut ships = Vec::with_capacity(ROWS * PER_ROW);
        let mut spawn_positions = Vec::with_capacity(ROWS * PER_ROW);
        for row in 1..=ROWS {
            for col in 1..=PER_ROW {
                let start_position =
                    Position::new(x_start + SPACING * col as f32, SPACING * row as f32);
                spawn_positions.push(start_position);
                ships.push(Ship {
                    points: row_points(row),
                    sprite: Sprite::new(SpriteConfig {
                        tag: row_image(row),
                        start_position,
                        sheet_w: SHEET_W,
                        sheet_h: SHEET_H,
                        frame_count: FRAME_COUNT,
                        ticks_per_frame: TICKS_PER_FRAME,
                        looping: true,
                    })?,
                });
            }
        }

        Ok(Self {
            ships,
            spawn_positions,
            ship_count: ROWS * PER_ROW,
            direction: Position::new(STRIDE, 0.0),
            shift_down: false,
            shift_back: false,
            ticks: 0,
            ticks_per_move: TICKS_PER_SHIP * (ROWS * PER_ROW) as u32,
            canvas_w,
            canvas_h,
        })
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship_count(&self) -> usize {
        self.ship_count
    }

    pub fn direction(&self) -> Position {
        self.direction
    }

    pub fn positions(&self) -> Vec<Position> {
        self.ships.iter().map(Ship::position).collect()
    }

    /// Destroy the ship at `index`: it comes off the live count and is
    /// hidden, but keeps its slot so indices stay stable.
    pub fn hide_ship(&mut self, index: usize) {
        self.ship_count -= 1;
        self.ships[index].sprite.hide();
    }

    /// The frontmost visible position in each occupied column; only
    /// these may launch a bomb (front-row-fires-first).
    pub fn can_fire(&self) -> Vec<Position> {
        let mut visible: Vec<Position> = self
            .ships
            .iter()
            .filter(|ship| ship.is_visible())
            .map(Ship::position)
            .collect();
        visible.sort_by(|a, b| {
            b.y.partial_cmp(&a.y).unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut exposed: Vec<Position> = Vec::new();
        for pos in visible {
            if !exposed.iter().any(|p| p.x == pos.x) {
                exposed.push(pos);
            }
        }
        exposed
    }

    /// Count a tick; after the cadence elapses, run one think step.
    pub fn update(&mut self) -> Option<ArmadaEvent> {
        self.ticks += 1;
        if self.ticks <= self.ticks_per_move {
            return None;
        }
        self.ticks = 0;
        self.think()
    }

    fn think(&mut self) -> Option<ArmadaEvent> {
        let event = self
            .check_all_destroyed()
            .or_else(|| self.check_boundaries());
        self.advance();
        self.adjust_speed();
        event
    }

    fn check_all_destroyed(&mut self) -> Option<ArmadaEvent> {
        if self.ship_count == 0 {
            self.reset();
            return Some(ArmadaEvent::AllDestroyed);
        }
        None
    }

    /// Scan visible ships against the three boundaries. Only one acts
    /// per think step; right breach wins over left, left over the
    /// player band.
    fn check_boundaries(&mut self) -> Option<ArmadaEvent> {
        let mut breach_right = false;
        let mut breach_left = false;
        let mut breach_player = false;

        for ship in self.ships.iter().filter(|s| s.is_visible()) {
            let pos = ship.position();
            if pos.x < PADDING {
                breach_left = true;
            }
            if pos.x > self.canvas_w - PADDING {
                breach_right = true;
            }
            if pos.y > self.canvas_h - PLAYER_BAND {
                breach_player = true;
            }
        }

        if breach_right {
            self.shift_down = true;
            self.direction = Position::new(-STRIDE, 0.0);
        } else if breach_left {
            self.shift_down = true;
            self.direction = Position::new(STRIDE, 0.0);
        } else if breach_player {
            self.direction = Position::new(STRIDE, 0.0);
            self.reset();
            return Some(ArmadaEvent::ReachedPlayer);
        }
        None
    }

    /// One movement step. A pending resume wins over a pending descent;
    /// they alternate, so a breach produces exactly one drop followed by
    /// one horizontal step before normal motion continues.
    fn advance(&mut self) {
        if self.shift_back {
            self.shift_back = false;
            self.shift_down = false;
            let step = Position::new(self.direction.x, 0.0);
            for ship in &mut self.ships {
                ship.sprite.move_by(step);
            }
        } else if self.shift_down {
            self.shift_down = false;
            self.shift_back = true;
            let drop = Position::new(0.0, Y_SHIFT);
            for ship in &mut self.ships {
                ship.sprite.move_by(drop);
            }
        } else {
            for ship in &mut self.ships {
                ship.sprite.move_by(self.direction);
            }
        }
    }

    /// Fewer live ships, shorter cadence, faster formation.
    fn adjust_speed(&mut self) {
        self.ticks_per_move = self.ship_count as u32 * TICKS_PER_SHIP;
    }

    /// Restore every ship to its recorded spawn position, visible, and
    /// refill the live count.
    pub fn reset(&mut self) {
        for (ship, &spawn) in self.ships.iter_mut().zip(&self.spawn_positions) {
            ship.sprite.move_to(spawn);
            ship.sprite.show();
        }
        self.ship_count = ROWS * PER_ROW;
    }

    pub fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache) {
        for ship in &mut self.ships {
            ship.sprite.render(surface, images);
        }
    }
}

/// Row 1 flies the top-tier saucer, rows 2 and 3 the mid tier, the rest
/// the bottom tier.
fn row_image(row: usize) -> &'static str {
    match row {
        1 => "alien1",
        2 | 3 => "alien2",
        _ => "alien3",
    }
}

fn row_points(row: usize) -> u32 {
    match row {
        1 => 30,
        2 | 3 => 20,
        _ => 10,
    }
}
