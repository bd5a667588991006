//! The player's laser and its collision resolution.
//!
//! There is exactly one laser. While idle it sits hidden at the player's
//! cannon; `fire` puts it in flight until it hits a ship, leaves the top
//! of the canvas, or the session resets it.

use crate::armada::Armada;
use crate::assets::ImageCache;
use crate::error::ConfigResult;
use crate::explosion::Explosion;
use crate::geometry::Position;
use crate::hud::Score;
use crate::outpost::Outpost;
use crate::sprite::{Sprite, SpriteConfig};
use crate::surface::Surface;

/// Upward movement per tick while in flight.
const VELOCITY: Position = Position::new(0.0, -20.0);
/// Target edge length for the ship alignment window.
const SHIP_SQUARE: f32 = 32.0;
/// Horizontal half-window for block hits.
const BLOCK_X_WINDOW: f32 = 5.0;
/// Vertical window for block hits.
const BLOCK_Y_WINDOW: f32 = 32.0;

pub struct Laser {
    sprite: Sprite,
    moving: bool,
}

impl Laser {
    pub fn new() -> ConfigResult<Self> {
        let sprite = Sprite::new(SpriteConfig {
            tag: "laser",
            // Parked well off-canvas until the first shot.
            start_position: Position::new(-100.0, -100.0),
            sheet_w: 12.0,
            sheet_h: 24.0,
            frame_count: 4,
            ticks_per_frame: 180,
            looping: true,
        })?;
        Ok(Self { sprite, moving: false })
    }

    /// Launch from wherever the laser currently sits.
    pub fn fire(&mut self) {
        self.sprite.show();
        self.moving = true;
    }

    pub fn is_in_flight(&self) -> bool {
        self.moving
    }

    pub fn is_visible(&self) -> bool {
        self.sprite.is_visible()
    }

    pub fn position(&self) -> Position {
        self.sprite.position()
    }

    pub fn move_to(&mut self, pos: Position) {
        self.sprite.move_to(pos);
    }

    /// One tick: resolve ship hits, retire the laser off-screen, move or
    /// re-park it, then chew through any shield block in the way.
    pub fn update(
        &mut self,
        cannon: Position,
        armada: &mut Armada,
        explosion: &mut Explosion,
        score: &mut Score,
        outpost: &mut Outpost,
    ) {
        self.check_armada_collision(armada, explosion, score);
        self.check_off_screen();
        self.move_or_park(cannon);
        self.check_block_collision(outpost);
    }

    /// Alignment test against every still-visible ship: the laser must
    /// sit strictly inside the square hanging right-and-below the ship's
    /// top-left corner.
    fn check_armada_collision(
        &mut self,
        armada: &mut Armada,
        explosion: &mut Explosion,
        score: &mut Score,
    ) {
        let laser = self.sprite.position();
        for index in 0..armada.ships().len() {
            let ship = &armada.ships()[index];
            if !ship.is_visible() {
                continue;
            }
            let pos = ship.position();
            let dx = laser.x - pos.x;
            let dy = laser.y - pos.y;
            if dx > 0.0 && dx < SHIP_SQUARE && dy > 0.0 && dy < SHIP_SQUARE {
                score.add(armada.ships()[index].points());
                self.moving = false;
                armada.hide_ship(index);
                explosion.trigger_at(pos);
            }
        }
    }

    fn check_off_screen(&mut self) {
        if self.sprite.position().y < 0.0 {
            self.moving = false;
        }
    }

    /// In flight: apply the upward velocity. Otherwise: hide and snap
    /// back to the player's cannon, ready for the next shot.
    fn move_or_park(&mut self, cannon: Position) {
        if self.moving {
            self.sprite.move_by(VELOCITY);
        } else {
            self.sprite.hide();
            self.sprite.move_to(cannon);
        }
    }

    /// Remove the first shield block the laser is aligned with, plus its
    /// splash footprint. The laser itself keeps flying.
    fn check_block_collision(&self, outpost: &mut Outpost) {
        let laser = self.sprite.position();
        if let Some((base, row, col)) = find_struck_block(outpost, laser) {
            outpost.remove_block(base, row, col);
        }
    }

    pub fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache) {
        self.sprite.render(surface, images);
    }
}

/// Shared projectile-vs-block alignment scan: a block is struck when the
/// projectile is horizontally within `BLOCK_X_WINDOW` of it and strictly
/// above it by less than `BLOCK_Y_WINDOW`.
pub(crate) fn find_struck_block(
    outpost: &Outpost,
    projectile: Position,
) -> Option<(usize, usize, usize)> {
    for (b, base) in outpost.bases().iter().enumerate() {
        for (row, blocks) in base.block_rows().iter().enumerate() {
            for (col, block) in blocks.iter().enumerate() {
                let dx = (block.x - projectile.x).abs();
                let dy = block.y - projectile.y;
                if dx < BLOCK_X_WINDOW && dy > 0.0 && dy < BLOCK_Y_WINDOW {
                    return Some((b, row, col));
                }
            }
        }
    }
    None
}
