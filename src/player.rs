//! The player's ship.

use crate::assets::ImageCache;
use crate::error::ConfigResult;
use crate::geometry::Position;
use crate::input::Actions;
use crate::sprite::{Sprite, SpriteConfig};
use crate::surface::Surface;

/// Horizontal movement per tick while a direction is held.
const SPEED: f32 = 4.0;
/// Closest the ship may get to either canvas edge.
const PADDING: f32 = 100.0;
const SHEET_W: f32 = 64.0;
const SHEET_H: f32 = 24.0;

pub struct Player {
    sprite: Sprite,
    canvas_w: f32,
}

impl Player {
    pub fn new(canvas_w: f32, canvas_h: f32) -> ConfigResult<Self> {
        let sprite = Sprite::new(SpriteConfig {
            tag: "hero",
            start_position: Position::new(canvas_w / 2.0 - 16.0, canvas_h - 200.0),
            sheet_w: SHEET_W,
            sheet_h: SHEET_H,
            frame_count: 1,
            ticks_per_frame: 5,
            looping: true,
        })?;
        Ok(Self { sprite, canvas_w })
    }

    pub fn position(&self) -> Position {
        self.sprite.position()
    }

    pub fn width(&self) -> f32 {
        SHEET_W
    }

    pub fn height(&self) -> f32 {
        SHEET_H
    }

    /// Where the laser parks and launches from: top centre of the ship.
    pub fn cannon_position(&self) -> Position {
        let pos = self.position();
        Position::new(pos.x + self.width() / 2.0, pos.y)
    }

    pub fn is_visible(&self) -> bool {
        self.sprite.is_visible()
    }

    /// Hidden while the death pause runs.
    pub fn hide(&mut self) {
        self.sprite.hide();
    }

    pub fn show(&mut self) {
        self.sprite.show();
    }

    /// Apply one tick of held movement, clamped to the padded play area.
    pub fn update(&mut self, input: Actions) {
        self.sprite.move_by(self.movement_vector(input));
    }

    fn movement_vector(&self, input: Actions) -> Position {
        let x = self.position().x;
        if input.right && x < self.canvas_w - PADDING {
            Position::new(SPEED, 0.0)
        } else if input.left && x > PADDING {
            Position::new(-SPEED, 0.0)
        } else {
            Position::new(0.0, 0.0)
        }
    }

    pub fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache) {
        self.sprite.render(surface, images);
    }
}
