//! The shared explosion effect.
//!
//! One one-shot sprite, moved to wherever something was just destroyed
//! and played; it hides itself when the animation finishes.

use crate::assets::ImageCache;
use crate::error::ConfigResult;
use crate::geometry::Position;
use crate::sprite::{Sprite, SpriteConfig};
use crate::surface::Surface;

pub struct Explosion {
    sprite: Sprite,
}

impl Explosion {
    pub fn new(canvas_w: f32, canvas_h: f32) -> ConfigResult<Self> {
        let sprite = Sprite::new(SpriteConfig {
            tag: "explosion",
            start_position: Position::new(canvas_w / 2.0, canvas_h - 256.0),
            sheet_w: 96.0,
            sheet_h: 32.0,
            frame_count: 3,
            ticks_per_frame: 10,
            looping: false,
        })?;
        Ok(Self { sprite })
    }

    /// Relocate the effect to a kill site and run it once.
    pub fn trigger_at(&mut self, pos: Position) {
        self.sprite.move_to(pos);
        self.sprite.play();
    }

    pub fn is_visible(&self) -> bool {
        self.sprite.is_visible()
    }

    pub fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache) {
        self.sprite.render(surface, images);
    }
}
