//! Animated sprite: position, visibility and the frame-cycling timer for
//! one visual entity.
//!
//! Visibility and the frame timer are deliberately decoupled: the timer
//! advances on every render call even while the sprite is hidden, so a
//! looping sprite that is shown again resumes mid-cycle instead of
//! restarting.

use crate::assets::ImageCache;
use crate::error::{ConfigError, ConfigResult};
use crate::geometry::Position;
use crate::surface::Surface;

/// Static description of a sprite: which sheet it draws from and how the
/// frames cycle.
#[derive(Clone, Copy, Debug)]
pub struct SpriteConfig {
    /// Image-cache tag of the backing sheet.
    pub tag: &'static str,
    /// Spawn position.
    pub start_position: Position,
    /// Full sheet size in pixels. Sheets are single-row strips; the
    /// per-frame width is `sheet_w / frame_count`.
    pub sheet_w: f32,
    pub sheet_h: f32,
    /// Frames in the strip, must be at least 1.
    pub frame_count: u32,
    /// Render calls per frame advance, must be at least 1.
    pub ticks_per_frame: u32,
    /// Cycle forever (true) or sit on frame 0 until `play()` (false).
    pub looping: bool,
}

impl SpriteConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.frame_count == 0 {
            return Err(ConfigError::ZeroFrameCount { tag: self.tag });
        }
        if self.ticks_per_frame == 0 {
            return Err(ConfigError::ZeroTicksPerFrame { tag: self.tag });
        }
        Ok(())
    }
}

/// One animated visual entity.
pub struct Sprite {
    tag: &'static str,
    pos: Position,
    sheet_w: f32,
    sheet_h: f32,
    frame_count: u32,
    ticks_per_frame: u32,
    looping: bool,
    play_single: bool,
    visible: bool,
    frame_index: u32,
    ticks: u32,
}

impl Sprite {
    /// Build a sprite, rejecting configurations that would produce
    /// undefined animation.
    ///
    /// A looping sprite starts visible; a one-shot sprite starts hidden
    /// and waits for [`Sprite::play`].
    pub fn new(config: SpriteConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            tag: config.tag,
            pos: config.start_position,
            sheet_w: config.sheet_w,
            sheet_h: config.sheet_h,
            frame_count: config.frame_count,
            ticks_per_frame: config.ticks_per_frame,
            looping: config.looping,
            play_single: false,
            visible: config.looping,
            frame_index: 0,
            ticks: 0,
        })
    }

    /// Force the sprite visible and run the animation once; it hides
    /// itself after the final frame.
    pub fn play(&mut self) {
        self.visible = true;
        self.play_single = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Current frame index, always in `[0, frame_count)`.
    pub fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Width of one frame in pixels.
    pub fn frame_width(&self) -> f32 {
        self.sheet_w / self.frame_count as f32
    }

    /// Translate by a delta; always permitted, even while hidden.
    pub fn move_by(&mut self, delta: Position) {
        self.pos += delta;
    }

    pub fn move_to(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// Advance the frame timer, then draw the current frame if visible.
    ///
    /// Drawing silently does nothing when the tag is missing from the
    /// cache; pre-loading every tag is the frontend's contract and is
    /// checked by tests, not at runtime.
    pub fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache) {
        self.advance_frame();
        if !self.visible {
            return;
        }
        let Some(image) = images.get(self.tag) else {
            return;
        };
        let frame_w = self.frame_width();
        surface.draw_image(
            image,
            self.frame_index as f32 * frame_w,
            0.0,
            frame_w,
            self.sheet_h,
            self.pos.x,
            self.pos.y,
            frame_w,
            self.sheet_h,
        );
    }

    /// One timer step. Runs unconditionally, visible or not.
    fn advance_frame(&mut self) {
        self.ticks += 1;
        if self.ticks <= self.ticks_per_frame {
            return;
        }
        self.ticks = 0;

        if self.looping {
            self.frame_index = if self.frame_index < self.frame_count - 1 {
                self.frame_index + 1
            } else {
                0
            };
        } else if self.play_single {
            if self.frame_index < self.frame_count - 1 {
                self.frame_index += 1;
            } else {
                // One-shot finished: rewind and auto-hide.
                self.frame_index = 0;
                self.play_single = false;
                self.hide();
            }
        }
        // Neither looping nor playing: frame stays frozen.
    }
}
