//! Score counter, spare-life row and dialog overlays.

use crate::assets::ImageCache;
use crate::error::ConfigResult;
use crate::geometry::Position;
use crate::sprite::{Sprite, SpriteConfig};
use crate::surface::{Color, Surface};

// ── Score ─────────────────────────────────────────────────────────────────────

const SCORE_LOCATION: Position = Position::new(32.0, 56.0);
const SCORE_FONT_PX: f32 = 24.0;

/// Running point total, drawn in the top-left corner.
pub struct Score {
    score: u32,
}

impl Score {
    pub fn new() -> Self {
        Self { score: 0 }
    }

    pub fn add(&mut self, amount: u32) {
        self.score += amount;
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    pub fn value(&self) -> u32 {
        self.score
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.fill_text(
            &format!("SCORE: {}", self.score),
            SCORE_LOCATION.x,
            SCORE_LOCATION.y,
            SCORE_FONT_PX,
            Color::WHITE,
        );
    }
}

impl Default for Score {
    fn default() -> Self {
        Self::new()
    }
}

// ── Player lives ──────────────────────────────────────────────────────────────

/// Most life icons the row can show.
const MAX_LIFE_ICONS: usize = 10;
const LIFE_ICON_SPACER: f32 = 8.0;
const LIVES_BOTTOM_MARGIN: f32 = 64.0;

/// Row of hero icons near the bottom edge showing the spare ships.
///
/// The ship currently in play is not a spare, so `lives` lives draw as
/// `lives - 1` icons.
pub struct PlayerLives {
    sprites: Vec<Sprite>,
}

impl PlayerLives {
    pub fn new(canvas_h: f32) -> ConfigResult<Self> {
        let sheet_w = 64.0;
        let mut sprites = Vec::with_capacity(MAX_LIFE_ICONS);
        for i in 1..=MAX_LIFE_ICONS {
            sprites.push(Sprite::new(SpriteConfig {
                tag: "hero",
                start_position: Position::new(
                    (sheet_w + LIFE_ICON_SPACER) * i as f32,
                    canvas_h - LIVES_BOTTOM_MARGIN,
                ),
                sheet_w,
                sheet_h: 24.0,
                frame_count: 1,
                ticks_per_frame: 1,
                looping: true,
            })?);
        }
        Ok(Self { sprites })
    }

    pub fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache, lives: u32) {
        let to_render = (lives as usize).min(MAX_LIFE_ICONS);
        for sprite in self.sprites.iter_mut().take(to_render).skip(1) {
            sprite.render(surface, images);
        }
    }
}

// ── Dialogs ───────────────────────────────────────────────────────────────────

/// Centred lines of overlay text.
pub struct Dialog {
    font_px: f32,
    top_margin: f32,
    lines: Vec<&'static str>,
}

impl Dialog {
    pub fn new(font_px: f32, lines: Vec<&'static str>) -> Self {
        Self { font_px, top_margin: 0.0, lines }
    }

    pub fn with_top_margin(font_px: f32, lines: Vec<&'static str>, top_margin: f32) -> Self {
        Self { font_px, top_margin, lines }
    }

    pub fn render(&self, surface: &mut dyn Surface, canvas_w: f32, canvas_h: f32) {
        for (index, line) in self.lines.iter().enumerate() {
            let x_offset = line.len() as f32 / 2.0 * self.font_px;
            let y_offset = index as f32 * self.font_px * 1.5;
            surface.fill_text(
                line,
                canvas_w / 2.0 - x_offset,
                canvas_h / 2.0 + y_offset + self.top_margin,
                self.font_px,
                Color::WHITE,
            );
        }
    }
}
