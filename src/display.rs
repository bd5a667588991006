//! Terminal rendering layer. All crossterm I/O lives here.
//!
//! The simulation thinks in a 1200x900 pixel canvas; this module maps it
//! onto the terminal grid at a fixed scale of one cell per 12x24 pixel
//! tile and implements the core's `Surface` contract with queued
//! crossterm commands. It also ships the built-in sprite artwork, since
//! a terminal build has no image files to decode.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Print},
    terminal, QueueableCommand,
};

use invaders::assets::{Image, ImageCache};
use invaders::surface::{Color, Surface};
use invaders::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// Canvas pixels per terminal column.
const CELL_W: f32 = 12.0;
/// Canvas pixels per terminal row.
const CELL_H: f32 = 24.0;

/// Terminal size needed to show the whole canvas.
pub const MIN_COLS: u16 = (CANVAS_WIDTH / CELL_W) as u16;
pub const MIN_ROWS: u16 = (CANVAS_HEIGHT / CELL_H) as u16 + 1;

// ── Sprite palette ────────────────────────────────────────────────────────────

const C_ALIEN1: Color = Color::rgb(255, 85, 255);
const C_ALIEN2: Color = Color::rgb(85, 255, 255);
const C_ALIEN3: Color = Color::rgb(85, 255, 85);
const C_HERO: Color = Color::rgb(255, 255, 255);
const C_LASER: Color = Color::rgb(255, 255, 85);
const C_BOMB: Color = Color::rgb(255, 85, 85);
const C_EXPLOSION: Color = Color::rgb(255, 170, 0);

// ── Surface implementation ────────────────────────────────────────────────────

/// Crossterm-backed implementation of the render boundary.
///
/// Draw calls queue terminal commands on the wrapped writer; the caller
/// flushes once per frame. The first I/O error is latched and reported
/// from [`TerminalSurface::flush`], so the trait methods stay infallible
/// as the contract requires.
pub struct TerminalSurface<W: Write> {
    out: W,
    term_cols: u16,
    term_rows: u16,
    error: Option<io::Error>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, term_cols: u16, term_rows: u16) -> Self {
        Self { out, term_cols, term_rows, error: None }
    }

    /// Flush the queued frame, surfacing any error latched by earlier
    /// draw calls.
    pub fn flush(&mut self) -> io::Result<()> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.out.flush()
    }

    fn queue(&mut self, result: io::Result<()>) {
        if self.error.is_none() {
            if let Err(err) = result {
                self.error = Some(err);
            }
        }
    }

    fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.term_cols as i32 && row < self.term_rows as i32
    }

    fn put_block(&mut self, col: i32, row: i32, color: Color) {
        if !self.in_bounds(col, row) {
            return;
        }
        let cmd = self
            .out
            .queue(cursor::MoveTo(col as u16, row as u16))
            .and_then(|out| out.queue(style::SetForegroundColor(to_term_color(color))))
            .and_then(|out| out.queue(Print("█")))
            .map(|_| ());
        self.queue(cmd);
    }

    /// Cell range covering the pixel span `[start, start + len)`.
    fn cell_span(start: f32, len: f32, cell: f32) -> (i32, i32) {
        let first = (start / cell).floor() as i32;
        let last = ((start + len) / cell).ceil() as i32;
        (first, last)
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32) {
        // A full-canvas clear is the per-frame wipe; do it in one command.
        if x <= 0.0 && y <= 0.0 && w >= CANVAS_WIDTH && h >= CANVAS_HEIGHT {
            let cmd = self
                .out
                .queue(terminal::Clear(terminal::ClearType::All))
                .map(|_| ());
            self.queue(cmd);
            return;
        }
        let (c0, c1) = Self::cell_span(x, w, CELL_W);
        let (r0, r1) = Self::cell_span(y, h, CELL_H);
        for row in r0..r1 {
            for col in c0..c1 {
                if !self.in_bounds(col, row) {
                    continue;
                }
                let cmd = self
                    .out
                    .queue(cursor::MoveTo(col as u16, row as u16))
                    .and_then(|out| out.queue(Print(" ")))
                    .map(|_| ());
                self.queue(cmd);
            }
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Color) {
        // The cleared terminal is already the idle background; painting
        // thousands of black cells every frame would only flicker.
        if color == Color::BLACK {
            return;
        }
        let (c0, c1) = Self::cell_span(x, w, CELL_W);
        let (r0, r1) = Self::cell_span(y, h, CELL_H);
        for row in r0..r1 {
            for col in c0..c1 {
                self.put_block(col, row, color);
            }
        }
    }

    fn draw_image(
        &mut self,
        image: &Image,
        sx: f32,
        sy: f32,
        sw: f32,
        sh: f32,
        dx: f32,
        dy: f32,
        dw: f32,
        dh: f32,
    ) {
        if dw <= 0.0 || dh <= 0.0 {
            return;
        }
        let (c0, c1) = Self::cell_span(dx, dw, CELL_W);
        let (r0, r1) = Self::cell_span(dy, dh, CELL_H);
        for row in r0..r1 {
            for col in c0..c1 {
                // Sample the source at this cell's centre.
                let px = (col as f32 + 0.5) * CELL_W;
                let py = (row as f32 + 0.5) * CELL_H;
                let u = (px - dx) / dw;
                let v = (py - dy) / dh;
                if !(0.0..1.0).contains(&u) || !(0.0..1.0).contains(&v) {
                    continue;
                }
                let src_x = (sx + u * sw) as u32;
                let src_y = (sy + v * sh) as u32;
                if let Some(color) = image.pixel(src_x, src_y) {
                    self.put_block(col, row, color);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, _size_px: f32, color: Color) {
        let col = (x / CELL_W) as i32;
        let row = (y / CELL_H) as i32;
        if !self.in_bounds(col, row) {
            return;
        }
        let cmd = self
            .out
            .queue(cursor::MoveTo(col as u16, row as u16))
            .and_then(|out| out.queue(style::SetForegroundColor(to_term_color(color))))
            .and_then(|out| out.queue(Print(text)))
            .map(|_| ());
        self.queue(cmd);
    }
}

fn to_term_color(color: Color) -> style::Color {
    style::Color::Rgb { r: color.r, g: color.g, b: color.b }
}

// ── Built-in artwork ──────────────────────────────────────────────────────────

/// Build the full image cache the simulation expects.
///
/// Sheet sizes must match what the sprites declare: the aliens are 2
/// frames of 32x32, the hero one 64x24 frame, the laser 4 frames of
/// 3x24, the bomb 3 frames of 4x32 and the explosion 3 frames of 32x32.
pub fn load_images() -> ImageCache {
    let mut cache = ImageCache::new();
    cache.insert("alien1", sheet(&ALIEN1_FRAMES, 4, 4, C_ALIEN1));
    cache.insert("alien2", sheet(&ALIEN2_FRAMES, 4, 4, C_ALIEN2));
    cache.insert("alien3", sheet(&ALIEN3_FRAMES, 4, 4, C_ALIEN3));
    cache.insert("hero", sheet(&HERO_FRAMES, 4, 4, C_HERO));
    cache.insert("laser", sheet(&LASER_FRAMES, 1, 4, C_LASER));
    cache.insert("bomb", sheet(&BOMB_FRAMES, 1, 4, C_BOMB));
    cache.insert("explosion", sheet(&EXPLOSION_FRAMES, 4, 4, C_EXPLOSION));
    cache
}

/// Rasterise character-mask frames into one horizontal RGBA strip.
/// `#` becomes an opaque pixel of `color`, anything else is transparent;
/// each mask cell scales to `scale_x` by `scale_y` pixels.
fn sheet(frames: &[&[&str]], scale_x: u32, scale_y: u32, color: Color) -> Image {
    let mask_h = frames[0].len() as u32;
    let mask_w = frames[0][0].len() as u32;
    let frame_w = mask_w * scale_x;
    let width = frame_w * frames.len() as u32;
    let height = mask_h * scale_y;

    let mut data = vec![0u8; (width * height * 4) as usize];
    for (f, mask) in frames.iter().enumerate() {
        for y in 0..height {
            let mask_row = mask[(y / scale_y) as usize].as_bytes();
            for x in 0..frame_w {
                if mask_row[(x / scale_x) as usize] != b'#' {
                    continue;
                }
                let px = f as u32 * frame_w + x;
                let i = ((y * width + px) * 4) as usize;
                data[i] = color.r;
                data[i + 1] = color.g;
                data[i + 2] = color.b;
                data[i + 3] = 255;
            }
        }
    }
    Image::from_rgba(width, height, data)
}

const ALIEN1_FRAMES: [&[&str]; 2] = [
    &[
        "...##...",
        "..####..",
        ".######.",
        "##.##.##",
        "########",
        ".#.##.#.",
        "#......#",
        ".#....#.",
    ],
    &[
        "...##...",
        "..####..",
        ".######.",
        "##.##.##",
        "########",
        "..#..#..",
        ".#.##.#.",
        "#.#..#.#",
    ],
];

const ALIEN2_FRAMES: [&[&str]; 2] = [
    &[
        "..#..#..",
        "#..##..#",
        "#.####.#",
        "########",
        "#.####.#",
        "#.#..#.#",
        "...##...",
        "..#..#..",
    ],
    &[
        "..#..#..",
        "...##...",
        "#.####.#",
        "########",
        "#.####.#",
        "..#..#..",
        ".#....#.",
        "#......#",
    ],
];

const ALIEN3_FRAMES: [&[&str]; 2] = [
    &[
        "..####..",
        ".######.",
        "##.##.##",
        "########",
        "..#..#..",
        ".#.##.#.",
        "#......#",
        "........",
    ],
    &[
        "..####..",
        ".######.",
        "##.##.##",
        "########",
        ".#.##.#.",
        "#..##..#",
        ".#....#.",
        "........",
    ],
];

const HERO_FRAMES: [&[&str]; 1] = [&[
    ".......##.......",
    "......####......",
    ".....######.....",
    "################",
    "################",
    "################",
]];

const LASER_FRAMES: [&[&str]; 4] = [
    &["#..", "#..", "#..", "#..", "#..", "#.."],
    &[".#.", ".#.", ".#.", ".#.", ".#.", ".#."],
    &["..#", "..#", "..#", "..#", "..#", "..#"],
    &[".#.", ".#.", ".#.", ".#.", ".#.", ".#."],
];

const BOMB_FRAMES: [&[&str]; 3] = [
    &["#...", ".#..", "..#.", ".#..", "#...", ".#..", "..#.", ".##."],
    &[".#..", "..#.", ".#..", "#...", ".#..", "..#.", ".#..", ".##."],
    &["..#.", ".#..", "#...", ".#..", "..#.", ".#..", "#...", ".##."],
];

const EXPLOSION_FRAMES: [&[&str]; 3] = [
    &[
        "........",
        "........",
        "...##...",
        "..####..",
        "..####..",
        "...##...",
        "........",
        "........",
    ],
    &[
        "........",
        ".#.##.#.",
        "..####..",
        ".######.",
        ".######.",
        "..####..",
        ".#.##.#.",
        "........",
    ],
    &[
        "#..##..#",
        ".#....#.",
        "..#..#..",
        "#..##..#",
        "#..##..#",
        "..#..#..",
        ".#....#.",
        "#..##..#",
    ],
];
