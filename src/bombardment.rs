//! Enemy bombs: the falling projectiles and the coordinator that decides
//! when and where to launch them.
//!
//! All randomness comes through an injected `Rng`, so callers control
//! determinism and tests can seed it.

use rand::Rng;

use crate::armada::Armada;
use crate::assets::ImageCache;
use crate::error::ConfigResult;
use crate::geometry::Position;
use crate::laser::find_struck_block;
use crate::outpost::Outpost;
use crate::player::Player;
use crate::sprite::{Sprite, SpriteConfig};
use crate::surface::Surface;

/// Downward movement per tick.
const BOMB_SPEED: f32 = 1.5;

/// One falling bomb.
pub struct Bomb {
    sprite: Sprite,
    direction: Position,
}

impl Bomb {
    pub fn new(start_position: Position) -> ConfigResult<Self> {
        let sprite = Sprite::new(SpriteConfig {
            tag: "bomb",
            start_position,
            sheet_w: 12.0,
            sheet_h: 32.0,
            frame_count: 3,
            ticks_per_frame: 10,
            looping: true,
        })?;
        Ok(Self { sprite, direction: Position::new(0.0, BOMB_SPEED) })
    }

    pub fn position(&self) -> Position {
        self.sprite.position()
    }

    fn update(&mut self) {
        self.sprite.move_by(self.direction);
    }

    fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache) {
        self.sprite.render(surface, images);
    }
}

/// Ticks between launch decisions.
const TICKS_PER_LAUNCH: u32 = 40;
/// Launch offset from the firing ship's position to its underside.
const LAUNCH_OFFSET: Position = Position::new(14.0, 32.0);

/// Owns the live bombs and the launch cadence.
pub struct Bombardment {
    bombs: Vec<Bomb>,
    ticks: u32,
    canvas_h: f32,
    player_w: f32,
    player_h: f32,
}

impl Bombardment {
    pub fn new(canvas_h: f32, player_w: f32, player_h: f32) -> Self {
        Self { bombs: Vec::new(), ticks: 0, canvas_h, player_w, player_h }
    }

    pub fn bomb_count(&self) -> usize {
        self.bombs.len()
    }

    pub fn bomb_positions(&self) -> Vec<Position> {
        self.bombs.iter().map(Bomb::position).collect()
    }

    /// One tick: maybe launch, then move every bomb and resolve its
    /// collisions, discarding bombs that hit something or fall off the
    /// canvas. Returns `true` when any bomb struck the player.
    pub fn update(
        &mut self,
        armada: &Armada,
        player: &Player,
        outpost: &mut Outpost,
        rng: &mut impl Rng,
    ) -> ConfigResult<bool> {
        self.ticks += 1;
        if self.ticks >= TICKS_PER_LAUNCH {
            self.ticks = 0;
            self.maybe_launch(armada, rng)?;
        }

        let player_pos = player.position();
        let mut player_struck = false;
        let mut kept = Vec::with_capacity(self.bombs.len());
        for mut bomb in self.bombs.drain(..) {
            bomb.update();

            let hit_player = Self::player_alignment(
                bomb.position(),
                player_pos,
                self.player_w,
                self.player_h,
            );
            if hit_player {
                player_struck = true;
            }

            let hit_block = match find_struck_block(outpost, bomb.position()) {
                Some((base, row, col)) => {
                    outpost.remove_block(base, row, col);
                    true
                }
                None => false,
            };

            if bomb.position().y < self.canvas_h && !hit_player && !hit_block {
                kept.push(bomb);
            }
        }
        self.bombs = kept;
        Ok(player_struck)
    }

    /// At most one bomb per exposed column may be outstanding; pick a
    /// random exposed column and drop from just under its front ship.
    fn maybe_launch(&mut self, armada: &Armada, rng: &mut impl Rng) -> ConfigResult<()> {
        let exposed = armada.can_fire();
        if exposed.is_empty() || self.bombs.len() >= exposed.len() {
            return Ok(());
        }
        let origin = exposed[rng.gen_range(0..exposed.len())];
        self.bombs.push(Bomb::new(origin + LAUNCH_OFFSET)?);
        Ok(())
    }

    /// Bomb-vs-player alignment: the bomb must sit strictly inside the
    /// player's width to the right of its left edge, and strictly above
    /// its top edge by less than the player's height.
    fn player_alignment(bomb: Position, player: Position, w: f32, h: f32) -> bool {
        let dx = bomb.x - player.x;
        let dy = player.y - bomb.y;
        dx > 0.0 && dx < w && dy > 0.0 && dy < h
    }

    /// Drop every live bomb, used on session reset.
    pub fn reset(&mut self) {
        self.bombs.clear();
    }

    pub fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache) {
        for bomb in &mut self.bombs {
            bomb.render(surface, images);
        }
    }
}
