//! One game session: owns every entity and the started / game-over /
//! player-dead state machine, and exposes the two synchronous per-frame
//! operations the frontend drives: [`Session::update`] and
//! [`Session::render`].

use rand::Rng;

use crate::armada::{Armada, ArmadaEvent};
use crate::assets::ImageCache;
use crate::bombardment::Bombardment;
use crate::error::ConfigResult;
use crate::explosion::Explosion;
use crate::hud::{Dialog, PlayerLives, Score};
use crate::input::Actions;
use crate::laser::Laser;
use crate::outpost::Outpost;
use crate::player::Player;
use crate::surface::{Color, Surface};

/// Ticks the field stays frozen after the player is hit, before the
/// ship respawns.
const MAX_DEAD_TICKS: u32 = 100;
const INITIAL_LIVES: u32 = 3;

const BACKGROUND: Color = Color::BLACK;
/// Dark wash drawn under the idle-screen dialogs.
const OVERLAY: Color = Color::rgb(50, 50, 50);

const START_TEXT: &str = "Press [SPACE] to start a game.";
const GAME_OVER_TEXT: &str = "Game Over!";
const TRY_AGAIN_TEXT: &str = "Press [SPACE] to try again.";

pub struct Session {
    canvas_w: f32,
    canvas_h: f32,

    started: bool,
    over: bool,
    player_dead: bool,
    dead_ticks: u32,
    lives: u32,
    input: Actions,

    player: Player,
    armada: Armada,
    laser: Laser,
    explosion: Explosion,
    outpost: Outpost,
    bombardment: Bombardment,
    score: Score,
    player_lives: PlayerLives,
    start_dialog: Dialog,
    game_over_dialog: Dialog,
    try_again_dialog: Dialog,
}

impl Session {
    pub fn new(canvas_w: f32, canvas_h: f32) -> ConfigResult<Self> {
        let player = Player::new(canvas_w, canvas_h)?;
        let bombardment = Bombardment::new(canvas_h, player.width(), player.height());
        Ok(Self {
            canvas_w,
            canvas_h,
            started: false,
            over: false,
            player_dead: false,
            dead_ticks: 0,
            lives: INITIAL_LIVES,
            input: Actions::idle(),
            player,
            armada: Armada::new(canvas_w, canvas_h)?,
            laser: Laser::new()?,
            explosion: Explosion::new(canvas_w, canvas_h)?,
            outpost: Outpost::new(canvas_h)?,
            bombardment,
            score: Score::new(),
            player_lives: PlayerLives::new(canvas_h)?,
            start_dialog: Dialog::new(24.0, vec![START_TEXT]),
            game_over_dialog: Dialog::new(24.0, vec![GAME_OVER_TEXT]),
            try_again_dialog: Dialog::with_top_margin(14.0, vec![TRY_AGAIN_TEXT], 24.0),
        })
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Store the latest action snapshot. A rising FIRE edge launches the
    /// laser mid-game, or starts a fresh game from the idle screen.
    pub fn handle_input(&mut self, actions: Actions) {
        if actions.fire && !self.input.fire {
            if self.started && !self.player_dead {
                self.laser.fire();
            } else if !self.started {
                self.started = true;
                self.score.reset();
            }
        }
        self.input = actions;
    }

    // ── Simulation ────────────────────────────────────────────────────────────

    /// One simulation tick. Does nothing until a game has been started.
    pub fn update(&mut self, rng: &mut impl Rng) -> ConfigResult<()> {
        if !self.started {
            return Ok(());
        }

        if self.player_dead {
            if self.lives == 0 {
                self.end_game();
                return Ok(());
            }
            self.dead_pause();
            return Ok(());
        }

        let cannon = self.player.cannon_position();
        self.laser.update(
            cannon,
            &mut self.armada,
            &mut self.explosion,
            &mut self.score,
            &mut self.outpost,
        );
        self.player.update(self.input);

        match self.armada.update() {
            Some(ArmadaEvent::AllDestroyed) => self.outpost.reset(),
            Some(ArmadaEvent::ReachedPlayer) => self.end_game(),
            None => {}
        }

        let player_struck = self.bombardment.update(
            &self.armada,
            &self.player,
            &mut self.outpost,
            rng,
        )?;
        if player_struck {
            self.kill_player();
        }
        Ok(())
    }

    fn kill_player(&mut self) {
        self.lives -= 1;
        self.player_dead = true;
        self.player.hide();
        self.explosion.trigger_at(self.player.position());
    }

    /// Count down the post-death freeze; respawn once it elapses.
    fn dead_pause(&mut self) {
        self.dead_ticks += 1;
        if self.dead_ticks > MAX_DEAD_TICKS {
            self.dead_ticks = 0;
            self.player_dead = false;
            self.player.show();
        }
    }

    fn end_game(&mut self) {
        self.started = false;
        self.over = true;
        self.player_dead = false;
        self.dead_ticks = 0;
        self.lives = INITIAL_LIVES;
        self.armada.reset();
        self.bombardment.reset();
        self.outpost.reset();
        self.player.show();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Draw the whole scene. Runs every frame, started or not, so the
    /// idle screen still animates underneath its overlay.
    pub fn render(&mut self, surface: &mut dyn Surface, images: &ImageCache) {
        surface.clear(0.0, 0.0, self.canvas_w, self.canvas_h);
        surface.fill_rect(0.0, 0.0, self.canvas_w, self.canvas_h, BACKGROUND);

        self.explosion.render(surface, images);
        self.laser.render(surface, images);
        self.player.render(surface, images);
        self.armada.render(surface, images);
        self.bombardment.render(surface, images);
        self.player_lives.render(surface, images, self.lives);
        self.outpost.render(surface);

        if !self.started {
            surface.fill_rect(0.0, 0.0, self.canvas_w, self.canvas_h, OVERLAY);
            if self.over {
                self.game_over_dialog.render(surface, self.canvas_w, self.canvas_h);
                self.try_again_dialog.render(surface, self.canvas_w, self.canvas_h);
            } else {
                self.start_dialog.render(surface, self.canvas_w, self.canvas_h);
            }
        }

        self.score.render(surface);
    }

    // ── Inspection (used by the frontend and tests) ───────────────────────────

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn is_player_dead(&self) -> bool {
        self.player_dead
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn score(&self) -> u32 {
        self.score.value()
    }

    pub fn armada(&self) -> &Armada {
        &self.armada
    }

    pub fn armada_mut(&mut self) -> &mut Armada {
        &mut self.armada
    }

    pub fn outpost(&self) -> &Outpost {
        &self.outpost
    }

    pub fn outpost_mut(&mut self) -> &mut Outpost {
        &mut self.outpost
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn laser(&self) -> &Laser {
        &self.laser
    }

    pub fn bombardment(&self) -> &Bombardment {
        &self.bombardment
    }
}
