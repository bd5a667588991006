//! A Space-Invaders variant, split into a renderer-agnostic simulation
//! core (this library) and a terminal frontend (the binary).
//!
//! The core is driven from outside: once per frame the owner calls
//! [`session::Session::update`] and then [`session::Session::render`]
//! against an injected [`surface::Surface`]. There is no internal loop,
//! no threads and no I/O in here; randomness is injected per call so
//! tests can seed it.

pub mod armada;
pub mod assets;
pub mod bombardment;
pub mod error;
pub mod explosion;
pub mod geometry;
pub mod hud;
pub mod input;
pub mod laser;
pub mod outpost;
pub mod player;
pub mod session;
pub mod sprite;
pub mod surface;

/// Canvas width in pixels the simulation is tuned for.
pub const CANVAS_WIDTH: f32 = 1200.0;
/// Canvas height in pixels the simulation is tuned for.
pub const CANVAS_HEIGHT: f32 = 900.0;

/// Image tags every frontend must pre-load before running a session.
pub const REQUIRED_IMAGE_TAGS: [&str; 7] =
    ["alien1", "alien2", "alien3", "bomb", "explosion", "hero", "laser"];
