use rand::rngs::StdRng;
use rand::SeedableRng;

use invaders::armada::Armada;
use invaders::bombardment::Bombardment;
use invaders::explosion::Explosion;
use invaders::geometry::Position;
use invaders::hud::Score;
use invaders::input::Actions;
use invaders::laser::Laser;
use invaders::outpost::Outpost;
use invaders::player::Player;
use invaders::{CANVAS_HEIGHT, CANVAS_WIDTH};

struct Battlefield {
    armada: Armada,
    laser: Laser,
    explosion: Explosion,
    score: Score,
    outpost: Outpost,
    player: Player,
}

fn make_battlefield() -> Battlefield {
    Battlefield {
        armada: Armada::new(CANVAS_WIDTH, CANVAS_HEIGHT).unwrap(),
        laser: Laser::new().unwrap(),
        explosion: Explosion::new(CANVAS_WIDTH, CANVAS_HEIGHT).unwrap(),
        score: Score::new(),
        outpost: Outpost::new(CANVAS_HEIGHT).unwrap(),
        player: Player::new(CANVAS_WIDTH, CANVAS_HEIGHT).unwrap(),
    }
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// A cannon position well away from every ship and shield block.
const CANNON: Position = Position::new(600.0, 700.0);

fn laser_tick(b: &mut Battlefield) {
    b.laser.update(
        CANNON,
        &mut b.armada,
        &mut b.explosion,
        &mut b.score,
        &mut b.outpost,
    );
}

// ── Laser vs armada ───────────────────────────────────────────────────────────

#[test]
fn laser_inside_ship_square_destroys_it() {
    let mut b = make_battlefield();
    // First ship sits at (264, 64); offset (1, 1) lands inside its
    // 32-px square.
    b.laser.move_to(Position::new(265.0, 65.0));
    b.laser.fire();
    laser_tick(&mut b);

    assert_eq!(b.score.value(), 30); // row 1 is the 30-point tier
    assert!(!b.laser.is_in_flight());
    assert!(!b.armada.ships()[0].is_visible());
    assert_eq!(b.armada.ship_count(), 54);
    assert!(b.explosion.is_visible());

    // The stopped laser re-parks at the cannon, hidden.
    assert_eq!(b.laser.position(), CANNON);
    assert!(!b.laser.is_visible());
}

#[test]
fn laser_on_the_exact_corner_misses() {
    let mut b = make_battlefield();
    // The alignment window is strict: a zero delta is not a hit.
    b.laser.move_to(Position::new(264.0, 64.0));
    b.laser.fire();
    laser_tick(&mut b);

    assert_eq!(b.score.value(), 0);
    assert!(b.laser.is_in_flight());
    assert_eq!(b.armada.ship_count(), 55);
}

#[test]
fn laser_passes_through_destroyed_ships() {
    let mut b = make_battlefield();
    b.armada.hide_ship(0);
    b.laser.move_to(Position::new(265.0, 65.0));
    b.laser.fire();
    laser_tick(&mut b);

    assert_eq!(b.score.value(), 0);
    assert!(b.laser.is_in_flight());
    // Still flying: it moved one 20-px step upward.
    assert_eq!(b.laser.position(), Position::new(265.0, 45.0));
}

#[test]
fn laser_leaving_the_top_parks_at_the_cannon() {
    let mut b = make_battlefield();
    b.laser.move_to(Position::new(500.0, -10.0));
    b.laser.fire();
    laser_tick(&mut b);

    assert!(!b.laser.is_in_flight());
    assert!(!b.laser.is_visible());
    assert_eq!(b.laser.position(), CANNON);
}

// ── Laser vs shields ──────────────────────────────────────────────────────────

#[test]
fn laser_chews_a_splash_crater_into_a_base() {
    let mut b = make_battlefield();
    // First base's top-left block is at (250, 600). The block check runs
    // after the move, so start 20 px lower than the strike point.
    b.laser.move_to(Position::new(252.0, 590.0));
    b.laser.fire();
    laser_tick(&mut b);

    let rows = b.outpost.bases()[0].block_rows();
    assert_eq!(rows[0].len(), 16);
    assert_eq!(rows[1].len(), 16);
    assert_eq!(rows[2].len(), 16);
    assert_eq!(rows[3].len(), 20);

    // Shield hits do not stop the laser.
    assert!(b.laser.is_in_flight());
}

// ── Outpost ───────────────────────────────────────────────────────────────────

#[test]
fn splash_removal_hits_three_rows_of_four() {
    let mut outpost = Outpost::new(CANVAS_HEIGHT).unwrap();
    outpost.remove_block(0, 0, 0);
    let rows = outpost.bases()[0].block_rows();
    assert_eq!(rows[0].len(), 16);
    assert_eq!(rows[1].len(), 16);
    assert_eq!(rows[2].len(), 16);
    assert_eq!(rows[3].len(), 20);

    // Untouched bases keep their full grids.
    assert!(outpost.bases()[1].block_rows().iter().all(|r| r.len() == 20));
}

#[test]
fn splash_removal_near_the_bottom_skips_missing_rows() {
    let mut outpost = Outpost::new(CANVAS_HEIGHT).unwrap();
    // Row 9 is the last of 10: rows 10 and 11 do not exist.
    outpost.remove_block(0, 9, 0);
    let rows = outpost.bases()[0].block_rows();
    assert_eq!(rows[8].len(), 20);
    assert_eq!(rows[9].len(), 16);
}

#[test]
fn splash_removal_near_the_right_edge_truncates() {
    let mut outpost = Outpost::new(CANVAS_HEIGHT).unwrap();
    // Column 18 of 20: only two blocks remain to remove per row.
    outpost.remove_block(0, 0, 18);
    let rows = outpost.bases()[0].block_rows();
    assert_eq!(rows[0].len(), 18);
    assert_eq!(rows[1].len(), 18);
    assert_eq!(rows[2].len(), 18);
}

#[test]
fn out_of_range_removal_is_a_no_op() {
    let mut outpost = Outpost::new(CANVAS_HEIGHT).unwrap();
    outpost.remove_block(0, 10, 0); // past the last row
    outpost.remove_block(0, 0, 25); // past the last column
    outpost.remove_block(5, 0, 0); // no such base
    assert!(outpost.bases()
        .iter()
        .all(|base| base.block_rows().iter().all(|r| r.len() == 20)));
}

#[test]
fn empty_block_grid_is_rejected() {
    use invaders::error::ConfigError;
    use invaders::outpost::{Base, BaseConfig};
    use invaders::surface::Color;

    let result = Base::new(BaseConfig {
        top_left: Position::new(0.0, 0.0),
        width: 0,
        height: 10,
        block_size: 4.0,
        color: Color::WHITE,
    });
    assert_eq!(result.err(), Some(ConfigError::EmptyBlockGrid { width: 0, height: 10 }));
}

#[test]
fn reset_regenerates_every_grid() {
    let mut outpost = Outpost::new(CANVAS_HEIGHT).unwrap();
    outpost.remove_block(0, 0, 0);
    outpost.remove_block(2, 4, 8);
    outpost.reset();
    for base in outpost.bases() {
        assert_eq!(base.block_rows().len(), 10);
        assert!(base.block_rows().iter().all(|r| r.len() == 20));
    }
}

// ── Bombardment ───────────────────────────────────────────────────────────────

#[test]
fn bombs_launch_on_the_cadence() {
    let mut b = make_battlefield();
    let mut bombardment =
        Bombardment::new(CANVAS_HEIGHT, b.player.width(), b.player.height());
    let mut rng = seeded_rng();

    for _ in 0..39 {
        bombardment
            .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
            .unwrap();
        assert_eq!(bombardment.bomb_count(), 0);
    }
    bombardment
        .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
        .unwrap();
    assert_eq!(bombardment.bomb_count(), 1);
}

#[test]
fn bomb_count_never_exceeds_exposed_columns() {
    let mut b = make_battlefield();
    // One survivor: one exposed column, so at most one live bomb.
    for index in 0..55 {
        if index != 49 {
            b.armada.hide_ship(index);
        }
    }
    let mut bombardment =
        Bombardment::new(CANVAS_HEIGHT, b.player.width(), b.player.height());
    let mut rng = seeded_rng();

    for _ in 0..600 {
        bombardment
            .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
            .unwrap();
        assert!(bombardment.bomb_count() <= 1);
    }
}

#[test]
fn bomb_below_the_canvas_is_discarded() {
    let mut b = make_battlefield();
    // Row 5 / column 7: its bombs fall at x = 662, clear of every base.
    for index in 0..55 {
        if index != 50 {
            b.armada.hide_ship(index);
        }
    }
    let mut bombardment =
        Bombardment::new(CANVAS_HEIGHT, b.player.width(), b.player.height());
    let mut rng = seeded_rng();

    // Let one bomb launch, then remove its column so nothing relaunches.
    for _ in 0..40 {
        bombardment
            .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
            .unwrap();
    }
    assert_eq!(bombardment.bomb_count(), 1);
    let y_before = bombardment.bomb_positions()[0].y;
    b.armada.hide_ship(50);

    bombardment
        .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
        .unwrap();
    assert_eq!(bombardment.bomb_positions()[0].y, y_before + 1.5);

    // Falling at 1.5 px per tick from y = 352, the bomb leaves the
    // 900-px canvas well inside 400 ticks.
    for _ in 0..400 {
        bombardment
            .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
            .unwrap();
    }
    assert_eq!(bombardment.bomb_count(), 0);
}

#[test]
fn bomb_reaching_the_player_reports_the_hit() {
    let mut b = make_battlefield();
    // Leave only row 5 / column 7 (x = 648): its bomb falls at x = 662,
    // clear of every shield but inside the player's 64-px width once
    // the player steps a little to the right.
    for index in 0..55 {
        if index != 50 {
            b.armada.hide_ship(index);
        }
    }
    for _ in 0..5 {
        b.player.update(Actions { right: true, ..Actions::idle() });
    }
    assert_eq!(b.player.position().x, 604.0);

    let mut bombardment =
        Bombardment::new(CANVAS_HEIGHT, b.player.width(), b.player.height());
    let mut rng = seeded_rng();

    let mut struck = false;
    for _ in 0..500 {
        if bombardment
            .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
            .unwrap()
        {
            struck = true;
            break;
        }
    }
    assert!(struck);
    // The striking bomb is consumed.
    assert_eq!(bombardment.bomb_count(), 0);
}

#[test]
fn bomb_grinds_through_shield_blocks() {
    let mut b = make_battlefield();
    // Row 5 / column 1 (x = 264) drops its bomb at x = 278, inside the
    // first base's 250..326 span.
    for index in 0..55 {
        if index != 44 {
            b.armada.hide_ship(index);
        }
    }
    let mut bombardment =
        Bombardment::new(CANVAS_HEIGHT, b.player.width(), b.player.height());
    let mut rng = seeded_rng();

    let intact: usize = b.outpost.bases()[0]
        .block_rows()
        .iter()
        .map(Vec::len)
        .sum();
    assert_eq!(intact, 200);

    // Launch at tick 40 from y = 352; the base top is at y = 600, so a
    // few hundred ticks cover the approach and the strike.
    let mut struck_tick = None;
    for tick in 0..400 {
        bombardment
            .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
            .unwrap();
        let remaining: usize = b.outpost.bases()[0]
            .block_rows()
            .iter()
            .map(Vec::len)
            .sum();
        if remaining < 200 {
            struck_tick = Some(tick);
            break;
        }
    }
    assert!(struck_tick.is_some());

    // Splash footprint: 4 blocks from each of three rows.
    let remaining: usize = b.outpost.bases()[0]
        .block_rows()
        .iter()
        .map(Vec::len)
        .sum();
    assert_eq!(remaining, 188);
    // The striking bomb is consumed.
    assert_eq!(bombardment.bomb_count(), 0);
}

#[test]
fn reset_discards_every_live_bomb() {
    let mut b = make_battlefield();
    let mut bombardment =
        Bombardment::new(CANVAS_HEIGHT, b.player.width(), b.player.height());
    let mut rng = seeded_rng();

    for _ in 0..40 {
        bombardment
            .update(&b.armada, &b.player, &mut b.outpost, &mut rng)
            .unwrap();
    }
    assert!(bombardment.bomb_count() > 0);
    bombardment.reset();
    assert_eq!(bombardment.bomb_count(), 0);
}
