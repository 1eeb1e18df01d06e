//! Hexbounce entry point
//!
//! Native demo: bounces a ball and a couple of monsters around a small
//! walled maze and logs what they hit. Run with `RUST_LOG=debug` to see
//! every collision, `RUST_LOG=trace` for the per-side collision maths.

use glam::DVec2;

use hexbounce::Settings;
use hexbounce::consts::SIM_DT_MS;
use hexbounce::sim::{
    Behaviour, Body, Cell, HexCoord, Level, Monster, Motion, RngState, WallKind, advance,
    hex_centre,
};

const DEMO_TICKS: u32 = 600;
const DEMO_SEED: u64 = 12345;

/// A ring of wall around a field of breakable hexagons
fn demo_level() -> Level {
    let mut level = Level::new("demo", HexCoord::new(2, 2), HexCoord::new(8, 8));

    for col in 0..=10 {
        for row in 0..=10 {
            let coord = HexCoord::new(col, row);
            if col == 0 || col == 10 || row == 0 || row == 10 {
                level.set(coord, Cell::Wall(WallKind::Solid));
            } else if (col + row) % 4 == 0 && level.cell(coord) == Cell::Floor {
                level.set_code(coord, if col % 3 == 0 { "Au" } else { "Hf80" });
            }
        }
    }
    level
}

fn main() {
    env_logger::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    log::info!("Hexbounce (native) starting...");

    let mut level = demo_level();
    let mut rng = RngState::new(DEMO_SEED).to_rng();

    let start = hex_centre(level.start);
    let mut ball = Body::new(start, DVec2::new(0.006, 0.004), settings.ball_radius);
    let mut monsters = vec![
        Monster::new(
            Behaviour::Shuttler,
            hex_centre(HexCoord::new(5, 5)),
            DVec2::new(0.003, 0.0),
            &settings,
        ),
        Monster::new(
            Behaviour::Wanderer,
            hex_centre(HexCoord::new(7, 3)),
            DVec2::new(0.0, 0.004),
            &settings,
        ),
    ];

    let mut score = 0;
    let mut bounces = 0;

    for _ in 0..DEMO_TICKS {
        if let Motion::Blocked(blocked) = advance(
            &mut ball,
            &level,
            SIM_DT_MS,
            settings.ball_detail,
            settings.neighbour_ring,
        ) {
            bounces += 1;
            if let Some(points) = level.destroy(blocked.obstacle.coord) {
                score += points;
            }
        }

        for monster in &mut monsters {
            monster.step(&level, SIM_DT_MS, &settings, &mut rng);
        }
    }

    log::info!("Ball ended at {:?} after {bounces} bounces", ball.pos);
    for monster in &monsters {
        log::info!("{} ended at {:?}", monster.behaviour.name(), monster.body.pos);
    }
    println!("{DEMO_TICKS} ticks: {bounces} bounces, {score} points");
}
