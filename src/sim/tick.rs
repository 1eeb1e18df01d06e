//! Per-tick motion against the level
//!
//! Each tick, a moving body asks the level for obstacles near where it is,
//! tries them nearest first, and stops at the first one it runs into.

use glam::DVec2;

use super::collision::{Collision, Detail, first_collision};
use super::level::{Level, Obstacle};
use super::state::Body;

/// A body stopped by an obstacle this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blocked {
    pub obstacle: Obstacle,
    /// Where the body should end up
    pub position: DVec2,
    /// Velocity (per ms) to carry on with
    pub direction: DVec2,
}

/// Outcome of advancing a body by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// Moved by its full displacement
    Free,
    Blocked(Blocked),
}

/// Find the first obstacle a body would run into over `dt` milliseconds.
///
/// At `BBox` and `Circle` detail only the fact of a collision is known, so
/// the body stays put with its velocity unchanged. `Position` gives the
/// resting point but keeps the velocity; `Rebound` gives both.
pub fn sweep(body: &Body, level: &Level, dt: f64, detail: Detail, ring: u32) -> Option<Blocked> {
    if dt <= 0.0 {
        return None;
    }

    let displacement = body.displacement(dt);
    let obstacles = level.obstacles_near(body.pos, ring);
    let (coord, result) = first_collision(
        obstacles.iter().map(|o| o.coord),
        body.pos,
        body.radius,
        displacement,
        detail,
    )?;

    let (position, direction) = match result {
        Collision::Rebound {
            position, velocity, ..
        } => (position, velocity / dt),
        Collision::Resting { position, .. } => (position, body.vel),
        _ => (body.pos, body.vel),
    };

    Some(Blocked {
        obstacle: Obstacle {
            coord,
            cell: level.cell(coord),
        },
        position,
        direction,
    })
}

/// Advance a body by one tick, bouncing it off the first obstacle it hits
pub fn advance(body: &mut Body, level: &Level, dt: f64, detail: Detail, ring: u32) -> Motion {
    if dt <= 0.0 {
        return Motion::Free;
    }

    match sweep(body, level, dt, detail, ring) {
        Some(blocked) => {
            log::debug!(
                "Body at {:?} blocked by {} at {:?}",
                body.pos,
                blocked.obstacle.cell.code(),
                blocked.obstacle.coord
            );
            body.pos = blocked.position;
            body.vel = blocked.direction;
            Motion::Blocked(blocked)
        }
        None => {
            body.pos += body.displacement(dt);
            Motion::Free
        }
    }
}
