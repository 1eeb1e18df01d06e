//! Simulation module
//!
//! All collision and movement logic lives here. This module must be pure:
//! - No rendering, audio or platform dependencies
//! - Seeded RNG only
//! - Stable iteration order (levels keep cells in coordinate order)

pub mod collision;
pub mod hex;
pub mod level;
pub mod monster;
pub mod state;
pub mod tick;

pub use collision::{Collision, Detail, Feature, collide, first_collision, reflect_velocity};
pub use hex::{HexCoord, hex_centre, nearest_neighbours};
pub use level::{Cell, HexColour, Level, Metal, Obstacle, WallKind};
pub use monster::{Behaviour, Impact, Monster, Reaction};
pub use state::{Body, RngState};
pub use tick::{Blocked, Motion, advance, sweep};
