//! Hexbounce - collision and kinematics core for a hexagon maze game
//!
//! Core modules:
//! - `sim`: Pure simulation (hex grid geometry, circle/hexagon collisions,
//!   level obstacle map, per-tick motion, monster reactions)
//! - `settings`: Data-driven tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Simulation step in milliseconds (velocities are world units per ms)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;

    /// Hex grid distance searched around a moving body
    pub const NEIGHBOUR_RING: u32 = 2;

    /// Entity radii, in hexagon circumradius units
    pub const PLAYER_RADIUS: f64 = 0.4;
    pub const BALL_RADIUS: f64 = 0.2;
    pub const MONSTER_RADIUS: f64 = 0.49;
    pub const SQUASHY_RADIUS: f64 = 0.7;

    /// Wanderer speed is reset to the default when it drifts outside this band
    pub const WANDERER_MIN_SPEED: f64 = 0.001;
    pub const WANDERER_MAX_SPEED: f64 = 0.04;
    pub const WANDERER_DEFAULT_SPEED: f64 = 0.01;
    /// Standard deviation of the wanderer's speed jitter (multiplicative)
    pub const WANDERER_JITTER: f64 = 0.05;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Heading of a vector in degrees (counter-clockwise from +x)
#[inline]
pub fn heading_degrees(v: DVec2) -> f64 {
    v.y.atan2(v.x).to_degrees()
}

/// Vector of the given length pointing along a heading in degrees
#[inline]
pub fn from_heading(degrees: f64, length: f64) -> DVec2 {
    let a = degrees.to_radians();
    DVec2::new(a.cos(), a.sin()) * length
}
