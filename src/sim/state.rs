//! Core simulation types shared by moving entities

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Anything that moves: the player, a ball or a monster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// World-space centre
    pub pos: DVec2,
    /// World units per millisecond
    pub vel: DVec2,
    pub radius: f64,
}

impl Body {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "bad body radius {radius}");
        Self { pos, vel, radius }
    }

    /// Full displacement wanted over `dt` milliseconds
    #[inline]
    pub fn displacement(&self, dt: f64) -> DVec2 {
        self.vel * dt
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
