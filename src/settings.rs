//! Simulation tuning
//!
//! Loaded from a JSON file; any missing field takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::collision::Detail;

/// Game tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hex grid distance searched for obstacles around a moving body
    pub neighbour_ring: u32,

    // === Collision detail per entity kind ===
    pub ball_detail: Detail,
    pub monster_detail: Detail,
    pub player_detail: Detail,

    // === Radii ===
    pub player_radius: f64,
    pub ball_radius: f64,
    pub monster_radius: f64,
    pub squashy_radius: f64,

    // === Wanderer ===
    /// Speeds outside [min, max] are reset to the default
    pub wanderer_min_speed: f64,
    pub wanderer_max_speed: f64,
    pub wanderer_default_speed: f64,
    /// Standard deviation of the multiplicative speed jitter
    pub wanderer_jitter: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            neighbour_ring: NEIGHBOUR_RING,

            ball_detail: Detail::Rebound,
            monster_detail: Detail::Rebound,
            player_detail: Detail::Position,

            player_radius: PLAYER_RADIUS,
            ball_radius: BALL_RADIUS,
            monster_radius: MONSTER_RADIUS,
            squashy_radius: SQUASHY_RADIUS,

            wanderer_min_speed: WANDERER_MIN_SPEED,
            wanderer_max_speed: WANDERER_MAX_SPEED,
            wanderer_default_speed: WANDERER_DEFAULT_SPEED,
            wanderer_jitter: WANDERER_JITTER,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, falling back to defaults on bad input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) if settings.is_valid() => settings,
            Ok(_) => {
                log::warn!("Settings out of range, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to parse settings ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file, or defaults if it can't be read
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                log::info!("Loaded settings from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) => {
                log::info!("No settings at {} ({e}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Radii must be positive and the wanderer speed band non-empty
    pub fn is_valid(&self) -> bool {
        let radii = [
            self.player_radius,
            self.ball_radius,
            self.monster_radius,
            self.squashy_radius,
        ];
        radii.iter().all(|r| r.is_finite() && *r > 0.0)
            && self.wanderer_min_speed <= self.wanderer_max_speed
            && self.wanderer_jitter >= 0.0
    }
}
