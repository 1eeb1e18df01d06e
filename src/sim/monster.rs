//! Monsters and how they react to collisions
//!
//! Every monster moves like any other body; what differs is what it does
//! when it hits something: a wall, one of the player's balls, or the player.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::level::Level;
use super::state::Body;
use super::tick::{Motion, sweep};
use crate::settings::Settings;
use crate::{heading_degrees, normalize_degrees};

/// Monster kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Behaviour {
    /// Turns to follow the rebound off anything it hits
    #[default]
    Plain,
    /// Reverses on any collision
    Shuttler,
    /// Dies when hit by a ball
    Squashy,
    /// Sets off in a random direction when hit by a ball
    Wanderer,
    /// Follows a ball that hits it back towards the player, eating the ball
    Hunter,
}

impl Behaviour {
    pub fn name(&self) -> &'static str {
        match self {
            Behaviour::Plain => "Monster",
            Behaviour::Shuttler => "Shuttler",
            Behaviour::Squashy => "Squashy",
            Behaviour::Wanderer => "Wanderer",
            Behaviour::Hunter => "Hunter",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Monster" => Some(Behaviour::Plain),
            "Shuttler" => Some(Behaviour::Shuttler),
            "Squashy" => Some(Behaviour::Squashy),
            "Wanderer" => Some(Behaviour::Wanderer),
            "Hunter" => Some(Behaviour::Hunter),
            _ => None,
        }
    }

    /// How the player died, "... {name}"
    pub fn harm(&self) -> &'static str {
        match self {
            Behaviour::Squashy => "contaminated by a",
            _ => "monsterated by a",
        }
    }

    pub fn radius(&self, settings: &Settings) -> f64 {
        match self {
            Behaviour::Squashy => settings.squashy_radius,
            _ => settings.monster_radius,
        }
    }
}

/// What a monster ran into
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// A hexagon in the level
    Obstacle,
    /// One of the player's balls
    Ball { pos: DVec2, vel: DVec2 },
    Player,
}

/// Side effects of a collision the caller must apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reaction {
    /// The ball that hit the monster is gone
    pub ball_consumed: bool,
}

/// A monster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub behaviour: Behaviour,
    pub body: Body,
    /// Facing, in degrees anticlockwise from +x
    pub heading: f64,
    /// Dead and waiting to be removed
    pub expired: bool,
    pub harm: String,
}

impl Monster {
    pub fn new(behaviour: Behaviour, pos: DVec2, vel: DVec2, settings: &Settings) -> Self {
        Self {
            behaviour,
            body: Body::new(pos, vel, behaviour.radius(settings)),
            heading: normalize_degrees(heading_degrees(vel)),
            expired: false,
            harm: behaviour.harm().to_string(),
        }
    }

    /// Face and move along `v`
    pub fn turn_to(&mut self, v: DVec2) {
        self.heading = normalize_degrees(heading_degrees(v));
        self.body.vel = v;
    }

    /// React to running into something.
    ///
    /// `at` and `direction` are where the collision left the monster and the
    /// velocity it suggests carrying on with.
    pub fn on_collision<R: Rng>(
        &mut self,
        impact: Impact,
        at: DVec2,
        direction: DVec2,
        rng: &mut R,
        settings: &Settings,
    ) -> Reaction {
        let mut reaction = Reaction::default();

        match (self.behaviour, impact) {
            (Behaviour::Plain, _) => {
                self.body.pos = at;
                self.turn_to(direction);
            }
            (Behaviour::Shuttler, _) => {
                self.heading = normalize_degrees(self.heading + 180.0);
                self.body.vel = -self.body.vel;
                self.body.pos = at;
            }
            (Behaviour::Squashy, Impact::Ball { .. }) => {
                self.expired = true;
                log::debug!("{} squashed at {:?}", self.behaviour.name(), self.body.pos);
            }
            (Behaviour::Wanderer, Impact::Ball { .. }) => {
                self.wander(rng, settings);
                self.body.pos = at;
            }
            (Behaviour::Hunter, Impact::Ball { pos, vel }) => {
                // Back along the ball's track, towards whoever fired it
                self.turn_to(-vel);
                self.harm = "provoked a".to_string();
                self.body.pos = pos;
                reaction.ball_consumed = true;
            }
            (Behaviour::Hunter, Impact::Player) => {
                self.body.vel = DVec2::ZERO;
            }
            (Behaviour::Squashy | Behaviour::Wanderer | Behaviour::Hunter, _) => {
                self.turn_to(direction);
                self.body.pos = at;
            }
        }

        reaction
    }

    /// Pick a random heading and a jittered speed
    fn wander<R: Rng>(&mut self, rng: &mut R, settings: &Settings) {
        let mut speed = self.body.speed();
        if speed < settings.wanderer_min_speed || speed > settings.wanderer_max_speed {
            speed = settings.wanderer_default_speed;
        }
        speed *= gauss(rng, 1.0, settings.wanderer_jitter);

        self.heading = rng.random::<f64>() * 360.0;
        self.body.vel = crate::from_heading(self.heading, speed);
    }

    /// Move for `dt` milliseconds, reacting to any obstacle in the way
    pub fn step<R: Rng>(
        &mut self,
        level: &Level,
        dt: f64,
        settings: &Settings,
        rng: &mut R,
    ) -> Motion {
        if self.expired || dt <= 0.0 {
            return Motion::Free;
        }

        match sweep(&self.body, level, dt, settings.monster_detail, settings.neighbour_ring) {
            Some(blocked) => {
                self.on_collision(Impact::Obstacle, blocked.position, blocked.direction, rng, settings);
                Motion::Blocked(blocked)
            }
            None => {
                self.body.pos += self.body.displacement(dt);
                Motion::Free
            }
        }
    }
}

/// Normally distributed sample (Box-Muller)
fn gauss<R: Rng>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // 1 - [0, 1) keeps ln() away from zero
    let u1 = 1.0 - rng.random::<f64>();
    let u2 = rng.random::<f64>();
    mean + std_dev * (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
