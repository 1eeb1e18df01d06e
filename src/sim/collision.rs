//! Collision detection and response between circles and hexagons
//!
//! The tricky part of the game: every moving thing (player, balls, monsters)
//! is a circle, every obstacle is a hexagon of circumradius 1. Projectiles are
//! assumed slow, so a circle that hits a hexagon ends up overlapping it rather
//! than passing straight through.
//!
//! Tests escalate in cost and stop at the first failure:
//!
//! 0. `BBox`: does the moved circle's bounding box overlap the hexagon's?
//! 1. `Circle`: does the moved circle overlap the hexagon's bounding circle?
//! 2. `Position`: which side (or corner) does it hit, and where does its
//!    centre come to rest against it?
//! 3. `Rebound`: as 2, plus the elastic reflection of the velocity and the
//!    leftover travel along it.
//!
//! All maths happens with the hexagon centre moved to the origin so the
//! shared corner/side/normal tables in [`super::hex`] apply directly.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::hex::{CORNERS, HexCoord, NORMALS, SIDES, SIN_60, hex_centre};

/// Anything with a smaller magnitude counts as zero
pub const ZERO_TOLERANCE: f64 = 1e-6;

/// Level of collision detail requested
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Detail {
    /// Bounding boxes overlap
    #[default]
    BBox,
    /// Circle overlaps the hexagon's bounding circle
    Circle,
    /// Resting position against the hexagon
    Position,
    /// Resting position plus elastic bounce
    Rebound,
}

impl Detail {
    pub const ALL: [Detail; 4] = [Detail::BBox, Detail::Circle, Detail::Position, Detail::Rebound];
}

/// Which part of the hexagon was struck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feature {
    /// Side `i`, running from `CORNERS[i]` to `CORNERS[i + 1]`
    Side(usize),
    /// Corner `i`
    Corner(usize),
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collision {
    /// No collision
    Miss,
    /// The bounding test for `BBox` or `Circle` detail passed
    Bounds,
    /// Where the circle's centre stops against the hexagon (world space)
    Resting { position: DVec2, feature: Feature },
    /// Resting position moved on by the leftover bounce, and the reflected
    /// velocity (same magnitude as the incoming one)
    Rebound {
        position: DVec2,
        velocity: DVec2,
        feature: Feature,
    },
}

impl Collision {
    #[inline]
    pub fn is_hit(&self) -> bool {
        !matches!(self, Collision::Miss)
    }

    /// Final circle centre, for `Position` and `Rebound` results
    pub fn position(&self) -> Option<DVec2> {
        match *self {
            Collision::Resting { position, .. } | Collision::Rebound { position, .. } => {
                Some(position)
            }
            _ => None,
        }
    }

    /// Reflected velocity, for `Rebound` results
    pub fn velocity(&self) -> Option<DVec2> {
        match *self {
            Collision::Rebound { velocity, .. } => Some(velocity),
            _ => None,
        }
    }

    pub fn feature(&self) -> Option<Feature> {
        match *self {
            Collision::Resting { feature, .. } | Collision::Rebound { feature, .. } => {
                Some(feature)
            }
            _ => None,
        }
    }
}

/// Where a moving circle meets a hexagon, in hexagon-local space
#[derive(Debug, Clone, Copy)]
struct Contact {
    /// Point of contact on the hexagon
    point: DVec2,
    /// Unit normal of the struck surface (pointing out of the hexagon)
    normal: DVec2,
    /// Circle centre when touching
    resting: DVec2,
    /// Fraction of the velocity used before contact
    mu: f64,
    feature: Feature,
}

#[inline]
fn zeroish(x: f64) -> bool {
    x.abs() < ZERO_TOLERANCE
}

/// Solve `p0 + mu * v0 = p1 + nu * v1` for `(mu, nu)`.
///
/// Returns `None` when the lines are parallel (or either vector is zero).
fn segment_cross(p0: DVec2, v0: DVec2, p1: DVec2, v1: DVec2) -> Option<(f64, f64)> {
    let denominator = v0.perp_dot(v1);
    if zeroish(denominator) {
        return None;
    }

    let delta = p1 - p0;
    let mu = delta.perp_dot(v1) / denominator;
    let nu = delta.perp_dot(v0) / denominator;

    (mu.is_finite() && nu.is_finite()).then_some((mu, nu))
}

/// Test 0: moved circle's bounding box against the hexagon's.
///
/// Strict on all sides, so boxes that only touch do not count.
#[inline]
fn bbox_overlaps(c1: DVec2, radius: f64) -> bool {
    let (left, right) = (c1.x - radius, c1.x + radius);
    let (bottom, top) = (c1.y - radius, c1.y + radius);
    left < 1.0 && right > -1.0 && bottom < SIN_60 && top > -SIN_60
}

/// Test 1: moved circle against the hexagon's circumcircle
#[inline]
fn circle_overlaps(c1: DVec2, radius: f64) -> bool {
    c1.length() < 1.0 + radius
}

/// Test 2: first side (in index order) or corner the circle runs into.
///
/// `c0` is the circle centre before moving, relative to the hexagon centre.
fn first_contact(c0: DVec2, radius: f64, velocity: DVec2) -> Option<Contact> {
    let c1 = c0 + velocity;

    for i in 0..6 {
        let normal = NORMALS[i];
        let dot = normal.dot(velocity);
        if dot >= 0.0 {
            // No colliding from inside the hexagon
            log::trace!("side {i}: ignored (dot {dot:.4})");
            continue;
        }
        if normal.dot(c0 - CORNERS[i]) < -radius {
            // Whole circle already behind this side's line
            log::trace!("side {i}: circle already past it");
            continue;
        }

        // dot < 0, so the projection of v onto the normal points straight at the side
        let towards_side = (normal * dot).normalize();
        let q0 = c0 + towards_side * radius;

        let Some((mu, nu)) = segment_cross(q0, velocity, CORNERS[i], SIDES[i]) else {
            log::trace!("side {i}: parallel to velocity");
            continue;
        };
        log::trace!("side {i}: mu {mu:.4} along velocity, nu {nu:.4} along side");

        if mu > 1.0 {
            // Nearest point won't reach the side this tick
            continue;
        }

        if !(0.0..=1.0).contains(&nu) {
            // Misses the side, but could still clip its start corner
            let corner = CORNERS[i];
            if c1.distance(corner) < radius {
                log::trace!("side {i}: hits corner {i}");
                // Corners sit on the unit circle, so this is already normalized
                let normal = corner;
                return Some(Contact {
                    point: corner,
                    normal,
                    resting: corner + normal * radius,
                    mu,
                    feature: Feature::Corner(i),
                });
            }
            continue;
        }

        let point = q0 + velocity * mu;
        log::trace!("side {i}: hits at {point:?}");
        return Some(Contact {
            point,
            normal,
            resting: point + normal * radius,
            mu,
            feature: Feature::Side(i),
        });
    }

    None
}

/// Reflect `velocity` about the surface through `point` with unit `normal`.
///
/// Drop from the contact point by the velocity's normal component to get a
/// midpoint, then mirror the incoming vector through it. The result has the
/// same length as `velocity`.
#[inline]
fn rebound_vector(point: DVec2, normal: DVec2, velocity: DVec2) -> DVec2 {
    let mid = point - velocity.project_onto_normalized(normal);
    mid * 2.0 - point * 2.0 + velocity
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n, with `normal` of unit length
#[inline]
pub fn reflect_velocity(velocity: DVec2, normal: DVec2) -> DVec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check collision between a moving circle and the hexagon at `coord`
///
/// `centre` and `radius` describe the circle before it moves; `velocity` is
/// the whole displacement it wants to make this tick. Returns the cheapest
/// result that satisfies `detail`, or [`Collision::Miss`] as soon as any
/// test along the way fails.
///
/// `radius` must be positive and all inputs finite.
pub fn collide(
    coord: HexCoord,
    centre: DVec2,
    radius: f64,
    velocity: DVec2,
    detail: Detail,
) -> Collision {
    debug_assert!(radius > 0.0 && radius.is_finite(), "bad circle radius {radius}");
    debug_assert!(centre.is_finite() && velocity.is_finite(), "non-finite circle state");

    let hex = hex_centre(coord);
    let c0 = centre - hex;
    let c1 = c0 + velocity;

    if !bbox_overlaps(c1, radius) {
        return Collision::Miss;
    }
    if detail == Detail::BBox {
        return Collision::Bounds;
    }

    if !circle_overlaps(c1, radius) {
        return Collision::Miss;
    }
    if detail == Detail::Circle {
        return Collision::Bounds;
    }

    let Some(contact) = first_contact(c0, radius, velocity) else {
        return Collision::Miss;
    };
    if detail == Detail::Position {
        return Collision::Resting {
            position: contact.resting + hex,
            feature: contact.feature,
        };
    }

    let reflected = rebound_vector(contact.point, contact.normal, velocity);
    // Only the unused share of this tick's travel carries on after the bounce
    let leftover = (1.0 - contact.mu).clamp(0.0, 1.0);
    Collision::Rebound {
        position: contact.resting + reflected * leftover + hex,
        velocity: reflected,
        feature: contact.feature,
    }
}

/// First hexagon in `candidates` that the circle collides with, in order
pub fn first_collision<I>(
    candidates: I,
    centre: DVec2,
    radius: f64,
    velocity: DVec2,
    detail: Detail,
) -> Option<(HexCoord, Collision)>
where
    I: IntoIterator<Item = HexCoord>,
{
    candidates.into_iter().find_map(|coord| {
        let result = collide(coord, centre, radius, velocity, detail);
        result.is_hit().then_some((coord, result))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn approx(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_segment_cross() {
        // x-axis against the vertical line x = 2
        let (mu, nu) = segment_cross(
            DVec2::ZERO,
            DVec2::new(4.0, 0.0),
            DVec2::new(2.0, -1.0),
            DVec2::new(0.0, 2.0),
        )
        .unwrap();
        assert!((mu - 0.5).abs() < EPS);
        assert!((nu - 0.5).abs() < EPS);
    }

    #[test]
    fn test_segment_cross_parallel() {
        let result = segment_cross(
            DVec2::ZERO,
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
            DVec2::new(2.0, 2.0),
        );
        assert!(result.is_none());

        // Zero velocity is parallel to everything
        assert!(segment_cross(DVec2::ZERO, DVec2::ZERO, CORNERS[0], SIDES[0]).is_none());
    }

    #[test]
    fn test_bbox_miss() {
        let result = collide(
            HexCoord::new(0, 0),
            DVec2::new(5.0, 5.0),
            0.3,
            DVec2::ZERO,
            Detail::BBox,
        );
        assert_eq!(result, Collision::Miss);
    }

    #[test]
    fn test_bbox_touching_is_not_overlap() {
        // Left edge of the circle's box lands exactly on x = 1
        let result = collide(
            HexCoord::new(0, 0),
            DVec2::new(1.5, 0.0),
            0.5,
            DVec2::ZERO,
            Detail::BBox,
        );
        assert_eq!(result, Collision::Miss);
    }

    #[test]
    fn test_bbox_passes_where_circle_fails() {
        // Near the box corner: inside the bounding box, outside the circumcircle
        let centre = DVec2::new(1.1, 0.95);
        let coord = HexCoord::new(0, 0);
        assert_eq!(collide(coord, centre, 0.2, DVec2::ZERO, Detail::BBox), Collision::Bounds);
        assert_eq!(collide(coord, centre, 0.2, DVec2::ZERO, Detail::Circle), Collision::Miss);
    }

    #[test]
    fn test_stationary_circle_above_hexagon() {
        let result = collide(
            HexCoord::new(0, 0),
            DVec2::new(0.0, 1.5),
            0.3,
            DVec2::ZERO,
            Detail::Position,
        );
        assert_eq!(result, Collision::Miss);
    }

    #[test]
    fn test_stationary_overlap_never_rests() {
        // Overlapping the hexagon but not moving: bounds pass, no side is approached
        let coord = HexCoord::new(0, 0);
        let centre = DVec2::new(0.0, 0.5);
        assert!(collide(coord, centre, 0.3, DVec2::ZERO, Detail::Circle).is_hit());
        assert_eq!(collide(coord, centre, 0.3, DVec2::ZERO, Detail::Position), Collision::Miss);
        assert_eq!(collide(coord, centre, 0.3, DVec2::ZERO, Detail::Rebound), Collision::Miss);
    }

    #[test]
    fn test_direct_approach_from_the_right() {
        let result = collide(
            HexCoord::new(0, 0),
            DVec2::new(3.0, 0.0),
            0.3,
            DVec2::new(-2.0, 0.0),
            Detail::Position,
        );
        let Collision::Resting { position, feature } = result else {
            panic!("expected a resting position, got {result:?}");
        };
        assert!((position.x - 1.3).abs() < EPS);
        assert!(position.y.abs() < EPS);
        // Straight at the (1, 0) corner
        assert_eq!(feature, Feature::Corner(0));
    }

    #[test]
    fn test_direct_approach_rebound() {
        let result = collide(
            HexCoord::new(0, 0),
            DVec2::new(3.0, 0.0),
            0.3,
            DVec2::new(-2.0, 0.0),
            Detail::Rebound,
        );
        let velocity = result.velocity().unwrap();
        assert!(approx(velocity, DVec2::new(2.0, 0.0)));
        // Bounced back out to the right of the resting point
        let position = result.position().unwrap();
        assert!(position.x > 1.3);
        assert!(position.y.abs() < EPS);
    }

    #[test]
    fn test_side_hit_from_above() {
        let coord = HexCoord::new(0, 0);
        let centre = DVec2::new(0.0, 2.0);
        let velocity = DVec2::new(0.0, -1.5);

        let result = collide(coord, centre, 0.3, velocity, Detail::Position);
        assert_eq!(result.feature(), Some(Feature::Side(1)));
        assert!(approx(result.position().unwrap(), DVec2::new(0.0, SIN_60 + 0.3)));

        // Circle's lowest point travels from y = 1.7 down to the top edge
        let mu = (1.7 - SIN_60) / 1.5;
        let result = collide(coord, centre, 0.3, velocity, Detail::Rebound);
        assert!(approx(result.velocity().unwrap(), DVec2::new(0.0, 1.5)));
        let expected = DVec2::new(0.0, SIN_60 + 0.3 + 1.5 * (1.0 - mu));
        assert!(approx(result.position().unwrap(), expected));
    }

    #[test]
    fn test_oblique_side_hit_keeps_tangential_speed() {
        let result = collide(
            HexCoord::new(0, 0),
            DVec2::new(-0.3, 2.0),
            0.3,
            DVec2::new(0.6, -1.5),
            Detail::Rebound,
        );
        assert_eq!(result.feature(), Some(Feature::Side(1)));
        assert!(approx(result.velocity().unwrap(), DVec2::new(0.6, 1.5)));
    }

    #[test]
    fn test_hexagon_away_from_origin() {
        let coord = HexCoord::new(3, -2);
        let h = hex_centre(coord);
        let result = collide(
            coord,
            h + DVec2::new(0.0, 2.0),
            0.3,
            DVec2::new(0.0, -1.5),
            Detail::Position,
        );
        assert!(approx(result.position().unwrap(), h + DVec2::new(0.0, SIN_60 + 0.3)));
    }

    #[test]
    fn test_corner_fallback() {
        // Head straight down the diagonal at corner 1: the approach point
        // lands just off the end of both neighbouring sides
        let corner = CORNERS[1];
        let result = collide(
            HexCoord::new(0, 0),
            corner * 3.0,
            0.3,
            corner * -2.0,
            Detail::Rebound,
        );
        assert_eq!(result.feature(), Some(Feature::Corner(1)));
        assert!(approx(result.velocity().unwrap(), corner * 2.0));

        let resting = collide(
            HexCoord::new(0, 0),
            corner * 3.0,
            0.3,
            corner * -2.0,
            Detail::Position,
        );
        assert!(approx(resting.position().unwrap(), corner * 1.3));
    }

    #[test]
    fn test_moving_away_does_not_collide() {
        // Overlapping the top edge but heading up and out
        let result = collide(
            HexCoord::new(0, 0),
            DVec2::new(0.0, 0.9),
            0.3,
            DVec2::new(0.0, 0.1),
            Detail::Position,
        );
        assert_eq!(result, Collision::Miss);
    }

    #[test]
    fn test_reflect_velocity_matches_rebound_vector() {
        let v = DVec2::new(0.7, -1.2);
        for n in NORMALS {
            let a = reflect_velocity(v, n);
            let b = rebound_vector(DVec2::new(0.3, 0.4), n, v);
            assert!(approx(a, b));
        }
    }

    #[test]
    fn test_first_collision_stops_at_first_hit() {
        let candidates = [HexCoord::new(4, 4), HexCoord::new(0, 0), HexCoord::new(1, 0)];
        let (coord, result) = first_collision(
            candidates,
            DVec2::new(0.0, 2.0),
            0.3,
            DVec2::new(0.0, -1.5),
            Detail::Position,
        )
        .unwrap();
        assert_eq!(coord, HexCoord::new(0, 0));
        assert_eq!(result.feature(), Some(Feature::Side(1)));
    }

    fn circle_near_hexagon() -> impl Strategy<Value = (HexCoord, DVec2, f64, DVec2)> {
        (
            -5i32..5,
            -5i32..5,
            -3.0f64..3.0,
            -3.0f64..3.0,
            0.05f64..1.0,
            -2.0f64..2.0,
            -2.0f64..2.0,
        )
            .prop_map(|(col, row, ox, oy, radius, vx, vy)| {
                let coord = HexCoord::new(col, row);
                let centre = hex_centre(coord) + DVec2::new(ox, oy);
                (coord, centre, radius, DVec2::new(vx, vy))
            })
    }

    proptest! {
        #[test]
        fn detail_levels_escalate((coord, centre, radius, velocity) in circle_near_hexagon()) {
            let results: Vec<Collision> = Detail::ALL
                .iter()
                .map(|&d| collide(coord, centre, radius, velocity, d))
                .collect();
            for (higher, result) in results.iter().enumerate() {
                if result.is_hit() {
                    for lower in &results[..higher] {
                        prop_assert!(lower.is_hit());
                    }
                }
            }
        }

        #[test]
        fn rebound_preserves_speed((coord, centre, radius, velocity) in circle_near_hexagon()) {
            if let Collision::Rebound { position, velocity: u, .. } =
                collide(coord, centre, radius, velocity, Detail::Rebound)
            {
                prop_assert!(position.is_finite());
                prop_assert!(u.is_finite());
                let speed = velocity.length();
                prop_assert!((u.length() - speed).abs() <= 1e-9 * speed.max(1.0));
            }
        }

        #[test]
        fn resting_position_is_finite((coord, centre, radius, velocity) in circle_near_hexagon()) {
            if let Some(position) = collide(coord, centre, radius, velocity, Detail::Position).position() {
                prop_assert!(position.is_finite());
            }
        }

        #[test]
        fn stationary_circle_never_rests((coord, centre, radius, _v) in circle_near_hexagon()) {
            prop_assert_eq!(
                collide(coord, centre, radius, DVec2::ZERO, Detail::Position),
                Collision::Miss
            );
        }
    }
}
