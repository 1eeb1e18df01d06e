//! Hexagon grid geometry
//!
//! Every hexagon is the same shape: side 1, circumradius 1, with corners at
//! 0°, 60°, ..., 300° (so a flat edge on top and bottom). Columns are packed
//! brick-fashion: odd columns sit half a hexagon higher than even ones.
//!
//! Grid coordinates map to world-space centres with:
//! - x = column * 1.5
//! - y = row * √3 + (√3 / 2) * (column mod 2)

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// √3
pub const R3: f64 = 1.732_050_807_568_877_2;
/// sin 60° = √3 / 2, half the height of a hexagon
pub const SIN_60: f64 = R3 * 0.5;

/// Corners of the canonical hexagon, anticlockwise from (1, 0)
pub const CORNERS: [DVec2; 6] = [
    DVec2::new(1.0, 0.0),
    DVec2::new(0.5, SIN_60),
    DVec2::new(-0.5, SIN_60),
    DVec2::new(-1.0, 0.0),
    DVec2::new(-0.5, -SIN_60),
    DVec2::new(0.5, -SIN_60),
];

/// Side vectors: `CORNERS[i + 1] - CORNERS[i]`
pub const SIDES: [DVec2; 6] = [
    DVec2::new(-0.5, SIN_60),
    DVec2::new(-1.0, 0.0),
    DVec2::new(-0.5, -SIN_60),
    DVec2::new(0.5, -SIN_60),
    DVec2::new(1.0, 0.0),
    DVec2::new(0.5, SIN_60),
];

/// Unit outward normals: each side rotated 90° clockwise, then normalized
pub const NORMALS: [DVec2; 6] = [
    DVec2::new(SIN_60, 0.5),
    DVec2::new(0.0, 1.0),
    DVec2::new(-SIN_60, 0.5),
    DVec2::new(-SIN_60, -0.5),
    DVec2::new(0.0, -1.0),
    DVec2::new(SIN_60, -0.5),
];

/// Integer grid position of a hexagon
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub col: i32,
    pub row: i32,
}

impl HexCoord {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// World-space centre of this hexagon
    #[inline]
    pub fn centre(self) -> DVec2 {
        hex_centre(self)
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((col, row): (i32, i32)) -> Self {
        Self { col, row }
    }
}

/// Vertical offset of a column: odd columns are shifted up by half a hexagon
#[inline]
fn column_offset(col: i32) -> f64 {
    SIN_60 * f64::from(col.rem_euclid(2))
}

/// Position vector of a hexagon centre
#[inline]
pub fn hex_centre(coord: HexCoord) -> DVec2 {
    DVec2::new(
        f64::from(coord.col) * 1.5,
        f64::from(coord.row) * R3 + column_offset(coord.col),
    )
}

/// Best guess at the grid cell containing a world point.
///
/// Not exact near cell boundaries; callers search a ring around it.
pub fn approximate_cell(point: DVec2) -> HexCoord {
    let col = (point.x / 1.5).round() as i32;
    let row = ((point.y - column_offset(col)) / R3).round() as i32;
    HexCoord { col, row }
}

/// Hexagons near a world point, nearest centre first.
///
/// `ring` is the grid distance searched in both column and row around the
/// best-guess cell (0, 1 or 2 in practice), giving `(2 * ring + 1)²`
/// candidates. Equal distances are ordered by column, then row.
pub fn nearest_neighbours(point: DVec2, ring: u32) -> Vec<HexCoord> {
    let here = approximate_cell(point);
    let d = ring as i32;

    let mut candidates: Vec<(f64, HexCoord)> = (-d..=d)
        .flat_map(|i| (-d..=d).map(move |j| HexCoord::new(here.col + i, here.row + j)))
        .map(|coord| (hex_centre(coord).distance(point), coord))
        .collect();

    candidates.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.1.cmp(&b.1))
    });

    candidates.into_iter().map(|(_, coord)| coord).collect()
}
