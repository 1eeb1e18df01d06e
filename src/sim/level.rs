//! Level obstacle map
//!
//! A level is a sparse map from hexagon coordinates to cell kinds. Anything
//! not in the map is open floor. Cells are written with the short codes used
//! by the level editor:
//!
//! - `' '` floor, `'S'` start, `'X'` exit, `'O'` open, `'P'` powerup
//! - `'^' '<' '>' 'v' '#'` indestructible walls
//! - `"Cu" "Ag" "Au" "Pt"` metal hexagons (destructible, high value)
//! - `"Hrgb"` / `"Hrgba"` coloured hexagons, one hex digit per channel

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::hex::{HexCoord, nearest_neighbours};

/// Indestructible wall styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    Up,
    Left,
    Right,
    Down,
    Solid,
}

impl WallKind {
    pub fn as_char(&self) -> char {
        match self {
            WallKind::Up => '^',
            WallKind::Left => '<',
            WallKind::Right => '>',
            WallKind::Down => 'v',
            WallKind::Solid => '#',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '^' => Some(WallKind::Up),
            '<' => Some(WallKind::Left),
            '>' => Some(WallKind::Right),
            'v' => Some(WallKind::Down),
            '#' => Some(WallKind::Solid),
            _ => None,
        }
    }
}

/// Precious metal hexagons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metal {
    Copper,
    Silver,
    Gold,
    Platinum,
}

impl Metal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metal::Copper => "Cu",
            Metal::Silver => "Ag",
            Metal::Gold => "Au",
            Metal::Platinum => "Pt",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Cu" => Some(Metal::Copper),
            "Ag" => Some(Metal::Silver),
            "Au" => Some(Metal::Gold),
            "Pt" => Some(Metal::Platinum),
            _ => None,
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            Metal::Copper => 250,
            Metal::Silver => 500,
            Metal::Gold => 750,
            Metal::Platinum => 1000,
        }
    }
}

/// Colour of a breakable hexagon, one nibble (0-15) per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexColour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl HexColour {
    /// Parse the digits after the `H`: "rgb" or "rgba"
    fn parse(digits: &str) -> Option<Self> {
        let nibbles: Vec<u8> = digits
            .chars()
            .map(|c| c.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;
        match nibbles[..] {
            [r, g, b] => Some(Self { r, g, b, a: 15 }),
            [r, g, b, a] => Some(Self { r, g, b, a }),
            _ => None,
        }
    }

    fn code(&self) -> String {
        let digit = |n: u8| char::from_digit(u32::from(n), 16).unwrap_or('0');
        let mut s = String::from("H");
        s.extend([digit(self.r), digit(self.g), digit(self.b)]);
        if self.a != 15 {
            s.push(digit(self.a));
        }
        s
    }

    /// Score for breaking a hexagon of this colour
    pub fn points(&self) -> u32 {
        let rgb = [self.r, self.g, self.b];
        let opaque = self.a == 15;

        if opaque && rgb == [0, 0, 0] {
            150
        } else if opaque && rgb == [15, 15, 15] {
            100
        } else if self.r == self.g && self.g == self.b {
            // Greys are cheap
            5
        } else if rgb.iter().all(|&c| c == 0 || c == 15) {
            50
        } else if rgb.contains(&15) {
            20
        } else {
            10
        }
    }
}

/// Contents of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Floor,
    Start,
    Exit,
    Open,
    Powerup,
    Wall(WallKind),
    Metal(Metal),
    Hex(HexColour),
}

impl Cell {
    /// Parse an editor cell code
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                ' ' => Some(Cell::Floor),
                'S' => Some(Cell::Start),
                'X' => Some(Cell::Exit),
                'O' => Some(Cell::Open),
                'P' => Some(Cell::Powerup),
                _ => WallKind::from_char(c).map(Cell::Wall),
            };
        }
        if let Some(metal) = Metal::from_str(code) {
            return Some(Cell::Metal(metal));
        }
        code.strip_prefix('H')
            .and_then(HexColour::parse)
            .map(Cell::Hex)
    }

    /// Editor cell code
    pub fn code(&self) -> String {
        match self {
            Cell::Floor => " ".to_string(),
            Cell::Start => "S".to_string(),
            Cell::Exit => "X".to_string(),
            Cell::Open => "O".to_string(),
            Cell::Powerup => "P".to_string(),
            Cell::Wall(kind) => kind.as_char().to_string(),
            Cell::Metal(metal) => metal.as_str().to_string(),
            Cell::Hex(colour) => colour.code(),
        }
    }

    /// Whether moving things bounce off this cell
    pub fn is_obstacle(&self) -> bool {
        !matches!(
            self,
            Cell::Floor | Cell::Start | Cell::Exit | Cell::Open | Cell::Powerup
        )
    }

    /// Score for destroying this cell, `None` if it can't be destroyed
    pub fn points(&self) -> Option<u32> {
        match self {
            Cell::Metal(metal) => Some(metal.points()),
            Cell::Hex(colour) => Some(colour.points()),
            _ => None,
        }
    }
}

/// An obstacle close to a query point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obstacle {
    pub coord: HexCoord,
    pub cell: Cell,
}

/// A playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub start: HexCoord,
    pub exit: HexCoord,
    /// Non-floor cells, ordered for deterministic iteration
    #[serde(with = "coord_pairs")]
    cells: BTreeMap<HexCoord, Cell>,
    /// Ball kind waiting to be picked up at each powerup cell
    #[serde(with = "coord_pairs", default)]
    powerups: BTreeMap<HexCoord, String>,
}

impl Default for Level {
    fn default() -> Self {
        Self::new("a level", HexCoord::new(2, 2), HexCoord::new(8, 8))
    }
}

impl Level {
    /// Create an empty level with the start and exit marked
    pub fn new(name: impl Into<String>, start: HexCoord, exit: HexCoord) -> Self {
        let mut level = Self {
            name: name.into(),
            start,
            exit,
            cells: BTreeMap::new(),
            powerups: BTreeMap::new(),
        };
        level.set(start, Cell::Start);
        level.set(exit, Cell::Exit);
        level
    }

    /// Cell at a coordinate (floor if never set)
    pub fn cell(&self, coord: HexCoord) -> Cell {
        self.cells.get(&coord).copied().unwrap_or_default()
    }

    pub fn set(&mut self, coord: HexCoord, cell: Cell) {
        if cell != Cell::Powerup {
            self.powerups.remove(&coord);
        }
        if cell == Cell::Floor {
            self.cells.remove(&coord);
        } else {
            self.cells.insert(coord, cell);
        }
    }

    /// Set a cell from its editor code; returns false for unknown codes
    pub fn set_code(&mut self, coord: HexCoord, code: &str) -> bool {
        match Cell::from_code(code) {
            Some(cell) => {
                self.set(coord, cell);
                true
            }
            None => {
                log::warn!("Unknown cell code {code:?} at {coord:?}");
                false
            }
        }
    }

    /// All non-floor cells
    pub fn cells(&self) -> impl Iterator<Item = (HexCoord, Cell)> + '_ {
        self.cells.iter().map(|(&coord, &cell)| (coord, cell))
    }

    /// Obstacles among the hexagons within `ring` of a point, nearest first
    pub fn obstacles_near(&self, point: DVec2, ring: u32) -> Vec<Obstacle> {
        nearest_neighbours(point, ring)
            .into_iter()
            .filter_map(|coord| {
                let cell = self.cell(coord);
                cell.is_obstacle().then_some(Obstacle { coord, cell })
            })
            .collect()
    }

    /// Destroy the hexagon at `coord`, returning the points scored.
    ///
    /// Returns `None` (and leaves the cell alone) if it is indestructible.
    pub fn destroy(&mut self, coord: HexCoord) -> Option<u32> {
        let cell = self.cell(coord);
        let points = cell.points()?;
        self.cells.remove(&coord);
        log::debug!("Destroyed {} at {coord:?} for {points} points", cell.code());
        Some(points)
    }

    /// Put a ball powerup of the given kind at `coord`
    pub fn place_powerup(&mut self, coord: HexCoord, kind: impl Into<String>) {
        self.set(coord, Cell::Powerup);
        self.powerups.insert(coord, kind.into());
    }

    /// Collect the powerup at `coord`, if any; the cell becomes floor
    pub fn collect(&mut self, coord: HexCoord) -> Option<String> {
        let kind = self.powerups.remove(&coord)?;
        self.cells.remove(&coord);
        Some(kind)
    }
}

/// JSON object keys must be strings, so coordinate maps go out as `[coord, value]` pairs
mod coord_pairs {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::sim::hex::HexCoord;

    pub fn serialize<S, V>(map: &BTreeMap<HexCoord, V>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        V: Serialize,
    {
        serializer.collect_seq(map.iter())
    }

    pub fn deserialize<'de, D, V>(deserializer: D) -> Result<BTreeMap<HexCoord, V>, D::Error>
    where
        D: Deserializer<'de>,
        V: Deserialize<'de>,
    {
        let pairs = Vec::<(HexCoord, V)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}
