//! Square-grid coordinates, distances, and 8-direction facing
//!
//! The battle grid is a bounded square grid; movement and zones use
//! Chebyshev distance, the A* heuristic uses Manhattan.

use serde::{Deserialize, Serialize};

/// Tile coordinate on the battle grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Chebyshev distance: diagonal steps count as 1
    pub fn chebyshev_distance(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx.max(dy) as u32
    }

    /// Manhattan distance: orthogonal step count
    pub fn manhattan_distance(&self, other: &Self) -> u32 {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        (dx + dy) as u32
    }

    /// Straight-line distance between tile origins
    pub fn euclidean_distance(&self, other: &Self) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Center of this tile in continuous space
    pub fn center(&self) -> (f32, f32) {
        (self.x as f32 + 0.5, self.y as f32 + 0.5)
    }

    /// All 8 neighboring tile coordinates
    pub fn neighbors(&self) -> [TileCoord; 8] {
        [
            self.offset(0, -1),
            self.offset(1, -1),
            self.offset(1, 0),
            self.offset(1, 1),
            self.offset(0, 1),
            self.offset(-1, 1),
            self.offset(-1, 0),
            self.offset(-1, -1),
        ]
    }

    /// Tiles along the straight segment to `other`, sampled at unit steps
    /// (inclusive of both endpoints).
    pub fn segment_tiles(&self, other: &Self) -> Vec<TileCoord> {
        let n = self.chebyshev_distance(other) as i32;
        if n == 0 {
            return vec![*self];
        }

        let mut results = Vec::with_capacity((n + 1) as usize);
        for i in 0..=n {
            let t = i as f32 / n as f32;
            let x = self.x as f32 + (other.x - self.x) as f32 * t;
            let y = self.y as f32 + (other.y - self.y) as f32 * t;
            results.push(TileCoord::new(x.round() as i32, y.round() as i32));
        }
        results
    }
}

/// Axis-aligned rectangle overlap (origins plus width/height in tiles)
pub fn rects_overlap(a: TileCoord, aw: i32, ah: i32, b: TileCoord, bw: i32, bh: i32) -> bool {
    a.x < b.x + bw && b.x < a.x + aw && a.y < b.y + bh && b.y < a.y + ah
}

/// 8-direction compass facing: 0 = north, clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    #[default]
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Facing {
    /// Compass index, 0 = north, clockwise
    pub fn index(&self) -> u8 {
        match self {
            Facing::North => 0,
            Facing::NorthEast => 1,
            Facing::East => 2,
            Facing::SouthEast => 3,
            Facing::South => 4,
            Facing::SouthWest => 5,
            Facing::West => 6,
            Facing::NorthWest => 7,
        }
    }

    pub fn from_index(index: u8) -> Self {
        match index % 8 {
            0 => Facing::North,
            1 => Facing::NorthEast,
            2 => Facing::East,
            3 => Facing::SouthEast,
            4 => Facing::South,
            5 => Facing::SouthWest,
            6 => Facing::West,
            _ => Facing::NorthWest,
        }
    }

    /// Tile offset for one step in this direction (y grows south)
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::NorthEast => (1, -1),
            Facing::East => (1, 0),
            Facing::SouthEast => (1, 1),
            Facing::South => (0, 1),
            Facing::SouthWest => (-1, 1),
            Facing::West => (-1, 0),
            Facing::NorthWest => (-1, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The three directions centered on the opposite of this facing
    pub fn back_arc(&self) -> [Facing; 3] {
        let back = self.opposite().index();
        [
            Self::from_index(back + 7),
            Self::from_index(back),
            Self::from_index(back + 1),
        ]
    }

    /// Snap the direction from one tile toward another to the nearest
    /// of the 8 compass directions. Returns None when the tiles coincide.
    pub fn toward(from: TileCoord, to: TileCoord) -> Option<Facing> {
        if from == to {
            return None;
        }
        let dx = (to.x - from.x) as f32;
        let dy = (to.y - from.y) as f32;
        // atan2 measured clockwise from north (screen coordinates, y south)
        let angle = dx.atan2(-dy).to_degrees();
        let octant = ((angle + 382.5) / 45.0) as u8;
        Some(Self::from_index(octant))
    }

    pub fn all() -> [Facing; 8] {
        [
            Facing::North,
            Facing::NorthEast,
            Facing::East,
            Facing::SouthEast,
            Facing::South,
            Facing::SouthWest,
            Facing::West,
            Facing::NorthWest,
        ]
    }
}
