//! Terrain kinds and the terrain query surface
//!
//! The movement and sight engines only consume the [`TerrainView`] trait;
//! [`crate::battle::map::BattleMap`] is the concrete supplier.

use serde::{Deserialize, Serialize};

use crate::battle::grid::TileCoord;

/// Terrain class for a single tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TerrainKind {
    #[default]
    Floor,      // Normal footing
    Rough,      // Debris, slows movement
    Mud,        // Heavy going
    Wall,       // Impassable, blocks sight
    Pillar,     // Impassable, blocks sight
    Chasm,      // Impassable, open air
    Empty,      // Nothing built here; standable only inside a room
}

impl TerrainKind {
    /// Movement cost to enter a tile of this kind (INFINITY = impassable)
    pub fn movement_cost(&self) -> f32 {
        match self {
            TerrainKind::Floor => 1.0,
            TerrainKind::Rough => 1.5,
            TerrainKind::Mud => 2.0,
            TerrainKind::Wall => f32::INFINITY,
            TerrainKind::Pillar => f32::INFINITY,
            TerrainKind::Chasm => f32::INFINITY,
            TerrainKind::Empty => 1.0,
        }
    }

    /// Does this terrain block line of sight at its own height?
    pub fn blocks_sight(&self) -> bool {
        matches!(self, TerrainKind::Wall | TerrainKind::Pillar)
    }

    /// Empty tiles are only standable inside a defined room
    pub fn is_empty(&self) -> bool {
        matches!(self, TerrainKind::Empty)
    }
}

/// Read-only terrain queries consumed by the movement, pathfinding, and
/// sight engines. Out-of-bounds coordinates report infinite cost, zero
/// height, and non-standable.
pub trait TerrainView {
    /// Grid size as (cols, rows)
    fn dimensions(&self) -> (u32, u32);

    /// Elevation of the tile
    fn height_at(&self, tile: TileCoord) -> i32;

    /// Cost to enter the tile (INFINITY = impassable)
    fn movement_cost_at(&self, tile: TileCoord) -> f32;

    /// Non-empty terrain, or empty terrain inside a defined room
    fn is_standable(&self, tile: TileCoord) -> bool;

    /// Does the tile block sight at its height?
    fn blocks_sight_at(&self, tile: TileCoord) -> bool;

    fn in_bounds(&self, tile: TileCoord) -> bool {
        let (cols, rows) = self.dimensions();
        tile.x >= 0 && tile.y >= 0 && tile.x < cols as i32 && tile.y < rows as i32
    }
}
