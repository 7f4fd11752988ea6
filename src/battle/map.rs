//! Concrete battle map: tile grid with terrain, elevation, and rooms

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::battle::grid::{rects_overlap, TileCoord};
use crate::battle::terrain::{TerrainKind, TerrainView};

/// A single tile on the battle map
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Tile {
    pub terrain: TerrainKind,
    pub height: i32,
}

/// Rectangular room area; empty tiles inside a room are standable
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Room {
    pub origin: TileCoord,
    pub width: i32,
    pub height: i32,
}

impl Room {
    pub fn new(origin: TileCoord, width: i32, height: i32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    pub fn contains(&self, tile: TileCoord) -> bool {
        rects_overlap(self.origin, self.width, self.height, tile, 1, 1)
    }
}

/// The full battle map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleMap {
    tiles: HashMap<TileCoord, Tile>,
    pub cols: u32,
    pub rows: u32,
    pub rooms: Vec<Room>,
}

impl BattleMap {
    /// Create a new map of floor tiles at height 0
    pub fn new(cols: u32, rows: u32) -> Self {
        let mut tiles = HashMap::new();
        for x in 0..cols as i32 {
            for y in 0..rows as i32 {
                let coord = TileCoord::new(x, y);
                tiles.insert(coord, Tile::default());
            }
        }

        Self {
            tiles,
            cols,
            rows,
            rooms: Vec::new(),
        }
    }

    pub fn tile(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }

    pub fn set_terrain(&mut self, coord: TileCoord, terrain: TerrainKind) {
        if let Some(tile) = self.tiles.get_mut(&coord) {
            tile.terrain = terrain;
        }
    }

    pub fn set_height(&mut self, coord: TileCoord, height: i32) {
        if let Some(tile) = self.tiles.get_mut(&coord) {
            tile.height = height;
        }
    }

    pub fn add_room(&mut self, room: Room) {
        self.rooms.push(room);
    }

    fn in_room(&self, tile: TileCoord) -> bool {
        self.rooms.iter().any(|room| room.contains(tile))
    }
}

impl TerrainView for BattleMap {
    fn dimensions(&self) -> (u32, u32) {
        (self.cols, self.rows)
    }

    fn height_at(&self, tile: TileCoord) -> i32 {
        self.tile(tile).map(|t| t.height).unwrap_or(0)
    }

    fn movement_cost_at(&self, tile: TileCoord) -> f32 {
        self.tile(tile)
            .map(|t| t.terrain.movement_cost())
            .unwrap_or(f32::INFINITY)
    }

    fn is_standable(&self, tile: TileCoord) -> bool {
        match self.tile(tile) {
            None => false,
            Some(t) => {
                if t.terrain.movement_cost().is_infinite() {
                    false
                } else if t.terrain.is_empty() {
                    self.in_room(tile)
                } else {
                    true
                }
            }
        }
    }

    fn blocks_sight_at(&self, tile: TileCoord) -> bool {
        self.tile(tile)
            .map(|t| t.terrain.blocks_sight())
            .unwrap_or(false)
    }
}
