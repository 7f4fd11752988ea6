//! Actors on the battle grid: placement, footprint, faction, attributes
//!
//! The core reads *effective* attribute values only; wound and status
//! bookkeeping outside this core supplies the penalties.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{DEFAULT_ZONE_RADIUS, LARGE_BODY_HEIGHT, SMALL_BODY_HEIGHT};
use crate::battle::equipment::{Shield, Weapon};
use crate::battle::grid::{rects_overlap, Facing, TileCoord};
use crate::core::types::ActorId;

/// Where an actor stands, if anywhere
///
/// Unplaced actors (reinforcements, the recently swallowed) answer no
/// spatial query: no zone, no sight, no engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Placement {
    #[default]
    Unplaced,
    Placed {
        tile: TileCoord,
        facing: Facing,
    },
}

/// Occupied-tile area of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Footprint {
    /// 1x1 tiles
    #[default]
    Single,
    /// 2x2 tiles, origin at the north-west corner
    Large,
}

impl Footprint {
    /// Side length in tiles
    pub fn width(&self) -> i32 {
        match self {
            Footprint::Single => 1,
            Footprint::Large => 2,
        }
    }

    pub fn is_multi_tile(&self) -> bool {
        matches!(self, Footprint::Large)
    }

    /// All tiles covered by this footprint at the given origin
    pub fn tiles(&self, origin: TileCoord) -> Vec<TileCoord> {
        let w = self.width();
        let mut tiles = Vec::with_capacity((w * w) as usize);
        for dx in 0..w {
            for dy in 0..w {
                tiles.push(origin.offset(dx, dy));
            }
        }
        tiles
    }

    /// Body height in elevation units, used by the sight engine
    pub fn body_height(&self) -> i32 {
        match self {
            Footprint::Single => SMALL_BODY_HEIGHT,
            Footprint::Large => LARGE_BODY_HEIGHT,
        }
    }
}

/// Group identity; hostility is a pure function of two faction values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Crown,
    Horde,
    Wild,
}

/// Any two distinct factions are hostile
pub fn is_hostile(a: Faction, b: Faction) -> bool {
    a != b
}

/// Base attribute values plus externally supplied wound/status penalties
///
/// Penalties never drive an effective value below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub combat: i32,
    pub ranged: i32,
    pub strength: i32,
    pub agility: i32,
    pub combat_penalty: i32,
    pub ranged_penalty: i32,
    pub strength_penalty: i32,
    pub agility_penalty: i32,
}

impl Attributes {
    pub fn new(combat: i32, ranged: i32, strength: i32, agility: i32) -> Self {
        Self {
            combat,
            ranged,
            strength,
            agility,
            combat_penalty: 0,
            ranged_penalty: 0,
            strength_penalty: 0,
            agility_penalty: 0,
        }
    }

    pub fn effective_combat(&self) -> i32 {
        (self.combat - self.combat_penalty).max(0)
    }

    pub fn effective_ranged(&self) -> i32 {
        (self.ranged - self.ranged_penalty).max(0)
    }

    pub fn effective_strength(&self) -> i32 {
        (self.strength - self.strength_penalty).max(0)
    }

    pub fn effective_agility(&self) -> i32 {
        (self.agility - self.agility_penalty).max(0)
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(1, 1, 1, 1)
    }
}

/// A creature participating in the battle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub name: String,
    pub faction: Faction,
    pub placement: Placement,
    pub footprint: Footprint,
    pub attributes: Attributes,

    pub weapon: Weapon,
    pub shield: Option<Shield>,
    /// Natural plus equipped armor, as one value
    pub armor: i32,

    pub max_vitality: u32,
    pub vitality: u32,

    pub max_movement: f32,
    pub movement_remaining: f32,

    pub max_actions: u32,
    pub actions_remaining: u32,

    /// Running forbids entering any hostile zone of control this turn
    pub running: bool,
    pub has_moved_while_engaged: bool,

    /// Position at the start of this actor's turn; anchors back-arc checks
    /// when this actor attacks
    pub turn_start_tile: Option<TileCoord>,

    /// Chebyshev radius of this actor's zone of control
    pub zone_radius: u32,
}

impl Actor {
    pub fn new(name: &str, faction: Faction, weapon: Weapon) -> Self {
        Self {
            id: ActorId::new(),
            name: name.to_string(),
            faction,
            placement: Placement::Unplaced,
            footprint: Footprint::Single,
            attributes: Attributes::default(),
            weapon,
            shield: None,
            armor: 3,
            max_vitality: 5,
            vitality: 5,
            max_movement: 6.0,
            movement_remaining: 6.0,
            max_actions: 1,
            actions_remaining: 1,
            running: false,
            has_moved_while_engaged: false,
            turn_start_tile: None,
            zone_radius: DEFAULT_ZONE_RADIUS,
        }
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_shield(mut self, shield: Shield) -> Self {
        self.shield = Some(shield);
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_vitality(mut self, vitality: u32) -> Self {
        self.max_vitality = vitality;
        self.vitality = vitality;
        self
    }

    pub fn with_movement(mut self, movement: f32) -> Self {
        self.max_movement = movement;
        self.movement_remaining = movement;
        self
    }

    /// Place the actor on the grid, anchoring its turn-start position
    pub fn at(mut self, tile: TileCoord, facing: Facing) -> Self {
        self.placement = Placement::Placed { tile, facing };
        self.turn_start_tile = Some(tile);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.vitality > 0
    }

    pub fn tile(&self) -> Option<TileCoord> {
        match self.placement {
            Placement::Placed { tile, .. } => Some(tile),
            Placement::Unplaced => None,
        }
    }

    pub fn facing(&self) -> Option<Facing> {
        match self.placement {
            Placement::Placed { facing, .. } => Some(facing),
            Placement::Unplaced => None,
        }
    }

    pub fn set_facing(&mut self, new_facing: Facing) {
        if let Placement::Placed { tile, .. } = self.placement {
            self.placement = Placement::Placed {
                tile,
                facing: new_facing,
            };
        }
    }

    pub fn set_tile(&mut self, new_tile: TileCoord) {
        if let Placement::Placed { facing, .. } = self.placement {
            self.placement = Placement::Placed {
                tile: new_tile,
                facing,
            };
        }
    }

    /// Tiles covered by this actor's footprint (empty when unplaced)
    pub fn occupied_tiles(&self) -> Vec<TileCoord> {
        match self.tile() {
            Some(tile) => self.footprint.tiles(tile),
            None => Vec::new(),
        }
    }

    pub fn occupies(&self, tile: TileCoord) -> bool {
        match self.tile() {
            Some(origin) => {
                let w = self.footprint.width();
                rects_overlap(origin, w, w, tile, 1, 1)
            }
            None => false,
        }
    }

    /// Would this actor's footprint at `origin` overlap another's footprint?
    pub fn footprint_overlaps(&self, origin: TileCoord, other: &Actor) -> bool {
        match other.tile() {
            Some(other_origin) => {
                let w = self.footprint.width();
                let ow = other.footprint.width();
                rects_overlap(origin, w, w, other_origin, ow, ow)
            }
            None => false,
        }
    }

    /// Minimum Chebyshev distance from this actor's footprint to a tile
    pub fn distance_to_tile(&self, tile: TileCoord) -> Option<u32> {
        self.occupied_tiles()
            .iter()
            .map(|t| t.chebyshev_distance(&tile))
            .min()
    }

    /// Minimum Chebyshev distance between two actors' footprints
    pub fn distance_to(&self, other: &Actor) -> Option<u32> {
        let mine = self.occupied_tiles();
        let theirs = other.occupied_tiles();
        if mine.is_empty() || theirs.is_empty() {
            return None;
        }
        mine.iter()
            .flat_map(|a| theirs.iter().map(move |b| a.chebyshev_distance(b)))
            .min()
    }

    /// Restore the turn budget and re-anchor the turn-start position.
    ///
    /// This is the only way remaining movement ever increases.
    pub fn reset_turn(&mut self) {
        self.movement_remaining = self.max_movement;
        self.actions_remaining = self.max_actions;
        self.has_moved_while_engaged = false;
        self.running = false;
        self.turn_start_tile = self.tile();
    }

    pub fn spend_action(&mut self) {
        self.actions_remaining = self.actions_remaining.saturating_sub(1);
    }

    pub fn take_damage(&mut self, points: u32) {
        self.vitality = self.vitality.saturating_sub(points);
    }
}
