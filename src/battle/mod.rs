//! Tactical battle core - turn-based combat on a square grid
//!
//! The core is a pure, synchronous rules engine: callers own turn order and
//! presentation, the core answers spatial queries and resolves attacks.
//!
//! Key rules:
//! - 8-direction movement with per-tile costs and elevation
//! - Zones of control: entering one ends your movement, leaving is hard
//! - Dice-driven three-phase combat (to-hit, block, damage), fully
//!   replayable under a seeded roller

pub mod actor;
pub mod attack;
pub mod constants;
pub mod cost;
pub mod dice;
pub mod equipment;
pub mod grid;
pub mod map;
pub mod pathfinding;
pub mod roster;
pub mod sight;
pub mod terrain;
pub mod zone;

// Re-exports for convenient access
pub use actor::{is_hostile, Actor, Attributes, Faction, Footprint, Placement};
pub use attack::{execute_attack, validate_attack, AttackReport};
pub use constants::*;
pub use cost::{entry_cost, Mover};
pub use dice::{CritLevel, DiceRoller, ScriptedDice, SeededDice, TwoDice};
pub use equipment::{Shield, Weapon, WeaponKind};
pub use grid::{rects_overlap, Facing, TileCoord};
pub use map::{BattleMap, Room, Tile};
pub use pathfinding::{execute_move, find_path, reachable_tiles, Reachable};
pub use roster::Roster;
pub use sight::{actor_sees, sight_line_clear, sight_line_clear_tiles};
pub use terrain::{TerrainKind, TerrainView};
pub use zone::{
    engaged_move_is_legal, engaging_actors, is_engaged, is_in_zone, path_crosses_zone,
};
