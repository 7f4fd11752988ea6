//! Combat rule constants - all tunable values in one place
//!
//! Bonuses are ADDITIVE, never multiplicative. No percentage modifiers.

// Dice
pub const DIE_FACES: u32 = 6;

// Zones of control
/// Default radius (Chebyshev) of a living actor's zone of control.
pub const DEFAULT_ZONE_RADIUS: u32 = 1;

// Elevation
/// Blanket accessibility cap: tiles higher than this are never enterable.
pub const MAX_CLIMB_HEIGHT: i32 = 1;
/// Surcharge added when a step climbs by exactly the allowed difference.
pub const CLIMB_COST: f32 = 1.0;
/// A tile of height >= this blocks the corners of a diagonal step.
pub const CORNER_BLOCK_HEIGHT: i32 = 1;
/// Melee attacks require the height gap between the combatants' tiles
/// to stay within this.
pub const MAX_MELEE_HEIGHT_GAP: i32 = 1;

// To-hit modifiers
pub const BACK_ATTACK_BONUS: i32 = 1;
pub const HIGH_GROUND_BONUS: i32 = 1;
/// A ranged attack hits on a 2d6 total of at least this.
pub const RANGED_HIT_THRESHOLD: i32 = 10;
/// An ordinary critical raises the shield's block threshold by this.
pub const CRITICAL_BLOCK_PENALTY: u32 = 1;

// Line of sight
/// Ray-march step in tile units. Small enough that no tile on the
/// segment is skipped, even on long diagonals.
pub const SIGHT_SAMPLE_STEP: f32 = 0.2;
/// Effective body height (in elevation units) of a 1x1 actor.
pub const SMALL_BODY_HEIGHT: i32 = 1;
/// Effective body height of a 2x2 actor.
pub const LARGE_BODY_HEIGHT: i32 = 2;

// Pathfinding
/// Expansion cap for single-target A* so it always terminates.
pub const PATHFIND_EXPANSION_CAP: u32 = 1000;
