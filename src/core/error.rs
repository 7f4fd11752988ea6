use thiserror::Error;

use crate::core::types::ActorId;

/// Invariant violations in the surrounding system.
///
/// These are programmer errors, not recoverable outcomes: the roster detects
/// them and refuses the operation rather than silently continuing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BattleError {
    #[error("Duplicate actor id: {0:?}")]
    DuplicateActorId(ActorId),

    #[error("Footprint overlaps a living actor at ({x}, {y})")]
    OverlappingFootprint { x: i32, y: i32 },

    #[error("Unknown actor id: {0:?}")]
    UnknownActor(ActorId),

    #[error("Destination ({x}, {y}) is not in the reachable set")]
    UnreachableDestination { x: i32, y: i32 },
}

/// Reasons an attack is refused before any dice are rolled.
///
/// Callers must check validity before resolving; dice-roll outcomes (miss,
/// block, zero damage) are normal results and never surface here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttackError {
    #[error("Unknown actor id: {0:?}")]
    UnknownActor(ActorId),

    #[error("Attacker is dead")]
    AttackerDead,

    #[error("Attacker has no actions remaining")]
    NoActionsRemaining,

    #[error("Target is already dead")]
    TargetDead,

    #[error("Target is not hostile")]
    FriendlyFire,

    #[error("Attacker is not on the grid")]
    AttackerUnplaced,

    #[error("Target is not on the grid")]
    TargetUnplaced,

    #[error("Target is out of range ({distance} > {max_range})")]
    OutOfRange { distance: u32, max_range: u32 },

    #[error("Cannot shoot while engaged in melee")]
    RangedWhileEngaged,

    #[error("No line of sight to target")]
    NoLineOfSight,

    #[error("Target is too far above or below for a melee attack")]
    ElevationTooSteep,
}

pub type Result<T> = std::result::Result<T, BattleError>;
