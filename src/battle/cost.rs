//! Movement cost calculation
//!
//! The cost of entering a tile (or multi-tile footprint) given terrain,
//! elevation, diagonal corners, collisions, and zones of control. Illegal
//! moves are infinite cost, never errors: they are expected, frequent
//! outcomes during search.

use crate::battle::actor::{is_hostile, Actor, Footprint};
use crate::battle::constants::{CLIMB_COST, CORNER_BLOCK_HEIGHT, MAX_CLIMB_HEIGHT};
use crate::battle::grid::{rects_overlap, TileCoord};
use crate::battle::roster::Roster;
use crate::battle::terrain::TerrainView;
use crate::battle::zone::{engaged_move_is_legal, engaging_actors, is_in_zone};

/// The acting actor and its movement budget at the step's source tile.
///
/// During multi-step search the budget shrinks as the path is committed,
/// so the remaining amount is carried separately from the actor itself.
#[derive(Debug, Clone, Copy)]
pub struct Mover<'a> {
    pub actor: &'a Actor,
    pub remaining_movement: f32,
}

impl<'a> Mover<'a> {
    /// A mover standing at its live position with its current budget
    pub fn new(actor: &'a Actor) -> Self {
        Self {
            actor,
            remaining_movement: actor.movement_remaining,
        }
    }

    pub fn with_remaining(actor: &'a Actor, remaining_movement: f32) -> Self {
        Self {
            actor,
            remaining_movement,
        }
    }
}

/// Cost of stepping from `from` onto the footprint at `to`.
///
/// Returns a finite non-negative cost, or `f32::INFINITY` when the step is
/// illegal. Checks short-circuit in order: bounds, standability and
/// collisions, the blanket elevation cap, the diagonal corner rule,
/// terrain cost, the climbing surcharge, and finally zone-of-control
/// interaction (only when a mover is supplied).
pub fn entry_cost(
    terrain: &impl TerrainView,
    roster: &Roster,
    from: TileCoord,
    to: TileCoord,
    footprint: Footprint,
    mover: Option<Mover<'_>>,
) -> f32 {
    let covered = footprint.tiles(to);

    // Bounds
    if covered.iter().any(|t| !terrain.in_bounds(*t)) {
        return f32::INFINITY;
    }

    // Standability: a 1x1 footprint needs its tile standable; a 2x2 needs
    // at least one covered tile standable
    let standable = if footprint.is_multi_tile() {
        covered.iter().any(|t| terrain.is_standable(*t))
    } else {
        terrain.is_standable(to)
    };
    if !standable {
        return f32::INFINITY;
    }

    // Collisions: no living actor other than the mover may overlap
    let mover_id = mover.map(|m| m.actor.id);
    let w = footprint.width();
    for other in roster.living() {
        if Some(other.id) == mover_id {
            continue;
        }
        if let Some(other_origin) = other.tile() {
            let ow = other.footprint.width();
            if rects_overlap(to, w, w, other_origin, ow, ow) {
                return f32::INFINITY;
            }
        }
    }

    // Blanket elevation cap, independent of the source tile
    if covered.iter().any(|t| terrain.height_at(*t) > MAX_CLIMB_HEIGHT) {
        return f32::INFINITY;
    }

    let src_height = terrain.height_at(from);
    let dest_height = covered
        .iter()
        .map(|t| terrain.height_at(*t))
        .max()
        .unwrap_or(0);

    // Diagonal corner rule, single-tile movers only: cutting through a
    // blocked corner is illegal unless stepping level-or-down from ground
    // at least as high as the blocking corners
    if !footprint.is_multi_tile() && from.x != to.x && from.y != to.y {
        let corners = [TileCoord::new(to.x, from.y), TileCoord::new(from.x, to.y)];
        let blocking: Vec<i32> = corners
            .iter()
            .map(|c| terrain.height_at(*c))
            .filter(|h| *h >= CORNER_BLOCK_HEIGHT)
            .collect();
        if !blocking.is_empty() {
            let not_climbing = dest_height <= src_height;
            let standing_high = blocking.iter().all(|h| src_height >= *h);
            if !(not_climbing && standing_high) {
                return f32::INFINITY;
            }
        }
    }

    // Terrain cost over the covered tiles
    let mut cost: f32 = covered.iter().map(|t| terrain.movement_cost_at(*t)).sum();
    if cost.is_infinite() {
        return f32::INFINITY;
    }

    // Climbing: exactly at the allowed difference adds the surcharge,
    // beyond it the step is illegal
    let climb = dest_height - src_height;
    if climb > MAX_CLIMB_HEIGHT {
        return f32::INFINITY;
    }
    if climb == MAX_CLIMB_HEIGHT && climb > 0 {
        cost += CLIMB_COST;
    }

    // Zone-of-control interaction, only for a concrete acting actor
    if let Some(m) = mover {
        let actor = m.actor;
        let engagers = engaging_actors(actor, roster, false);

        if !engagers.is_empty() {
            // Already engaged: a single adjacent step from the live
            // position, consuming the whole remaining budget
            if actor.tile() == Some(from) {
                return if engaged_move_is_legal(actor, to, &engagers) {
                    m.remaining_movement.max(0.0)
                } else {
                    f32::INFINITY
                };
            }
            // An engaged actor cannot plan steps from anywhere else
            return f32::INFINITY;
        }

        let dest_in_zone_of = |hostile: &Actor| {
            covered.iter().any(|t| is_in_zone(*t, hostile, None))
        };
        let src_tiles = footprint.tiles(from);
        let src_in_zone_of = |hostile: &Actor| {
            src_tiles.iter().any(|t| is_in_zone(*t, hostile, None))
        };

        let hostiles = || {
            roster
                .living()
                .filter(|h| h.id != actor.id && is_hostile(h.faction, actor.faction))
        };

        // Running forbids entering engagement at all
        if actor.running && hostiles().any(|h| dest_in_zone_of(h)) {
            return f32::INFINITY;
        }

        // Stepping into a zone the source was not already inside triggers
        // engagement and consumes the rest of the turn's movement
        let enters_zone = hostiles().any(|h| dest_in_zone_of(h) && !src_in_zone_of(h));
        if enters_zone {
            return if m.remaining_movement > 0.0 {
                m.remaining_movement
            } else {
                f32::INFINITY
            };
        }
    }

    cost
}
