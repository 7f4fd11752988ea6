//! Line of sight
//!
//! Sight rays march in continuous space over tile centers rather than
//! tile-by-tile, so diagonal rays do not pick up staircase artifacts. The
//! line height is interpolated between the two endpoint effective heights;
//! a blocker only matters if it actually reaches the line.

use crate::battle::actor::Actor;
use crate::battle::constants::SIGHT_SAMPLE_STEP;
use crate::battle::grid::TileCoord;
use crate::battle::roster::Roster;
use crate::battle::terrain::TerrainView;
use crate::core::types::ActorId;

/// Can `from_actor` see `to_actor`?
///
/// Endpoint effective height is the terrain elevation under the actor plus
/// its body height. Neither actor's own body ever blocks the ray.
pub fn actor_sees(
    terrain: &impl TerrainView,
    roster: &Roster,
    from_actor: &Actor,
    to_actor: &Actor,
) -> bool {
    let (Some(from), Some(to)) = (from_actor.tile(), to_actor.tile()) else {
        return false;
    };
    let from_height = (terrain.height_at(from) + from_actor.footprint.body_height()) as f32;
    let to_height = (terrain.height_at(to) + to_actor.footprint.body_height()) as f32;
    sight_line_clear(
        terrain,
        roster,
        from,
        to,
        from_height,
        to_height,
        &[from_actor.id, to_actor.id],
    )
}

/// March the segment between two tile centers and test every intermediate
/// sample against terrain and occupants.
///
/// A sample blocks when it falls out of bounds; when its terrain blocks
/// sight and reaches the interpolated line height (a blocker with no
/// recorded elevation blocks at any height); or when a living occupant not
/// in `ignore` stands taller than the line at that point.
#[allow(clippy::too_many_arguments)]
pub fn sight_line_clear(
    terrain: &impl TerrainView,
    roster: &Roster,
    from: TileCoord,
    to: TileCoord,
    from_height: f32,
    to_height: f32,
    ignore: &[ActorId],
) -> bool {
    let (x0, y0) = from.center();
    let (x1, y1) = to.center();
    let dx = x1 - x0;
    let dy = y1 - y0;
    let length = (dx * dx + dy * dy).sqrt();
    if length < SIGHT_SAMPLE_STEP {
        return true;
    }

    let steps = (length / SIGHT_SAMPLE_STEP).ceil() as i32;
    for i in 1..steps {
        let t = i as f32 / steps as f32;
        let sample = TileCoord::new(
            (x0 + dx * t).floor() as i32,
            (y0 + dy * t).floor() as i32,
        );
        if sample == from || sample == to {
            continue;
        }
        if !terrain.in_bounds(sample) {
            return false;
        }

        let line_height = from_height + (to_height - from_height) * t;

        if terrain.blocks_sight_at(sample) {
            let height = terrain.height_at(sample);
            if height == 0 || height as f32 >= line_height {
                return false;
            }
        }

        if let Some(occupant) = roster.living_occupant(sample) {
            if !ignore.contains(&occupant.id) {
                let effective =
                    (terrain.height_at(sample) + occupant.footprint.body_height()) as f32;
                if effective > line_height {
                    return false;
                }
            }
        }
    }

    true
}

/// Tile-discrete companion: unit steps along the segment, blocked by any
/// intermediate sight-blocking tile or bounds violation. Agrees with the
/// continuous march when no elevation data is in play.
pub fn sight_line_clear_tiles(terrain: &impl TerrainView, from: TileCoord, to: TileCoord) -> bool {
    let samples = from.segment_tiles(&to);
    samples
        .iter()
        .skip(1)
        .take(samples.len().saturating_sub(2))
        .all(|tile| terrain.in_bounds(*tile) && !terrain.blocks_sight_at(*tile))
}
