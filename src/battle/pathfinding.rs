//! Reachability and single-target pathfinding
//!
//! Two searches share the same step-cost function: a budget-bounded
//! min-cost-first exploration of every reachable tile (step costs vary, so
//! plain BFS is not enough), and a capped A* toward a single goal used by
//! range and distance estimators.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::battle::actor::{is_hostile, Actor};
use crate::battle::constants::PATHFIND_EXPANSION_CAP;
use crate::battle::cost::{entry_cost, Mover};
use crate::battle::grid::TileCoord;
use crate::battle::roster::Roster;
use crate::battle::terrain::TerrainView;
use crate::battle::zone::{is_engaged, is_in_zone};
use crate::core::error::BattleError;
use crate::core::types::ActorId;

/// Node in the search frontier
#[derive(Debug, Clone)]
struct FrontierNode {
    tile: TileCoord,
    cost: f32,
}

impl PartialEq for FrontierNode {
    fn eq(&self, other: &Self) -> bool {
        self.tile == other.tile
    }
}

impl Eq for FrontierNode {}

impl Ord for FrontierNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for FrontierNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Every tile an actor can reach this turn, with the cost and the exact
/// path taken to each.
///
/// Computed fresh from the current world state; any mutation (movement,
/// death, terrain change) invalidates it.
#[derive(Debug, Clone, Default)]
pub struct Reachable {
    costs: HashMap<TileCoord, f32>,
    paths: HashMap<TileCoord, Vec<TileCoord>>,
}

impl Reachable {
    pub fn contains(&self, tile: TileCoord) -> bool {
        self.costs.contains_key(&tile)
    }

    pub fn cost(&self, tile: TileCoord) -> Option<f32> {
        self.costs.get(&tile).copied()
    }

    /// Ordered tile sequence from the start tile to `tile`, both inclusive
    pub fn path(&self, tile: TileCoord) -> Option<&[TileCoord]> {
        self.paths.get(&tile).map(|p| p.as_slice())
    }

    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.costs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }
}

/// Explore every tile the actor can reach within its remaining movement.
///
/// Min-cost-first relaxation over the 8 neighbor directions. A committed
/// path may end inside a hostile zone of control but never passes through
/// one. The start tile is excluded unless `include_start` is set.
pub fn reachable_tiles(
    terrain: &impl TerrainView,
    roster: &Roster,
    actor: &Actor,
    include_start: bool,
) -> Reachable {
    let Some(start) = actor.tile() else {
        return Reachable::default();
    };
    let budget = actor.movement_remaining;

    let hostiles: Vec<&Actor> = roster
        .living()
        .filter(|h| h.id != actor.id && is_hostile(h.faction, actor.faction))
        .collect();

    let mut best: HashMap<TileCoord, f32> = HashMap::new();
    let mut paths: HashMap<TileCoord, Vec<TileCoord>> = HashMap::new();
    let mut frontier = BinaryHeap::new();

    best.insert(start, 0.0);
    paths.insert(start, vec![start]);
    frontier.push(FrontierNode {
        tile: start,
        cost: 0.0,
    });

    while let Some(current) = frontier.pop() {
        let current_best = *best.get(&current.tile).unwrap_or(&f32::INFINITY);
        if current.cost > current_best {
            continue; // Stale frontier entry
        }

        // A path may stop inside a hostile zone but never continue out of
        // or through it; the zone tile stays a terminus
        if current.tile != start
            && hostiles
                .iter()
                .any(|h| is_in_zone(current.tile, h, None))
        {
            continue;
        }

        for neighbor in current.tile.neighbors() {
            let step = entry_cost(
                terrain,
                roster,
                current.tile,
                neighbor,
                actor.footprint,
                Some(Mover::with_remaining(actor, budget - current.cost)),
            );
            if step.is_infinite() {
                continue;
            }

            let tentative = current.cost + step;
            if tentative > budget {
                continue;
            }

            let neighbor_best = *best.get(&neighbor).unwrap_or(&f32::INFINITY);
            if tentative < neighbor_best {
                let mut path = paths[&current.tile].clone();
                path.push(neighbor);
                best.insert(neighbor, tentative);
                paths.insert(neighbor, path);
                frontier.push(FrontierNode {
                    tile: neighbor,
                    cost: tentative,
                });
            }
        }
    }

    if !include_start {
        best.remove(&start);
        paths.remove(&start);
    }

    tracing::debug!(
        actor = %actor.name,
        budget,
        tiles = best.len(),
        "reachability search finished"
    );

    Reachable {
        costs: best,
        paths,
    }
}

/// Single-target A* with a Manhattan heuristic over the same step costs,
/// evaluated without a movement-budget ceiling.
///
/// Expansion-capped so it always terminates; used for range and distance
/// estimation, not for the turn-movement path itself.
pub fn find_path(
    terrain: &impl TerrainView,
    roster: &Roster,
    actor: &Actor,
    goal: TileCoord,
) -> Option<Vec<TileCoord>> {
    let start = actor.tile()?;
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<TileCoord, TileCoord> = HashMap::new();
    let mut g_scores: HashMap<TileCoord, f32> = HashMap::new();

    g_scores.insert(start, 0.0);
    open_set.push(FrontierNode {
        tile: start,
        cost: start.manhattan_distance(&goal) as f32,
    });

    let mut expansions = 0;
    while let Some(current) = open_set.pop() {
        if current.tile == goal {
            return Some(reconstruct_path(&came_from, current.tile));
        }

        expansions += 1;
        if expansions > PATHFIND_EXPANSION_CAP {
            tracing::trace!(actor = %actor.name, "pathfinding expansion cap hit");
            return None;
        }

        let current_g = *g_scores.get(&current.tile).unwrap_or(&f32::INFINITY);

        for neighbor in current.tile.neighbors() {
            let step = entry_cost(
                terrain,
                roster,
                current.tile,
                neighbor,
                actor.footprint,
                Some(Mover::new(actor)),
            );
            if step.is_infinite() {
                continue;
            }

            let tentative_g = current_g + step;
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&f32::INFINITY);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.tile);
                g_scores.insert(neighbor, tentative_g);
                open_set.push(FrontierNode {
                    tile: neighbor,
                    cost: tentative_g + neighbor.manhattan_distance(&goal) as f32,
                });
            }
        }
    }

    None // No path found
}

/// Reconstruct path from came_from map
fn reconstruct_path(
    came_from: &HashMap<TileCoord, TileCoord>,
    mut current: TileCoord,
) -> Vec<TileCoord> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Commit a move to one of the reachable tiles: deduct the recorded cost,
/// update placement and facing, and mark the engaged-move flag when the
/// mover started the step engaged.
pub fn execute_move(
    roster: &mut Roster,
    id: ActorId,
    reachable: &Reachable,
    dest: TileCoord,
) -> Result<(), BattleError> {
    let actor = roster.get(id).ok_or(BattleError::UnknownActor(id))?;
    let cost = reachable
        .cost(dest)
        .ok_or(BattleError::UnreachableDestination { x: dest.x, y: dest.y })?;
    let path = reachable
        .path(dest)
        .ok_or(BattleError::UnreachableDestination { x: dest.x, y: dest.y })?;

    let was_engaged = is_engaged(actor, roster);
    let facing = path
        .iter()
        .rev()
        .nth(1)
        .and_then(|prev| crate::battle::grid::Facing::toward(*prev, dest))
        .or(actor.facing());

    let actor = roster
        .get_mut(id)
        .ok_or(BattleError::UnknownActor(id))?;
    actor.set_tile(dest);
    if let Some(facing) = facing {
        actor.set_facing(facing);
    }
    actor.movement_remaining = (actor.movement_remaining - cost).max(0.0);
    if was_engaged {
        actor.has_moved_while_engaged = true;
    }
    Ok(())
}
