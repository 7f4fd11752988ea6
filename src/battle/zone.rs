//! Zones of control and engagement
//!
//! Every living, placed actor controls the tiles within its zone radius
//! (Chebyshev). A hostile actor entering the zone becomes engaged; passing
//! through without stopping is illegal.

use crate::battle::actor::{is_hostile, Actor};
use crate::battle::grid::TileCoord;
use crate::battle::roster::Roster;

/// Is this tile inside the actor's zone of control?
///
/// Dead or unplaced actors control nothing. `range` overrides the actor's
/// own zone radius when supplied.
pub fn is_in_zone(tile: TileCoord, actor: &Actor, range: Option<u32>) -> bool {
    if !actor.is_alive() {
        return false;
    }
    let radius = range.unwrap_or(actor.zone_radius);
    match actor.distance_to_tile(tile) {
        Some(distance) => distance <= radius,
        None => false,
    }
}

/// All hostile, living, placed actors whose zone contains the subject's
/// position.
///
/// With `ignore_already_engaged`, hostiles that are themselves engaged by a
/// third party are excluded, so chained engagements are not double-counted.
pub fn engaging_actors<'a>(
    subject: &Actor,
    roster: &'a Roster,
    ignore_already_engaged: bool,
) -> Vec<&'a Actor> {
    let subject_tiles = subject.occupied_tiles();
    if subject_tiles.is_empty() || !subject.is_alive() {
        return Vec::new();
    }

    roster
        .living()
        .filter(|hostile| {
            hostile.id != subject.id
                && is_hostile(hostile.faction, subject.faction)
                && subject_tiles
                    .iter()
                    .any(|tile| is_in_zone(*tile, hostile, None))
        })
        .filter(|hostile| {
            if !ignore_already_engaged {
                return true;
            }
            // Keep only hostiles not already tied up by someone else
            !engaged_by_third_party(hostile, subject, roster)
        })
        .collect()
}

fn engaged_by_third_party(hostile: &Actor, subject: &Actor, roster: &Roster) -> bool {
    let hostile_tiles = hostile.occupied_tiles();
    roster.living().any(|third| {
        third.id != subject.id
            && third.id != hostile.id
            && is_hostile(third.faction, hostile.faction)
            && hostile_tiles
                .iter()
                .any(|tile| is_in_zone(*tile, third, None))
    })
}

/// Is the subject currently engaged at its live position?
pub fn is_engaged(subject: &Actor, roster: &Roster) -> bool {
    !engaging_actors(subject, roster, false).is_empty()
}

/// Does the straight segment between two tiles pass through the actor's
/// zone of control?
///
/// Only intermediate unit-step samples count: endpoints landing inside a
/// zone are always permitted (that is how engagement begins).
pub fn path_crosses_zone(from: TileCoord, to: TileCoord, actor: &Actor) -> bool {
    let samples = from.segment_tiles(&to);
    samples
        .iter()
        .skip(1)
        .take(samples.len().saturating_sub(2))
        .any(|sample| is_in_zone(*sample, actor, None))
}

/// Legality of a single step while engaged: one engaged move per turn, the
/// step must be Chebyshev-adjacent, and the destination must stay inside
/// every engaging actor's zone.
pub fn engaged_move_is_legal(mover: &Actor, dest: TileCoord, engagers: &[&Actor]) -> bool {
    if mover.has_moved_while_engaged {
        return false;
    }
    let Some(current) = mover.tile() else {
        return false;
    };
    if current.chebyshev_distance(&dest) != 1 {
        return false;
    }
    engagers
        .iter()
        .all(|engager| is_in_zone(dest, engager, None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::actor::Faction;
    use crate::battle::equipment::Weapon;
    use crate::battle::grid::Facing;

    fn crown(x: i32, y: i32) -> Actor {
        Actor::new("Knight", Faction::Crown, Weapon::sword()).at(TileCoord::new(x, y), Facing::North)
    }

    fn horde(x: i32, y: i32) -> Actor {
        Actor::new("Reaver", Faction::Horde, Weapon::sword()).at(TileCoord::new(x, y), Facing::South)
    }

    #[test]
    fn test_zone_is_chebyshev_radius() {
        let actor = crown(5, 5);
        assert!(is_in_zone(TileCoord::new(6, 6), &actor, None));
        assert!(is_in_zone(TileCoord::new(5, 5), &actor, None));
        assert!(!is_in_zone(TileCoord::new(7, 5), &actor, None));
        assert!(is_in_zone(TileCoord::new(7, 5), &actor, Some(2)));
    }

    #[test]
    fn test_dead_or_unplaced_actor_controls_nothing() {
        let mut dead = crown(5, 5);
        dead.vitality = 0;
        assert!(!is_in_zone(TileCoord::new(5, 5), &dead, None));

        let reserve = Actor::new("Reserve", Faction::Crown, Weapon::sword());
        assert!(!is_in_zone(TileCoord::new(0, 0), &reserve, None));
    }

    #[test]
    fn test_engaging_actors_hostile_only() {
        let mut roster = Roster::new();
        let subject = crown(5, 5);
        roster.add(subject.clone()).unwrap();
        roster.add(crown(6, 5)).unwrap(); // friendly, adjacent
        roster.add(horde(5, 6)).unwrap(); // hostile, adjacent
        roster.add(horde(9, 9)).unwrap(); // hostile, far away

        let engagers = engaging_actors(&subject, &roster, false);
        assert_eq!(engagers.len(), 1);
        assert_eq!(engagers[0].tile(), Some(TileCoord::new(5, 6)));
    }

    #[test]
    fn test_ignore_already_engaged_excludes_tied_up_hostiles() {
        let mut roster = Roster::new();
        let subject = crown(5, 5);
        let ally = crown(3, 7);
        let reaver = horde(4, 6); // adjacent to both subject and ally
        roster.add(subject.clone()).unwrap();
        roster.add(ally).unwrap();
        roster.add(reaver).unwrap();

        assert_eq!(engaging_actors(&subject, &roster, false).len(), 1);
        // The reaver is already engaged by the ally, so it is excluded
        assert!(engaging_actors(&subject, &roster, true).is_empty());
    }

    #[test]
    fn test_path_crosses_zone_intermediate_only() {
        let guard = horde(5, 5);
        // Segment passing straight through the guard's zone
        assert!(path_crosses_zone(
            TileCoord::new(2, 5),
            TileCoord::new(8, 5),
            &guard
        ));
        // Endpoint inside the zone is permitted
        assert!(!path_crosses_zone(
            TileCoord::new(2, 5),
            TileCoord::new(4, 5),
            &guard
        ));
        // Segment well clear of the zone
        assert!(!path_crosses_zone(
            TileCoord::new(0, 0),
            TileCoord::new(3, 0),
            &guard
        ));
    }

    #[test]
    fn test_engaged_move_requires_adjacency_and_zone() {
        let mover = crown(5, 5);
        let engager = horde(6, 5);
        let engagers = vec![&engager];

        // Adjacent and still inside the engager's zone
        assert!(engaged_move_is_legal(&mover, TileCoord::new(5, 6), &engagers));
        // Adjacent but leaves the zone
        assert!(!engaged_move_is_legal(&mover, TileCoord::new(4, 5), &engagers));
        // Inside the zone but not adjacent to the mover
        assert!(!engaged_move_is_legal(&mover, TileCoord::new(7, 6), &engagers));
    }

    #[test]
    fn test_one_engaged_move_per_turn() {
        let mut mover = crown(5, 5);
        mover.has_moved_while_engaged = true;
        let engager = horde(6, 5);
        let engagers = vec![&engager];

        for neighbor in TileCoord::new(5, 5).neighbors() {
            assert!(!engaged_move_is_legal(&mover, neighbor, &engagers));
        }
    }
}
