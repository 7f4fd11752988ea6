//! Actor roster: the full set of creatures in the battle
//!
//! The roster enforces the structural invariants (unique ids, no
//! overlapping living footprints); violating them is a programmer error
//! in the surrounding system and the operation is refused.

use serde::{Deserialize, Serialize};

use crate::battle::actor::Actor;
use crate::battle::grid::TileCoord;
use crate::core::error::BattleError;
use crate::core::types::ActorId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    actors: Vec<Actor>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an actor, refusing duplicate ids and overlapping living footprints
    pub fn add(&mut self, actor: Actor) -> Result<(), BattleError> {
        if self.actors.iter().any(|a| a.id == actor.id) {
            return Err(BattleError::DuplicateActorId(actor.id));
        }
        if actor.is_alive() {
            if let Some(origin) = actor.tile() {
                for other in self.actors.iter().filter(|a| a.is_alive()) {
                    if actor.footprint_overlaps(origin, other) {
                        return Err(BattleError::OverlappingFootprint {
                            x: origin.x,
                            y: origin.y,
                        });
                    }
                }
            }
        }
        self.actors.push(actor);
        Ok(())
    }

    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.iter_mut().find(|a| a.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Actor> {
        self.actors.iter().filter(|a| a.is_alive())
    }

    pub fn len(&self) -> usize {
        self.actors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// The living actor whose footprint covers this tile, if any.
    /// Dead actors never block.
    pub fn living_occupant(&self, tile: TileCoord) -> Option<&Actor> {
        self.living().find(|a| a.occupies(tile))
    }

    /// Start-of-turn reset for one actor
    pub fn reset_turn(&mut self, id: ActorId) -> Result<(), BattleError> {
        let actor = self
            .get_mut(id)
            .ok_or(BattleError::UnknownActor(id))?;
        actor.reset_turn();
        Ok(())
    }
}
