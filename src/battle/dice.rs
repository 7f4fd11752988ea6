//! Dice
//!
//! All randomness in combat flows through the `DiceRoller` trait so that
//! resolution is replayable: production rolls come from a seeded generator,
//! tests inject a scripted sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::battle::constants::DIE_FACES;

/// Uniform d6 source
pub trait DiceRoller {
    /// Roll one die, returning a face in 1..=6
    fn roll_d6(&mut self) -> u32;
}

/// Seeded production roller; the same seed replays the same battle
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DiceRoller for SeededDice {
    fn roll_d6(&mut self) -> u32 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Test roller replaying a fixed face sequence; panics when it runs dry
#[derive(Debug, Clone)]
pub struct ScriptedDice {
    faces: Vec<u32>,
    next: usize,
}

impl ScriptedDice {
    pub fn new(faces: &[u32]) -> Self {
        Self {
            faces: faces.to_vec(),
            next: 0,
        }
    }

    pub fn exhausted(&self) -> bool {
        self.next >= self.faces.len()
    }
}

impl DiceRoller for ScriptedDice {
    fn roll_d6(&mut self) -> u32 {
        let face = self.faces[self.next];
        self.next += 1;
        face
    }
}

/// Criticality of a 2d6 roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CritLevel {
    None,
    /// Exactly one die on its maximum face
    Critical,
    /// Both dice on their maximum face
    Double,
}

/// A 2d6 roll with its crit classification
#[derive(Debug, Clone, Copy)]
pub struct TwoDice {
    pub first: u32,
    pub second: u32,
}

impl TwoDice {
    pub fn roll(dice: &mut impl DiceRoller) -> Self {
        Self {
            first: dice.roll_d6(),
            second: dice.roll_d6(),
        }
    }

    pub fn total(&self) -> u32 {
        self.first + self.second
    }

    pub fn crit_level(&self) -> CritLevel {
        let maxed = [self.first, self.second]
            .iter()
            .filter(|&&f| f == DIE_FACES)
            .count();
        match maxed {
            2 => CritLevel::Double,
            1 => CritLevel::Critical,
            _ => CritLevel::None,
        }
    }
}
