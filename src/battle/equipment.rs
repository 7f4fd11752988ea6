//! Weapon and shield capabilities consumed by the combat pipeline
//!
//! Equipment here is purely numeric: reach, dice, and modifiers. Item data
//! definitions (weight, value, descriptions) live outside this core.

use serde::{Deserialize, Serialize};

/// Closed set of weapon categories, matched exhaustively
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Strikes adjacent tiles (reach in Chebyshev tiles, usually 1)
    Melee { reach: u32 },
    /// Projectiles out to a maximum range in tiles
    Ranged { range: u32 },
    /// Claws, fists, bite: melee at reach 1
    Natural,
}

/// A weapon's combat-relevant numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponKind,
    /// Added to the wielder's melee to-hit roll; ranged shots hit on the
    /// shooter's ranged attribute alone
    pub to_hit_mod: i32,
    /// Number of damage dice rolled on a hit
    pub damage_dice: u32,
    /// Lowers the armor value dice must reach
    pub armor_piercing: i32,
    pub two_handed: bool,
}

impl Weapon {
    pub fn is_ranged(&self) -> bool {
        matches!(self.kind, WeaponKind::Ranged { .. })
    }

    /// Maximum attack range in tiles (Chebyshev)
    pub fn max_range(&self) -> u32 {
        match self.kind {
            WeaponKind::Melee { reach } => reach,
            WeaponKind::Ranged { range } => range,
            WeaponKind::Natural => 1,
        }
    }

    pub fn sword() -> Self {
        Self {
            name: "Sword".into(),
            kind: WeaponKind::Melee { reach: 1 },
            to_hit_mod: 0,
            damage_dice: 1,
            armor_piercing: 0,
            two_handed: false,
        }
    }

    pub fn spear() -> Self {
        Self {
            name: "Spear".into(),
            kind: WeaponKind::Melee { reach: 2 },
            to_hit_mod: 0,
            damage_dice: 1,
            armor_piercing: 1,
            two_handed: true,
        }
    }

    pub fn greataxe() -> Self {
        Self {
            name: "Greataxe".into(),
            kind: WeaponKind::Melee { reach: 1 },
            to_hit_mod: -1,
            damage_dice: 2,
            armor_piercing: 1,
            two_handed: true,
        }
    }

    pub fn bow() -> Self {
        Self {
            name: "Bow".into(),
            kind: WeaponKind::Ranged { range: 10 },
            to_hit_mod: 0,
            damage_dice: 1,
            armor_piercing: 0,
            two_handed: true,
        }
    }

    pub fn crossbow() -> Self {
        Self {
            name: "Crossbow".into(),
            kind: WeaponKind::Ranged { range: 12 },
            to_hit_mod: 0,
            damage_dice: 1,
            armor_piercing: 2,
            two_handed: true,
        }
    }

    pub fn claws() -> Self {
        Self {
            name: "Claws".into(),
            kind: WeaponKind::Natural,
            to_hit_mod: 0,
            damage_dice: 1,
            armor_piercing: 0,
            two_handed: false,
        }
    }
}

/// Shield capability: a flat d6 threshold to cancel a hit
///
/// Shields are disabled against back attacks and double-critical hits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shield {
    /// Block succeeds when 1d6 rolls this value or higher
    pub block_threshold: u8,
}

impl Shield {
    pub fn buckler() -> Self {
        Self { block_threshold: 6 }
    }

    pub fn round_shield() -> Self {
        Self { block_threshold: 5 }
    }

    pub fn tower_shield() -> Self {
        Self { block_threshold: 4 }
    }
}
