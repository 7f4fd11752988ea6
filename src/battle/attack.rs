//! Combat resolution
//!
//! An attack validates first (fails closed with a distinct reason per
//! refusal), then resolves in three fixed phases: to-hit, block, damage.
//! Exactly one action is consumed per attempt, hit or miss, and every die
//! comes from the injected roller so resolutions replay under a fixed seed.

use crate::battle::actor::{is_hostile, Actor};
use crate::battle::constants::{
    BACK_ATTACK_BONUS, CRITICAL_BLOCK_PENALTY, HIGH_GROUND_BONUS, MAX_MELEE_HEIGHT_GAP,
    RANGED_HIT_THRESHOLD,
};
use crate::battle::dice::{CritLevel, DiceRoller, TwoDice};
use crate::battle::grid::Facing;
use crate::battle::roster::Roster;
use crate::battle::sight::actor_sees;
use crate::battle::terrain::TerrainView;
use crate::battle::zone::is_engaged;
use crate::core::error::AttackError;
use crate::core::types::ActorId;

/// Everything that happened during one attack
#[derive(Debug, Clone)]
pub struct AttackReport {
    pub attacker: ActorId,
    pub target: ActorId,
    pub hit: bool,
    pub crit: CritLevel,
    pub back_attack: bool,
    pub blocked: bool,
    pub damage: u32,
    pub target_defeated: bool,
    pub messages: Vec<String>,
}

impl AttackReport {
    /// A landed attack lets the acting group refresh its spent members.
    /// The refresh itself is the turn orchestrator's job.
    pub fn rallies_group(&self) -> bool {
        self.hit
    }
}

/// Refuse the attack unless every legality condition holds.
///
/// Checks run in a fixed order so callers always see the same reason for
/// the same board state. Pass `None` for terrain when no positional map
/// data exists; sight and elevation checks are skipped in that case.
pub fn validate_attack<T: TerrainView>(
    terrain: Option<&T>,
    roster: &Roster,
    attacker_id: ActorId,
    target_id: ActorId,
) -> Result<(), AttackError> {
    let attacker = roster
        .get(attacker_id)
        .ok_or(AttackError::UnknownActor(attacker_id))?;
    let target = roster
        .get(target_id)
        .ok_or(AttackError::UnknownActor(target_id))?;

    if !attacker.is_alive() {
        return Err(AttackError::AttackerDead);
    }
    if attacker.actions_remaining == 0 {
        return Err(AttackError::NoActionsRemaining);
    }
    if !target.is_alive() {
        return Err(AttackError::TargetDead);
    }
    if !is_hostile(attacker.faction, target.faction) {
        return Err(AttackError::FriendlyFire);
    }
    let attacker_tile = attacker.tile().ok_or(AttackError::AttackerUnplaced)?;
    let target_tile = target.tile().ok_or(AttackError::TargetUnplaced)?;

    // Footprint-aware: a large creature is in reach of any covered tile
    let distance = attacker.distance_to(target).unwrap_or(u32::MAX);
    let max_range = attacker.weapon.max_range();
    if distance > max_range {
        return Err(AttackError::OutOfRange {
            distance,
            max_range,
        });
    }

    if attacker.weapon.is_ranged() && is_engaged(attacker, roster) {
        return Err(AttackError::RangedWhileEngaged);
    }

    if let Some(terrain) = terrain {
        if !actor_sees(terrain, roster, attacker, target) {
            return Err(AttackError::NoLineOfSight);
        }
        if !attacker.weapon.is_ranged() {
            let gap = terrain.height_at(attacker_tile) - terrain.height_at(target_tile);
            if gap.abs() > MAX_MELEE_HEIGHT_GAP {
                return Err(AttackError::ElevationTooSteep);
            }
        }
    }

    Ok(())
}

/// Is the attacker striking from the defender's back arc?
///
/// Evaluated against where the attacker started its turn, not where it
/// stands now: circling a defender mid-turn does not open its back.
fn is_back_attack(attacker: &Actor, defender: &Actor) -> bool {
    let Some(defender_tile) = defender.tile() else {
        return false;
    };
    let Some(defender_facing) = defender.facing() else {
        return false;
    };
    let Some(anchor) = attacker.turn_start_tile.or(attacker.tile()) else {
        return false;
    };
    match Facing::toward(anchor, defender_tile) {
        Some(direction) => defender_facing.back_arc().contains(&direction),
        None => false,
    }
}

/// Validate and resolve one attack, mutating attacker and target state.
pub fn execute_attack<T: TerrainView>(
    terrain: Option<&T>,
    roster: &mut Roster,
    dice: &mut impl DiceRoller,
    attacker_id: ActorId,
    target_id: ActorId,
) -> Result<AttackReport, AttackError> {
    validate_attack(terrain, roster, attacker_id, target_id)?;

    // Validation guarantees both exist, are alive and placed
    let attacker = roster.get(attacker_id).ok_or(AttackError::UnknownActor(attacker_id))?;
    let target = roster.get(target_id).ok_or(AttackError::UnknownActor(target_id))?;

    let attacker_tile = attacker.tile().ok_or(AttackError::AttackerUnplaced)?;
    let target_tile = target.tile().ok_or(AttackError::TargetUnplaced)?;
    let face_target = Facing::toward(attacker_tile, target_tile);

    let ranged = attacker.weapon.is_ranged();
    let back_attack = is_back_attack(attacker, target);
    let distance = attacker.distance_to(target).unwrap_or(u32::MAX);

    let mut messages = Vec::new();

    // Phase 1: to-hit
    let (hit, crit) = if ranged {
        let roll = TwoDice::roll(dice);
        // Criticals need a controlled shot: only inside half range
        let crit = if distance * 2 <= attacker.weapon.max_range() {
            roll.crit_level()
        } else {
            CritLevel::None
        };
        // Ranged accuracy is all in the shooter: the weapon's to-hit
        // modifier applies to melee only
        let total = roll.total() as i32 + attacker.attributes.effective_ranged();
        let hit = crit == CritLevel::Double || total >= RANGED_HIT_THRESHOLD;
        messages.push(format!(
            "{} shoots at {} (total {})",
            attacker.name, target.name, total
        ));
        (hit, crit)
    } else {
        let mut attacker_bonus =
            attacker.attributes.effective_combat() + attacker.weapon.to_hit_mod;
        let mut defender_bonus =
            target.attributes.effective_combat() + target.weapon.to_hit_mod;
        if let Some(terrain) = terrain {
            let gap = terrain.height_at(attacker_tile) - terrain.height_at(target_tile);
            if gap == 1 {
                attacker_bonus += HIGH_GROUND_BONUS;
            } else if gap == -1 {
                defender_bonus += HIGH_GROUND_BONUS;
            }
        }
        if back_attack {
            attacker_bonus += BACK_ATTACK_BONUS;
        }

        let attacker_roll = TwoDice::roll(dice);
        let defender_roll = TwoDice::roll(dice);
        let crit = attacker_roll.crit_level();
        let attacker_total = attacker_roll.total() as i32 + attacker_bonus;
        let defender_total = defender_roll.total() as i32 + defender_bonus;

        let hit = if crit == CritLevel::Double && defender_roll.crit_level() != CritLevel::Double {
            true
        } else if attacker_total != defender_total {
            attacker_total > defender_total
        } else {
            let attacker_agility = attacker.attributes.effective_agility();
            let defender_agility = target.attributes.effective_agility();
            if attacker_agility != defender_agility {
                attacker_agility > defender_agility
            } else {
                // Last resort: the shield-less side wins the tie
                target.shield.is_some() && attacker.shield.is_none()
            }
        };
        messages.push(format!(
            "{} attacks {} ({} vs {})",
            attacker.name, target.name, attacker_total, defender_total
        ));
        (hit, crit)
    };

    tracing::debug!(
        attacker = %attacker.name,
        target = %target.name,
        hit,
        crit = ?crit,
        back_attack,
        "to-hit resolved"
    );

    // Action is spent on the attempt, hit or miss
    let attacker_strength = attacker.attributes.effective_strength();
    let weapon_dice = attacker.weapon.damage_dice;
    let armor_piercing = attacker.weapon.armor_piercing;
    let target_armor = target.armor;
    let target_shield = target.shield;
    let target_name = target.name.clone();

    {
        let attacker = roster
            .get_mut(attacker_id)
            .ok_or(AttackError::UnknownActor(attacker_id))?;
        attacker.spend_action();
        if let Some(facing) = face_target {
            attacker.set_facing(facing);
        }
    }

    if !hit {
        messages.push("Miss".into());
        return Ok(AttackReport {
            attacker: attacker_id,
            target: target_id,
            hit: false,
            crit,
            back_attack,
            blocked: false,
            damage: 0,
            target_defeated: false,
            messages,
        });
    }

    // Phase 2: block. Double criticals are unblockable, and a shield
    // cannot be brought around against a back attack.
    let mut blocked = false;
    if crit != CritLevel::Double && !back_attack {
        if let Some(shield) = target_shield {
            let mut threshold = shield.block_threshold as u32;
            if crit == CritLevel::Critical {
                threshold += CRITICAL_BLOCK_PENALTY;
            }
            let block_roll = dice.roll_d6();
            blocked = block_roll >= threshold;
            if blocked {
                messages.push(format!("{} blocks with their shield", target_name));
            }
        }
    }

    if blocked {
        return Ok(AttackReport {
            attacker: attacker_id,
            target: target_id,
            hit: true,
            crit,
            back_attack,
            blocked: true,
            damage: 0,
            target_defeated: false,
            messages,
        });
    }

    // Phase 3: damage
    let crit_dice = match crit {
        CritLevel::None => 0,
        CritLevel::Critical => 1,
        CritLevel::Double => 2,
    };
    let strength_dice = if ranged { 0 } else { attacker_strength as u32 };
    let pool = weapon_dice + crit_dice + strength_dice;
    let armor_value = target_armor - armor_piercing;

    let mut damage = 0;
    for _ in 0..pool {
        if dice.roll_d6() as i32 >= armor_value {
            damage += 1;
        }
    }
    messages.push(format!("{} takes {} damage", target_name, damage));

    let target = roster
        .get_mut(target_id)
        .ok_or(AttackError::UnknownActor(target_id))?;
    target.take_damage(damage);
    let target_defeated = !target.is_alive();
    if target_defeated {
        messages.push(format!("{} is defeated", target_name));
    }
    tracing::debug!(damage, target_defeated, "damage applied");

    Ok(AttackReport {
        attacker: attacker_id,
        target: target_id,
        hit: true,
        crit,
        back_attack,
        blocked: false,
        damage,
        target_defeated,
        messages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::actor::{Attributes, Faction};
    use crate::battle::dice::ScriptedDice;
    use crate::battle::equipment::{Shield, Weapon};
    use crate::battle::grid::TileCoord;
    use crate::battle::map::BattleMap;

    fn knight(x: i32, y: i32) -> Actor {
        Actor::new("Knight", Faction::Crown, Weapon::sword())
            .with_attributes(Attributes::new(2, 1, 1, 2))
            .at(TileCoord::new(x, y), Facing::East)
    }

    fn reaver(x: i32, y: i32) -> Actor {
        Actor::new("Reaver", Faction::Horde, Weapon::sword())
            .with_attributes(Attributes::new(1, 1, 1, 1))
            .at(TileCoord::new(x, y), Facing::West)
    }

    fn setup(attacker: Actor, target: Actor) -> (Roster, ActorId, ActorId) {
        let mut roster = Roster::new();
        let (a, t) = (attacker.id, target.id);
        roster.add(attacker).unwrap();
        roster.add(target).unwrap();
        (roster, a, t)
    }

    #[test]
    fn test_friendly_fire_refused() {
        let ally = Actor::new("Squire", Faction::Crown, Weapon::sword())
            .at(TileCoord::new(1, 0), Facing::West);
        let (roster, a, t) = setup(knight(0, 0), ally);
        let err = validate_attack::<BattleMap>(None, &roster, a, t).unwrap_err();
        assert_eq!(err, AttackError::FriendlyFire);
    }

    #[test]
    fn test_melee_out_of_reach_refused() {
        let (roster, a, t) = setup(knight(0, 0), reaver(3, 0));
        let err = validate_attack::<BattleMap>(None, &roster, a, t).unwrap_err();
        assert_eq!(
            err,
            AttackError::OutOfRange {
                distance: 3,
                max_range: 1
            }
        );
    }

    #[test]
    fn test_dead_attacker_refused_before_range() {
        let mut attacker = knight(0, 0);
        attacker.vitality = 0;
        let (roster, a, t) = setup(attacker, reaver(5, 5));
        let err = validate_attack::<BattleMap>(None, &roster, a, t).unwrap_err();
        assert_eq!(err, AttackError::AttackerDead);
    }

    #[test]
    fn test_no_actions_refused() {
        let mut attacker = knight(0, 0);
        attacker.actions_remaining = 0;
        let (roster, a, t) = setup(attacker, reaver(1, 0));
        let err = validate_attack::<BattleMap>(None, &roster, a, t).unwrap_err();
        assert_eq!(err, AttackError::NoActionsRemaining);
    }

    #[test]
    fn test_ranged_while_engaged_refused() {
        let archer = Actor::new("Archer", Faction::Crown, Weapon::bow())
            .at(TileCoord::new(0, 0), Facing::East);
        let (mut roster, a, _) = setup(archer, reaver(5, 0));
        let adjacent = reaver(1, 0);
        let t = adjacent.id;
        roster.add(adjacent).unwrap();
        let err = validate_attack::<BattleMap>(None, &roster, a, t).unwrap_err();
        assert_eq!(err, AttackError::RangedWhileEngaged);
    }

    #[test]
    fn test_no_line_of_sight_refused() {
        use crate::battle::terrain::TerrainKind;
        let mut map = BattleMap::new(10, 3);
        map.set_terrain(TileCoord::new(3, 1), TerrainKind::Wall);
        let archer = Actor::new("Archer", Faction::Crown, Weapon::bow())
            .at(TileCoord::new(0, 1), Facing::East);
        let (roster, a, t) = setup(archer, reaver(6, 1));
        let err = validate_attack(Some(&map), &roster, a, t).unwrap_err();
        assert_eq!(err, AttackError::NoLineOfSight);
    }

    #[test]
    fn test_melee_elevation_gap_refused() {
        let mut map = BattleMap::new(5, 5);
        map.set_height(TileCoord::new(1, 0), 2);
        let (roster, a, t) = setup(knight(0, 0), reaver(1, 0));
        let err = validate_attack(Some(&map), &roster, a, t).unwrap_err();
        assert_eq!(err, AttackError::ElevationTooSteep);
    }

    #[test]
    fn test_melee_hit_applies_damage_and_spends_action() {
        // Knight (combat 2) rolls 5+4=11, reaver (combat 1) rolls 2+2=5.
        // Damage pool: 1 weapon die + 1 strength = 2 dice vs armor 3.
        let (mut roster, a, t) = setup(knight(0, 0), reaver(1, 0));
        let mut dice = ScriptedDice::new(&[5, 4, 2, 2, 4, 2]);

        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert!(!report.blocked);
        assert_eq!(report.damage, 1);
        assert!(!report.target_defeated);
        assert!(report.rallies_group());
        assert!(dice.exhausted());

        let attacker = roster.get(a).unwrap();
        assert_eq!(attacker.actions_remaining, 0);
        assert_eq!(attacker.facing(), Some(Facing::East));
        assert_eq!(roster.get(t).unwrap().vitality, 4);
    }

    #[test]
    fn test_melee_miss_still_spends_action() {
        let (mut roster, a, t) = setup(knight(0, 0), reaver(1, 0));
        // Knight total 2+1+2 = 5, reaver total 5+4+1 = 10
        let mut dice = ScriptedDice::new(&[2, 1, 5, 4]);

        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(!report.hit);
        assert_eq!(report.damage, 0);
        assert!(!report.rallies_group());
        assert_eq!(roster.get(a).unwrap().actions_remaining, 0);
        assert_eq!(roster.get(t).unwrap().vitality, 5);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_tie_broken_by_agility() {
        // Equal totals: knight 3+3+2 = 8, reaver 4+3+1 = 8.
        // Knight agility 2 beats reaver agility 1.
        let mut defender = reaver(1, 0);
        defender.set_facing(Facing::East);
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        let mut dice = ScriptedDice::new(&[3, 3, 4, 3, 4, 4]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
    }

    #[test]
    fn test_tie_favors_shieldless_side() {
        // Same attributes and totals on both sides; defender carries a shield
        let attacker = Actor::new("Duelist", Faction::Crown, Weapon::sword())
            .at(TileCoord::new(0, 0), Facing::East);
        let defender = Actor::new("Guard", Faction::Horde, Weapon::sword())
            .with_shield(Shield::tower_shield())
            .at(TileCoord::new(1, 0), Facing::East);
        let (mut roster, a, t) = setup(attacker, defender);
        // Tied at 3+3 vs 3+3, block roll 1 fails, two damage dice miss armor
        let mut dice = ScriptedDice::new(&[3, 3, 3, 3, 1, 2, 2]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
    }

    #[test]
    fn test_shield_block_cancels_damage() {
        let mut defender = reaver(1, 0).with_shield(Shield::tower_shield());
        defender.set_facing(Facing::East);
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        // Hit 5+4 vs 2+2, block roll 4 meets threshold 4
        let mut dice = ScriptedDice::new(&[5, 4, 2, 2, 4]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert!(report.blocked);
        assert_eq!(report.damage, 0);
        assert_eq!(roster.get(t).unwrap().vitality, 5);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_ordinary_crit_raises_block_threshold() {
        let mut defender = reaver(1, 0).with_shield(Shield::round_shield());
        defender.set_facing(Facing::East);
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        // Attacker rolls 6+2: one max face, ordinary critical. Block roll 5
        // would normally block (threshold 5) but the crit raises it to 6.
        // Damage: 1 weapon + 1 crit + 1 strength = 3 dice vs armor 3.
        let mut dice = ScriptedDice::new(&[6, 2, 2, 2, 5, 3, 4, 1]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert_eq!(report.crit, CritLevel::Critical);
        assert!(!report.blocked);
        assert_eq!(report.damage, 2);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_double_crit_is_unblockable_auto_hit() {
        let defender = reaver(1, 0)
            .with_shield(Shield::tower_shield())
            .with_attributes(Attributes::new(10, 1, 1, 1));
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        // 6+6 auto-hits despite the defender's huge total; no block roll.
        // Damage: 1 weapon + 2 crit + 1 strength = 4 dice vs armor 3.
        let mut dice = ScriptedDice::new(&[6, 6, 5, 4, 3, 3, 2, 6]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert_eq!(report.crit, CritLevel::Double);
        assert!(!report.blocked);
        assert_eq!(report.damage, 3);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_defender_double_crit_forces_normal_resolution() {
        let defender = reaver(1, 0).with_attributes(Attributes::new(5, 1, 1, 1));
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        // Both roll 6+6; defender bonus 5 beats attacker bonus 2
        let mut dice = ScriptedDice::new(&[6, 6, 6, 6]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(!report.hit);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_back_attack_disables_shield_and_adds_bonus() {
        // Reaver at (1,0) faces West, straight at the knight on (0,0).
        // The knight's turn started at (0,0): the direction from there to
        // the reaver is East, inside the west-facer's back arc.
        let defender = reaver(1, 0).with_shield(Shield::tower_shield());
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        // Totals: 3+3 +2 combat +1 back = 9 vs 3+4 +1 = 8. No block roll.
        let mut dice = ScriptedDice::new(&[3, 3, 3, 4, 6, 1]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.back_attack);
        assert!(report.hit);
        assert!(!report.blocked);
        assert_eq!(report.damage, 1);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_facing_attacker_is_not_a_back_attack() {
        let defender = reaver(1, 0);
        let mut attacker = knight(2, 0);
        attacker.set_facing(Facing::West);
        attacker.turn_start_tile = Some(TileCoord::new(2, 0));
        let (mut roster, a, t) = setup(attacker, defender);
        // Reaver faces West; the knight attacks from the East, the front
        let mut dice = ScriptedDice::new(&[5, 4, 2, 2, 1, 1]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(!report.back_attack);
    }

    #[test]
    fn test_high_ground_bonus() {
        let mut map = BattleMap::new(5, 5);
        map.set_height(TileCoord::new(0, 0), 1);
        // Defender faces East (no back arc in play) and would win a flat
        // 8 vs 8 tie on agility 3; only the high-ground +1 lands the hit
        let mut defender = reaver(1, 0).with_attributes(Attributes::new(1, 1, 1, 3));
        defender.set_facing(Facing::East);
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        // Totals: 3+3 +2 combat +1 high ground = 9 vs 4+3 +1 = 8
        let mut dice = ScriptedDice::new(&[3, 3, 4, 3, 1, 1]);
        let report = execute_attack(Some(&map), &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_defender_on_high_ground_gets_the_bonus() {
        let mut map = BattleMap::new(5, 5);
        map.set_height(TileCoord::new(1, 0), 1);
        let mut defender = reaver(1, 0).with_attributes(Attributes::new(1, 1, 1, 3));
        defender.set_facing(Facing::East);
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        // On flat ground this would be 8 vs 7, a clean hit. The perched
        // defender's +1 ties it at 8 and agility 3 keeps the knight out.
        // A miss also proves the attacker got no bonus of its own: one
        // side stands higher, so exactly one side is ever paid.
        let mut dice = ScriptedDice::new(&[3, 3, 3, 3]);
        let report = execute_attack(Some(&map), &mut roster, &mut dice, a, t).unwrap();
        assert!(!report.hit);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_damage_counts_dice_meeting_armor() {
        // Three damage dice against effective armor 4: faces 4, 5, 2
        // yield exactly two damage points.
        let attacker = Actor::new("Brute", Faction::Wild, Weapon::greataxe())
            .with_attributes(Attributes::new(4, 1, 1, 1))
            .at(TileCoord::new(0, 0), Facing::East);
        let defender = Actor::new("Sentinel", Faction::Crown, Weapon::sword())
            .with_armor(5)
            .at(TileCoord::new(1, 0), Facing::North);
        let (mut roster, a, t) = setup(attacker, defender);
        // Greataxe: 2 dice + strength 1 = 3 dice, ap 1 so armor 5 -> 4.
        // To-hit: 5+4 +4 -1 = 12 vs 2+2 +1 = 5.
        let mut dice = ScriptedDice::new(&[5, 4, 2, 2, 4, 5, 2]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert_eq!(report.damage, 2);
        assert_eq!(roster.get(t).unwrap().vitality, 3);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_lethal_damage_defeats_target() {
        let defender = reaver(1, 0).with_vitality(1).with_armor(1);
        let (mut roster, a, t) = setup(knight(0, 0), defender);
        let mut dice = ScriptedDice::new(&[5, 4, 2, 2, 1, 1]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.target_defeated);
        assert!(!roster.get(t).unwrap().is_alive());
    }

    #[test]
    fn test_ranged_hits_on_ten_plus() {
        let archer = Actor::new("Archer", Faction::Crown, Weapon::bow())
            .with_attributes(Attributes::new(1, 2, 1, 1))
            .at(TileCoord::new(0, 0), Facing::East);
        let (mut roster, a, t) = setup(archer, reaver(6, 0));
        // 5+3 +2 ranged = 10: hit. One weapon die, no strength for ranged.
        let mut dice = ScriptedDice::new(&[5, 3, 4]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert_eq!(report.damage, 1);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_ranged_miss_below_threshold() {
        let archer = Actor::new("Archer", Faction::Crown, Weapon::bow())
            .at(TileCoord::new(0, 0), Facing::East);
        let (mut roster, a, t) = setup(archer, reaver(6, 0));
        // 4+3 +1 ranged = 8: miss
        let mut dice = ScriptedDice::new(&[4, 3]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(!report.hit);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_ranged_total_ignores_weapon_modifier() {
        // 5+4 with no ranged attribute totals 9, one short of the
        // threshold; the weapon contributes nothing to a ranged to-hit
        let sniper = Actor::new("Sniper", Faction::Crown, Weapon::crossbow())
            .with_attributes(Attributes::new(1, 0, 1, 1))
            .at(TileCoord::new(0, 0), Facing::East);
        let (mut roster, a, t) = setup(sniper, reaver(6, 0));
        let mut dice = ScriptedDice::new(&[5, 4]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(!report.hit);
        assert!(dice.exhausted());

        // The same roll with ranged 1 lands exactly on the threshold
        let marksman = Actor::new("Marksman", Faction::Crown, Weapon::crossbow())
            .with_attributes(Attributes::new(1, 1, 1, 1))
            .at(TileCoord::new(0, 0), Facing::East);
        let (mut roster, a, t) = setup(marksman, reaver(6, 0));
        // Armor 3 pierced down to 1, so the single damage die counts
        let mut dice = ScriptedDice::new(&[5, 4, 3]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert_eq!(report.damage, 1);
        assert!(dice.exhausted());
    }

    #[test]
    fn test_ranged_crit_only_within_half_range() {
        let archer = Actor::new("Archer", Faction::Crown, Weapon::bow())
            .with_attributes(Attributes::new(1, 2, 1, 1))
            .at(TileCoord::new(0, 0), Facing::East);

        // Beyond half range (6 > 5): 6+6 still hits on total but carries
        // no critical, so the shield may block it.
        let mut far = reaver(6, 0).with_shield(Shield::tower_shield());
        far.set_facing(Facing::East);
        let (mut roster, a, t) = setup(archer.clone(), far);
        let mut dice = ScriptedDice::new(&[6, 6, 4]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert_eq!(report.crit, CritLevel::None);
        assert!(report.blocked);

        // Within half range the same roll is an unblockable double critical
        let near = reaver(4, 0).with_shield(Shield::tower_shield());
        let (mut roster, a, t) = setup(archer, near);
        // 1 weapon die + 2 crit dice
        let mut dice = ScriptedDice::new(&[6, 6, 5, 1, 4]);
        let report = execute_attack::<BattleMap>(None, &mut roster, &mut dice, a, t).unwrap();
        assert!(report.hit);
        assert_eq!(report.crit, CritLevel::Double);
        assert!(!report.blocked);
        assert_eq!(report.damage, 2);
        assert!(dice.exhausted());
    }
}
