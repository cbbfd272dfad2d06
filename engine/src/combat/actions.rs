use serde::Serialize;

use crate::ability::Ability;
use crate::dice::Roller;
use crate::entity::Entity;

/// Every landed hit deals at least this much.
pub const MIN_HIT_DAMAGE: i32 = 1;
pub const ATTACK_DIE: u32 = 20;
pub const DAMAGE_DIE: u32 = 6;

/// How one swing played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttackOutcome {
    /// Natural d20 face.
    pub roll: i32,
    pub modifier: i32,
    pub total: i32,
    pub armor_class: i32,
    pub hit: bool,
    /// Natural damage die face, `None` on a miss.
    pub damage_roll: Option<i32>,
    /// Damage dealt (may exceed what the defender had left); 0 on a miss.
    pub damage: i32,
}

/// d20 + STR against the defender's AC (meeting it hits), then
/// `max(1, d6 + STR)` damage on a hit. The defender is only touched on a hit.
pub fn resolve_attack<R: Roller + ?Sized>(
    dice: &mut R,
    attacker: &Entity,
    defender: &mut Entity,
    mut log: impl FnMut(String),
) -> AttackOutcome {
    let modifier = attacker.modifier(Ability::Str);
    let roll = dice.roll(ATTACK_DIE, 1).total;
    let total = roll + modifier;
    let armor_class = defender.armor_class();
    let hit = total >= armor_class;

    log(format!(
        "[ATTACK][{} → {}] d20={} {:+} = {} vs AC {} → {}",
        attacker.name(),
        defender.name(),
        roll,
        modifier,
        total,
        armor_class,
        if hit { "HIT" } else { "MISS" }
    ));

    if !hit {
        return AttackOutcome { roll, modifier, total, armor_class, hit, damage_roll: None, damage: 0 };
    }

    let damage_roll = dice.roll(DAMAGE_DIE, 1).total;
    let raw = damage_roll + modifier;
    let damage = raw.max(MIN_HIT_DAMAGE);
    if raw < MIN_HIT_DAMAGE {
        log(format!(
            "[DMG][{}] d6={} {:+} = {} (min {}) = {}",
            attacker.name(),
            damage_roll,
            modifier,
            raw,
            MIN_HIT_DAMAGE,
            damage
        ));
    } else {
        log(format!("[DMG][{}] d6={} {:+} = {}", attacker.name(), damage_roll, modifier, damage));
    }

    let before = defender.hit_points();
    defender.take_damage(damage);
    log(format!(
        "[HP][{}] {} → {} / {}",
        defender.name(),
        before,
        defender.hit_points(),
        defender.max_hit_points()
    ));

    AttackOutcome {
        roll,
        modifier,
        total,
        armor_class,
        hit,
        damage_roll: Some(damage_roll),
        damage,
    }
}
