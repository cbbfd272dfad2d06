//! Player character construction.

use crate::ability::Ability;
use crate::dice::Roller;
use crate::entity::{Entity, EntityKind};
use crate::error::EngineResult;
use crate::templates::RaceTable;

const STARTING_AC: i32 = 10;
const STARTING_LEVEL: u32 = 1;

/// Level 1, AC 10, all scores 10, `base_hp` hit points.
///
/// The race must exist in `races`; its canonical spelling is stored on the
/// character.
pub fn create_character(
    name: impl Into<String>,
    race: &str,
    base_hp: i32,
    races: &RaceTable,
) -> EngineResult<Entity> {
    let (race, _) = races.get(race)?;
    let kind = EntityKind::PlayerCharacter { race: race.to_string(), base_hp };
    Ok(Entity::new(name, base_hp, STARTING_AC, STARTING_LEVEL).with_kind(kind))
}

/// 3d6 for each ability in STR..CHA order, then recompute hit points.
pub fn roll_stats<R: Roller + ?Sized>(character: &mut Entity, dice: &mut R) {
    for ability in Ability::ALL {
        let roll = dice.roll(6, 3);
        tracing::debug!(name = character.name(), %ability, %roll, "ability rolled");
        character.set_score(ability, roll.total);
    }
    recompute_hit_points(character);
}

/// Adds the race's bonuses to the current scores, then recomputes hit points.
///
/// Entities without a race are returned unchanged.
pub fn apply_racial_bonuses(character: &mut Entity, races: &RaceTable) -> EngineResult<()> {
    let EntityKind::PlayerCharacter { race, .. } = character.kind() else {
        return Ok(());
    };
    let (_, bonuses) = races.get(race)?;
    for (&ability, &bonus) in bonuses {
        character.abilities_mut().add(ability, bonus);
    }
    recompute_hit_points(character);
    Ok(())
}

/// `max_hp = base_hp + CON mod`, and the character is refilled to it.
fn recompute_hit_points(character: &mut Entity) {
    if let EntityKind::PlayerCharacter { base_hp, .. } = *character.kind() {
        let max = base_hp + character.modifier(Ability::Con);
        character.reset_hit_points(max);
    }
}
