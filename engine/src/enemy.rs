use crate::entity::{Entity, EntityKind};
use crate::error::EngineResult;
use crate::templates::EnemyTable;

/// Builds an enemy from its template. The display name defaults to the
/// canonical enemy type.
pub fn spawn_enemy(enemy_type: &str, name: Option<&str>, enemies: &EnemyTable) -> EngineResult<Entity> {
    let (enemy_type, template) = enemies.get(enemy_type)?;
    let name = name.unwrap_or(enemy_type);
    let kind = EntityKind::Enemy { enemy_type: enemy_type.to_string() };
    Ok(Entity::new(name, template.hp, template.ac, template.level)
        .with_abilities(template.stats)
        .with_kind(kind))
}
