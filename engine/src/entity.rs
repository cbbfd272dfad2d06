use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilityScores};

/// What built an entity. Behaviour is identical across kinds; only
/// construction-time defaults differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityKind {
    /// Built directly with [`Entity::new`], no template applied.
    Creature,
    PlayerCharacter { race: String, base_hp: i32 },
    Enemy { enemy_type: String },
}

/// A combat participant.
///
/// Hit points always stay within `0..=max_hit_points`; defeat is the state
/// `hit_points == 0`, never removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    kind: EntityKind,
    abilities: AbilityScores,
    hit_points: i32,
    max_hit_points: i32,
    armor_class: i32,
    level: u32,
}

impl Entity {
    /// Fresh entity at full health with every ability score at 10.
    pub fn new(name: impl Into<String>, max_hit_points: i32, armor_class: i32, level: u32) -> Self {
        Self {
            name: name.into(),
            kind: EntityKind::Creature,
            abilities: AbilityScores::default(),
            hit_points: max_hit_points,
            max_hit_points,
            armor_class,
            level,
        }
    }

    pub(crate) fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn abilities(&self) -> &AbilityScores {
        &self.abilities
    }

    pub fn hit_points(&self) -> i32 {
        self.hit_points
    }

    pub fn max_hit_points(&self) -> i32 {
        self.max_hit_points
    }

    pub fn armor_class(&self) -> i32 {
        self.armor_class
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.abilities.mod_of(ability)
    }

    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// `amount` must be non-negative.
    pub fn take_damage(&mut self, amount: i32) {
        self.hit_points = (self.hit_points - amount).max(0);
    }

    /// `amount` must be non-negative.
    pub fn heal(&mut self, amount: i32) {
        self.hit_points = (self.hit_points + amount).min(self.max_hit_points);
    }

    /// Back to full hit points.
    pub fn rest(&mut self) {
        self.heal(self.max_hit_points);
    }

    /// Direct score assignment while a character is being built.
    pub fn set_score(&mut self, ability: Ability, score: i32) {
        self.abilities.set(ability, score);
    }

    pub(crate) fn abilities_mut(&mut self) -> &mut AbilityScores {
        &mut self.abilities
    }

    /// Sets a new maximum and refills to it.
    pub(crate) fn reset_hit_points(&mut self, max_hit_points: i32) {
        self.max_hit_points = max_hit_points;
        self.hit_points = max_hit_points;
    }
}
