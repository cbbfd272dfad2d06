//! Spell book storage. Spells carry data only; nothing resolves them in
//! combat.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub level: u32,
    pub school: String,
    pub spell_power: i32,
}

impl Spell {
    pub fn new(name: impl Into<String>, level: u32, school: impl Into<String>, spell_power: i32) -> Self {
        Self { name: name.into(), level, school: school.into(), spell_power }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellBook {
    spells: Vec<Spell>,
}

impl SpellBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_spell(&mut self, spell: Spell) {
        self.spells.push(spell);
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Spells at or below `max_level`.
    pub fn available_spells(&self, max_level: u32) -> Vec<&Spell> {
        self.spells.iter().filter(|s| s.level <= max_level).collect()
    }

    pub fn spells_by_school(&self, school: &str) -> Vec<&Spell> {
        self.spells.iter().filter(|s| s.school == school).collect()
    }

    pub fn spell_names(&self) -> Vec<&str> {
        self.spells.iter().map(|s| s.name.as_str()).collect()
    }

    /// Spells whose power is at least `min_power`.
    pub fn powerful_spells(&self, min_power: i32) -> Vec<&Spell> {
        self.spells.iter().filter(|s| s.spell_power >= min_power).collect()
    }
}
