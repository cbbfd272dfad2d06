//! Race and enemy template tables.
//!
//! Tables are plain immutable values: load them once (built-in, YAML or JSON)
//! and pass them by reference to the constructors in [`crate::character`]
//! and [`crate::enemy`].

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::ability::{Ability, AbilityScores};
use crate::content;
use crate::error::{EngineError, EngineResult};

pub type RaceBonuses = IndexMap<Ability, i32>;

/// `{race: {ability: bonus}}`, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceTable(IndexMap<String, RaceBonuses>);

/// Stat block an enemy is spawned from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub hp: i32,
    pub ac: i32,
    pub level: u32,
    pub stats: AbilityScores,
}

/// `{enemy_type: template}`, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnemyTable(IndexMap<String, EnemyTemplate>);

impl RaceTable {
    pub fn builtin() -> EngineResult<Self> {
        parse_yaml(content::BUILTIN_RACES, "built-in races")
    }

    pub fn from_yaml_str(src: &str) -> EngineResult<Self> {
        parse_yaml(src, "race table")
    }

    pub fn from_json_str(src: &str) -> EngineResult<Self> {
        parse_json(src, "race table")
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        load_table(path.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Returns the canonical race name with its bonuses.
    pub fn get(&self, race: &str) -> EngineResult<(&str, &RaceBonuses)> {
        lookup(&self.0, race, "race")
    }

    /// `"+2 STR, +1 CON"`, or `"Unknown race"` for a missing key.
    pub fn describe(&self, race: &str) -> String {
        match self.get(race) {
            Ok((_, bonuses)) => bonuses
                .iter()
                .map(|(ability, bonus)| format!("{:+} {}", bonus, ability))
                .collect::<Vec<_>>()
                .join(", "),
            Err(_) => "Unknown race".to_string(),
        }
    }
}

impl EnemyTable {
    pub fn builtin() -> EngineResult<Self> {
        parse_yaml(content::BUILTIN_ENEMIES, "built-in enemies")
    }

    pub fn from_yaml_str(src: &str) -> EngineResult<Self> {
        parse_yaml(src, "enemy table")
    }

    pub fn from_json_str(src: &str) -> EngineResult<Self> {
        parse_json(src, "enemy table")
    }

    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        load_table(path.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get(&self, enemy_type: &str) -> EngineResult<(&str, &EnemyTemplate)> {
        lookup(&self.0, enemy_type, "enemy type")
    }
}

fn lookup<'a, V>(
    table: &'a IndexMap<String, V>,
    key: &str,
    what: &'static str,
) -> EngineResult<(&'a str, &'a V)> {
    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(key.trim()))
        .map(|(name, value)| (name.as_str(), value))
        .ok_or_else(|| EngineError::InvalidTemplateKey {
            table: what,
            key: key.to_string(),
            available: table.keys().cloned().collect(),
        })
}

fn parse_yaml<T: DeserializeOwned>(src: &str, what: &str) -> EngineResult<T> {
    serde_yaml::from_str(src).map_err(|e| EngineError::TemplateParse {
        what: what.to_string(),
        source: Box::new(e),
    })
}

fn parse_json<T: DeserializeOwned>(src: &str, what: &str) -> EngineResult<T> {
    serde_json::from_str(src).map_err(|e| EngineError::TemplateParse {
        what: what.to_string(),
        source: Box::new(e),
    })
}

/// Picks the parser from the file extension; anything but `.json` is YAML.
fn load_table<T: DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let text = fs::read_to_string(path)?;
    let what = path.display().to_string();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => parse_json(&text, &what),
        _ => parse_yaml(&text, &what),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_races_keep_declaration_order() {
        let races = RaceTable::builtin().unwrap();
        let names: Vec<_> = races.names().collect();
        assert_eq!(names, ["Human", "Elf", "Dwarf", "Halfling", "Orc"]);
    }

    #[test]
    fn race_description_lists_bonuses() {
        let races = RaceTable::builtin().unwrap();
        assert_eq!(races.describe("Orc"), "+2 STR, +1 CON");
        assert_eq!(races.describe("Elf"), "+2 DEX");
        assert_eq!(races.describe("Alien"), "Unknown race");
    }

    #[test]
    fn builtin_enemies_match_stat_blocks() {
        let enemies = EnemyTable::builtin().unwrap();
        let (name, goblin) = enemies.get("goblin").unwrap();
        assert_eq!(name, "Goblin");
        assert_eq!((goblin.hp, goblin.ac, goblin.level), (7, 13, 1));
        assert_eq!(goblin.stats.dex, 14);
        let (_, orc) = enemies.get("Orc").unwrap();
        assert_eq!(orc.stats.str_, 16);
        assert_eq!(orc.stats.con, 16);
    }

    #[test]
    fn unknown_key_lists_available_entries() {
        let enemies = EnemyTable::builtin().unwrap();
        let err = enemies.get("Dragon").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid enemy type key 'Dragon'; expected one of: Goblin, Orc"
        );
    }

    #[test]
    fn json_tables_parse() {
        let races = RaceTable::from_json_str(r#"{"Gnome": {"INT": 2}}"#).unwrap();
        let (_, bonuses) = races.get("Gnome").unwrap();
        assert_eq!(bonuses.get(&Ability::Int), Some(&2));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = EnemyTable::from_yaml_str("Goblin: { hp: seven }").unwrap_err();
        assert!(matches!(err, EngineError::TemplateParse { .. }));
    }
}
