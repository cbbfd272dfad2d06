use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::character::{apply_racial_bonuses, create_character, roll_stats};
use crate::combat::{CombatConfig, CombatSession, Side};
use crate::enemy::spawn_enemy;
use crate::error::EngineError;
use crate::{Dice, EnemyTable, Entity, RaceTable};

const DEFAULT_HERO_NAME: &str = "Hero";
const DEFAULT_RACE: &str = "Human";
const DEFAULT_ENEMY: &str = "Goblin";
const DEFAULT_BASE_HP: i32 = 10;

/// One hero-vs-enemy encounter, fully described.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EncounterConfig {
    pub hero_name: String,
    pub race: String,
    pub base_hp: i32,
    pub enemy: String,
    pub enemy_name: Option<String>,
    pub seed: u64,
    /// Roll 3d6 per ability before racial bonuses; otherwise all scores start at 10.
    pub roll_stats: bool,
    pub races_path: Option<String>,
    pub enemies_path: Option<String>,
    /// Read from top-level keys, so `max_rounds: 50` sits beside `seed`.
    #[serde(flatten)]
    pub combat: CombatConfig,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            hero_name: DEFAULT_HERO_NAME.to_string(),
            race: DEFAULT_RACE.to_string(),
            base_hp: DEFAULT_BASE_HP,
            enemy: DEFAULT_ENEMY.to_string(),
            enemy_name: None,
            seed: 0,
            roll_stats: true,
            races_path: None,
            enemies_path: None,
            combat: CombatConfig::default(),
        }
    }
}

impl EncounterConfig {
    /// Reads a config from JSON (`.json`) or YAML (anything else).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read encounter config: {}", path.display()))?;
        Self::parse(&text, path)
    }

    /// Parses already-read config text, picking the format from `path`'s extension.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let cfg = if is_json {
            serde_json::from_str(text)
                .with_context(|| format!("failed to parse encounter JSON: {}", path.display()))?
        } else {
            serde_yaml::from_str(text)
                .with_context(|| format!("failed to parse encounter YAML: {}", path.display()))?
        };
        Ok(cfg)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Hero,
    Enemy,
    Stalemate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterResult {
    pub outcome: Outcome,
    pub winner: Option<String>,
    pub rounds: u32,
    pub hero: Entity,
    pub enemy: Entity,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterSummary {
    pub samples: u32,
    pub hero_wins: u32,
    pub enemy_wins: u32,
    pub stalemates: u32,
    pub avg_rounds: f64,
}

/// Template tables named by the config, or the built-ins.
pub fn load_tables(cfg: &EncounterConfig) -> Result<(RaceTable, EnemyTable)> {
    let races = match &cfg.races_path {
        Some(path) => RaceTable::load(path).with_context(|| format!("failed to load races: {}", path))?,
        None => RaceTable::builtin()?,
    };
    let enemies = match &cfg.enemies_path {
        Some(path) => {
            EnemyTable::load(path).with_context(|| format!("failed to load enemies: {}", path))?
        }
        None => EnemyTable::builtin()?,
    };
    Ok((races, enemies))
}

/// Hero built from the config: created, optionally rolled, then racial bonuses.
pub fn build_hero(cfg: &EncounterConfig, races: &RaceTable, dice: &mut Dice) -> Result<Entity> {
    let mut hero = create_character(&cfg.hero_name, &cfg.race, cfg.base_hp, races)?;
    if cfg.roll_stats {
        roll_stats(&mut hero, dice);
    }
    apply_racial_bonuses(&mut hero, races)?;
    Ok(hero)
}

pub fn simulate_encounter(cfg: &EncounterConfig) -> Result<EncounterResult> {
    let (races, enemies) = load_tables(cfg)?;
    run_encounter(cfg, cfg.seed, &races, &enemies)
}

/// Runs `samples` encounters with seeds `seed, seed + 1, ...`.
pub fn simulate_many(cfg: &EncounterConfig, samples: u32) -> Result<EncounterSummary> {
    let (races, enemies) = load_tables(cfg)?;
    let mut summary = EncounterSummary { samples, ..Default::default() };
    let mut total_rounds = 0u64;
    for i in 0..samples {
        let res = run_encounter(cfg, cfg.seed.wrapping_add(u64::from(i)), &races, &enemies)?;
        match res.outcome {
            Outcome::Hero => summary.hero_wins += 1,
            Outcome::Enemy => summary.enemy_wins += 1,
            Outcome::Stalemate => summary.stalemates += 1,
        }
        total_rounds += u64::from(res.rounds);
    }
    if samples > 0 {
        summary.avg_rounds = total_rounds as f64 / f64::from(samples);
    }
    Ok(summary)
}

fn run_encounter(
    cfg: &EncounterConfig,
    seed: u64,
    races: &RaceTable,
    enemies: &EnemyTable,
) -> Result<EncounterResult> {
    let mut dice = Dice::from_seed(seed);
    let hero = build_hero(cfg, races, &mut dice)?;
    let enemy = spawn_enemy(&cfg.enemy, cfg.enemy_name.as_deref(), enemies)?;

    let mut session = CombatSession::with_config(hero, enemy, cfg.combat);
    let outcome = match session.run_combat(&mut dice) {
        Ok(Side::A) => Outcome::Hero,
        Ok(Side::B) => Outcome::Enemy,
        Err(EngineError::Stalemate { .. }) => Outcome::Stalemate,
        Err(e) => return Err(e).context("combat failed"),
    };
    let winner = session.winner().map(|side| session.participant(side).name().to_string());
    let rounds = session.round();
    let log = session.log().to_vec();
    let (hero, enemy) = session.into_participants();

    Ok(EncounterResult { outcome, winner, rounds, hero, enemy, log })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_replays_the_same_fight() {
        let cfg = EncounterConfig { seed: 99, ..Default::default() };
        let a = simulate_encounter(&cfg).unwrap();
        let b = simulate_encounter(&cfg).unwrap();
        assert_eq!(a.log, b.log);
        assert_eq!(a.rounds, b.rounds);
    }

    #[test]
    fn unknown_enemy_surfaces_template_error() {
        let cfg = EncounterConfig { enemy: "Dragon".into(), ..Default::default() };
        let err = simulate_encounter(&cfg).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EngineError>(),
            Some(EngineError::InvalidTemplateKey { .. })
        ));
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: EncounterConfig = serde_yaml::from_str("enemy: Orc\nseed: 7\n").unwrap();
        assert_eq!(cfg.enemy, "Orc");
        assert_eq!(cfg.race, "Human");
        assert_eq!(cfg.base_hp, 10);
        assert_eq!(cfg.combat.max_rounds, 1000);
    }

    #[test]
    fn round_cap_is_a_top_level_key() {
        let yaml = "enemy: Orc\nmax_rounds: 25\n";
        let cfg = EncounterConfig::parse(yaml, Path::new("duel.yaml")).unwrap();
        assert_eq!(cfg.combat.max_rounds, 25);

        let json = r#"{"race": "Elf", "max_rounds": 3}"#;
        let cfg = EncounterConfig::parse(json, Path::new("duel.JSON")).unwrap();
        assert_eq!(cfg.race, "Elf");
        assert_eq!(cfg.combat.max_rounds, 3);
    }
}
