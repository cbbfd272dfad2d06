use clap::{Parser, Subcommand, ValueEnum};
use engine::api::{load_tables, simulate_encounter, EncounterConfig, Outcome};
use engine::{AdMode, Dice, EnemyTable, RaceTable, Roller};
use std::{io, path::PathBuf};
use tracing_subscriber::EnvFilter;

mod play;

#[derive(Copy, Clone, ValueEnum)]
enum Adv {
    Normal,
    Advantage,
    Disadvantage,
}

#[derive(Subcommand)]
enum Cmd {
    /// Roll dice, optionally a d20 with advantage/disadvantage
    Roll {
        /// RNG seed for determinism
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Faces per die
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u32).range(2..))]
        sides: u32,
        /// Dice summed per roll
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        /// Advantage mode (single d20 only)
        #[arg(long, value_enum, default_value_t = Adv::Normal)]
        adv: Adv,
        /// Number of rolls
        #[arg(long, default_value_t = 5)]
        rolls: u32,
    },
    /// List playable races and their ability bonuses
    Races {
        /// Race table (YAML or JSON) instead of the built-in one
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// List enemy templates
    Enemies {
        /// Enemy table (YAML or JSON) instead of the built-in one
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Build a hero and fight one enemy, printing the combat log
    Fight {
        /// Encounter config (YAML or JSON); flags below override it
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        race: Option<String>,
        #[arg(long)]
        enemy: Option<String>,
        #[arg(long)]
        enemy_name: Option<String>,
        #[arg(long)]
        base_hp: Option<i32>,
        /// RNG seed for determinism
        #[arg(long)]
        seed: Option<u64>,
        /// Emit the full result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Interactive adventure: create a hero, then fight, rest or quit
    Play {
        /// RNG seed; omit for a fresh adventure each time
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        races: Option<PathBuf>,
        #[arg(long)]
        enemies: Option<PathBuf>,
    },
}

#[derive(Parser)]
#[command(name = "dnd-cli")]
#[command(about = "d20 duel engine CLI harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_mode(a: Adv) -> AdMode {
    match a {
        Adv::Normal => AdMode::Normal,
        Adv::Advantage => AdMode::Advantage,
        Adv::Disadvantage => AdMode::Disadvantage,
    }
}

fn load_races(file: Option<PathBuf>) -> anyhow::Result<RaceTable> {
    Ok(match file {
        Some(path) => RaceTable::load(path)?,
        None => RaceTable::builtin()?,
    })
}

fn load_enemies(file: Option<PathBuf>) -> anyhow::Result<EnemyTable> {
    Ok(match file {
        Some(path) => EnemyTable::load(path)?,
        None => EnemyTable::builtin()?,
    })
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Roll { seed, sides, count, adv, rolls } => {
            let mut dice = Dice::from_seed(seed);
            for _ in 0..rolls {
                if sides == 20 && count == 1 {
                    println!("{}", dice.d20(to_mode(adv)));
                } else {
                    println!("{}", dice.roll(sides, count));
                }
            }
        }
        Cmd::Races { file } => {
            let races = load_races(file)?;
            for (i, race) in races.names().enumerate() {
                println!("{}. {} ({})", i + 1, race, races.describe(race));
            }
        }
        Cmd::Enemies { file } => {
            let enemies = load_enemies(file)?;
            for name in enemies.names() {
                let (_, t) = enemies.get(name)?;
                println!("{}: HP {}, AC {}, level {}", name, t.hp, t.ac, t.level);
            }
        }
        Cmd::Fight { config, name, race, enemy, enemy_name, base_hp, seed, json } => {
            let mut cfg = match config {
                Some(path) => EncounterConfig::load(path)?,
                None => EncounterConfig::default(),
            };
            if let Some(v) = name {
                cfg.hero_name = v;
            }
            if let Some(v) = race {
                cfg.race = v;
            }
            if let Some(v) = enemy {
                cfg.enemy = v;
            }
            if enemy_name.is_some() {
                cfg.enemy_name = enemy_name;
            }
            if let Some(v) = base_hp {
                cfg.base_hp = v;
            }
            if let Some(v) = seed {
                cfg.seed = v;
            }

            let res = simulate_encounter(&cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                for line in &res.log {
                    println!("{}", line);
                }
                match res.outcome {
                    Outcome::Stalemate => println!("No winner after {} rounds.", res.rounds),
                    _ => println!(
                        "{} is victorious! ({} HP {}/{}, {} HP {}/{})",
                        res.winner.as_deref().unwrap_or("?"),
                        res.hero.name(),
                        res.hero.hit_points(),
                        res.hero.max_hit_points(),
                        res.enemy.name(),
                        res.enemy.hit_points(),
                        res.enemy.max_hit_points()
                    ),
                }
            }
        }
        Cmd::Play { seed, races, enemies } => {
            let cfg = EncounterConfig {
                races_path: races.map(|p| p.to_string_lossy().into_owned()),
                enemies_path: enemies.map(|p| p.to_string_lossy().into_owned()),
                ..Default::default()
            };
            let (races, enemies) = load_tables(&cfg)?;
            let mut dice = match seed {
                Some(seed) => Dice::from_seed(seed),
                None => Dice::from_entropy(),
            };
            let stdin = io::stdin();
            let stdout = io::stdout();
            play::run(stdin.lock(), stdout.lock(), &mut dice, &races, &enemies)?;
        }
    }
    Ok(())
}
