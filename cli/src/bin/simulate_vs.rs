use clap::Parser;
use encoding_rs::Encoding;
use engine::api::{simulate_many, EncounterConfig};
use engine::CombatConfig;
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simulate-vs")]
#[command(about = "Monte Carlo sim: many seeded fights of one hero build vs an enemy type")]
struct Args {
    /// Enemy type to fight
    #[arg(long, default_value = "Goblin")]
    enemy: String,

    /// Hero race
    #[arg(long, default_value = "Human")]
    race: String,

    /// Hero base hit points before the CON modifier
    #[arg(long, default_value_t = 10)]
    base_hp: i32,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on rounds per trial
    #[arg(long, default_value_t = 100)]
    max_rounds: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Keep every score at 10 instead of rolling 3d6
    #[arg(long, default_value_t = false)]
    no_roll: bool,

    /// Optional encounter config (YAML or JSON); flags above are ignored when given
    #[arg(long)]
    config: Option<PathBuf>,
}

fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let cfg = if let Some(path) = args.config.as_ref() {
        let text = read_text_auto(path)?;
        EncounterConfig::parse(&text, path)?
    } else {
        EncounterConfig {
            race: args.race.clone(),
            base_hp: args.base_hp,
            enemy: args.enemy.clone(),
            seed: args.seed,
            roll_stats: !args.no_roll,
            combat: CombatConfig { max_rounds: args.max_rounds },
            ..Default::default()
        }
    };

    let stats = simulate_many(&cfg, args.trials)?;
    let trials_f = f64::from(stats.samples.max(1));
    let win_rate = f64::from(stats.hero_wins) / trials_f;

    println!("simulate-vs results");
    println!("-------------------");
    println!("trials:             {}", stats.samples);
    println!("hero:               {} (base HP {})", cfg.race, cfg.base_hp);
    println!("enemy:              {}", cfg.enemy);
    println!("seed:               {}", cfg.seed);
    println!();
    println!("win rate:           {:.1}%", win_rate * 100.0);
    println!("hero wins:          {}", stats.hero_wins);
    println!("enemy wins:         {}", stats.enemy_wins);
    println!("stalemates:         {}", stats.stalemates);
    println!("avg rounds:         {:.2}", stats.avg_rounds);
    Ok(())
}
