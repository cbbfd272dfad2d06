//! Interactive adventure loop over any line-based input and output.

use std::io::{BufRead, Write};

use anyhow::Result;
use engine::character::{apply_racial_bonuses, create_character, roll_stats};
use engine::enemy::spawn_enemy;
use engine::{CombatSession, EnemyTable, Entity, RaceTable, Roller, Side};

const BASE_HP: i32 = 10;
const RULE: &str = "========================================";

#[derive(Debug, thiserror::Error)]
#[error("input closed")]
struct InputClosed;

struct Prompt<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    /// Next trimmed line; fails on end of input.
    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.out, "{}", question)?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    fn ask_non_empty(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            writeln!(self.out, "Cannot be empty. Try again.")?;
        }
    }

    /// 1-based menu choice in `1..=options`, returned 0-based.
    fn choose(&mut self, question: &str, options: usize) -> Result<usize> {
        loop {
            let answer = self.ask(question)?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=options).contains(&n) => return Ok(n - 1),
                _ => {
                    let valid: Vec<String> = (1..=options).map(|n| n.to_string()).collect();
                    writeln!(self.out, "Invalid. Choose from: {}", valid.join(", "))?;
                }
            }
        }
    }
}

pub fn run<R: BufRead, W: Write, D: Roller>(
    input: R,
    out: W,
    dice: &mut D,
    races: &RaceTable,
    enemies: &EnemyTable,
) -> Result<()> {
    let mut p = Prompt { input, out };
    match adventure(&mut p, dice, races, enemies) {
        Ok(()) => Ok(()),
        // Closing stdin is a quit, not a failure.
        Err(e) if e.is::<InputClosed>() => {
            writeln!(p.out)?;
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn adventure<R: BufRead, W: Write, D: Roller>(
    p: &mut Prompt<R, W>,
    dice: &mut D,
    races: &RaceTable,
    enemies: &EnemyTable,
) -> Result<()> {
    let mut hero = create_hero(p, dice, races)?;
    display_character(&mut p.out, &hero)?;

    let enemy_types: Vec<String> = enemies.names().map(str::to_string).collect();
    loop {
        writeln!(p.out, "\n{}\nWhat would you like to do?\n{}", RULE, RULE)?;
        for (i, enemy) in enemy_types.iter().enumerate() {
            writeln!(p.out, "{}. Fight a {}", i + 1, enemy)?;
        }
        let view = enemy_types.len();
        writeln!(p.out, "{}. View character", view + 1)?;
        writeln!(p.out, "{}. Rest (restore HP)", view + 2)?;
        writeln!(p.out, "{}. Quit", view + 3)?;

        let choice = p.choose(&format!("Enter choice (1-{}): ", view + 3), view + 3)?;
        if choice < view {
            let (survivor, won) = fight(&mut p.out, hero, &enemy_types[choice], dice, enemies)?;
            hero = survivor;
            if !won {
                writeln!(p.out, "\nGame Over!")?;
                return Ok(());
            }
        } else if choice == view {
            display_character(&mut p.out, &hero)?;
        } else if choice == view + 1 {
            hero.rest();
            writeln!(p.out, "\n{} rests!", hero.name())?;
            writeln!(p.out, "HP: {}/{}", hero.hit_points(), hero.max_hit_points())?;
        } else {
            writeln!(p.out, "\nThanks for playing!")?;
            writeln!(p.out, "{} lives to adventure another day!", hero.name())?;
            return Ok(());
        }
    }
}

fn create_hero<R: BufRead, W: Write, D: Roller>(
    p: &mut Prompt<R, W>,
    dice: &mut D,
    races: &RaceTable,
) -> Result<Entity> {
    writeln!(p.out, "Welcome to D&D Adventure!\n{}", RULE)?;
    let name = p.ask_non_empty("\nEnter character name: ")?;

    writeln!(p.out, "\nChoose your race:")?;
    let names: Vec<&str> = races.names().collect();
    for (i, race) in names.iter().enumerate() {
        writeln!(p.out, "{}. {} ({})", i + 1, race, races.describe(race))?;
    }
    let choice = p.choose(&format!("Enter choice (1-{}): ", names.len()), names.len())?;
    let race = names[choice];

    writeln!(p.out, "\nCreating {} the {}...", name, race)?;
    let mut hero = create_character(name, race, BASE_HP, races)?;
    roll_stats(&mut hero, dice);
    apply_racial_bonuses(&mut hero, races)?;
    writeln!(p.out, "Character created!")?;
    Ok(hero)
}

fn display_character<W: Write>(out: &mut W, hero: &Entity) -> Result<()> {
    let title = match hero.kind() {
        engine::EntityKind::PlayerCharacter { race, .. } => format!("{} the {}", hero.name(), race),
        _ => hero.name().to_string(),
    };
    writeln!(out, "\n{}\n{}\n{}", RULE, title, RULE)?;
    writeln!(out, "Level: {}", hero.level())?;
    writeln!(out, "HP: {}/{}", hero.hit_points(), hero.max_hit_points())?;
    writeln!(out, "AC: {}", hero.armor_class())?;
    writeln!(out, "\nAbility Scores:")?;
    for (ability, score) in hero.abilities().iter() {
        writeln!(out, "  {}: {:2} ({:+})", ability, score, hero.modifier(ability))?;
    }
    Ok(())
}

/// Runs one encounter and hands the hero back with whatever HP it has left.
fn fight<W: Write, D: Roller>(
    out: &mut W,
    hero: Entity,
    enemy_type: &str,
    dice: &mut D,
    enemies: &EnemyTable,
) -> Result<(Entity, bool)> {
    let enemy = spawn_enemy(enemy_type, None, enemies)?;
    let mut session = CombatSession::new(hero, enemy);
    let winner = session.run_combat(dice)?;
    for line in session.log() {
        writeln!(out, "{}", line)?;
    }
    let (hero, _) = session.into_participants();
    if winner == Side::A {
        writeln!(out, "\n{} is victorious!", hero.name())?;
    } else {
        writeln!(out, "\n{} has fallen!", hero.name())?;
    }
    Ok((hero, winner == Side::A))
}
