//! Template tables compiled into the engine.

pub const BUILTIN_RACES: &str = include_str!("../content/races.yaml");

pub const BUILTIN_ENEMIES: &str = include_str!("../content/enemies.yaml");
