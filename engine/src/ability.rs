use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    #[serde(rename = "STR", alias = "str")]
    Str,
    #[serde(rename = "DEX", alias = "dex")]
    Dex,
    #[serde(rename = "CON", alias = "con")]
    Con,
    #[serde(rename = "INT", alias = "int")]
    Int,
    #[serde(rename = "WIS", alias = "wis")]
    Wis,
    #[serde(rename = "CHA", alias = "cha")]
    Cha,
}

impl Ability {
    /// Canonical order used for stat rolling and display.
    pub const ALL: [Ability; 6] = [
        Ability::Str,
        Ability::Dex,
        Ability::Con,
        Ability::Int,
        Ability::Wis,
        Ability::Cha,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Ability::Str => "STR",
            Ability::Dex => "DEX",
            Ability::Con => "CON",
            Ability::Int => "INT",
            Ability::Wis => "WIS",
            Ability::Cha => "CHA",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Ability {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ability::ALL
            .into_iter()
            .find(|a| a.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| EngineError::UnknownAbility(s.to_string()))
    }
}

/// The six ability scores. Every key is always present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    #[serde(rename = "STR")]
    pub str_: i32,
    #[serde(rename = "DEX")]
    pub dex: i32,
    #[serde(rename = "CON")]
    pub con: i32,
    #[serde(rename = "INT")]
    pub int_: i32,
    #[serde(rename = "WIS")]
    pub wis: i32,
    #[serde(rename = "CHA")]
    pub cha: i32,
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::uniform(10)
    }
}

impl AbilityScores {
    pub fn uniform(score: i32) -> Self {
        Self { str_: score, dex: score, con: score, int_: score, wis: score, cha: score }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Str => self.str_,
            Ability::Dex => self.dex,
            Ability::Con => self.con,
            Ability::Int => self.int_,
            Ability::Wis => self.wis,
            Ability::Cha => self.cha,
        }
    }

    pub fn set(&mut self, ability: Ability, score: i32) {
        *self.slot(ability) = score;
    }

    pub fn add(&mut self, ability: Ability, bonus: i32) {
        *self.slot(ability) += bonus;
    }

    pub fn mod_of(&self, ability: Ability) -> i32 {
        ability_mod(self.get(ability))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Ability, i32)> + '_ {
        Ability::ALL.into_iter().map(|a| (a, self.get(a)))
    }

    fn slot(&mut self, ability: Ability) -> &mut i32 {
        match ability {
            Ability::Str => &mut self.str_,
            Ability::Dex => &mut self.dex,
            Ability::Con => &mut self.con,
            Ability::Int => &mut self.int_,
            Ability::Wis => &mut self.wis,
            Ability::Cha => &mut self.cha,
        }
    }
}

/// D&D ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_mod(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}
