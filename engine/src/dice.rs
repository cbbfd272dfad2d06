use std::collections::VecDeque;
use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdMode { Normal, Advantage, Disadvantage }

/// Faces of one `NdS` roll and their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiceRoll {
    pub sides: u32,
    pub faces: Vec<i32>,
    pub total: i32,
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces = self
            .faces
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}d{} [{}] = {}", self.faces.len(), self.sides, faces, self.total)
    }
}

/// Source of die faces.
///
/// Only `roll_die` is required; sums and (dis)advantage are built on top of
/// it so every implementation shares the same draw order. Callers guarantee
/// `sides >= 2` and `count >= 1`.
pub trait Roller {
    /// One uniform face in `1..=sides`.
    fn roll_die(&mut self, sides: u32) -> i32;

    /// Sum of `count` independent dice with `sides` faces each.
    fn roll(&mut self, sides: u32, count: u32) -> DiceRoll {
        let faces: Vec<i32> = (0..count).map(|_| self.roll_die(sides)).collect();
        let total = faces.iter().sum();
        let roll = DiceRoll { sides, faces, total };
        tracing::debug!(%roll, "dice rolled");
        roll
    }

    /// Two separate single-die draws, keep the higher.
    fn roll_with_advantage(&mut self, sides: u32) -> i32 {
        let a = self.roll(sides, 1).total;
        let b = self.roll(sides, 1).total;
        a.max(b)
    }

    /// Two separate single-die draws, keep the lower.
    fn roll_with_disadvantage(&mut self, sides: u32) -> i32 {
        let a = self.roll(sides, 1).total;
        let b = self.roll(sides, 1).total;
        a.min(b)
    }

    fn d20(&mut self, mode: AdMode) -> i32 {
        match mode {
            AdMode::Normal => self.roll(20, 1).total,
            AdMode::Advantage => self.roll_with_advantage(20),
            AdMode::Disadvantage => self.roll_with_disadvantage(20),
        }
    }
}

/// Seeded ChaCha dice; the same seed replays the same fight.
pub struct Dice { rng: ChaCha8Rng }

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { rng: ChaCha8Rng::from_entropy() }
    }
}

impl Roller for Dice {
    fn roll_die(&mut self, sides: u32) -> i32 {
        self.rng.gen_range(1..=sides) as i32
    }
}

/// Replays a fixed list of faces, in order, regardless of die size.
///
/// Once the script runs dry the remaining draws come from a seeded [`Dice`].
pub struct ScriptedDice {
    script: VecDeque<i32>,
    fallback: Dice,
}

impl ScriptedDice {
    pub fn new(faces: impl IntoIterator<Item = i32>) -> Self {
        Self {
            script: faces.into_iter().collect(),
            fallback: Dice::from_seed(0),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Roller for ScriptedDice {
    fn roll_die(&mut self, sides: u32) -> i32 {
        match self.script.pop_front() {
            Some(face) => face,
            None => self.fallback.roll_die(sides),
        }
    }
}
