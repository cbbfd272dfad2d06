//! Two-participant combat session.
//!
//! A session moves through `NotStarted → InitiativeRolled → RoundInProgress
//! → Concluded`. Initiative is rolled once and fixes the turn order for the
//! whole session. Every step appends a tagged line to the session log.

pub mod actions;

pub use actions::{resolve_attack, AttackOutcome};

use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::dice::Roller;
use crate::entity::Entity;
use crate::error::{EngineError, EngineResult};

const DEFAULT_MAX_ROUNDS: u32 = 1000;

/// Which of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatState {
    NotStarted,
    InitiativeRolled,
    RoundInProgress,
    Concluded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Rounds `run_combat` plays before giving up with [`EngineError::Stalemate`].
    pub max_rounds: u32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self { max_rounds: DEFAULT_MAX_ROUNDS }
    }
}

#[derive(Debug, Clone)]
pub struct CombatSession {
    participant_a: Entity,
    participant_b: Entity,
    round: u32,
    initiative_order: Option<[Side; 2]>,
    log: Vec<String>,
    state: CombatState,
    config: CombatConfig,
}

impl CombatSession {
    /// `a` is the player side and wins initiative ties.
    pub fn new(a: Entity, b: Entity) -> Self {
        Self::with_config(a, b, CombatConfig::default())
    }

    pub fn with_config(a: Entity, b: Entity, config: CombatConfig) -> Self {
        Self {
            participant_a: a,
            participant_b: b,
            round: 0,
            initiative_order: None,
            log: Vec::new(),
            state: CombatState::NotStarted,
            config,
        }
    }

    pub fn participant(&self, side: Side) -> &Entity {
        match side {
            Side::A => &self.participant_a,
            Side::B => &self.participant_b,
        }
    }

    pub fn participant_a(&self) -> &Entity {
        &self.participant_a
    }

    pub fn participant_b(&self) -> &Entity {
        &self.participant_b
    }

    /// Hands both entities back once the caller is done with the session.
    pub fn into_participants(self) -> (Entity, Entity) {
        (self.participant_a, self.participant_b)
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn state(&self) -> CombatState {
        self.state
    }

    pub fn initiative_order(&self) -> Option<[Side; 2]> {
        self.initiative_order
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// The surviving side once combat has concluded with exactly one standing.
    pub fn winner(&self) -> Option<Side> {
        if self.state != CombatState::Concluded {
            return None;
        }
        match (self.participant_a.is_alive(), self.participant_b.is_alive()) {
            (true, false) => Some(Side::A),
            (false, true) => Some(Side::B),
            _ => None,
        }
    }

    /// d20 + DEX for A, then for B. A goes first on a tie.
    pub fn roll_initiative<R: Roller + ?Sized>(&mut self, dice: &mut R) -> EngineResult<[Side; 2]> {
        if self.state != CombatState::NotStarted {
            return Err(EngineError::InitiativeAlreadyRolled);
        }

        let a_roll = dice.roll(20, 1).total;
        let a_mod = self.participant_a.modifier(Ability::Dex);
        let b_roll = dice.roll(20, 1).total;
        let b_mod = self.participant_b.modifier(Ability::Dex);
        let (a_total, b_total) = (a_roll + a_mod, b_roll + b_mod);

        let order = if a_total >= b_total { [Side::A, Side::B] } else { [Side::B, Side::A] };
        let line = format!(
            "[INIT] {} d20={} {:+} = {} vs {} d20={} {:+} = {} → {} goes first",
            self.participant_a.name(),
            a_roll,
            a_mod,
            a_total,
            self.participant_b.name(),
            b_roll,
            b_mod,
            b_total,
            self.participant(order[0]).name()
        );
        self.log.push(line);
        tracing::debug!(a_total, b_total, first = ?order[0], "initiative rolled");

        self.initiative_order = Some(order);
        self.state = CombatState::InitiativeRolled;
        Ok(order)
    }

    /// One swing from `attacker` at the other participant.
    ///
    /// Does not check liveness or session state; rounds do that.
    pub fn attack<R: Roller + ?Sized>(&mut self, dice: &mut R, attacker: Side) -> AttackOutcome {
        let (attacker, defender) = match attacker {
            Side::A => (&self.participant_a, &mut self.participant_b),
            Side::B => (&self.participant_b, &mut self.participant_a),
        };
        let log = &mut self.log;
        resolve_attack(dice, attacker, defender, |line| log.push(line))
    }

    /// Plays one pass through the initiative order.
    ///
    /// Dead actors are skipped. The round stops the moment an attack drops
    /// its target, and `false` is returned; later actors do not act. Returns
    /// `true` when both participants are still standing afterwards.
    pub fn execute_round<R: Roller + ?Sized>(&mut self, dice: &mut R) -> EngineResult<bool> {
        let order = match self.state {
            CombatState::NotStarted => return Err(EngineError::InitiativeNotRolled),
            CombatState::Concluded => return Err(EngineError::CombatConcluded),
            CombatState::InitiativeRolled | CombatState::RoundInProgress => {
                self.initiative_order.ok_or(EngineError::InitiativeNotRolled)?
            }
        };

        self.state = CombatState::RoundInProgress;
        self.round += 1;
        self.log.push(format!("[ROUND] {}", self.round));

        for actor in order {
            if !self.participant(actor).is_alive() {
                continue;
            }
            let opponent = actor.opponent();
            if !self.participant(opponent).is_alive() {
                break;
            }
            self.attack(dice, actor);
            if !self.participant(opponent).is_alive() {
                let line = format!("[DOWN][{}] defeated", self.participant(opponent).name());
                self.log.push(line);
                self.state = CombatState::Concluded;
                return Ok(false);
            }
        }

        let continues = self.participant_a.is_alive() && self.participant_b.is_alive();
        if !continues {
            self.state = CombatState::Concluded;
        }
        Ok(continues)
    }

    /// Rolls initiative if needed, then plays rounds until one side is down.
    ///
    /// Fails with [`EngineError::Stalemate`] when `max_rounds` pass with both
    /// sides standing, and with [`EngineError::NoSurvivor`] when both entered
    /// the session already at 0 HP. The returned side always equals
    /// [`winner`](Self::winner).
    pub fn run_combat<R: Roller + ?Sized>(&mut self, dice: &mut R) -> EngineResult<Side> {
        match self.state {
            CombatState::Concluded => return Err(EngineError::CombatConcluded),
            CombatState::NotStarted => {
                let line = format!(
                    "[START] {} vs {}",
                    describe(&self.participant_a),
                    describe(&self.participant_b)
                );
                self.log.push(line);
                self.roll_initiative(dice)?;
            }
            CombatState::InitiativeRolled | CombatState::RoundInProgress => {}
        }

        while self.participant_a.is_alive() && self.participant_b.is_alive() {
            if self.round >= self.config.max_rounds {
                self.log.push(format!("[END] stalemate after {} rounds", self.round));
                tracing::warn!(rounds = self.round, "combat hit the round cap");
                return Err(EngineError::Stalemate { rounds: self.round });
            }
            if !self.execute_round(dice)? {
                break;
            }
        }

        self.state = CombatState::Concluded;
        let Some(winner) = self.winner() else {
            self.log.push(format!("[END] no survivor rounds={}", self.round));
            tracing::warn!(rounds = self.round, "both participants were down");
            return Err(EngineError::NoSurvivor);
        };
        let name = self.participant(winner).name().to_string();
        tracing::info!(winner = %name, rounds = self.round, "combat concluded");
        self.log.push(format!("[END] winner={} rounds={}", name, self.round));
        Ok(winner)
    }
}

fn describe(e: &Entity) -> String {
    format!(
        "{} (HP {}/{}, AC {})",
        e.name(),
        e.hit_points(),
        e.max_hit_points(),
        e.armor_class()
    )
}
