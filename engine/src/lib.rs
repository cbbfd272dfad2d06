//! Two-combatant d20 combat engine.
//!
//! Entities are built from template tables, handed to a [`CombatSession`]
//! and resolved with a [`Roller`]. The engine never prints; every step is
//! appended to the session log and mirrored as `tracing` events.

pub mod ability;
pub mod api;
pub mod character;
pub mod combat;
pub mod content;
pub mod dice;
pub mod enemy;
pub mod entity;
pub mod error;
pub mod spells;
pub mod templates;

pub use ability::{ability_mod, Ability, AbilityScores};
pub use combat::{AttackOutcome, CombatConfig, CombatSession, CombatState, Side};
pub use dice::{AdMode, Dice, DiceRoll, Roller, ScriptedDice};
pub use entity::{Entity, EntityKind};
pub use error::{EngineError, EngineResult};
pub use templates::{EnemyTable, EnemyTemplate, RaceTable};
