//! Error types for the combat engine.

/// Errors raised by template lookups and combat state transitions.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A race or enemy-type key is not present in the table it was looked up in.
    #[error("invalid {table} key '{key}'; expected one of: {}", .available.join(", "))]
    InvalidTemplateKey {
        table: &'static str,
        key: String,
        available: Vec<String>,
    },

    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    /// Initiative is fixed for the whole session.
    #[error("initiative has already been rolled for this session")]
    InitiativeAlreadyRolled,

    #[error("initiative must be rolled before a round can start")]
    InitiativeNotRolled,

    #[error("combat has already concluded")]
    CombatConcluded,

    /// Neither side dropped within the configured round cap.
    #[error("no winner after {rounds} rounds")]
    Stalemate { rounds: u32 },

    #[error("both participants are down; there is no winner")]
    NoSurvivor,

    #[error("failed to parse {what}: {source}")]
    TemplateParse {
        what: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
