use codeopia_core::CoreError;

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Errors raised by the simulation engine.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A world-model error (unknown clan, bad road, invalid mine config).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A query was issued for a time earlier than the simulation clock.
    #[error("query at time {requested} is earlier than current time {current}")]
    OutOfOrderQuery {
        /// The timestamp the query asked for.
        requested: f64,
        /// The clock at the moment the query arrived.
        current: f64,
    },

    /// A block duration was negative or not finite.
    #[error("invalid block duration: {0}")]
    InvalidDuration(f64),

    /// A transport asked for a negative amount of gold.
    #[error("invalid transport amount: {0}")]
    InvalidAmount(i64),

    /// The simulation configuration is unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A scenario document could not be parsed.
    #[error("invalid scenario: {0}")]
    Scenario(#[from] serde_json::Error),
}
