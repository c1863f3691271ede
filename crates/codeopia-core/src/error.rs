/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when building or querying a world.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No clan with this name exists in the world.
    #[error("clan not found: \"{0}\"")]
    ClanNotFound(String),

    /// A clan with the same name already exists.
    #[error("clan already exists: \"{0}\"")]
    DuplicateClan(String),

    /// A road was given a travel time that is not a positive, finite number.
    #[error("invalid road {from} <-> {to}: travel time {time} must be positive")]
    InvalidRoad {
        /// One endpoint of the road.
        from: String,
        /// The other endpoint of the road.
        to: String,
        /// The rejected travel time.
        time: f64,
    },

    /// A generic validation error with a descriptive message.
    #[error("validation error: {0}")]
    Validation(String),
}
