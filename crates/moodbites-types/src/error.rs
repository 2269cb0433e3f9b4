use thiserror::Error;

/// Errors from repository operations (used by trait definitions in moodbites-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("stored value is malformed: {0}")]
    Corrupt(String),

    #[error("invalid value: {0}")]
    Invalid(String),
}

/// Why the session refused a submitted turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejection {
    #[error("message is empty")]
    EmptyInput,

    #[error("a reply is still being generated")]
    TurnInFlight,
}
