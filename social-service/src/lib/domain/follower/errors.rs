use thiserror::Error;

/// Errors raised by follow relationship operations.
#[derive(Debug, Clone, Error)]
pub enum FollowerError {
    #[error("cannot follow yourself")]
    CannotFollowSelf,

    #[error("user not found")]
    UserNotFound,

    #[error("relationship not found")]
    RelationshipNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
