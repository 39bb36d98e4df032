use async_trait::async_trait;

use crate::domain::follower::errors::FollowerError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for follow relationship operations.
#[async_trait]
pub trait FollowerServicePort: Send + Sync + 'static {
    /// Make `follower` follow `followee`. Following twice is a no-op.
    ///
    /// # Errors
    /// * `CannotFollowSelf` - Both identifiers are the same
    /// * `UserNotFound` - Followee does not exist
    /// * `DatabaseError` - Database operation failed
    async fn follow(&self, follower: &UserId, followee: &UserId) -> Result<(), FollowerError>;

    /// Remove the relationship from `follower` to `followee`.
    ///
    /// # Errors
    /// * `RelationshipNotFound` - `follower` does not follow `followee`
    /// * `DatabaseError` - Database operation failed
    async fn unfollow(&self, follower: &UserId, followee: &UserId)
        -> Result<(), FollowerError>;

    /// Users following `user`.
    async fn list_followers(&self, user: &UserId) -> Result<Vec<User>, FollowerError>;

    /// Users `user` follows.
    async fn list_following(&self, user: &UserId) -> Result<Vec<User>, FollowerError>;
}

/// Persistence operations for follow relationships.
#[async_trait]
pub trait FollowerRepository: Send + Sync + 'static {
    /// Insert the relationship, ignoring an existing one.
    ///
    /// # Errors
    /// * `UserNotFound` - Either side does not exist
    async fn follow(&self, follower: &UserId, followee: &UserId) -> Result<(), FollowerError>;

    /// # Errors
    /// * `RelationshipNotFound` - Nothing was deleted
    async fn unfollow(&self, follower: &UserId, followee: &UserId)
        -> Result<(), FollowerError>;

    async fn find_followers(&self, user: &UserId) -> Result<Vec<User>, FollowerError>;

    async fn find_following(&self, user: &UserId) -> Result<Vec<User>, FollowerError>;
}
