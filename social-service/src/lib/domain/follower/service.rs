use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::follower::errors::FollowerError;
use crate::domain::follower::ports::FollowerRepository;
use crate::domain::follower::ports::FollowerServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Domain service implementation for follow relationships.
pub struct FollowerService<FR>
where
    FR: FollowerRepository,
{
    repository: Arc<FR>,
}

impl<FR> FollowerService<FR>
where
    FR: FollowerRepository,
{
    pub fn new(repository: Arc<FR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<FR> FollowerServicePort for FollowerService<FR>
where
    FR: FollowerRepository,
{
    async fn follow(&self, follower: &UserId, followee: &UserId) -> Result<(), FollowerError> {
        if follower == followee {
            return Err(FollowerError::CannotFollowSelf);
        }

        self.repository.follow(follower, followee).await?;
        tracing::debug!(follower_id = %follower, followee_id = %followee, "Followed user");

        Ok(())
    }

    async fn unfollow(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<(), FollowerError> {
        self.repository.unfollow(follower, followee).await?;
        tracing::debug!(follower_id = %follower, followee_id = %followee, "Unfollowed user");

        Ok(())
    }

    async fn list_followers(&self, user: &UserId) -> Result<Vec<User>, FollowerError> {
        self.repository.find_followers(user).await
    }

    async fn list_following(&self, user: &UserId) -> Result<Vec<User>, FollowerError> {
        self.repository.find_following(user).await
    }
}
