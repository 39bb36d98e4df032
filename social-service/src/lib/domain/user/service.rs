use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::ProfileServicePort;
use crate::user::ports::UserRepository;

/// Domain service implementation for profile operations.
pub struct ProfileService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
}

impl<UR> ProfileService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<UR> ProfileServicePort for ProfileService<UR>
where
    UR: UserRepository,
{
    async fn get_profile(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            user.email = new_email;
        }

        if let Some(new_bio) = command.bio {
            user.bio = Some(new_bio);
        }

        if let Some(new_birthday) = command.birthday {
            user.birthday = Some(new_birthday);
        }

        user.updated_at = Utc::now();

        let updated_user = self.repository.update(user).await?;
        tracing::debug!(user_id = %updated_user.id, "Profile updated");

        Ok(updated_user)
    }
}
