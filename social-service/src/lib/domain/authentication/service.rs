use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenPair;
use chrono::Utc;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::models::SignUpCommand;
use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication.
///
/// Composes the shared `Authenticator` with the user store.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new authentication service.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Hasher, issuer and verifier built from the key pair
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<UserId, AuthError> {
        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())?;

        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            bio: None,
            birthday: None,
            created_at: now,
            updated_at: now,
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user.id)
    }

    async fn sign_in(&self, command: SignInCommand) -> Result<TokenPair, AuthError> {
        let user = self
            .repository
            .find_by_email(&command.email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let tokens =
            self.authenticator
                .authenticate(&command.password, &user.password_hash, user.id.0)?;
        tracing::debug!(user_id = %user.id, "Tokens issued");

        Ok(tokens)
    }

    fn parse_token(&self, token: &str) -> Result<UserId, AuthError> {
        let subject = self.authenticator.validate_token(token)?;
        Ok(UserId(subject))
    }
}
