use async_trait::async_trait;
use auth::TokenPair;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::SignInCommand;
use crate::domain::authentication::models::SignUpCommand;
use crate::domain::user::models::UserId;

/// Port for account registration and credential checks.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Returns
    /// Identifier of the created account
    ///
    /// # Errors
    /// * `DuplicateCredential` - Username or email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<UserId, AuthError>;

    /// Check credentials and issue a token pair.
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this email
    /// * `InvalidPassword` - Password does not match
    /// * `Token` - Signing failed
    /// * `DatabaseError` - Database operation failed
    async fn sign_in(&self, command: SignInCommand) -> Result<TokenPair, AuthError>;

    /// Verify an access token and return the identity it carries.
    ///
    /// # Errors
    /// * `Token` - Token is malformed, forged or expired
    fn parse_token(&self, token: &str) -> Result<UserId, AuthError>;
}
