use async_trait::async_trait;
use sqlx::PgPool;

use super::user::row_to_user;
use crate::domain::follower::errors::FollowerError;
use crate::domain::follower::ports::FollowerRepository;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

pub struct PostgresFollowerRepository {
    pool: PgPool,
}

impl PostgresFollowerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_users(&self, query: &str, user: &UserId) -> Result<Vec<User>, FollowerError> {
        let rows = sqlx::query(query)
            .bind(user.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| FollowerError::DatabaseError(e.to_string()))?;

        rows.iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| FollowerError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl FollowerRepository for PostgresFollowerRepository {
    async fn follow(&self, follower: &UserId, followee: &UserId) -> Result<(), FollowerError> {
        sqlx::query(
            r#"
            INSERT INTO followers (follower_id, followee_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(follower.0)
        .bind(followee.0)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return FollowerError::UserNotFound;
                }
            }
            FollowerError::DatabaseError(e.to_string())
        })?;

        Ok(())
    }

    async fn unfollow(
        &self,
        follower: &UserId,
        followee: &UserId,
    ) -> Result<(), FollowerError> {
        let result = sqlx::query(
            r#"
            DELETE FROM followers
            WHERE follower_id = $1 AND followee_id = $2
            "#,
        )
        .bind(follower.0)
        .bind(followee.0)
        .execute(&self.pool)
        .await
        .map_err(|e| FollowerError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(FollowerError::RelationshipNotFound);
        }

        Ok(())
    }

    async fn find_followers(&self, user: &UserId) -> Result<Vec<User>, FollowerError> {
        self.fetch_users(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.bio, u.birthday,
                   u.created_at, u.updated_at
            FROM users u
            JOIN followers f ON u.id = f.follower_id
            WHERE f.followee_id = $1
            ORDER BY f.created_at
            "#,
            user,
        )
        .await
    }

    async fn find_following(&self, user: &UserId) -> Result<Vec<User>, FollowerError> {
        self.fetch_users(
            r#"
            SELECT u.id, u.username, u.email, u.password_hash, u.bio, u.birthday,
                   u.created_at, u.updated_at
            FROM users u
            JOIN followers f ON u.id = f.followee_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at
            "#,
            user,
        )
        .await
    }
}
