use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::get_profile::ProfileData;
use crate::domain::follower::ports::FollowerServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn list_following(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<Vec<ProfileData>>, ApiError> {
    let user_id = UserId::from_string(&id).map_err(UserError::from)?;

    state
        .follower_service
        .list_following(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                users.iter().map(ProfileData::from).collect(),
            )
        })
}
