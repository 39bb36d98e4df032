use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::authentication::ports::AuthServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity resolved from a verified access token.
///
/// Inserted into the request extensions by [`authenticate`]; handlers take it
/// with `Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Middleware that validates the bearer token and attaches the caller identity.
///
/// Rejections are answered with 401 and never reach the handler.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(req.headers())
        .map_err(|message| ApiError::Unauthorized(message.to_string()).into_response())?;

    let user_id = state
        .auth_service
        .parse_token(token)
        .map_err(|e| ApiError::Unauthorized(e.to_string()).into_response())?;

    req.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(req).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, &'static str> {
    let value = match headers.get(header::AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err("empty auth header"),
    };

    let value = value.to_str().map_err(|_| "invalid auth header")?;

    let parts: Vec<&str> = value.split(' ').collect();
    if parts.len() != 2 || parts[0] != "Bearer" {
        return Err("invalid auth header");
    }

    if parts[1].is_empty() {
        return Err("token is empty");
    }

    Ok(parts[1])
}
