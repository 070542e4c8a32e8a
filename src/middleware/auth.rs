//! Trust-the-client identity extraction.
//!
//! The reader asserts who it is with an `x-user-id` header; there are no
//! tokens or sessions. Entitlements are client-local by design, so the
//! server only checks that the asserted user actually exists.

use crate::errors::AppError;
use crate::models::user_model::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::header::HeaderMap,
    middleware::Next,
    response::Response,
};

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub is_premium: bool,
    pub is_admin: bool,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            is_premium: user.is_premium,
            is_admin: user.is_admin,
        }
    }
}

/// Requires an asserted identity; 401 when the header is missing or names
/// an unknown user.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = lookup_user(&state, request.headers())
        .await?
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(AuthUser::from(user));
    Ok(next.run(request).await)
}

/// Same lookup, but an absent header is a valid anonymous reader. A header
/// naming an unknown user is still rejected. Inserts the full user row so
/// the entitlement checks downstream see everything they need.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = lookup_user(&state, request.headers()).await?;

    if request.headers().contains_key(USER_ID_HEADER) && user.is_none() {
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

async fn lookup_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, AppError> {
    let Some(user_id) = headers.get(USER_ID_HEADER).and_then(|v| v.to_str().ok()) else {
        return Ok(None);
    };

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, username, is_premium, premium_until,
               profile_picture, is_admin, created_at, updated_at
        FROM "User"
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&state.db.pool)
    .await?;

    Ok(user)
}
