use axum::Json;
use axum::extract::State;
use ombaro_core::{AppError, AppResult, UserIdentity};
use ombaro_domain::UserProfile;
use tower_sessions::Session;
use tracing::info;

use crate::dto::{CurrentUserResponse, SuccessResponse, UserProfileResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{SESSION_ABSOLUTE_TIMEOUT_SECONDS, SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

/// Resolves the signed-in profile behind the session.
///
/// Returns `None` for anonymous sessions. Sessions past the absolute timeout,
/// or whose account was removed or deactivated since sign-in, are flushed and
/// also yield `None`.
pub(crate) async fn active_session_profile(
    state: &AppState,
    session: &Session,
) -> AppResult<Option<UserProfile>> {
    let Some(identity) = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
    else {
        return Ok(None);
    };

    let created_at = session
        .get::<i64>(SESSION_CREATED_AT_KEY)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to read session creation time: {error}"))
        })?;
    if !within_absolute_timeout(created_at, chrono::Utc::now().timestamp()) {
        info!(user_id = identity.subject(), "session reached its absolute timeout");
        flush(session).await?;
        return Ok(None);
    }

    let profile = state
        .user_service
        .current_profile(&identity)
        .await?
        .filter(|profile| profile.is_active());
    if profile.is_none() {
        info!(user_id = identity.subject(), "session account is no longer active");
        flush(session).await?;
    }

    Ok(profile)
}

fn within_absolute_timeout(created_at: Option<i64>, now: i64) -> bool {
    created_at.is_some_and(|created_at| {
        now.saturating_sub(created_at) < SESSION_ABSOLUTE_TIMEOUT_SECONDS
    })
}

async fn flush(session: &Session) -> AppResult<()> {
    session
        .flush()
        .await
        .map_err(|error| AppError::Internal(format!("failed to clear session: {error}")))
}

pub async fn logout_handler(session: Session) -> ApiResult<Json<SuccessResponse>> {
    flush(&session).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn current_user_handler(
    State(state): State<AppState>,
    session: Session,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user = active_session_profile(&state, &session)
        .await?
        .map(UserProfileResponse::from);

    Ok(Json(CurrentUserResponse {
        success: true,
        user,
    }))
}
