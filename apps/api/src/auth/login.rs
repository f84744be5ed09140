use axum::Json;
use axum::extract::State;
use ombaro_application::LoginOutcome;
use ombaro_core::AppError;
use tower_sessions::Session;
use tracing::{info, warn};

use crate::dto::{LoginRequest, LoginResponse, UserProfileResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY, identity_for};

pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = state
        .user_service
        .login(
            payload.username.as_str(),
            payload.password.as_str(),
            payload.user_type.as_str(),
        )
        .await?;

    let profile = match outcome {
        LoginOutcome::Authenticated(profile) => profile,
        LoginOutcome::Failed => {
            warn!(user_type = %payload.user_type, "login rejected");
            return Err(AppError::Unauthorized("invalid credentials".to_owned()).into());
        }
    };

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, identity_for(&profile))
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    info!(user_id = %profile.id, role = profile.role.as_str(), "user signed in");

    Ok(Json(LoginResponse {
        success: true,
        user: UserProfileResponse::from(profile),
    }))
}
