use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use ombaro_application::UserListQuery;
use ombaro_core::{AppError, AppResult, UserIdentity};
use ombaro_domain::{RoleId, UserId};

use crate::dto::{
    CreateUserRequest, ProfileResponse, SuccessResponse, UpdateUserRequest,
    UpdateUserStatusRequest, UserListQueryParams, UserProfileResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

/// Public profile lookup used by the login flow.
pub async fn profile_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<ProfileResponse>> {
    let user_id = UserId::parse(user_id.as_str())?;
    let profile = state
        .user_service
        .find_profile(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;

    Ok(Json(ProfileResponse {
        success: true,
        profile: UserProfileResponse::from(profile),
    }))
}

pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(params): Query<UserListQueryParams>,
) -> ApiResult<Json<Vec<UserProfileResponse>>> {
    let query = list_query(params)?;
    let users = state
        .user_service
        .list_users(&user, query)
        .await?
        .into_iter()
        .map(UserProfileResponse::from)
        .collect();

    Ok(Json(users))
}

pub async fn get_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<UserProfileResponse>> {
    let user_id = UserId::parse(user_id.as_str())?;
    let profile = state
        .user_service
        .get_user(&user, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))?;

    Ok(Json(UserProfileResponse::from(profile)))
}

pub async fn create_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserProfileResponse>)> {
    let profile = state
        .user_service
        .create_user(&user, payload.into())
        .await?;

    Ok((StatusCode::CREATED, Json(UserProfileResponse::from(profile))))
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserProfileResponse>> {
    let user_id = UserId::parse(user_id.as_str())?;
    let profile = state
        .user_service
        .update_user(&user, user_id, payload.into())
        .await?;

    Ok(Json(UserProfileResponse::from(profile)))
}

pub async fn update_user_status_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
    Json(payload): Json<UpdateUserStatusRequest>,
) -> ApiResult<Json<UserProfileResponse>> {
    let user_id = UserId::parse(user_id.as_str())?;
    let profile = state
        .user_service
        .set_user_status(&user, user_id, payload.status.parse()?)
        .await?;

    Ok(Json(UserProfileResponse::from(profile)))
}

/// Soft-deletes a user by marking the profile inactive.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(user_id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let user_id = UserId::parse(user_id.as_str())?;
    state.user_service.delete_user(&user, user_id).await?;

    Ok(Json(SuccessResponse::ok()))
}

fn list_query(params: UserListQueryParams) -> AppResult<UserListQuery> {
    Ok(UserListQuery {
        role: params
            .role
            .filter(|role| !role.trim().is_empty())
            .map(RoleId::new)
            .transpose()?,
        status: params
            .status
            .filter(|status| !status.trim().is_empty())
            .map(|status| status.parse())
            .transpose()?,
        search: params.search.filter(|search| !search.trim().is_empty()),
    })
}
