use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use ombaro_application::PermissionToggle;
use ombaro_core::{AppError, UserIdentity};
use ombaro_domain::Permission;

use crate::dto::{
    ModuleResponse, NavigationResponse, PermissionCheckQuery, PermissionCheckResponse,
    PermissionMatrixResponse, PreviewPermissionMatrixRequest, RoleOverviewResponse,
    RoleResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_roles_handler(State(state): State<AppState>) -> Json<Vec<RoleResponse>> {
    Json(
        state
            .access_service
            .roles()
            .iter()
            .map(RoleResponse::from)
            .collect(),
    )
}

pub async fn role_overview_handler(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> ApiResult<Json<RoleOverviewResponse>> {
    let overview = state
        .access_service
        .role_overview(role_id.as_str())
        .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' not found")))?;

    Ok(Json(RoleOverviewResponse::from(overview)))
}

pub async fn navigation_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Json<NavigationResponse> {
    let modules = state
        .access_service
        .navigation_for(user.role())
        .iter()
        .map(ModuleResponse::from)
        .collect();

    Json(NavigationResponse {
        role_id: user.role().to_owned(),
        role_label: state.access_service.catalog().role_label(user.role()),
        modules,
    })
}

pub async fn check_permission_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<PermissionCheckQuery>,
) -> ApiResult<Json<PermissionCheckResponse>> {
    let permission = Permission::parse(query.permission.as_str())?;
    let granted = state.access_service.has_permission(&user, &permission);

    Ok(Json(PermissionCheckResponse {
        permission: permission.to_string(),
        granted,
    }))
}

pub async fn permission_matrix_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<PermissionMatrixResponse>> {
    let matrix = state.access_service.permission_matrix(&user)?;
    Ok(Json(PermissionMatrixResponse::from(matrix)))
}

pub async fn preview_permission_matrix_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<PreviewPermissionMatrixRequest>,
) -> ApiResult<Json<PermissionMatrixResponse>> {
    let toggles: Vec<PermissionToggle> = payload
        .toggles
        .into_iter()
        .map(PermissionToggle::from)
        .collect();

    let matrix = state
        .access_service
        .preview_permission_matrix(&user, &toggles)?;
    Ok(Json(PermissionMatrixResponse::from(matrix)))
}

#[cfg(test)]
mod tests;
