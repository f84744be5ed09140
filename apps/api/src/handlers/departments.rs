use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use ombaro_application::{CreateDepartmentInput, UpdateDepartmentInput, subject_user_id};
use ombaro_core::{AppError, UserIdentity};
use ombaro_domain::SettingType;
use uuid::Uuid;

use crate::dto::{
    ActivityLogQuery, AssignUserRequest, CreateDepartmentRequest, DepartmentActivityResponse,
    DepartmentAssignmentResponse, DepartmentModuleNodeResponse, DepartmentResponse,
    DepartmentRoleResponse, DepartmentSettingsResponse, DepartmentWidgetResponse,
    LogActivityRequest, SaveWidgetRequest, SuccessResponse, UpdateDepartmentRequest,
    UpdateSettingRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

mod workspace;

pub use workspace::{
    delete_widget_handler, department_activity_handler, department_settings_handler,
    list_widgets_handler, log_activity_handler, save_widget_handler, update_setting_handler,
};

pub async fn list_departments_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let departments = state
        .department_service
        .list_departments()
        .await?
        .into_iter()
        .map(DepartmentResponse::from)
        .collect();

    Ok(Json(departments))
}

pub async fn get_department_handler(
    State(state): State<AppState>,
    Path(department_id): Path<Uuid>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department = state
        .department_service
        .find_department(department_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("department '{department_id}' not found")))?;

    Ok(Json(DepartmentResponse::from(department)))
}

pub async fn get_department_by_code_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department = state
        .department_service
        .find_department_by_code(code.as_str())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("department '{code}' not found")))?;

    Ok(Json(DepartmentResponse::from(department)))
}

pub async fn create_department_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<CreateDepartmentRequest>,
) -> ApiResult<(StatusCode, Json<DepartmentResponse>)> {
    let input = CreateDepartmentInput::try_from(payload)?;
    let department = state
        .department_service
        .create_department(&user, input)
        .await?;

    Ok((StatusCode::CREATED, Json(DepartmentResponse::from(department))))
}

pub async fn update_department_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
    Json(payload): Json<UpdateDepartmentRequest>,
) -> ApiResult<Json<DepartmentResponse>> {
    let input = UpdateDepartmentInput::try_from(payload)?;
    let department = state
        .department_service
        .update_department(&user, department_id, input)
        .await?;

    Ok(Json(DepartmentResponse::from(department)))
}

pub async fn department_modules_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
) -> ApiResult<Json<Vec<DepartmentModuleNodeResponse>>> {
    let modules = state
        .department_service
        .department_modules(&user, department_id)
        .await?
        .into_iter()
        .map(DepartmentModuleNodeResponse::from)
        .collect();

    Ok(Json(modules))
}

pub async fn my_assignments_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<DepartmentAssignmentResponse>>> {
    let assignments = state
        .department_service
        .my_assignments(&user)
        .await?
        .into_iter()
        .map(DepartmentAssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}

pub async fn my_primary_department_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Option<DepartmentResponse>>> {
    let department = state
        .department_service
        .my_primary_department(&user)
        .await?
        .map(DepartmentResponse::from);

    Ok(Json(department))
}

pub async fn assign_user_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
    Json(payload): Json<AssignUserRequest>,
) -> ApiResult<(StatusCode, Json<DepartmentAssignmentResponse>)> {
    let assignment = state
        .department_service
        .assign_user(&user, payload.into_input(department_id)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DepartmentAssignmentResponse::from(assignment)),
    ))
}

/// Reports whether the session user can open the department, and with which rank.
pub async fn department_access_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
) -> ApiResult<Json<DepartmentRoleResponse>> {
    let user_id = subject_user_id(&user)?;
    let assignment_type = state
        .department_service
        .user_department_role(user_id, department_id)
        .await?;

    Ok(Json(DepartmentRoleResponse {
        department_id: department_id.to_string(),
        user_id: user_id.to_string(),
        has_access: assignment_type.is_some(),
        assignment_type: assignment_type.map(|value| value.as_str().to_owned()),
    }))
}
