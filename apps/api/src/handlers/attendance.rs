use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use ombaro_application::ApplyLeaveInput;
use ombaro_core::UserIdentity;
use uuid::Uuid;

use crate::dto::{
    ApplyLeaveRequest, AttendanceRangeQuery, AttendanceResponse, CheckInRequest, LeaveResponse,
    ReviewLeaveRequest,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn check_in_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    payload: Option<Json<CheckInRequest>>,
) -> ApiResult<(StatusCode, Json<AttendanceResponse>)> {
    let notes = payload
        .and_then(|Json(payload)| payload.notes)
        .filter(|notes| !notes.trim().is_empty());
    let record = state.attendance_service.check_in(&user, notes).await?;

    Ok((StatusCode::CREATED, Json(AttendanceResponse::from(record))))
}

pub async fn check_out_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<AttendanceResponse>> {
    let record = state.attendance_service.check_out(&user).await?;
    Ok(Json(AttendanceResponse::from(record)))
}

pub async fn my_attendance_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(range): Query<AttendanceRangeQuery>,
) -> ApiResult<Json<Vec<AttendanceResponse>>> {
    let records = state
        .attendance_service
        .my_attendance(&user, range.from, range.to)
        .await?
        .into_iter()
        .map(AttendanceResponse::from)
        .collect();

    Ok(Json(records))
}

pub async fn apply_leave_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<ApplyLeaveRequest>,
) -> ApiResult<(StatusCode, Json<LeaveResponse>)> {
    let request = state
        .attendance_service
        .apply_leave(&user, ApplyLeaveInput::try_from(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(LeaveResponse::from(request))))
}

pub async fn my_leaves_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<LeaveResponse>>> {
    let requests = state
        .attendance_service
        .my_leaves(&user)
        .await?
        .into_iter()
        .map(LeaveResponse::from)
        .collect();

    Ok(Json(requests))
}

pub async fn pending_leaves_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<LeaveResponse>>> {
    let requests = state
        .attendance_service
        .pending_leaves(&user)
        .await?
        .into_iter()
        .map(LeaveResponse::from)
        .collect();

    Ok(Json(requests))
}

pub async fn approve_leave_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<Uuid>,
    payload: Option<Json<ReviewLeaveRequest>>,
) -> ApiResult<Json<LeaveResponse>> {
    let comments = payload.and_then(|Json(payload)| payload.comments);
    let request = state
        .attendance_service
        .approve_leave(&user, leave_id, comments)
        .await?;

    Ok(Json(LeaveResponse::from(request)))
}

pub async fn reject_leave_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(leave_id): Path<Uuid>,
    payload: Option<Json<ReviewLeaveRequest>>,
) -> ApiResult<Json<LeaveResponse>> {
    let comments = payload.and_then(|Json(payload)| payload.comments);
    let request = state
        .attendance_service
        .reject_leave(&user, leave_id, comments)
        .await?;

    Ok(Json(LeaveResponse::from(request)))
}
