use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use ombaro_core::{AppError, UserIdentity};
use ombaro_domain::VendorApplicationStatus;
use uuid::Uuid;

use crate::dto::{
    ApprovalHistoryResponse, ApproveVendorApplicationRequest, RejectVendorApplicationRequest,
    RequestVendorInfoRequest, SubmitVendorApplicationRequest, VendorApplicationListQuery,
    VendorApplicationResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

fn into_responses(
    applications: Vec<ombaro_domain::VendorApplication>,
) -> Json<Vec<VendorApplicationResponse>> {
    Json(
        applications
            .into_iter()
            .map(VendorApplicationResponse::from)
            .collect(),
    )
}

pub async fn submit_application_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Json(payload): Json<SubmitVendorApplicationRequest>,
) -> ApiResult<(StatusCode, Json<VendorApplicationResponse>)> {
    let application = state
        .vendor_service
        .submit_application(&user, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(VendorApplicationResponse::from(application)),
    ))
}

pub async fn list_applications_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Query(query): Query<VendorApplicationListQuery>,
) -> ApiResult<Json<Vec<VendorApplicationResponse>>> {
    let status = query
        .status
        .filter(|status| !status.trim().is_empty())
        .map(|status| status.parse::<VendorApplicationStatus>())
        .transpose()?;

    let applications = state
        .vendor_service
        .list_applications(&user, status)
        .await?;
    Ok(into_responses(applications))
}

pub async fn my_applications_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<VendorApplicationResponse>>> {
    let applications = state.vendor_service.my_applications(&user).await?;
    Ok(into_responses(applications))
}

pub async fn review_queue_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> ApiResult<Json<Vec<VendorApplicationResponse>>> {
    let applications = state.vendor_service.review_queue(&user).await?;
    Ok(into_responses(applications))
}

pub async fn get_application_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(application_id): Path<Uuid>,
) -> ApiResult<Json<VendorApplicationResponse>> {
    let application = state
        .vendor_service
        .find_application(&user, application_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("vendor application '{application_id}' not found"))
        })?;

    Ok(Json(VendorApplicationResponse::from(application)))
}

pub async fn approve_application_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(application_id): Path<Uuid>,
    payload: Option<Json<ApproveVendorApplicationRequest>>,
) -> ApiResult<Json<VendorApplicationResponse>> {
    let comments = payload.and_then(|Json(payload)| payload.comments);
    let application = state
        .vendor_service
        .approve(&user, application_id, comments)
        .await?;

    Ok(Json(VendorApplicationResponse::from(application)))
}

pub async fn reject_application_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(application_id): Path<Uuid>,
    Json(payload): Json<RejectVendorApplicationRequest>,
) -> ApiResult<Json<VendorApplicationResponse>> {
    let application = state
        .vendor_service
        .reject(&user, application_id, payload.reason.as_str())
        .await?;

    Ok(Json(VendorApplicationResponse::from(application)))
}

pub async fn request_info_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(application_id): Path<Uuid>,
    Json(payload): Json<RequestVendorInfoRequest>,
) -> ApiResult<Json<VendorApplicationResponse>> {
    let application = state
        .vendor_service
        .request_additional_info(&user, application_id, payload.note.as_str())
        .await?;

    Ok(Json(VendorApplicationResponse::from(application)))
}

pub async fn approval_history_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(application_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ApprovalHistoryResponse>>> {
    let history = state
        .vendor_service
        .approval_history(&user, application_id)
        .await?
        .into_iter()
        .map(ApprovalHistoryResponse::from)
        .collect();

    Ok(Json(history))
}
