use axum::Json;
use axum::extract::{Extension, State};
use ombaro_core::UserIdentity;

use crate::dto::ReportResponse;
use crate::state::AppState;

pub async fn list_reports_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
) -> Json<Vec<ReportResponse>> {
    Json(
        state
            .access_service
            .available_reports(&user)
            .into_iter()
            .map(ReportResponse::from)
            .collect(),
    )
}
