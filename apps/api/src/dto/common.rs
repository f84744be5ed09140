use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

/// Bare acknowledgement returned by state-changing endpoints without a body.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/success-response.ts"
)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

pub(super) fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(super) fn parse_uuid(value: &str, field: &str) -> ombaro_core::AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(value.trim()).map_err(|error| {
        ombaro_core::AppError::Validation(format!("invalid {field} '{value}': {error}"))
    })
}
