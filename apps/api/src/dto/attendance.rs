use chrono::NaiveDate;
use ombaro_application::ApplyLeaveInput;
use ombaro_core::AppResult;
use ombaro_domain::{AttendanceRecord, LeaveRequest};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::format_timestamp;

/// API representation of a day's attendance.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/attendance-response.ts"
)]
pub struct AttendanceResponse {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub status: String,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub work_hours: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/check-in-request.ts"
)]
pub struct CheckInRequest {
    pub notes: Option<String>,
}

/// Optional inclusive date range, `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// API representation of a leave request.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/leave-response.ts"
)]
pub struct LeaveResponse {
    pub id: String,
    pub user_id: String,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub number_of_days: i32,
    pub reason: String,
    pub status: String,
    pub applied_at: String,
    pub reviewed_at: Option<String>,
    pub reviewed_by: Option<String>,
    pub reviewer_comments: Option<String>,
}

/// Incoming payload for a leave application.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/apply-leave-request.ts"
)]
pub struct ApplyLeaveRequest {
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
}

#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/review-leave-request.ts"
)]
pub struct ReviewLeaveRequest {
    pub comments: Option<String>,
}

impl From<AttendanceRecord> for AttendanceResponse {
    fn from(record: AttendanceRecord) -> Self {
        let work_hours = record.work_hours();
        Self {
            id: record.id.to_string(),
            user_id: record.user_id.to_string(),
            date: record.date.to_string(),
            status: record.status.as_str().to_owned(),
            check_in: record.check_in.map(format_timestamp),
            check_out: record.check_out.map(format_timestamp),
            work_hours,
            notes: record.notes,
        }
    }
}

impl From<LeaveRequest> for LeaveResponse {
    fn from(request: LeaveRequest) -> Self {
        Self {
            id: request.id.to_string(),
            user_id: request.user_id.to_string(),
            leave_type: request.leave_type.as_str().to_owned(),
            start_date: request.start_date.to_string(),
            end_date: request.end_date.to_string(),
            number_of_days: request.number_of_days,
            reason: request.reason,
            status: request.status.as_str().to_owned(),
            applied_at: format_timestamp(request.applied_at),
            reviewed_at: request.reviewed_at.map(format_timestamp),
            reviewed_by: request.reviewed_by.map(|id| id.to_string()),
            reviewer_comments: request.reviewer_comments,
        }
    }
}

fn parse_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|error| {
        ombaro_core::AppError::Validation(format!("invalid {field} '{value}': {error}"))
    })
}

impl TryFrom<ApplyLeaveRequest> for ApplyLeaveInput {
    type Error = ombaro_core::AppError;

    fn try_from(request: ApplyLeaveRequest) -> AppResult<Self> {
        Ok(Self {
            leave_type: request.leave_type.parse()?,
            start_date: parse_date(&request.start_date, "start_date")?,
            end_date: parse_date(&request.end_date, "end_date")?,
            reason: request.reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use ombaro_application::ApplyLeaveInput;
    use ombaro_core::AppError;

    use super::ApplyLeaveRequest;

    fn request(start_date: &str) -> ApplyLeaveRequest {
        ApplyLeaveRequest {
            leave_type: "casual".to_owned(),
            start_date: start_date.to_owned(),
            end_date: "2026-03-04".to_owned(),
            reason: "family function".to_owned(),
        }
    }

    #[test]
    fn leave_request_dates_are_iso_days() {
        let input = ApplyLeaveInput::try_from(request("2026-03-02"));
        assert!(input.is_ok_and(|input| input.start_date.to_string() == "2026-03-02"));

        let invalid = ApplyLeaveInput::try_from(request("02/03/2026"));
        assert!(matches!(invalid, Err(AppError::Validation(_))));
    }
}
