//! Staff attendance and leave requests.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use ombaro_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::user::UserId;

/// Attendance state of a user for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Checked in.
    Present,
    /// Did not show up.
    Absent,
    /// On approved leave.
    OnLeave,
    /// Worked half a day.
    HalfDay,
}

impl AttendanceStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::OnLeave => "on_leave",
            Self::HalfDay => "half_day",
        }
    }
}

impl FromStr for AttendanceStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "present" => Ok(Self::Present),
            "absent" => Ok(Self::Absent),
            "on_leave" => Ok(Self::OnLeave),
            "half_day" => Ok(Self::HalfDay),
            _ => Err(AppError::Validation(format!(
                "unknown attendance status '{value}'"
            ))),
        }
    }
}

/// One user's attendance for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Record id.
    pub id: Uuid,
    /// Staff member.
    pub user_id: UserId,
    /// Calendar day, unique per user.
    pub date: NaiveDate,
    /// Attendance state.
    pub status: AttendanceStatus,
    /// Check-in time.
    pub check_in: Option<DateTime<Utc>>,
    /// Check-out time.
    pub check_out: Option<DateTime<Utc>>,
    /// Free-text notes.
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// Returns worked hours once checked out.
    #[must_use]
    pub fn work_hours(&self) -> Option<f64> {
        let (check_in, check_out) = (self.check_in?, self.check_out?);
        let minutes = (check_out - check_in).num_minutes();
        Some(minutes as f64 / 60.0)
    }
}

/// Kind of leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Sick leave.
    Sick,
    /// Casual leave.
    Casual,
    /// Annual leave.
    Annual,
    /// Unpaid leave.
    Unpaid,
    /// Maternity leave.
    Maternity,
    /// Paternity leave.
    Paternity,
}

impl LeaveType {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sick => "sick",
            Self::Casual => "casual",
            Self::Annual => "annual",
            Self::Unpaid => "unpaid",
            Self::Maternity => "maternity",
            Self::Paternity => "paternity",
        }
    }
}

impl FromStr for LeaveType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "sick" => Ok(Self::Sick),
            "casual" => Ok(Self::Casual),
            "annual" => Ok(Self::Annual),
            "unpaid" => Ok(Self::Unpaid),
            "maternity" => Ok(Self::Maternity),
            "paternity" => Ok(Self::Paternity),
            _ => Err(AppError::Validation(format!("unknown leave type '{value}'"))),
        }
    }
}

/// Review status of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Waiting for review.
    Pending,
    /// Granted. Terminal.
    Approved,
    /// Declined. Terminal.
    Rejected,
}

impl LeaveStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Validates a review transition to `next`.
    pub fn transition_to(self, next: Self) -> AppResult<Self> {
        if self != Self::Pending {
            return Err(AppError::Conflict(format!(
                "leave request is already {} and cannot become {}",
                self.as_str(),
                next.as_str()
            )));
        }

        Ok(next)
    }
}

impl FromStr for LeaveStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::Validation(format!(
                "unknown leave status '{value}'"
            ))),
        }
    }
}

/// Inclusive number of calendar days between two dates.
pub fn leave_days(start_date: NaiveDate, end_date: NaiveDate) -> AppResult<i32> {
    if end_date < start_date {
        return Err(AppError::Validation(
            "leave end date must not be before the start date".to_owned(),
        ));
    }

    let days = (end_date - start_date).num_days() + 1;
    i32::try_from(days)
        .map_err(|_| AppError::Validation("leave period is too long".to_owned()))
}

/// A leave application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Request id.
    pub id: Uuid,
    /// Applicant.
    pub user_id: UserId,
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day off.
    pub start_date: NaiveDate,
    /// Last day off.
    pub end_date: NaiveDate,
    /// Inclusive day count.
    pub number_of_days: i32,
    /// Reason given by the applicant.
    pub reason: String,
    /// Review status.
    pub status: LeaveStatus,
    /// Submission time.
    pub applied_at: DateTime<Utc>,
    /// Review time.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Reviewer.
    pub reviewed_by: Option<UserId>,
    /// Reviewer comments.
    pub reviewer_comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|error| panic!("{error}"))
    }

    #[test]
    fn leave_days_are_inclusive() {
        assert_eq!(leave_days(date("2026-03-02"), date("2026-03-02")).ok(), Some(1));
        assert_eq!(leave_days(date("2026-03-02"), date("2026-03-06")).ok(), Some(5));
        assert!(leave_days(date("2026-03-06"), date("2026-03-02")).is_err());
    }

    #[test]
    fn only_pending_leave_can_be_reviewed() {
        assert_eq!(
            LeaveStatus::Pending.transition_to(LeaveStatus::Approved).ok(),
            Some(LeaveStatus::Approved)
        );
        assert!(matches!(
            LeaveStatus::Approved.transition_to(LeaveStatus::Rejected),
            Err(AppError::Conflict(_))
        ));
    }

    #[test]
    fn work_hours_need_both_timestamps() {
        let check_in = Utc::now();
        let mut record = AttendanceRecord {
            id: Uuid::new_v4(),
            user_id: UserId::new(),
            date: check_in.date_naive(),
            status: AttendanceStatus::Present,
            check_in: Some(check_in),
            check_out: None,
            notes: None,
        };
        assert_eq!(record.work_hours(), None);

        record.check_out = Some(check_in + Duration::minutes(450));
        assert_eq!(record.work_hours(), Some(7.5));
    }
}
