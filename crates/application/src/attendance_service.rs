//! Staff attendance and leave requests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use ombaro_core::{AppError, AppResult, UserIdentity};
use ombaro_domain::{
    AttendanceRecord, AttendanceStatus, LeaveRequest, LeaveStatus, LeaveType, PermissionAction,
    UserId, leave_days,
};
use uuid::Uuid;

use crate::{AccessService, subject_user_id};

/// Repository port for `attendance_records` and `leave_requests`.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Finds the attendance record of a user for one day.
    async fn find_attendance(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>>;

    /// Inserts an attendance record. A second record for the same day is a
    /// conflict.
    async fn insert_attendance(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord>;

    /// Replaces an attendance record by id.
    async fn update_attendance(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord>;

    /// Lists a user's attendance in a date range, newest day first.
    async fn list_attendance(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceRecord>>;

    /// Inserts a leave request.
    async fn insert_leave(&self, request: LeaveRequest) -> AppResult<LeaveRequest>;

    /// Finds a leave request by id.
    async fn find_leave(&self, leave_id: Uuid) -> AppResult<Option<LeaveRequest>>;

    /// Lists a user's leave requests, newest first.
    async fn list_leaves_for_user(&self, user_id: UserId) -> AppResult<Vec<LeaveRequest>>;

    /// Lists leave requests in one status, oldest first.
    async fn list_leaves_by_status(&self, status: LeaveStatus) -> AppResult<Vec<LeaveRequest>>;

    /// Stores the review fields of a leave request.
    async fn update_leave(&self, request: LeaveRequest) -> AppResult<LeaveRequest>;
}

/// Parameters for a leave application.
#[derive(Debug, Clone)]
pub struct ApplyLeaveInput {
    /// Kind of leave.
    pub leave_type: LeaveType,
    /// First day off.
    pub start_date: NaiveDate,
    /// Last day off, inclusive.
    pub end_date: NaiveDate,
    /// Reason given by the applicant.
    pub reason: String,
}

/// Offset of India Standard Time, the default business timezone.
pub const DEFAULT_BUSINESS_UTC_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// Application service for attendance and leave.
#[derive(Clone)]
pub struct AttendanceService {
    repository: Arc<dyn AttendanceRepository>,
    access_service: AccessService,
    business_offset: FixedOffset,
}

impl AttendanceService {
    /// Creates a new attendance service on India Standard Time.
    #[must_use]
    pub fn new(repository: Arc<dyn AttendanceRepository>, access_service: AccessService) -> Self {
        Self {
            repository,
            access_service,
            business_offset: FixedOffset::east_opt(DEFAULT_BUSINESS_UTC_OFFSET_SECONDS)
                .unwrap_or_else(|| Utc.fix()),
        }
    }

    /// Uses `offset` to decide which calendar day a check-in belongs to.
    #[must_use]
    pub fn with_business_offset(mut self, offset: FixedOffset) -> Self {
        self.business_offset = offset;
        self
    }

    /// Records the caller's check-in for today.
    pub async fn check_in(
        &self,
        actor: &UserIdentity,
        notes: Option<String>,
    ) -> AppResult<AttendanceRecord> {
        let user_id = subject_user_id(actor)?;
        let now = Utc::now();
        let today = business_day(now, self.business_offset);

        if self
            .repository
            .find_attendance(user_id, today)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "already checked in on {today}"
            )));
        }

        self.repository
            .insert_attendance(AttendanceRecord {
                id: Uuid::new_v4(),
                user_id,
                date: today,
                status: AttendanceStatus::Present,
                check_in: Some(now),
                check_out: None,
                notes,
            })
            .await
    }

    /// Records the caller's check-out for today.
    pub async fn check_out(&self, actor: &UserIdentity) -> AppResult<AttendanceRecord> {
        let user_id = subject_user_id(actor)?;
        let now = Utc::now();
        let today = business_day(now, self.business_offset);

        let mut record = self
            .repository
            .find_attendance(user_id, today)
            .await?
            .filter(|record| record.check_in.is_some())
            .ok_or_else(|| AppError::Conflict(format!("no check-in recorded on {today}")))?;
        if record.check_out.is_some() {
            return Err(AppError::Conflict(format!(
                "already checked out on {today}"
            )));
        }

        record.check_out = Some(now);
        self.repository.update_attendance(record).await
    }

    /// Lists the caller's attendance, optionally within a date range.
    pub async fn my_attendance(
        &self,
        actor: &UserIdentity,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        if let (Some(from), Some(to)) = (from, to)
            && to < from
        {
            return Err(AppError::Validation(
                "attendance range end must not be before its start".to_owned(),
            ));
        }

        let user_id = subject_user_id(actor)?;
        self.repository.list_attendance(user_id, from, to).await
    }

    /// Applies for leave as the caller.
    pub async fn apply_leave(
        &self,
        actor: &UserIdentity,
        input: ApplyLeaveInput,
    ) -> AppResult<LeaveRequest> {
        let user_id = subject_user_id(actor)?;
        let number_of_days = leave_days(input.start_date, input.end_date)?;
        let reason = input.reason.trim();
        if reason.is_empty() {
            return Err(AppError::Validation("a leave reason is required".to_owned()));
        }

        self.repository
            .insert_leave(LeaveRequest {
                id: Uuid::new_v4(),
                user_id,
                leave_type: input.leave_type,
                start_date: input.start_date,
                end_date: input.end_date,
                number_of_days,
                reason: reason.to_owned(),
                status: LeaveStatus::Pending,
                applied_at: Utc::now(),
                reviewed_at: None,
                reviewed_by: None,
                reviewer_comments: None,
            })
            .await
    }

    /// Lists the caller's leave requests.
    pub async fn my_leaves(&self, actor: &UserIdentity) -> AppResult<Vec<LeaveRequest>> {
        let user_id = subject_user_id(actor)?;
        self.repository.list_leaves_for_user(user_id).await
    }

    /// Lists leave requests waiting for HR.
    pub async fn pending_leaves(&self, actor: &UserIdentity) -> AppResult<Vec<LeaveRequest>> {
        self.access_service
            .require(actor, "hr", PermissionAction::Read)?;
        self.repository
            .list_leaves_by_status(LeaveStatus::Pending)
            .await
    }

    /// Approves a pending leave request.
    pub async fn approve_leave(
        &self,
        actor: &UserIdentity,
        leave_id: Uuid,
        comments: Option<String>,
    ) -> AppResult<LeaveRequest> {
        self.review_leave(actor, leave_id, LeaveStatus::Approved, comments)
            .await
    }

    /// Rejects a pending leave request.
    pub async fn reject_leave(
        &self,
        actor: &UserIdentity,
        leave_id: Uuid,
        comments: Option<String>,
    ) -> AppResult<LeaveRequest> {
        self.review_leave(actor, leave_id, LeaveStatus::Rejected, comments)
            .await
    }

    async fn review_leave(
        &self,
        actor: &UserIdentity,
        leave_id: Uuid,
        decision: LeaveStatus,
        comments: Option<String>,
    ) -> AppResult<LeaveRequest> {
        self.access_service
            .require(actor, "hr", PermissionAction::Approve)?;
        let reviewer = subject_user_id(actor)?;

        let mut request = self
            .repository
            .find_leave(leave_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("leave request '{leave_id}' not found")))?;
        if request.user_id == reviewer {
            return Err(AppError::Forbidden(
                "leave requests cannot be reviewed by the applicant".to_owned(),
            ));
        }

        request.status = request.status.transition_to(decision)?;
        request.reviewed_by = Some(reviewer);
        request.reviewed_at = Some(Utc::now());
        request.reviewer_comments = comments
            .map(|comments| comments.trim().to_owned())
            .filter(|comments| !comments.is_empty());

        self.repository.update_leave(request).await
    }
}

/// Calendar day of `now` in the business timezone.
fn business_day(now: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    now.with_timezone(&offset).date_naive()
}

#[cfg(test)]
mod tests;
