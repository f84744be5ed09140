use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, Utc};
use ombaro_core::{AppError, AppResult};
use ombaro_domain::{AttendanceRecord, LeaveRequest, LeaveStatus, LeaveType, UserId};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::AccessService;
use crate::test_support::{fixture_catalog, identity};

use super::{ApplyLeaveInput, AttendanceRepository, AttendanceService, business_day};

#[derive(Default)]
struct FakeAttendanceRepository {
    attendance: Mutex<Vec<AttendanceRecord>>,
    leaves: Mutex<Vec<LeaveRequest>>,
}

#[async_trait]
impl AttendanceRepository for FakeAttendanceRepository {
    async fn find_attendance(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        Ok(self
            .attendance
            .lock()
            .await
            .iter()
            .find(|record| record.user_id == user_id && record.date == date)
            .cloned())
    }

    async fn insert_attendance(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord> {
        self.attendance.lock().await.push(record.clone());
        Ok(record)
    }

    async fn update_attendance(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord> {
        let mut attendance = self.attendance.lock().await;
        attendance.retain(|stored| stored.id != record.id);
        attendance.push(record.clone());
        Ok(record)
    }

    async fn list_attendance(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        Ok(self
            .attendance
            .lock()
            .await
            .iter()
            .filter(|record| record.user_id == user_id)
            .filter(|record| from.is_none_or(|from| record.date >= from))
            .filter(|record| to.is_none_or(|to| record.date <= to))
            .cloned()
            .collect())
    }

    async fn insert_leave(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        self.leaves.lock().await.push(request.clone());
        Ok(request)
    }

    async fn find_leave(&self, leave_id: Uuid) -> AppResult<Option<LeaveRequest>> {
        Ok(self
            .leaves
            .lock()
            .await
            .iter()
            .find(|request| request.id == leave_id)
            .cloned())
    }

    async fn list_leaves_for_user(&self, user_id: UserId) -> AppResult<Vec<LeaveRequest>> {
        Ok(self
            .leaves
            .lock()
            .await
            .iter()
            .rev()
            .filter(|request| request.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_leaves_by_status(&self, status: LeaveStatus) -> AppResult<Vec<LeaveRequest>> {
        Ok(self
            .leaves
            .lock()
            .await
            .iter()
            .filter(|request| request.status == status)
            .cloned()
            .collect())
    }

    async fn update_leave(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        let mut leaves = self.leaves.lock().await;
        leaves.retain(|stored| stored.id != request.id);
        leaves.push(request.clone());
        Ok(request)
    }
}

fn service() -> AttendanceService {
    AttendanceService::new(
        Arc::new(FakeAttendanceRepository::default()),
        AccessService::new(fixture_catalog()),
    )
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap_or_else(|error| panic!("{error}"))
}

fn leave(start: &str, end: &str) -> ApplyLeaveInput {
    ApplyLeaveInput {
        leave_type: LeaveType::Casual,
        start_date: date(start),
        end_date: date(end),
        reason: "family function".to_owned(),
    }
}

#[tokio::test]
async fn one_check_in_per_day() {
    let service = service();
    let actor = identity(UserId::new(), "employee");

    let record = service
        .check_in(&actor, None)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert!(record.check_in.is_some());

    let second = service.check_in(&actor, None).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

fn instant(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value)
        .unwrap_or_else(|error| panic!("{error}"))
        .with_timezone(&Utc)
}

fn offset_hours(hours: i32) -> FixedOffset {
    FixedOffset::east_opt(hours * 3600).unwrap_or_else(|| panic!("offset {hours}"))
}

#[test]
fn business_day_follows_the_configured_offset() {
    let ist = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap_or_else(|| panic!("ist"));
    let late_evening_utc = instant("2026-03-01T20:00:00Z");

    assert_eq!(business_day(late_evening_utc, ist), date("2026-03-02"));
    assert_eq!(business_day(late_evening_utc, offset_hours(0)), date("2026-03-01"));
    assert_eq!(
        business_day(instant("2026-03-02T03:00:00Z"), offset_hours(-5)),
        date("2026-03-01")
    );
}

#[tokio::test]
async fn check_in_is_filed_under_the_business_day() {
    let service = service().with_business_offset(offset_hours(14));
    let actor = identity(UserId::new(), "employee");

    let record = service
        .check_in(&actor, None)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    let checked_in = record
        .check_in
        .unwrap_or_else(|| panic!("check-in time missing"));
    assert_eq!(
        record.date,
        (checked_in + TimeDelta::hours(14)).date_naive()
    );

    let checked_out = service
        .check_out(&actor)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(checked_out.id, record.id);
}

#[tokio::test]
async fn check_out_requires_check_in() {
    let service = service();
    let actor = identity(UserId::new(), "employee");

    let early = service.check_out(&actor).await;
    assert!(matches!(early, Err(AppError::Conflict(_))));

    service
        .check_in(&actor, Some("front desk".to_owned()))
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    let record = service
        .check_out(&actor)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert!(record.work_hours().is_some());

    let twice = service.check_out(&actor).await;
    assert!(matches!(twice, Err(AppError::Conflict(_))));

    let history = service
        .my_attendance(&actor, None, None)
        .await
        .unwrap_or_default();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn attendance_range_must_be_ordered() {
    let service = service();
    let result = service
        .my_attendance(
            &identity(UserId::new(), "employee"),
            Some(date("2026-03-10")),
            Some(date("2026-03-01")),
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn leave_days_are_counted_inclusively() {
    let service = service();
    let actor = identity(UserId::new(), "employee");

    let request = service
        .apply_leave(&actor, leave("2026-03-02", "2026-03-06"))
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(request.number_of_days, 5);
    assert_eq!(request.status, LeaveStatus::Pending);

    let backwards = service
        .apply_leave(&actor, leave("2026-03-06", "2026-03-02"))
        .await;
    assert!(matches!(backwards, Err(AppError::Validation(_))));

    let mine = service.my_leaves(&actor).await.unwrap_or_default();
    assert_eq!(mine.len(), 1);
}

#[tokio::test]
async fn pending_leaves_require_hr_read() {
    let service = service();
    service
        .apply_leave(
            &identity(UserId::new(), "employee"),
            leave("2026-03-02", "2026-03-02"),
        )
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    let denied = service
        .pending_leaves(&identity(UserId::new(), "customer"))
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let pending = service
        .pending_leaves(&identity(UserId::new(), "hr_department"))
        .await
        .unwrap_or_default();
    assert_eq!(pending.len(), 1);
}

#[tokio::test]
async fn reviewed_leave_cannot_be_reviewed_again() {
    let service = service();
    let request = service
        .apply_leave(
            &identity(UserId::new(), "employee"),
            leave("2026-03-02", "2026-03-03"),
        )
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    let reviewer_id = UserId::new();
    let reviewer = identity(reviewer_id, "hr_department");

    let approved = service
        .approve_leave(&reviewer, request.id, Some(" enjoy ".to_owned()))
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(approved.status, LeaveStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(reviewer_id));
    assert_eq!(approved.reviewer_comments.as_deref(), Some("enjoy"));

    let again = service.reject_leave(&reviewer, request.id, None).await;
    assert!(matches!(again, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn applicants_cannot_review_their_own_leave() {
    let service = service();
    let hr_user = UserId::new();
    let actor = identity(hr_user, "hr_department");
    let request = service
        .apply_leave(&actor, leave("2026-03-02", "2026-03-02"))
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    let result = service.approve_leave(&actor, request.id, None).await;
    assert!(matches!(result, Err(AppError::Forbidden(_))));

    let missing = service.reject_leave(&actor, Uuid::new_v4(), None).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
