use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use ombaro_application::AttendanceRepository;
use ombaro_core::{AppError, AppResult};
use ombaro_domain::{AttendanceRecord, LeaveRequest, LeaveStatus, UserId};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory attendance and leave repository for demo runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryAttendanceRepository {
    attendance: RwLock<HashMap<(UserId, NaiveDate), AttendanceRecord>>,
    leaves: RwLock<HashMap<Uuid, LeaveRequest>>,
}

impl InMemoryAttendanceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attendance: RwLock::new(HashMap::new()),
            leaves: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn find_attendance(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        Ok(self.attendance.read().await.get(&(user_id, date)).cloned())
    }

    async fn insert_attendance(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord> {
        let key = (record.user_id, record.date);
        let mut attendance = self.attendance.write().await;
        if attendance.contains_key(&key) {
            return Err(AppError::Conflict(format!(
                "attendance for user '{}' on {} already exists",
                record.user_id, record.date
            )));
        }

        attendance.insert(key, record.clone());
        Ok(record)
    }

    async fn update_attendance(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord> {
        let mut attendance = self.attendance.write().await;
        let Some(stored) = attendance.get_mut(&(record.user_id, record.date)) else {
            return Err(AppError::NotFound(format!(
                "attendance record '{}' not found",
                record.id
            )));
        };

        *stored = record.clone();
        Ok(record)
    }

    async fn list_attendance(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let attendance = self.attendance.read().await;

        let mut values: Vec<AttendanceRecord> = attendance
            .values()
            .filter(|record| record.user_id == user_id)
            .filter(|record| from.is_none_or(|from| record.date >= from))
            .filter(|record| to.is_none_or(|to| record.date <= to))
            .cloned()
            .collect();
        values.sort_by(|left, right| right.date.cmp(&left.date));

        Ok(values)
    }

    async fn insert_leave(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        self.leaves
            .write()
            .await
            .insert(request.id, request.clone());
        Ok(request)
    }

    async fn find_leave(&self, leave_id: Uuid) -> AppResult<Option<LeaveRequest>> {
        Ok(self.leaves.read().await.get(&leave_id).cloned())
    }

    async fn list_leaves_for_user(&self, user_id: UserId) -> AppResult<Vec<LeaveRequest>> {
        let leaves = self.leaves.read().await;

        let mut values: Vec<LeaveRequest> = leaves
            .values()
            .filter(|request| request.user_id == user_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| right.applied_at.cmp(&left.applied_at));

        Ok(values)
    }

    async fn list_leaves_by_status(&self, status: LeaveStatus) -> AppResult<Vec<LeaveRequest>> {
        let leaves = self.leaves.read().await;

        let mut values: Vec<LeaveRequest> = leaves
            .values()
            .filter(|request| request.status == status)
            .cloned()
            .collect();
        values.sort_by(|left, right| left.applied_at.cmp(&right.applied_at));

        Ok(values)
    }

    async fn update_leave(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        let mut leaves = self.leaves.write().await;
        let Some(stored) = leaves.get_mut(&request.id) else {
            return Err(AppError::NotFound(format!(
                "leave request '{}' not found",
                request.id
            )));
        };

        *stored = request.clone();
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use ombaro_domain::AttendanceStatus;

    use super::*;

    fn record(user_id: UserId, date: &str) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            user_id,
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .unwrap_or_else(|error| panic!("{error}")),
            status: AttendanceStatus::Present,
            check_in: None,
            check_out: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn one_record_per_user_and_day() {
        let repository = InMemoryAttendanceRepository::new();
        let user_id = UserId::new();
        repository
            .insert_attendance(record(user_id, "2026-03-02"))
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        let duplicate = repository
            .insert_attendance(record(user_id, "2026-03-02"))
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let other_user = repository
            .insert_attendance(record(UserId::new(), "2026-03-02"))
            .await;
        assert!(other_user.is_ok());
    }

    #[tokio::test]
    async fn attendance_range_is_inclusive_and_newest_first() {
        let repository = InMemoryAttendanceRepository::new();
        let user_id = UserId::new();
        for date in ["2026-03-01", "2026-03-02", "2026-03-03", "2026-03-04"] {
            repository
                .insert_attendance(record(user_id, date))
                .await
                .unwrap_or_else(|error| panic!("{error}"));
        }

        let from = NaiveDate::from_ymd_opt(2026, 3, 2);
        let to = NaiveDate::from_ymd_opt(2026, 3, 3);
        let listed = repository
            .list_attendance(user_id, from, to)
            .await
            .unwrap_or_default();
        let days: Vec<String> = listed.iter().map(|record| record.date.to_string()).collect();
        assert_eq!(days, vec!["2026-03-03".to_owned(), "2026-03-02".to_owned()]);
    }

    #[tokio::test]
    async fn updating_unknown_leave_is_not_found() {
        let repository = InMemoryAttendanceRepository::new();
        let today = chrono::Utc::now();
        let result = repository
            .update_leave(LeaveRequest {
                id: Uuid::new_v4(),
                user_id: UserId::new(),
                leave_type: ombaro_domain::LeaveType::Sick,
                start_date: today.date_naive(),
                end_date: today.date_naive(),
                number_of_days: 1,
                reason: "fever".to_owned(),
                status: LeaveStatus::Approved,
                applied_at: today,
                reviewed_at: None,
                reviewed_by: None,
                reviewer_comments: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
