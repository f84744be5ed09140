//! PostgreSQL-backed attendance and leave repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use ombaro_application::AttendanceRepository;
use ombaro_core::{AppError, AppResult};
use ombaro_domain::{
    AttendanceRecord, AttendanceStatus, LeaveRequest, LeaveStatus, LeaveType, UserId,
};

mod leave;

/// PostgreSQL implementation of the attendance repository port.
#[derive(Clone)]
pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AttendanceRow {
    id: Uuid,
    user_id: Uuid,
    date: NaiveDate,
    status: String,
    check_in: Option<chrono::DateTime<chrono::Utc>>,
    check_out: Option<chrono::DateTime<chrono::Utc>>,
    notes: Option<String>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = AppError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<AttendanceStatus>().map_err(|error| {
            AppError::Internal(format!(
                "stored attendance record '{}' is invalid: {error}",
                row.id
            ))
        })?;

        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            date: row.date,
            status,
            check_in: row.check_in,
            check_out: row.check_out,
            notes: row.notes,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LeaveRow {
    id: Uuid,
    user_id: Uuid,
    leave_type: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    number_of_days: i32,
    reason: String,
    status: String,
    applied_at: chrono::DateTime<chrono::Utc>,
    reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    reviewed_by: Option<Uuid>,
    reviewer_comments: Option<String>,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = AppError;

    fn try_from(row: LeaveRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |error: AppError| {
            AppError::Internal(format!("stored leave request '{id}' is invalid: {error}"))
        };

        Ok(Self {
            id,
            user_id: UserId::from_uuid(row.user_id),
            leave_type: row.leave_type.parse::<LeaveType>().map_err(invalid)?,
            start_date: row.start_date,
            end_date: row.end_date,
            number_of_days: row.number_of_days,
            reason: row.reason,
            status: row.status.parse::<LeaveStatus>().map_err(invalid)?,
            applied_at: row.applied_at,
            reviewed_at: row.reviewed_at,
            reviewed_by: row.reviewed_by.map(UserId::from_uuid),
            reviewer_comments: row.reviewer_comments,
        })
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn find_attendance(
        &self,
        user_id: UserId,
        date: NaiveDate,
    ) -> AppResult<Option<AttendanceRecord>> {
        let row = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT id, user_id, date, status, check_in, check_out, notes
            FROM attendance_records
            WHERE user_id = $1 AND date = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find attendance: {error}")))?;

        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn insert_attendance(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord> {
        let row = sqlx::query_as::<_, AttendanceRow>(
            r#"
            INSERT INTO attendance_records (id, user_id, date, status, check_in, check_out, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, date, status, check_in, check_out, notes
            "#,
        )
        .bind(record.id)
        .bind(record.user_id.as_uuid())
        .bind(record.date)
        .bind(record.status.as_str())
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(record.notes.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            if let sqlx::Error::Database(ref database_error) = error
                && database_error.code().as_deref() == Some("23505")
            {
                return AppError::Conflict(format!("already checked in on {}", record.date));
            }

            AppError::Internal(format!("failed to record attendance: {error}"))
        })?;

        AttendanceRecord::try_from(row)
    }

    async fn update_attendance(&self, record: AttendanceRecord) -> AppResult<AttendanceRecord> {
        let row = sqlx::query_as::<_, AttendanceRow>(
            r#"
            UPDATE attendance_records
            SET status = $2, check_in = $3, check_out = $4, notes = $5
            WHERE id = $1
            RETURNING id, user_id, date, status, check_in, check_out, notes
            "#,
        )
        .bind(record.id)
        .bind(record.status.as_str())
        .bind(record.check_in)
        .bind(record.check_out)
        .bind(record.notes.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update attendance: {error}")))?
        .ok_or_else(|| {
            AppError::NotFound(format!("attendance record '{}' not found", record.id))
        })?;

        AttendanceRecord::try_from(row)
    }

    async fn list_attendance(
        &self,
        user_id: UserId,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<AttendanceRecord>> {
        let rows = sqlx::query_as::<_, AttendanceRow>(
            r#"
            SELECT id, user_id, date, status, check_in, check_out, notes
            FROM attendance_records
            WHERE user_id = $1
              AND ($2::DATE IS NULL OR date >= $2)
              AND ($3::DATE IS NULL OR date <= $3)
            ORDER BY date DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list attendance: {error}")))?;

        rows.into_iter().map(AttendanceRecord::try_from).collect()
    }

    async fn insert_leave(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        self.insert_leave_impl(request).await
    }

    async fn find_leave(&self, leave_id: Uuid) -> AppResult<Option<LeaveRequest>> {
        self.find_leave_impl(leave_id).await
    }

    async fn list_leaves_for_user(&self, user_id: UserId) -> AppResult<Vec<LeaveRequest>> {
        self.list_leaves_for_user_impl(user_id).await
    }

    async fn list_leaves_by_status(&self, status: LeaveStatus) -> AppResult<Vec<LeaveRequest>> {
        self.list_leaves_by_status_impl(status).await
    }

    async fn update_leave(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        self.update_leave_impl(request).await
    }
}

#[cfg(test)]
mod tests;
