use super::*;

const LEAVE_COLUMNS: &str = "id, user_id, leave_type, start_date, end_date, number_of_days, \
     reason, status, applied_at, reviewed_at, reviewed_by, reviewer_comments";

impl PostgresAttendanceRepository {
    pub(super) async fn insert_leave_impl(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            r#"
            INSERT INTO leave_requests (
                id, user_id, leave_type, start_date, end_date, number_of_days,
                reason, status, applied_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {LEAVE_COLUMNS}
            "#
        ))
        .bind(request.id)
        .bind(request.user_id.as_uuid())
        .bind(request.leave_type.as_str())
        .bind(request.start_date)
        .bind(request.end_date)
        .bind(request.number_of_days)
        .bind(request.reason.as_str())
        .bind(request.status.as_str())
        .bind(request.applied_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to apply for leave: {error}")))?;

        LeaveRequest::try_from(row)
    }

    pub(super) async fn find_leave_impl(&self, leave_id: Uuid) -> AppResult<Option<LeaveRequest>> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            r#"
            SELECT {LEAVE_COLUMNS}
            FROM leave_requests
            WHERE id = $1
            "#
        ))
        .bind(leave_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find leave request: {error}")))?;

        row.map(LeaveRequest::try_from).transpose()
    }

    pub(super) async fn list_leaves_for_user_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            r#"
            SELECT {LEAVE_COLUMNS}
            FROM leave_requests
            WHERE user_id = $1
            ORDER BY applied_at DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list leave requests: {error}")))?;

        rows.into_iter().map(LeaveRequest::try_from).collect()
    }

    pub(super) async fn list_leaves_by_status_impl(
        &self,
        status: LeaveStatus,
    ) -> AppResult<Vec<LeaveRequest>> {
        let rows = sqlx::query_as::<_, LeaveRow>(&format!(
            r#"
            SELECT {LEAVE_COLUMNS}
            FROM leave_requests
            WHERE status = $1
            ORDER BY applied_at
            "#
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list leave requests: {error}")))?;

        rows.into_iter().map(LeaveRequest::try_from).collect()
    }

    pub(super) async fn update_leave_impl(&self, request: LeaveRequest) -> AppResult<LeaveRequest> {
        let row = sqlx::query_as::<_, LeaveRow>(&format!(
            r#"
            UPDATE leave_requests
            SET status = $2, reviewed_at = $3, reviewed_by = $4, reviewer_comments = $5
            WHERE id = $1
            RETURNING {LEAVE_COLUMNS}
            "#
        ))
        .bind(request.id)
        .bind(request.status.as_str())
        .bind(request.reviewed_at)
        .bind(request.reviewed_by.map(|user_id| user_id.as_uuid()))
        .bind(request.reviewer_comments.as_deref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to review leave request: {error}")))?
        .ok_or_else(|| AppError::NotFound(format!("leave request '{}' not found", request.id)))?;

        LeaveRequest::try_from(row)
    }
}
