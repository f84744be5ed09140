use super::*;

impl PostgresVendorApplicationRepository {
    pub(super) async fn append_history_impl(&self, record: ApprovalHistoryRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vendor_approval_history (
                id, application_id, approved_by, action, comments, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(record.application_id)
        .bind(record.approved_by.as_uuid())
        .bind(record.action.as_str())
        .bind(record.comments.as_deref())
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to append vendor approval history: {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn list_history_impl(
        &self,
        application_id: Uuid,
    ) -> AppResult<Vec<ApprovalHistoryRecord>> {
        let rows = sqlx::query_as::<_, ApprovalHistoryRow>(
            r#"
            SELECT id, application_id, approved_by, action, comments, created_at
            FROM vendor_approval_history
            WHERE application_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list vendor approval history: {error}"))
        })?;

        rows.into_iter().map(ApprovalHistoryRecord::try_from).collect()
    }
}
