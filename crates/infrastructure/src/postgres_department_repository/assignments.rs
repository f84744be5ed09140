use super::*;

impl PostgresDepartmentRepository {
    pub(super) async fn list_user_assignments_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<DepartmentUserAssignment>> {
        let rows = sqlx::query_as::<_, AssignmentRow>(
            r#"
            SELECT id, user_id, department_id, role_id, assignment_type, is_primary,
                   status, assigned_at, valid_from, valid_until
            FROM department_user_assignments
            WHERE user_id = $1 AND status = 'active'
            ORDER BY is_primary DESC, assigned_at
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list department assignments: {error}"))
        })?;

        rows.into_iter()
            .map(DepartmentUserAssignment::try_from)
            .collect()
    }

    pub(super) async fn create_assignment_impl(
        &self,
        assignment: DepartmentUserAssignment,
    ) -> AppResult<DepartmentUserAssignment> {
        let conflict = format!(
            "user '{}' is already assigned to department '{}'",
            assignment.user_id, assignment.department_id
        );
        let row = sqlx::query_as::<_, AssignmentRow>(
            r#"
            INSERT INTO department_user_assignments (
                id, user_id, department_id, role_id, assignment_type, is_primary,
                status, assigned_at, valid_from, valid_until
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, user_id, department_id, role_id, assignment_type, is_primary,
                      status, assigned_at, valid_from, valid_until
            "#,
        )
        .bind(assignment.id)
        .bind(assignment.user_id.as_uuid())
        .bind(assignment.department_id)
        .bind(assignment.role_id.as_deref())
        .bind(assignment.assignment_type.as_str())
        .bind(assignment.is_primary)
        .bind(assignment.status.as_str())
        .bind(assignment.assigned_at)
        .bind(assignment.valid_from)
        .bind(assignment.valid_until)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            conflict_or_internal(error, conflict.as_str(), "create department assignment")
        })?;

        DepartmentUserAssignment::try_from(row)
    }
}
