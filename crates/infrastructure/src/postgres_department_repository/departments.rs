use super::*;

const DEPARTMENT_COLUMNS: &str = "id, name, code, description, parent_department_id, \
     head_user_id, department_type, status, email, phone, location, budget_allocated, \
     employee_count, settings, created_at, updated_at";

const MODULE_COLUMNS: &str = "id, department_id, module_key, module_name, description, icon, \
     display_order, is_enabled, parent_module_id, required_permissions";

impl PostgresDepartmentRepository {
    pub(super) async fn list_active_departments_impl(&self) -> AppResult<Vec<Department>> {
        let rows = sqlx::query_as::<_, DepartmentRow>(&format!(
            r#"
            SELECT {DEPARTMENT_COLUMNS}
            FROM departments
            WHERE status = 'active'
            ORDER BY name
            "#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list departments: {error}")))?;

        rows.into_iter().map(Department::try_from).collect()
    }

    pub(super) async fn find_department_impl(
        &self,
        department_id: Uuid,
    ) -> AppResult<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(&format!(
            r#"
            SELECT {DEPARTMENT_COLUMNS}
            FROM departments
            WHERE id = $1
            "#
        ))
        .bind(department_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find department: {error}")))?;

        row.map(Department::try_from).transpose()
    }

    pub(super) async fn find_department_by_code_impl(
        &self,
        code: &str,
    ) -> AppResult<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(&format!(
            r#"
            SELECT {DEPARTMENT_COLUMNS}
            FROM departments
            WHERE code = $1
            "#
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find department by code: {error}"))
        })?;

        row.map(Department::try_from).transpose()
    }

    pub(super) async fn create_department_impl(
        &self,
        department: Department,
    ) -> AppResult<Department> {
        let conflict = format!("department code '{}' is already in use", department.code);
        let row = sqlx::query_as::<_, DepartmentRow>(&format!(
            r#"
            INSERT INTO departments (
                id, name, code, description, parent_department_id, head_user_id,
                department_type, status, email, phone, location, budget_allocated,
                employee_count, settings, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {DEPARTMENT_COLUMNS}
            "#
        ))
        .bind(department.id)
        .bind(department.name.as_str())
        .bind(department.code.as_str())
        .bind(department.description.as_str())
        .bind(department.parent_department_id)
        .bind(department.head_user_id.map(|user_id| user_id.as_uuid()))
        .bind(department.department_type.as_str())
        .bind(department.status.as_str())
        .bind(department.email.as_deref())
        .bind(department.phone.as_deref())
        .bind(department.location.as_deref())
        .bind(department.budget_allocated)
        .bind(department.employee_count)
        .bind(&department.settings)
        .bind(department.created_at)
        .bind(department.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| conflict_or_internal(error, conflict.as_str(), "create department"))?;

        Department::try_from(row)
    }

    pub(super) async fn update_department_impl(
        &self,
        department: Department,
    ) -> AppResult<Option<Department>> {
        let row = sqlx::query_as::<_, DepartmentRow>(&format!(
            r#"
            UPDATE departments
            SET name = $2,
                description = $3,
                parent_department_id = $4,
                head_user_id = $5,
                department_type = $6,
                status = $7,
                email = $8,
                phone = $9,
                location = $10,
                budget_allocated = $11,
                employee_count = $12,
                settings = $13,
                updated_at = $14
            WHERE id = $1
            RETURNING {DEPARTMENT_COLUMNS}
            "#
        ))
        .bind(department.id)
        .bind(department.name.as_str())
        .bind(department.description.as_str())
        .bind(department.parent_department_id)
        .bind(department.head_user_id.map(|user_id| user_id.as_uuid()))
        .bind(department.department_type.as_str())
        .bind(department.status.as_str())
        .bind(department.email.as_deref())
        .bind(department.phone.as_deref())
        .bind(department.location.as_deref())
        .bind(department.budget_allocated)
        .bind(department.employee_count)
        .bind(&department.settings)
        .bind(department.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update department: {error}")))?;

        row.map(Department::try_from).transpose()
    }

    pub(super) async fn list_department_modules_impl(
        &self,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentModule>> {
        let rows = sqlx::query_as::<_, DepartmentModuleRow>(&format!(
            r#"
            SELECT {MODULE_COLUMNS}
            FROM department_modules
            WHERE department_id = $1
            ORDER BY display_order, module_key
            "#
        ))
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list department modules: {error}"))
        })?;

        Ok(rows.into_iter().map(DepartmentModule::from).collect())
    }

    pub(super) async fn save_department_module_impl(
        &self,
        module: DepartmentModule,
    ) -> AppResult<DepartmentModule> {
        let row = sqlx::query_as::<_, DepartmentModuleRow>(&format!(
            r#"
            INSERT INTO department_modules (
                id, department_id, module_key, module_name, description, icon,
                display_order, is_enabled, parent_module_id, required_permissions
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (department_id, module_key) DO UPDATE
            SET module_name = EXCLUDED.module_name,
                description = EXCLUDED.description,
                icon = EXCLUDED.icon,
                display_order = EXCLUDED.display_order,
                is_enabled = EXCLUDED.is_enabled,
                parent_module_id = EXCLUDED.parent_module_id,
                required_permissions = EXCLUDED.required_permissions
            RETURNING {MODULE_COLUMNS}
            "#
        ))
        .bind(module.id)
        .bind(module.department_id)
        .bind(module.module_key.as_str())
        .bind(module.module_name.as_str())
        .bind(module.description.as_deref())
        .bind(module.icon.as_str())
        .bind(module.display_order)
        .bind(module.is_enabled)
        .bind(module.parent_module_id)
        .bind(&module.required_permissions)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to save department module: {error}"))
        })?;

        Ok(DepartmentModule::from(row))
    }
}
