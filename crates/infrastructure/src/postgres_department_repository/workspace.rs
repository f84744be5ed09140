use super::*;

impl PostgresDepartmentRepository {
    pub(super) async fn list_widgets_impl(
        &self,
        user_id: UserId,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentWidget>> {
        let rows = sqlx::query_as::<_, WidgetRow>(
            r#"
            SELECT id, user_id, department_id, widget_type, widget_key, title,
                   configuration, position, is_visible, display_order
            FROM department_widgets
            WHERE user_id = $1 AND department_id = $2 AND is_visible
            ORDER BY display_order, id
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list widgets: {error}")))?;

        rows.into_iter().map(DepartmentWidget::try_from).collect()
    }

    pub(super) async fn find_widget_impl(
        &self,
        widget_id: Uuid,
    ) -> AppResult<Option<DepartmentWidget>> {
        let row = sqlx::query_as::<_, WidgetRow>(
            r#"
            SELECT id, user_id, department_id, widget_type, widget_key, title,
                   configuration, position, is_visible, display_order
            FROM department_widgets
            WHERE id = $1
            "#,
        )
        .bind(widget_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find widget: {error}")))?;

        row.map(DepartmentWidget::try_from).transpose()
    }

    pub(super) async fn save_widget_impl(
        &self,
        widget: DepartmentWidget,
    ) -> AppResult<DepartmentWidget> {
        let row = sqlx::query_as::<_, WidgetRow>(
            r#"
            INSERT INTO department_widgets (
                id, user_id, department_id, widget_type, widget_key, title,
                configuration, position, is_visible, display_order
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE
            SET widget_type = EXCLUDED.widget_type,
                widget_key = EXCLUDED.widget_key,
                title = EXCLUDED.title,
                configuration = EXCLUDED.configuration,
                position = EXCLUDED.position,
                is_visible = EXCLUDED.is_visible,
                display_order = EXCLUDED.display_order
            RETURNING id, user_id, department_id, widget_type, widget_key, title,
                      configuration, position, is_visible, display_order
            "#,
        )
        .bind(widget.id)
        .bind(widget.user_id.as_uuid())
        .bind(widget.department_id)
        .bind(widget.widget_type.as_str())
        .bind(widget.widget_key.as_str())
        .bind(widget.title.as_str())
        .bind(&widget.configuration)
        .bind(&widget.position)
        .bind(widget.is_visible)
        .bind(widget.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to save widget: {error}")))?;

        DepartmentWidget::try_from(row)
    }

    pub(super) async fn delete_widget_impl(&self, widget_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM department_widgets
            WHERE id = $1
            "#,
        )
        .bind(widget_id)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete widget: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    pub(super) async fn list_settings_impl(
        &self,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentSetting>> {
        let rows = sqlx::query_as::<_, SettingRow>(
            r#"
            SELECT department_id, setting_key, setting_value, setting_type
            FROM department_settings
            WHERE department_id = $1
            ORDER BY setting_key
            "#,
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list department settings: {error}"))
        })?;

        rows.into_iter().map(DepartmentSetting::try_from).collect()
    }

    pub(super) async fn upsert_setting_impl(&self, setting: DepartmentSetting) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO department_settings (department_id, setting_key, setting_value, setting_type)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (department_id, setting_key) DO UPDATE
            SET setting_value = EXCLUDED.setting_value,
                setting_type = EXCLUDED.setting_type,
                updated_at = now()
            "#,
        )
        .bind(setting.department_id)
        .bind(setting.setting_key.as_str())
        .bind(&setting.setting_value)
        .bind(setting.setting_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to save department setting: {error}"))
        })?;

        Ok(())
    }

    pub(super) async fn append_activity_impl(
        &self,
        entry: DepartmentActivityLog,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO department_activity_logs (
                id, department_id, user_id, action, module_key, resource_type,
                resource_id, description, metadata, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id)
        .bind(entry.department_id)
        .bind(entry.user_id.as_uuid())
        .bind(entry.action.as_str())
        .bind(entry.module_key.as_deref())
        .bind(entry.resource_type.as_deref())
        .bind(entry.resource_id.as_deref())
        .bind(entry.description.as_deref())
        .bind(&entry.metadata)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append activity: {error}")))?;

        Ok(())
    }

    pub(super) async fn list_activity_impl(
        &self,
        department_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<DepartmentActivityLog>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, department_id, user_id, action, module_key, resource_type,
                   resource_id, description, metadata, created_at
            FROM department_activity_logs
            WHERE department_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(department_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list activity: {error}")))?;

        Ok(rows.into_iter().map(DepartmentActivityLog::from).collect())
    }
}
