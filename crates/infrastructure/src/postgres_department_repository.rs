//! PostgreSQL-backed department workspace repository.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use ombaro_application::DepartmentRepository;
use ombaro_core::{AppError, AppResult, NonEmptyString};
use ombaro_domain::{
    AssignmentStatus, AssignmentType, Department, DepartmentActivityLog, DepartmentModule,
    DepartmentSetting, DepartmentStatus, DepartmentType, DepartmentUserAssignment,
    DepartmentWidget, SettingType, UserId, WidgetType,
};

mod assignments;
mod departments;
mod workspace;

/// PostgreSQL implementation of the department repository port.
#[derive(Clone)]
pub struct PostgresDepartmentRepository {
    pool: PgPool,
}

impl PostgresDepartmentRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn stored_value<T, E>(
    result: Result<T, E>,
    table: &str,
    id: impl std::fmt::Display,
) -> AppResult<T>
where
    E: std::fmt::Display,
{
    result.map_err(|error| {
        AppError::Internal(format!("stored {table} row '{id}' is invalid: {error}"))
    })
}

#[derive(Debug, sqlx::FromRow)]
struct DepartmentRow {
    id: Uuid,
    name: String,
    code: String,
    description: String,
    parent_department_id: Option<Uuid>,
    head_user_id: Option<Uuid>,
    department_type: String,
    status: String,
    email: Option<String>,
    phone: Option<String>,
    location: Option<String>,
    budget_allocated: Option<f64>,
    employee_count: i32,
    settings: Value,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<DepartmentRow> for Department {
    type Error = AppError;

    fn try_from(row: DepartmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            name: stored_value(NonEmptyString::new(row.name), "departments", row.id)?,
            code: stored_value(NonEmptyString::new(row.code), "departments", row.id)?,
            description: row.description,
            parent_department_id: row.parent_department_id,
            head_user_id: row.head_user_id.map(UserId::from_uuid),
            department_type: stored_value(
                row.department_type.parse::<DepartmentType>(),
                "departments",
                row.id,
            )?,
            status: stored_value(
                row.status.parse::<DepartmentStatus>(),
                "departments",
                row.id,
            )?,
            email: row.email,
            phone: row.phone,
            location: row.location,
            budget_allocated: row.budget_allocated,
            employee_count: row.employee_count,
            settings: row.settings,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct DepartmentModuleRow {
    id: Uuid,
    department_id: Uuid,
    module_key: String,
    module_name: String,
    description: Option<String>,
    icon: String,
    display_order: i32,
    is_enabled: bool,
    parent_module_id: Option<Uuid>,
    required_permissions: Vec<String>,
}

impl From<DepartmentModuleRow> for DepartmentModule {
    fn from(row: DepartmentModuleRow) -> Self {
        Self {
            id: row.id,
            department_id: row.department_id,
            module_key: row.module_key,
            module_name: row.module_name,
            description: row.description,
            icon: row.icon,
            display_order: row.display_order,
            is_enabled: row.is_enabled,
            parent_module_id: row.parent_module_id,
            required_permissions: row.required_permissions,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AssignmentRow {
    id: Uuid,
    user_id: Uuid,
    department_id: Uuid,
    role_id: Option<String>,
    assignment_type: String,
    is_primary: bool,
    status: String,
    assigned_at: chrono::DateTime<chrono::Utc>,
    valid_from: chrono::DateTime<chrono::Utc>,
    valid_until: Option<chrono::DateTime<chrono::Utc>>,
}

impl TryFrom<AssignmentRow> for DepartmentUserAssignment {
    type Error = AppError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            department_id: row.department_id,
            role_id: row.role_id,
            assignment_type: stored_value(
                row.assignment_type.parse::<AssignmentType>(),
                "department_user_assignments",
                row.id,
            )?,
            is_primary: row.is_primary,
            status: stored_value(
                row.status.parse::<AssignmentStatus>(),
                "department_user_assignments",
                row.id,
            )?,
            assigned_at: row.assigned_at,
            valid_from: row.valid_from,
            valid_until: row.valid_until,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct WidgetRow {
    id: Uuid,
    user_id: Uuid,
    department_id: Uuid,
    widget_type: String,
    widget_key: String,
    title: String,
    configuration: Value,
    position: Value,
    is_visible: bool,
    display_order: i32,
}

impl TryFrom<WidgetRow> for DepartmentWidget {
    type Error = AppError;

    fn try_from(row: WidgetRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            user_id: UserId::from_uuid(row.user_id),
            department_id: row.department_id,
            widget_type: stored_value(
                row.widget_type.parse::<WidgetType>(),
                "department_widgets",
                row.id,
            )?,
            widget_key: row.widget_key,
            title: stored_value(NonEmptyString::new(row.title), "department_widgets", row.id)?,
            configuration: row.configuration,
            position: row.position,
            is_visible: row.is_visible,
            display_order: row.display_order,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SettingRow {
    department_id: Uuid,
    setting_key: String,
    setting_value: Value,
    setting_type: String,
}

impl TryFrom<SettingRow> for DepartmentSetting {
    type Error = AppError;

    fn try_from(row: SettingRow) -> Result<Self, Self::Error> {
        let setting_type = stored_value(
            row.setting_type.parse::<SettingType>(),
            "department_settings",
            &row.setting_key,
        )?;

        Ok(Self {
            department_id: row.department_id,
            setting_key: row.setting_key,
            setting_value: row.setting_value,
            setting_type,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ActivityRow {
    id: Uuid,
    department_id: Uuid,
    user_id: Uuid,
    action: String,
    module_key: Option<String>,
    resource_type: Option<String>,
    resource_id: Option<String>,
    description: Option<String>,
    metadata: Value,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl From<ActivityRow> for DepartmentActivityLog {
    fn from(row: ActivityRow) -> Self {
        Self {
            id: row.id,
            department_id: row.department_id,
            user_id: UserId::from_uuid(row.user_id),
            action: row.action,
            module_key: row.module_key,
            resource_type: row.resource_type,
            resource_id: row.resource_id,
            description: row.description,
            metadata: row.metadata,
            created_at: row.created_at,
        }
    }
}

fn conflict_or_internal(error: sqlx::Error, conflict: &str, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(conflict.to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}

#[async_trait]
impl DepartmentRepository for PostgresDepartmentRepository {
    async fn list_active_departments(&self) -> AppResult<Vec<Department>> {
        self.list_active_departments_impl().await
    }

    async fn find_department(&self, department_id: Uuid) -> AppResult<Option<Department>> {
        self.find_department_impl(department_id).await
    }

    async fn find_department_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        self.find_department_by_code_impl(code).await
    }

    async fn create_department(&self, department: Department) -> AppResult<Department> {
        self.create_department_impl(department).await
    }

    async fn update_department(&self, department: Department) -> AppResult<Option<Department>> {
        self.update_department_impl(department).await
    }

    async fn list_department_modules(
        &self,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentModule>> {
        self.list_department_modules_impl(department_id).await
    }

    async fn save_department_module(
        &self,
        module: DepartmentModule,
    ) -> AppResult<DepartmentModule> {
        self.save_department_module_impl(module).await
    }

    async fn list_user_assignments(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<DepartmentUserAssignment>> {
        self.list_user_assignments_impl(user_id).await
    }

    async fn create_assignment(
        &self,
        assignment: DepartmentUserAssignment,
    ) -> AppResult<DepartmentUserAssignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn list_widgets(
        &self,
        user_id: UserId,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentWidget>> {
        self.list_widgets_impl(user_id, department_id).await
    }

    async fn find_widget(&self, widget_id: Uuid) -> AppResult<Option<DepartmentWidget>> {
        self.find_widget_impl(widget_id).await
    }

    async fn save_widget(&self, widget: DepartmentWidget) -> AppResult<DepartmentWidget> {
        self.save_widget_impl(widget).await
    }

    async fn delete_widget(&self, widget_id: Uuid) -> AppResult<bool> {
        self.delete_widget_impl(widget_id).await
    }

    async fn list_settings(&self, department_id: Uuid) -> AppResult<Vec<DepartmentSetting>> {
        self.list_settings_impl(department_id).await
    }

    async fn upsert_setting(&self, setting: DepartmentSetting) -> AppResult<()> {
        self.upsert_setting_impl(setting).await
    }

    async fn append_activity(&self, entry: DepartmentActivityLog) -> AppResult<()> {
        self.append_activity_impl(entry).await
    }

    async fn list_activity(
        &self,
        department_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<DepartmentActivityLog>> {
        self.list_activity_impl(department_id, limit).await
    }
}
