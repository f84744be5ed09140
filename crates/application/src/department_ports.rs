use async_trait::async_trait;
use ombaro_core::AppResult;
use ombaro_domain::{
    AssignmentType, Department, DepartmentActivityLog, DepartmentModule, DepartmentSetting,
    DepartmentStatus, DepartmentType, DepartmentUserAssignment, DepartmentWidget, UserId,
    WidgetType,
};
use serde_json::Value;
use uuid::Uuid;

/// Default number of activity entries returned.
pub const DEFAULT_ACTIVITY_LIMIT: usize = 50;

/// Upper bound on activity entries returned.
pub const MAX_ACTIVITY_LIMIT: usize = 200;

/// Input payload for department creation.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDepartmentInput {
    /// Display name.
    pub name: String,
    /// Unique short code.
    pub code: String,
    /// Description.
    pub description: String,
    /// Organizational kind.
    pub department_type: DepartmentType,
    /// Parent department.
    pub parent_department_id: Option<Uuid>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Office location.
    pub location: Option<String>,
    /// Allocated budget.
    pub budget_allocated: Option<f64>,
}

/// Partial department update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDepartmentInput {
    /// New display name.
    pub name: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New organizational kind.
    pub department_type: Option<DepartmentType>,
    /// New lifecycle status.
    pub status: Option<DepartmentStatus>,
    /// New department head.
    pub head_user_id: Option<UserId>,
    /// New contact email.
    pub email: Option<String>,
    /// New contact phone.
    pub phone: Option<String>,
    /// New office location.
    pub location: Option<String>,
    /// New budget.
    pub budget_allocated: Option<f64>,
    /// New head count.
    pub employee_count: Option<i32>,
    /// Replacement settings document.
    pub settings: Option<Value>,
}

/// Input payload for assigning a user to a department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignUserInput {
    /// User to assign.
    pub user_id: UserId,
    /// Target department.
    pub department_id: Uuid,
    /// Membership kind.
    pub assignment_type: AssignmentType,
    /// Whether this becomes the user's home department.
    pub is_primary: bool,
    /// Optional catalog role granted through the assignment.
    pub role_id: Option<String>,
}

/// Input payload for creating or replacing one of the caller's widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveWidgetInput {
    /// Existing widget to replace, or `None` to create.
    pub id: Option<Uuid>,
    /// Department dashboard.
    pub department_id: Uuid,
    /// Widget kind.
    pub widget_type: WidgetType,
    /// Data source key.
    pub widget_key: String,
    /// Title.
    pub title: String,
    /// Widget configuration.
    pub configuration: Value,
    /// Grid position.
    pub position: Value,
    /// Whether the widget is shown.
    pub is_visible: bool,
    /// Sort position.
    pub display_order: i32,
}

/// Input payload for an activity log entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogActivityInput {
    /// Action name.
    pub action: String,
    /// Module the action happened in.
    pub module_key: Option<String>,
    /// Affected resource type.
    pub resource_type: Option<String>,
    /// Affected resource id.
    pub resource_id: Option<String>,
    /// Human-readable description.
    pub description: Option<String>,
    /// Extra structured data.
    pub metadata: Option<Value>,
}

/// Repository port for department workspaces.
#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    /// Lists active departments ordered by name.
    async fn list_active_departments(&self) -> AppResult<Vec<Department>>;

    /// Finds a department by id.
    async fn find_department(&self, department_id: Uuid) -> AppResult<Option<Department>>;

    /// Finds a department by its unique code.
    async fn find_department_by_code(&self, code: &str) -> AppResult<Option<Department>>;

    /// Inserts a department. A duplicate code is a conflict.
    async fn create_department(&self, department: Department) -> AppResult<Department>;

    /// Replaces a stored department row. Returns `None` when it does not exist.
    async fn update_department(&self, department: Department) -> AppResult<Option<Department>>;

    /// Lists every module row of a department, enabled or not.
    async fn list_department_modules(
        &self,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentModule>>;

    /// Inserts or replaces a module row by department and module key.
    async fn save_department_module(&self, module: DepartmentModule) -> AppResult<DepartmentModule>;

    /// Lists a user's active assignments, primary first.
    async fn list_user_assignments(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<DepartmentUserAssignment>>;

    /// Inserts an assignment.
    async fn create_assignment(
        &self,
        assignment: DepartmentUserAssignment,
    ) -> AppResult<DepartmentUserAssignment>;

    /// Lists a user's visible widgets for a department ordered by display order.
    async fn list_widgets(
        &self,
        user_id: UserId,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentWidget>>;

    /// Finds a widget by id.
    async fn find_widget(&self, widget_id: Uuid) -> AppResult<Option<DepartmentWidget>>;

    /// Inserts or replaces a widget by id.
    async fn save_widget(&self, widget: DepartmentWidget) -> AppResult<DepartmentWidget>;

    /// Deletes a widget. Returns whether a row was removed.
    async fn delete_widget(&self, widget_id: Uuid) -> AppResult<bool>;

    /// Lists all settings of a department.
    async fn list_settings(&self, department_id: Uuid) -> AppResult<Vec<DepartmentSetting>>;

    /// Inserts or replaces a setting by department and key.
    async fn upsert_setting(&self, setting: DepartmentSetting) -> AppResult<()>;

    /// Appends an activity log entry.
    async fn append_activity(&self, entry: DepartmentActivityLog) -> AppResult<()>;

    /// Lists the newest activity entries of a department.
    async fn list_activity(
        &self,
        department_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<DepartmentActivityLog>>;
}
