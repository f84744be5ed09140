use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// API representation of a department.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/department-response.ts"
)]
pub struct DepartmentResponse {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub parent_department_id: Option<String>,
    pub head_user_id: Option<String>,
    pub department_type: String,
    pub status: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub budget_allocated: Option<f64>,
    pub employee_count: i32,
    #[ts(type = "unknown")]
    pub settings: Value,
    pub created_at: String,
    pub updated_at: String,
}

/// Incoming payload for department creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/create-department-request.ts"
)]
pub struct CreateDepartmentRequest {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    pub department_type: String,
    pub parent_department_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub budget_allocated: Option<f64>,
}

/// Incoming payload for department updates. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/update-department-request.ts"
)]
pub struct UpdateDepartmentRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub department_type: Option<String>,
    pub status: Option<String>,
    pub head_user_id: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub budget_allocated: Option<f64>,
    pub employee_count: Option<i32>,
    #[ts(type = "unknown")]
    pub settings: Option<Value>,
}

/// API representation of a department module.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/department-module-response.ts"
)]
pub struct DepartmentModuleResponse {
    pub id: String,
    pub department_id: String,
    pub module_key: String,
    pub module_name: String,
    pub description: Option<String>,
    pub icon: String,
    pub display_order: i32,
    pub is_enabled: bool,
    pub parent_module_id: Option<String>,
    pub required_permissions: Vec<String>,
}

/// A department module with its nested sub-modules.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/department-module-node-response.ts"
)]
pub struct DepartmentModuleNodeResponse {
    pub module: DepartmentModuleResponse,
    pub sub_modules: Vec<DepartmentModuleResponse>,
}

/// API representation of a department assignment.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/department-assignment-response.ts"
)]
pub struct DepartmentAssignmentResponse {
    pub id: String,
    pub user_id: String,
    pub department_id: String,
    pub role_id: Option<String>,
    pub assignment_type: String,
    pub is_primary: bool,
    pub status: String,
    pub assigned_at: String,
    pub valid_from: String,
    pub valid_until: Option<String>,
}

/// Incoming payload for assigning a user to a department.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/assign-user-request.ts"
)]
pub struct AssignUserRequest {
    pub user_id: String,
    pub assignment_type: String,
    #[serde(default)]
    pub is_primary: bool,
    pub role_id: Option<String>,
}

/// Access and rank of a user inside one department.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/department-role-response.ts"
)]
pub struct DepartmentRoleResponse {
    pub department_id: String,
    pub user_id: String,
    pub has_access: bool,
    pub assignment_type: Option<String>,
}

/// API representation of a dashboard widget.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/department-widget-response.ts"
)]
pub struct DepartmentWidgetResponse {
    pub id: String,
    pub department_id: String,
    pub widget_type: String,
    pub widget_key: String,
    pub title: String,
    #[ts(type = "unknown")]
    pub configuration: Value,
    #[ts(type = "unknown")]
    pub position: Value,
    pub is_visible: bool,
    pub display_order: i32,
}

/// Incoming payload for saving a widget. A present `id` updates in place.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/save-widget-request.ts"
)]
pub struct SaveWidgetRequest {
    pub id: Option<String>,
    pub widget_type: String,
    pub widget_key: String,
    pub title: String,
    #[serde(default)]
    #[ts(type = "unknown")]
    pub configuration: Value,
    #[serde(default)]
    #[ts(type = "unknown")]
    pub position: Value,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_visible() -> bool {
    true
}

/// Department settings keyed by setting name.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/department-settings-response.ts"
)]
pub struct DepartmentSettingsResponse {
    pub department_id: String,
    #[ts(type = "Record<string, unknown>")]
    pub settings: BTreeMap<String, Value>,
}

/// Incoming payload for one setting upsert.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/update-setting-request.ts"
)]
pub struct UpdateSettingRequest {
    #[ts(type = "unknown")]
    pub setting_value: Value,
    pub setting_type: Option<String>,
}

/// API representation of an activity log entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/department-activity-response.ts"
)]
pub struct DepartmentActivityResponse {
    pub id: String,
    pub department_id: String,
    pub user_id: String,
    pub action: String,
    pub module_key: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub description: Option<String>,
    #[ts(type = "unknown")]
    pub metadata: Value,
    pub created_at: String,
}

/// Incoming payload for an activity entry.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/log-activity-request.ts"
)]
pub struct LogActivityRequest {
    pub action: String,
    pub module_key: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub description: Option<String>,
    #[ts(type = "unknown")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityLogQuery {
    pub limit: Option<usize>,
}
