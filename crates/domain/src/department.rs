//! Department workspace records: departments, their module trees, user
//! assignments, dashboard widgets, settings and the activity log.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use ombaro_core::{AppError, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::user::UserId;

/// Organizational kind of a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentType {
    /// Board and leadership offices.
    Executive,
    /// Service delivery.
    Operational,
    /// Support functions such as IT or customer care.
    Support,
    /// Finance, legal and HR administration.
    Administrative,
}

impl DepartmentType {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Executive => "executive",
            Self::Operational => "operational",
            Self::Support => "support",
            Self::Administrative => "administrative",
        }
    }
}

impl FromStr for DepartmentType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "executive" => Ok(Self::Executive),
            "operational" => Ok(Self::Operational),
            "support" => Ok(Self::Support),
            "administrative" => Ok(Self::Administrative),
            _ => Err(AppError::Validation(format!(
                "unknown department type '{value}'"
            ))),
        }
    }
}

/// Lifecycle status of a department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepartmentStatus {
    /// Department is operating.
    Active,
    /// Department was closed.
    Inactive,
    /// Department is being reorganized.
    Restructuring,
}

impl DepartmentStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Restructuring => "restructuring",
        }
    }
}

impl FromStr for DepartmentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "restructuring" => Ok(Self::Restructuring),
            _ => Err(AppError::Validation(format!(
                "unknown department status '{value}'"
            ))),
        }
    }
}

/// A department row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    /// Department id.
    pub id: Uuid,
    /// Display name.
    pub name: NonEmptyString,
    /// Unique short code such as `ACCOUNTS`.
    pub code: NonEmptyString,
    /// Description.
    pub description: String,
    /// Parent department, if nested.
    pub parent_department_id: Option<Uuid>,
    /// Department head.
    pub head_user_id: Option<UserId>,
    /// Organizational kind.
    pub department_type: DepartmentType,
    /// Lifecycle status.
    pub status: DepartmentStatus,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Office location.
    pub location: Option<String>,
    /// Allocated budget.
    pub budget_allocated: Option<f64>,
    /// Head count.
    pub employee_count: i32,
    /// Free-form settings document.
    pub settings: Value,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// A navigation entry inside a department workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentModule {
    /// Module id.
    pub id: Uuid,
    /// Owning department.
    pub department_id: Uuid,
    /// Stable key.
    pub module_key: String,
    /// Display name.
    pub module_name: String,
    /// Description.
    pub description: Option<String>,
    /// Presentation icon name.
    pub icon: String,
    /// Sort position among siblings.
    pub display_order: i32,
    /// Whether the entry is shown.
    pub is_enabled: bool,
    /// Parent entry for second-level modules.
    pub parent_module_id: Option<Uuid>,
    /// Permissions needed to open the entry.
    pub required_permissions: Vec<String>,
}

/// A top-level department module with its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentModuleNode {
    /// The top-level entry.
    pub module: DepartmentModule,
    /// Enabled children ordered by display order.
    pub sub_modules: Vec<DepartmentModule>,
}

/// Builds the two-level module tree shown in a department workspace.
///
/// Disabled entries are dropped and both levels are ordered by display
/// order. Children whose parent is missing or disabled are not shown.
#[must_use]
pub fn build_department_module_tree(modules: Vec<DepartmentModule>) -> Vec<DepartmentModuleNode> {
    let mut enabled: Vec<DepartmentModule> =
        modules.into_iter().filter(|module| module.is_enabled).collect();
    enabled.sort_by_key(|module| module.display_order);

    let (parents, children): (Vec<_>, Vec<_>) = enabled
        .into_iter()
        .partition(|module| module.parent_module_id.is_none());

    parents
        .into_iter()
        .map(|parent| {
            let sub_modules = children
                .iter()
                .filter(|child| child.parent_module_id == Some(parent.id))
                .cloned()
                .collect();
            DepartmentModuleNode {
                module: parent,
                sub_modules,
            }
        })
        .collect()
}

/// Kind of membership a user holds in a department, ranked head first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentType {
    /// Department head.
    Head,
    /// Deputy head.
    Deputy,
    /// Regular member.
    Member,
    /// Read-only observer.
    Viewer,
}

impl AssignmentType {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Deputy => "deputy",
            Self::Member => "member",
            Self::Viewer => "viewer",
        }
    }
}

impl FromStr for AssignmentType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "head" => Ok(Self::Head),
            "deputy" => Ok(Self::Deputy),
            "member" => Ok(Self::Member),
            "viewer" => Ok(Self::Viewer),
            _ => Err(AppError::Validation(format!(
                "unknown assignment type '{value}'"
            ))),
        }
    }
}

/// Status of a department assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    /// Assignment grants access.
    Active,
    /// Assignment ended.
    Inactive,
    /// Assignment is on hold.
    Suspended,
}

impl AssignmentStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            _ => Err(AppError::Validation(format!(
                "unknown assignment status '{value}'"
            ))),
        }
    }
}

/// Membership of a user in a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentUserAssignment {
    /// Assignment id.
    pub id: Uuid,
    /// Assigned user.
    pub user_id: UserId,
    /// Target department.
    pub department_id: Uuid,
    /// Optional catalog role granted through the assignment.
    pub role_id: Option<String>,
    /// Membership kind.
    pub assignment_type: AssignmentType,
    /// Whether this is the user's home department.
    pub is_primary: bool,
    /// Assignment status.
    pub status: AssignmentStatus,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
    /// Start of validity.
    pub valid_from: DateTime<Utc>,
    /// End of validity, if bounded.
    pub valid_until: Option<DateTime<Utc>>,
}

impl DepartmentUserAssignment {
    /// Returns whether the assignment currently grants access.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AssignmentStatus::Active
    }
}

/// Returns the highest-ranked active assignment type among the given
/// assignments for one user and department.
#[must_use]
pub fn highest_assignment_type<'a>(
    assignments: impl IntoIterator<Item = &'a DepartmentUserAssignment>,
) -> Option<AssignmentType> {
    assignments
        .into_iter()
        .filter(|assignment| assignment.is_active())
        .map(|assignment| assignment.assignment_type)
        .min()
}

/// Kind of dashboard widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetType {
    /// Single figure.
    Stat,
    /// Chart.
    Chart,
    /// Short list.
    List,
    /// Data table.
    Table,
    /// Calendar.
    Calendar,
    /// Activity feed.
    Activity,
    /// Shortcut button.
    QuickAction,
}

impl WidgetType {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stat => "stat",
            Self::Chart => "chart",
            Self::List => "list",
            Self::Table => "table",
            Self::Calendar => "calendar",
            Self::Activity => "activity",
            Self::QuickAction => "quick_action",
        }
    }
}

impl FromStr for WidgetType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "stat" => Ok(Self::Stat),
            "chart" => Ok(Self::Chart),
            "list" => Ok(Self::List),
            "table" => Ok(Self::Table),
            "calendar" => Ok(Self::Calendar),
            "activity" => Ok(Self::Activity),
            "quick_action" => Ok(Self::QuickAction),
            _ => Err(AppError::Validation(format!(
                "unknown widget type '{value}'"
            ))),
        }
    }
}

/// A widget on a user's department dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentWidget {
    /// Widget id.
    pub id: Uuid,
    /// Owner.
    pub user_id: UserId,
    /// Department dashboard.
    pub department_id: Uuid,
    /// Widget kind.
    pub widget_type: WidgetType,
    /// Stable key of the data source.
    pub widget_key: String,
    /// Title.
    pub title: NonEmptyString,
    /// Widget-specific configuration.
    pub configuration: Value,
    /// Grid position.
    pub position: Value,
    /// Whether the widget is shown.
    pub is_visible: bool,
    /// Sort position.
    pub display_order: i32,
}

/// Category of a department setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingType {
    /// General options.
    #[default]
    General,
    /// Look and feel.
    Theme,
    /// Feature switches.
    Feature,
    /// Notification preferences.
    Notification,
    /// Security options.
    Security,
}

impl SettingType {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Theme => "theme",
            Self::Feature => "feature",
            Self::Notification => "notification",
            Self::Security => "security",
        }
    }
}

impl FromStr for SettingType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "general" => Ok(Self::General),
            "theme" => Ok(Self::Theme),
            "feature" => Ok(Self::Feature),
            "notification" => Ok(Self::Notification),
            "security" => Ok(Self::Security),
            _ => Err(AppError::Validation(format!(
                "unknown setting type '{value}'"
            ))),
        }
    }
}

/// One keyed department setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentSetting {
    /// Owning department.
    pub department_id: Uuid,
    /// Setting key, unique per department.
    pub setting_key: String,
    /// Setting value.
    pub setting_value: Value,
    /// Setting category.
    pub setting_type: SettingType,
}

/// Append-only record of an action taken in a department workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentActivityLog {
    /// Entry id.
    pub id: Uuid,
    /// Department.
    pub department_id: Uuid,
    /// Acting user.
    pub user_id: UserId,
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
    pub metadata: Value,
    /// When the action happened.
    pub created_at: DateTime<Utc>,
}
