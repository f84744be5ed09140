use ombaro_application::{PermissionToggle, RoleOverview};
use ombaro_domain::{
    ModuleDefinition, PermissionGroup, PermissionMatrix, PermissionMatrixChange,
    PermissionMatrixRow, ReportDefinition, ReportingLine, RoleDefinition, RoleId,
    SubModuleDefinition,
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// API representation of a catalog role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub modules: Vec<String>,
    pub permissions: Vec<String>,
    pub reports_to: Vec<String>,
    pub can_manage: Vec<String>,
    pub color: String,
    pub icon: String,
}

/// API representation of a reporting line.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/reporting-line-response.ts"
)]
pub struct ReportingLineResponse {
    pub role_id: String,
    pub reports_to: Vec<String>,
    pub manages: Vec<String>,
    pub can_view_reports: Vec<String>,
    pub can_approve: Vec<String>,
}

/// A role with its reporting line and the modules it opens.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/role-overview-response.ts"
)]
pub struct RoleOverviewResponse {
    pub role: RoleResponse,
    pub reporting_line: Option<ReportingLineResponse>,
    pub modules: Vec<ModuleResponse>,
}

/// API representation of a second-level navigation entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/sub-module-response.ts"
)]
pub struct SubModuleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub permissions: Vec<String>,
}

/// API representation of a top-level module.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/module-response.ts"
)]
pub struct ModuleResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub permissions: Vec<String>,
    pub sub_modules: Vec<SubModuleResponse>,
}

/// Dashboard navigation for the session user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/navigation-response.ts"
)]
pub struct NavigationResponse {
    pub role_id: String,
    pub role_label: String,
    pub modules: Vec<ModuleResponse>,
}

/// Query for a single permission check.
#[derive(Debug, Deserialize)]
pub struct PermissionCheckQuery {
    pub permission: String,
}

/// Result of a single permission check.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/permission-check-response.ts"
)]
pub struct PermissionCheckResponse {
    pub permission: String,
    pub granted: bool,
}

/// One role row of the permission matrix.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/permission-matrix-row-response.ts"
)]
pub struct PermissionMatrixRowResponse {
    pub role_id: String,
    pub role_name: String,
    pub granted: Vec<String>,
}

/// Permission columns sharing a category.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/permission-group-response.ts"
)]
pub struct PermissionGroupResponse {
    pub category: String,
    pub permissions: Vec<String>,
}

/// A cell that differs from the catalog baseline.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/permission-matrix-change-response.ts"
)]
pub struct PermissionMatrixChangeResponse {
    pub role_id: String,
    pub permission: String,
    pub granted: bool,
}

/// Full permission matrix with its pending changes.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/permission-matrix-response.ts"
)]
pub struct PermissionMatrixResponse {
    pub permissions: Vec<String>,
    pub groups: Vec<PermissionGroupResponse>,
    pub rows: Vec<PermissionMatrixRowResponse>,
    pub changes: Vec<PermissionMatrixChangeResponse>,
}

/// One requested matrix cell flip.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/permission-toggle-request.ts"
)]
pub struct PermissionToggleRequest {
    pub role_id: String,
    pub permission: String,
}

/// Incoming payload for a matrix preview.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/preview-permission-matrix-request.ts"
)]
pub struct PreviewPermissionMatrixRequest {
    #[serde(default)]
    pub toggles: Vec<PermissionToggleRequest>,
}

/// API representation of a report definition.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/report-response.ts"
)]
pub struct ReportResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub frequency: String,
    pub generated_by: String,
    pub access_roles: Vec<String>,
}

fn role_ids(values: &[RoleId]) -> Vec<String> {
    values.iter().map(|value| value.as_str().to_owned()).collect()
}

impl From<&RoleDefinition> for RoleResponse {
    fn from(role: &RoleDefinition) -> Self {
        Self {
            id: role.id().as_str().to_owned(),
            name: role.name().to_owned(),
            description: role.description().to_owned(),
            modules: role
                .modules()
                .iter()
                .map(|module_id| module_id.as_str().to_owned())
                .collect(),
            permissions: role
                .permissions()
                .iter()
                .map(ToString::to_string)
                .collect(),
            reports_to: role_ids(role.reports_to()),
            can_manage: role_ids(role.can_manage()),
            color: role.presentation().color.clone(),
            icon: role.presentation().icon.clone(),
        }
    }
}

impl From<ReportingLine> for ReportingLineResponse {
    fn from(line: ReportingLine) -> Self {
        Self {
            role_id: line.role_id.as_str().to_owned(),
            reports_to: role_ids(&line.reports_to),
            manages: role_ids(&line.manages),
            can_view_reports: line.can_view_reports,
            can_approve: line.can_approve,
        }
    }
}

impl From<RoleOverview> for RoleOverviewResponse {
    fn from(overview: RoleOverview) -> Self {
        Self {
            role: RoleResponse::from(&overview.role),
            reporting_line: overview.reporting_line.map(ReportingLineResponse::from),
            modules: overview.modules.iter().map(ModuleResponse::from).collect(),
        }
    }
}

impl From<&SubModuleDefinition> for SubModuleResponse {
    fn from(sub_module: &SubModuleDefinition) -> Self {
        Self {
            id: sub_module.id().as_str().to_owned(),
            name: sub_module.name().to_owned(),
            description: sub_module.description().to_owned(),
            icon: sub_module.icon().to_owned(),
            permissions: sub_module
                .permissions()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl From<&ModuleDefinition> for ModuleResponse {
    fn from(module: &ModuleDefinition) -> Self {
        Self {
            id: module.id().as_str().to_owned(),
            name: module.name().to_owned(),
            description: module.description().to_owned(),
            icon: module.icon().to_owned(),
            permissions: module.permissions().iter().map(ToString::to_string).collect(),
            sub_modules: module
                .sub_modules()
                .iter()
                .map(SubModuleResponse::from)
                .collect(),
        }
    }
}

impl From<&PermissionMatrixRow> for PermissionMatrixRowResponse {
    fn from(row: &PermissionMatrixRow) -> Self {
        Self {
            role_id: row.role_id().as_str().to_owned(),
            role_name: row.role_name().to_owned(),
            granted: row.granted().iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<PermissionGroup> for PermissionGroupResponse {
    fn from(group: PermissionGroup) -> Self {
        Self {
            category: group.category,
            permissions: group.permissions.iter().map(ToString::to_string).collect(),
        }
    }
}

impl From<PermissionMatrixChange> for PermissionMatrixChangeResponse {
    fn from(change: PermissionMatrixChange) -> Self {
        Self {
            role_id: change.role_id.as_str().to_owned(),
            permission: change.permission.to_string(),
            granted: change.granted,
        }
    }
}

impl From<PermissionMatrix> for PermissionMatrixResponse {
    fn from(matrix: PermissionMatrix) -> Self {
        Self {
            permissions: matrix
                .permissions()
                .iter()
                .map(ToString::to_string)
                .collect(),
            groups: matrix
                .grouped_permissions()
                .into_iter()
                .map(PermissionGroupResponse::from)
                .collect(),
            rows: matrix
                .rows()
                .iter()
                .map(PermissionMatrixRowResponse::from)
                .collect(),
            changes: matrix
                .changes()
                .into_iter()
                .map(PermissionMatrixChangeResponse::from)
                .collect(),
        }
    }
}

impl From<PermissionToggleRequest> for PermissionToggle {
    fn from(request: PermissionToggleRequest) -> Self {
        Self {
            role_id: request.role_id,
            permission: request.permission,
        }
    }
}

impl From<ReportDefinition> for ReportResponse {
    fn from(report: ReportDefinition) -> Self {
        Self {
            id: report.id().to_owned(),
            title: report.title().to_owned(),
            description: report.description().to_owned(),
            category: report.category().as_str().to_owned(),
            frequency: report.frequency().as_str().to_owned(),
            generated_by: report.generated_by().to_owned(),
            access_roles: role_ids(report.access_roles()),
        }
    }
}
