//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod attendance;
mod catalog;
mod department;
mod module;
mod permission;
mod permission_matrix;
mod reporting;
mod role;
mod user;
mod vendor;

pub use attendance::{
    AttendanceRecord, AttendanceStatus, LeaveRequest, LeaveStatus, LeaveType, leave_days,
};
pub use catalog::{
    AccessCatalog, CatalogDiagnostics, UndeclaredRolePermission, UnresolvedRoleReference,
};
pub use department::{
    AssignmentStatus, AssignmentType, Department, DepartmentActivityLog, DepartmentModule,
    DepartmentModuleNode, DepartmentSetting, DepartmentStatus, DepartmentType,
    DepartmentUserAssignment, DepartmentWidget, SettingType, WidgetType,
    build_department_module_tree, highest_assignment_type,
};
pub use module::{ModuleDefinition, ModuleId, SubModuleDefinition};
pub use permission::{Permission, PermissionAction, PermissionGrant, WILDCARD_PERMISSION};
pub use permission_matrix::{
    PermissionGroup, PermissionMatrix, PermissionMatrixChange, PermissionMatrixRow,
};
pub use reporting::{ReportCategory, ReportDefinition, ReportFrequency, ReportingLine};
pub use role::{
    RoleDefinition, RoleDefinitionInput, RoleId, RolePresentation, display_label_for_id,
};
pub use user::{EmailAddress, MobileNumber, UserId, UserProfile, UserStatus};
pub use vendor::{
    ApprovalAction, ApprovalHistoryRecord, BusinessAddress, VendorApplication,
    VendorApplicationStatus,
};
