mod conversions;
mod types;

pub use types::{
    ActivityLogQuery, AssignUserRequest, CreateDepartmentRequest, DepartmentActivityResponse,
    DepartmentAssignmentResponse, DepartmentModuleNodeResponse, DepartmentModuleResponse,
    DepartmentResponse, DepartmentRoleResponse, DepartmentSettingsResponse,
    DepartmentWidgetResponse, LogActivityRequest, SaveWidgetRequest, UpdateDepartmentRequest,
    UpdateSettingRequest,
};
