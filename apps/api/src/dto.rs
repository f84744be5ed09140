mod access;
mod attendance;
mod auth;
mod common;
mod departments;
mod users;
mod vendor;

pub use access::{
    ModuleResponse, NavigationResponse, PermissionCheckQuery, PermissionCheckResponse,
    PermissionMatrixResponse, PermissionToggleRequest, PreviewPermissionMatrixRequest,
    ReportResponse, RoleOverviewResponse, RoleResponse,
};
pub use attendance::{
    ApplyLeaveRequest, AttendanceRangeQuery, AttendanceResponse, CheckInRequest, LeaveResponse,
    ReviewLeaveRequest,
};
pub use auth::{CurrentUserResponse, LoginRequest, LoginResponse};
pub use common::{HealthResponse, SuccessResponse};
pub use departments::{
    ActivityLogQuery, AssignUserRequest, CreateDepartmentRequest, DepartmentActivityResponse,
    DepartmentAssignmentResponse, DepartmentModuleNodeResponse, DepartmentResponse,
    DepartmentRoleResponse, DepartmentSettingsResponse, DepartmentWidgetResponse,
    LogActivityRequest, SaveWidgetRequest, UpdateDepartmentRequest, UpdateSettingRequest,
};
pub use users::{
    CreateUserRequest, ProfileResponse, UpdateUserRequest, UpdateUserStatusRequest,
    UserListQueryParams, UserProfileResponse,
};
pub use vendor::{
    ApprovalHistoryResponse, ApproveVendorApplicationRequest, RejectVendorApplicationRequest,
    RequestVendorInfoRequest, SubmitVendorApplicationRequest, VendorApplicationListQuery,
    VendorApplicationResponse,
};
