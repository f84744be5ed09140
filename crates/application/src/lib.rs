//! Application services and ports.

#![forbid(unsafe_code)]

mod access_service;
mod attendance_service;
mod department_ports;
mod department_service;
mod user_service;
mod vendor_service;

#[cfg(test)]
mod test_support;

pub use access_service::{AccessService, PermissionToggle, RoleOverview, subject_user_id};
pub use attendance_service::{
    ApplyLeaveInput, AttendanceRepository, AttendanceService, DEFAULT_BUSINESS_UTC_OFFSET_SECONDS,
};
pub use department_ports::{
    AssignUserInput, CreateDepartmentInput, DEFAULT_ACTIVITY_LIMIT, DepartmentRepository,
    LogActivityInput, MAX_ACTIVITY_LIMIT, SaveWidgetInput, UpdateDepartmentInput,
};
pub use department_service::DepartmentService;
pub use user_service::{
    CreateUserInput, LoginOutcome, NewUserProfile, PasswordHasher, UpdateUserInput,
    UserCredentials, UserListQuery, UserProfileChanges, UserProfileRepository, UserService,
};
pub use vendor_service::{SubmitVendorApplicationInput, VendorApplicationRepository, VendorService};
