use std::sync::Arc;

use ombaro_application::{
    AccessService, AttendanceService, DepartmentService, UserService, VendorService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub access_service: AccessService,
    pub user_service: UserService,
    pub department_service: DepartmentService,
    pub vendor_service: VendorService,
    pub attendance_service: AttendanceService,
    pub frontend_origins: Arc<[String]>,
}
