use std::sync::Arc;

use ombaro_application::{
    AccessService, AttendanceRepository, AttendanceService, DepartmentRepository,
    DepartmentService, UserProfileRepository, UserService, VendorApplicationRepository,
    VendorService,
};
use ombaro_domain::AccessCatalog;
use ombaro_infrastructure::{
    Argon2PasswordHasher, InMemoryAttendanceRepository, InMemoryDepartmentRepository,
    InMemoryUserProfileRepository, InMemoryVendorApplicationRepository,
    PostgresAttendanceRepository, PostgresDepartmentRepository, PostgresUserProfileRepository,
    PostgresVendorApplicationRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::AppState;

/// Repository ports backing the application services.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserProfileRepository>,
    pub departments: Arc<dyn DepartmentRepository>,
    pub vendor_applications: Arc<dyn VendorApplicationRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserProfileRepository::new(pool.clone())),
            departments: Arc::new(PostgresDepartmentRepository::new(pool.clone())),
            vendor_applications: Arc::new(PostgresVendorApplicationRepository::new(pool.clone())),
            attendance: Arc::new(PostgresAttendanceRepository::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserProfileRepository::new()),
            departments: Arc::new(InMemoryDepartmentRepository::new()),
            vendor_applications: Arc::new(InMemoryVendorApplicationRepository::new()),
            attendance: Arc::new(InMemoryAttendanceRepository::new()),
        }
    }
}

pub fn build_app_state(
    catalog: Arc<AccessCatalog>,
    repositories: Repositories,
    config: &ApiConfig,
) -> AppState {
    let access_service = AccessService::new(catalog);

    AppState {
        user_service: UserService::new(
            repositories.users,
            Arc::new(Argon2PasswordHasher::new()),
            access_service.clone(),
        ),
        department_service: DepartmentService::new(
            repositories.departments,
            access_service.clone(),
        ),
        vendor_service: VendorService::new(
            repositories.vendor_applications,
            access_service.clone(),
        ),
        attendance_service: AttendanceService::new(
            repositories.attendance,
            access_service.clone(),
        )
        .with_business_offset(config.business_offset),
        access_service,
        frontend_origins: config.frontend_origins.clone().into(),
    }
}
