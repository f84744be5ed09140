//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod access_catalog_loader;
mod argon2_password_hasher;
mod in_memory_attendance_repository;
mod in_memory_department_repository;
mod in_memory_user_profile_repository;
mod in_memory_vendor_application_repository;
mod postgres_attendance_repository;
mod postgres_department_repository;
mod postgres_user_profile_repository;
mod postgres_vendor_application_repository;

pub use access_catalog_loader::{load_access_catalog, parse_access_catalog};
pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_attendance_repository::InMemoryAttendanceRepository;
pub use in_memory_department_repository::InMemoryDepartmentRepository;
pub use in_memory_user_profile_repository::InMemoryUserProfileRepository;
pub use in_memory_vendor_application_repository::InMemoryVendorApplicationRepository;
pub use postgres_attendance_repository::PostgresAttendanceRepository;
pub use postgres_department_repository::PostgresDepartmentRepository;
pub use postgres_user_profile_repository::PostgresUserProfileRepository;
pub use postgres_vendor_application_repository::PostgresVendorApplicationRepository;
