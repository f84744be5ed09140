use chrono::Utc;
use ombaro_application::{NewUserProfile, PasswordHasher};
use ombaro_core::{AppResult, NonEmptyString};
use ombaro_domain::{
    AccessCatalog, AssignmentStatus, AssignmentType, Department, DepartmentModule,
    DepartmentStatus, DepartmentType, DepartmentUserAssignment, EmailAddress, RoleId, UserId,
    UserStatus,
};
use ombaro_infrastructure::Argon2PasswordHasher;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::api_services::Repositories;

/// Demo accounts sign in with this mobile number and password for every role.
const DEV_SEED_MOBILE: &str = "1234";
const DEV_SEED_PASSWORD: &str = "1234";
const DEV_SEED_EMAIL_DOMAIN: &str = "ombaro.com";

struct SeedDepartment {
    code: &'static str,
    name: &'static str,
    description: &'static str,
    department_type: DepartmentType,
    head_role: &'static str,
    modules: &'static [(&'static str, &'static str, &'static str, &'static [&'static str])],
}

const DEV_SEED_DEPARTMENTS: [SeedDepartment; 3] = [
    SeedDepartment {
        code: "HR",
        name: "Human Resources",
        description: "Staffing, attendance and leave",
        department_type: DepartmentType::Administrative,
        head_role: "hr_department",
        modules: &[
            ("employees", "Employees", "Users", &["employees:read"]),
            ("attendance", "Attendance", "Clock", &["hr:read"]),
            ("leave_requests", "Leave Requests", "Calendar", &["hr:approve"]),
        ],
    },
    SeedDepartment {
        code: "OPS",
        name: "Operations",
        description: "Spa operations and staff scheduling",
        department_type: DepartmentType::Operational,
        head_role: "staff_department",
        modules: &[
            ("spa_operations", "Spa Operations", "Sparkles", &["spas:read"]),
            ("staff_scheduling", "Staff Scheduling", "CalendarClock", &["schedules:read"]),
        ],
    },
    SeedDepartment {
        code: "FIN",
        name: "Finance",
        description: "Budgets, payments and reconciliation",
        department_type: DepartmentType::Support,
        head_role: "finance_department",
        modules: &[
            ("payments", "Payments", "CreditCard", &["payments:read"]),
            ("budgeting", "Budgeting", "PiggyBank", &["budgets:read"]),
        ],
    },
];

/// Seeds one demo account per catalog role and a few department workspaces.
///
/// Runs through the repository ports, so it works for both backends and can
/// be repeated against an already seeded database.
pub async fn run(catalog: &AccessCatalog, repositories: &Repositories) -> AppResult<()> {
    let hasher = Argon2PasswordHasher::new();
    let password_hash = hasher.hash_password(DEV_SEED_PASSWORD)?;

    let mut seeded_users = Vec::new();
    for role in catalog.roles() {
        let user_id = ensure_seed_user(repositories, role.id(), role.name(), &password_hash).await?;
        seeded_users.push((role.id().clone(), user_id));
    }
    info!(count = seeded_users.len(), "dev seed users ready");

    for seed in &DEV_SEED_DEPARTMENTS {
        let head = seeded_users
            .iter()
            .find(|(role_id, _)| role_id.as_str() == seed.head_role)
            .map(|(_, user_id)| *user_id);
        let department = ensure_seed_department(repositories, seed, head).await?;

        for (order, (key, name, icon, permissions)) in seed.modules.iter().enumerate() {
            repositories
                .departments
                .save_department_module(DepartmentModule {
                    id: Uuid::new_v4(),
                    department_id: department.id,
                    module_key: (*key).to_owned(),
                    module_name: (*name).to_owned(),
                    description: None,
                    icon: (*icon).to_owned(),
                    display_order: i32::try_from(order).unwrap_or(i32::MAX),
                    is_enabled: true,
                    parent_module_id: None,
                    required_permissions: permissions
                        .iter()
                        .map(|permission| (*permission).to_owned())
                        .collect(),
                })
                .await?;
        }

        if let Some(head) = head {
            ensure_assignment(repositories, head, department.id, AssignmentType::Head).await?;
        }
    }

    if let Some((_, employee)) = seeded_users
        .iter()
        .find(|(role_id, _)| role_id.as_str() == "employee")
        && let Some(operations) = repositories
            .departments
            .find_department_by_code("OPS")
            .await?
    {
        ensure_assignment(repositories, *employee, operations.id, AssignmentType::Member).await?;
    }

    info!(
        departments = DEV_SEED_DEPARTMENTS.len(),
        "dev seed completed"
    );
    Ok(())
}

async fn ensure_seed_user(
    repositories: &Repositories,
    role: &RoleId,
    role_name: &str,
    password_hash: &str,
) -> AppResult<UserId> {
    if let Some(existing) = repositories
        .users
        .find_credentials_by_mobile(DEV_SEED_MOBILE, role)
        .await?
    {
        return Ok(existing.profile.id);
    }

    let profile = repositories
        .users
        .create_profile(NewUserProfile {
            name: NonEmptyString::new(format!("Demo {role_name}"))?,
            mobile: Some(DEV_SEED_MOBILE.to_owned()),
            email: Some(EmailAddress::new(format!(
                "{}@{DEV_SEED_EMAIL_DOMAIN}",
                role.as_str()
            ))?),
            role: role.clone(),
            status: UserStatus::Active,
            mobile_verified: true,
            profile_completed: true,
            password_hash: Some(password_hash.to_owned()),
        })
        .await?;

    Ok(profile.id)
}

async fn ensure_seed_department(
    repositories: &Repositories,
    seed: &SeedDepartment,
    head: Option<UserId>,
) -> AppResult<Department> {
    if let Some(existing) = repositories
        .departments
        .find_department_by_code(seed.code)
        .await?
    {
        return Ok(existing);
    }

    let now = Utc::now();
    repositories
        .departments
        .create_department(Department {
            id: Uuid::new_v4(),
            name: NonEmptyString::new(seed.name)?,
            code: NonEmptyString::new(seed.code)?,
            description: seed.description.to_owned(),
            parent_department_id: None,
            head_user_id: head,
            department_type: seed.department_type,
            status: DepartmentStatus::Active,
            email: Some(format!(
                "{}@{DEV_SEED_EMAIL_DOMAIN}",
                seed.code.to_lowercase()
            )),
            phone: None,
            location: None,
            budget_allocated: None,
            employee_count: 0,
            settings: json!({}),
            created_at: now,
            updated_at: now,
        })
        .await
}

async fn ensure_assignment(
    repositories: &Repositories,
    user_id: UserId,
    department_id: Uuid,
    assignment_type: AssignmentType,
) -> AppResult<()> {
    let assignments = repositories
        .departments
        .list_user_assignments(user_id)
        .await?;
    if assignments
        .iter()
        .any(|assignment| assignment.department_id == department_id)
    {
        return Ok(());
    }

    let now = Utc::now();
    repositories
        .departments
        .create_assignment(DepartmentUserAssignment {
            id: Uuid::new_v4(),
            user_id,
            department_id,
            role_id: None,
            assignment_type,
            is_primary: assignments.iter().all(|assignment| !assignment.is_primary),
            status: AssignmentStatus::Active,
            assigned_at: now,
            valid_from: now,
            valid_until: None,
        })
        .await?;

    Ok(())
}
