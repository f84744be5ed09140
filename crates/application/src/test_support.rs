use std::sync::Arc;

use ombaro_core::UserIdentity;
use ombaro_domain::{
    AccessCatalog, ModuleDefinition, Permission, ReportCategory, ReportDefinition,
    ReportFrequency, RoleDefinition, RoleDefinitionInput, RoleId, RolePresentation,
    SubModuleDefinition, UserId, display_label_for_id,
};

fn permissions(values: &[&str]) -> Vec<Permission> {
    values
        .iter()
        .map(|value| Permission::parse(value).unwrap_or_else(|error| panic!("{error}")))
        .collect()
}

fn role(id: &str, modules: &[&str], grants: &[&str]) -> RoleDefinition {
    RoleDefinition::new(RoleDefinitionInput {
        id: id.to_owned(),
        name: display_label_for_id(id),
        description: String::new(),
        modules: modules.iter().map(|value| (*value).to_owned()).collect(),
        permissions: grants.iter().map(|value| (*value).to_owned()).collect(),
        reports_to: Vec::new(),
        can_manage: Vec::new(),
        presentation: RolePresentation {
            icon: "User".to_owned(),
            color: "#64748b".to_owned(),
        },
    })
    .unwrap_or_else(|error| panic!("{error}"))
}

pub(crate) fn fixture_catalog() -> Arc<AccessCatalog> {
    let vendor_management = SubModuleDefinition::new(
        "vendor_management",
        "Vendor Management",
        "",
        "Building",
        permissions(&["vendors:read", "vendors:create", "vendors:update", "vendors:approve"]),
    )
    .unwrap_or_else(|error| panic!("{error}"));
    let role_management = SubModuleDefinition::new(
        "role_management",
        "Role Management",
        "",
        "Users",
        permissions(&["roles:read", "roles:update"]),
    )
    .unwrap_or_else(|error| panic!("{error}"));

    let modules = vec![
        ModuleDefinition::new(
            "user_management",
            "User Management",
            "",
            "Users",
            permissions(&["users:read", "users:create", "users:update", "users:delete"]),
            vec![vendor_management],
        )
        .unwrap_or_else(|error| panic!("{error}")),
        ModuleDefinition::new(
            "financial_management",
            "Financial Management",
            "",
            "DollarSign",
            permissions(&["finance:read", "accounts:read"]),
            Vec::new(),
        )
        .unwrap_or_else(|error| panic!("{error}")),
        ModuleDefinition::new(
            "hr_management",
            "Human Resources",
            "",
            "UserCog",
            permissions(&["hr:read", "hr:update", "hr:approve"]),
            Vec::new(),
        )
        .unwrap_or_else(|error| panic!("{error}")),
        ModuleDefinition::new(
            "system_admin",
            "System Administration",
            "",
            "Crown",
            permissions(&["admin:read", "admin:create", "admin:update", "admin:configure"]),
            vec![role_management],
        )
        .unwrap_or_else(|error| panic!("{error}")),
    ];

    let reports = vec![
        ReportDefinition::new(
            "financial_summary",
            "Financial Summary",
            "",
            ReportCategory::Financial,
            ReportFrequency::Monthly,
            "finance_department",
            vec![RoleId::new("accounts_department").unwrap_or_else(|error| panic!("{error}"))],
        )
        .unwrap_or_else(|error| panic!("{error}")),
        ReportDefinition::new(
            "hr_dashboard",
            "HR Dashboard",
            "",
            ReportCategory::Hr,
            ReportFrequency::Weekly,
            "hr_department",
            vec![RoleId::new("hr_department").unwrap_or_else(|error| panic!("{error}"))],
        )
        .unwrap_or_else(|error| panic!("{error}")),
    ];

    let catalog = AccessCatalog::new(
        modules,
        vec![
            role("super_admin", &[], &["*"]),
            role(
                "admin",
                &["user_management"],
                &[
                    "users:read",
                    "users:create",
                    "users:update",
                    "users:delete",
                    "vendors:read",
                    "vendors:approve",
                ],
            ),
            role(
                "accounts_department",
                &["financial_management"],
                &["accounts:read", "payments:read"],
            ),
            role("hr_department", &["hr_management"], &["hr:read", "hr:approve"]),
            role("customer", &[], &[]),
            role("vendor", &[], &[]),
        ],
        Vec::new(),
        reports,
    )
    .unwrap_or_else(|error| panic!("{error}"));

    Arc::new(catalog)
}

pub(crate) fn identity(user_id: UserId, role: &str) -> UserIdentity {
    UserIdentity::new(user_id.to_string(), "Test User", None, role)
}
