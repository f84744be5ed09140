use ombaro_domain::{Permission, PermissionAction, UserId};

use crate::test_support::{fixture_catalog, identity};

use super::{AccessService, PermissionToggle, subject_user_id};

fn service() -> AccessService {
    AccessService::new(fixture_catalog())
}

fn permission(value: &str) -> Permission {
    Permission::parse(value).unwrap_or_else(|error| panic!("{error}"))
}

#[test]
fn navigation_for_wildcard_role_lists_every_module() {
    let service = service();
    let modules = service.navigation_for("super_admin");
    assert_eq!(modules.len(), service.catalog().modules().len());
}

#[test]
fn navigation_for_enumerated_role_lists_its_modules() {
    let modules = service().navigation_for("accounts_department");
    let ids: Vec<&str> = modules.iter().map(|module| module.id().as_str()).collect();
    assert_eq!(ids, vec!["financial_management"]);
}

#[test]
fn navigation_for_unknown_role_is_empty() {
    assert!(service().navigation_for("night_auditor").is_empty());
}

#[test]
fn explicit_grants_are_enforced() {
    let service = service();
    let admin = identity(UserId::new(), "admin");

    assert!(service.has_permission(&admin, &permission("users:delete")));
    assert!(service.has_permission(&admin, &permission("vendors:approve")));
    assert!(
        service
            .require(&admin, "hr", PermissionAction::Approve)
            .is_err()
    );
}

#[test]
fn module_access_alone_grants_nothing() {
    let service = service();
    let accounts = identity(UserId::new(), "accounts_department");
    assert!(!service.has_permission(&accounts, &permission("finance:read")));
    assert!(matches!(
        service.require(&accounts, "finance", PermissionAction::Read),
        Err(ombaro_core::AppError::Forbidden(_))
    ));
}

#[test]
fn enforcement_agrees_with_matrix_for_every_cell() {
    let service = service();
    let matrix = service
        .permission_matrix(&identity(UserId::new(), "super_admin"))
        .unwrap_or_else(|error| panic!("{error}"));

    for row in matrix.rows() {
        let actor = identity(UserId::new(), row.role_id().as_str());
        for column in matrix.permissions() {
            assert_eq!(
                service.has_permission(&actor, column),
                row.granted().contains(column),
                "{} / {column}",
                row.role_id().as_str()
            );
        }
    }
}

#[test]
fn explicit_grants_outside_modules_are_honoured() {
    let service = service();
    let accounts = identity(UserId::new(), "accounts_department");
    assert!(service.has_permission(&accounts, &permission("payments:read")));
    assert!(!service.has_permission(&accounts, &permission("users:read")));
}

#[test]
fn unknown_role_is_forbidden() {
    let service = service();
    let ghost = identity(UserId::new(), "ghost");
    let result = service.require(&ghost, "users", PermissionAction::Read);
    assert!(matches!(result, Err(ombaro_core::AppError::Forbidden(_))));
}

#[test]
fn permission_matrix_requires_role_read() {
    let service = service();
    assert!(
        service
            .permission_matrix(&identity(UserId::new(), "customer"))
            .is_err()
    );
    let matrix = service
        .permission_matrix(&identity(UserId::new(), "super_admin"))
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(matrix.rows().len(), service.catalog().roles().len());
}

#[test]
fn preview_applies_toggles_without_touching_catalog() {
    let service = service();
    let actor = identity(UserId::new(), "super_admin");
    let toggles = vec![PermissionToggle {
        role_id: "hr_department".to_owned(),
        permission: "hr:update".to_owned(),
    }];

    let preview = service
        .preview_permission_matrix(&actor, &toggles)
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(
        preview.is_granted("hr_department", &permission("hr:update")),
        Some(true)
    );
    assert_eq!(preview.changes().len(), 1);

    let baseline = service
        .permission_matrix(&actor)
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(
        baseline.is_granted("hr_department", &permission("hr:update")),
        Some(false)
    );
}

#[test]
fn preview_rejects_unknown_cells() {
    let service = service();
    let actor = identity(UserId::new(), "super_admin");
    let toggles = vec![PermissionToggle {
        role_id: "hr_department".to_owned(),
        permission: "rockets:launch".to_owned(),
    }];
    assert!(service.preview_permission_matrix(&actor, &toggles).is_err());
}

#[test]
fn reports_are_filtered_by_role() {
    let service = service();
    let hr = service.available_reports(&identity(UserId::new(), "hr_department"));
    assert_eq!(hr.len(), 1);
    assert_eq!(hr[0].id(), "hr_dashboard");
    assert_eq!(
        service
            .available_reports(&identity(UserId::new(), "super_admin"))
            .len(),
        2
    );
}

#[test]
fn role_overview_includes_modules() {
    let overview = service()
        .role_overview("admin")
        .unwrap_or_else(|| panic!("admin should exist"));
    assert_eq!(overview.modules.len(), 1);
    assert!(overview.reporting_line.is_none());
}

#[test]
fn subject_must_be_a_user_id() {
    let actor = ombaro_core::UserIdentity::new("not-a-uuid", "x", None, "admin");
    assert!(subject_user_id(&actor).is_err());
}
