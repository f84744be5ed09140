use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use ombaro_core::AppError;

use super::{
    check_permission_handler, list_roles_handler, navigation_handler,
    permission_matrix_handler, preview_permission_matrix_handler, role_overview_handler,
};
use crate::dto::{PermissionCheckQuery, PermissionToggleRequest, PreviewPermissionMatrixRequest};
use crate::handlers::test_support::{into_body, seeded_app};

#[tokio::test]
async fn navigation_lists_modules_opened_by_the_role() {
    let app = seeded_app().await;

    let Json(admin) = navigation_handler(
        State(app.state.clone()),
        Extension(app.identity("admin").await),
    )
    .await;
    assert_eq!(admin.role_id, "admin");
    assert_eq!(admin.role_label, "Admin");
    let module_ids: Vec<&str> = admin.modules.iter().map(|module| module.id.as_str()).collect();
    assert_eq!(
        module_ids,
        vec!["user_management", "financial_management", "operations"]
    );

    let Json(customer) = navigation_handler(
        State(app.state.clone()),
        Extension(app.identity("customer").await),
    )
    .await;
    assert!(customer.modules.is_empty());
}

#[tokio::test]
async fn permission_check_follows_role_grants() {
    let app = seeded_app().await;
    let admin = app.identity("admin").await;

    let granted = into_body(
        check_permission_handler(
            State(app.state.clone()),
            Extension(admin.clone()),
            Query(PermissionCheckQuery {
                permission: "users:read".to_owned(),
            }),
        )
        .await,
    );
    assert!(granted.granted);

    let denied = into_body(
        check_permission_handler(
            State(app.state.clone()),
            Extension(admin),
            Query(PermissionCheckQuery {
                permission: "legal:approve".to_owned(),
            }),
        )
        .await,
    );
    assert!(!denied.granted);

    let malformed = check_permission_handler(
        State(app.state.clone()),
        Extension(app.identity("customer").await),
        Query(PermissionCheckQuery {
            permission: "no-action".to_owned(),
        }),
    )
    .await;
    assert!(matches!(malformed, Err(error) if matches!(error.0, AppError::Validation(_))));
}

#[tokio::test]
async fn module_access_does_not_imply_permissions() {
    let app = seeded_app().await;

    for (role, permission) in [
        ("employee", "hr:approve"),
        ("customer_data", "users:delete"),
        ("accounts_department", "budgets:approve"),
    ] {
        let check = into_body(
            check_permission_handler(
                State(app.state.clone()),
                Extension(app.identity(role).await),
                Query(PermissionCheckQuery {
                    permission: permission.to_owned(),
                }),
            )
            .await,
        );
        assert!(!check.granted, "{role} / {permission}");
    }
}

#[tokio::test]
async fn permission_checks_match_the_matrix_for_every_role() {
    let app = seeded_app().await;
    let matrix = into_body(
        permission_matrix_handler(
            State(app.state.clone()),
            Extension(app.identity("super_admin").await),
        )
        .await,
    );

    for row in &matrix.rows {
        let actor = app.identity(&row.role_id).await;
        for permission in &matrix.permissions {
            let check = into_body(
                check_permission_handler(
                    State(app.state.clone()),
                    Extension(actor.clone()),
                    Query(PermissionCheckQuery {
                        permission: permission.clone(),
                    }),
                )
                .await,
            );
            assert_eq!(
                check.granted,
                row.granted.contains(permission),
                "{} / {permission}",
                row.role_id
            );
        }
    }
}

#[tokio::test]
async fn roles_and_overviews_come_from_the_catalog() {
    let app = seeded_app().await;

    let Json(roles) = list_roles_handler(State(app.state.clone())).await;
    assert!(roles.iter().any(|role| role.id == "hr_department"));

    let overview = into_body(
        role_overview_handler(State(app.state.clone()), Path("hr_department".to_owned())).await,
    );
    assert_eq!(overview.role.name, "HR Department");
    assert!(
        overview
            .modules
            .iter()
            .any(|module| module.id == "hr_management")
    );

    let missing =
        role_overview_handler(State(app.state.clone()), Path("ghost".to_owned())).await;
    assert!(matches!(missing, Err(error) if matches!(error.0, AppError::NotFound(_))));
}

#[tokio::test]
async fn permission_matrix_requires_role_administration() {
    let app = seeded_app().await;

    let customer = permission_matrix_handler(
        State(app.state.clone()),
        Extension(app.identity("customer").await),
    )
    .await;
    assert!(matches!(customer, Err(error) if matches!(error.0, AppError::Forbidden(_))));

    let matrix = into_body(
        permission_matrix_handler(
            State(app.state.clone()),
            Extension(app.identity("super_admin").await),
        )
        .await,
    );
    assert!(matrix.changes.is_empty());
    assert!(matrix.permissions.iter().any(|permission| permission == "hr:approve"));
    assert!(!matrix.groups.is_empty());
}

#[tokio::test]
async fn matrix_preview_reports_toggled_cells() {
    let app = seeded_app().await;

    let preview = into_body(
        preview_permission_matrix_handler(
            State(app.state.clone()),
            Extension(app.identity("super_admin").await),
            Json(PreviewPermissionMatrixRequest {
                toggles: vec![PermissionToggleRequest {
                    role_id: "customer".to_owned(),
                    permission: "support:read".to_owned(),
                }],
            }),
        )
        .await,
    );

    assert_eq!(preview.changes.len(), 1);
    assert_eq!(preview.changes[0].role_id, "customer");
    assert_eq!(preview.changes[0].permission, "support:read");
    assert!(preview.changes[0].granted);

    let customer_row = preview.rows.iter().find(|row| row.role_id == "customer");
    assert!(customer_row.is_some_and(|row| row.granted == vec!["support:read".to_owned()]));

    let undeclared = preview_permission_matrix_handler(
        State(app.state.clone()),
        Extension(app.identity("super_admin").await),
        Json(PreviewPermissionMatrixRequest {
            toggles: vec![PermissionToggleRequest {
                role_id: "customer".to_owned(),
                permission: "rockets:launch".to_owned(),
            }],
        }),
    )
    .await;
    assert!(matches!(undeclared, Err(error) if matches!(error.0, AppError::Validation(_))));
}
