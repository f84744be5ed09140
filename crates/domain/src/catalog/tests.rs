use proptest::prelude::*;

use super::*;
use crate::module::SubModuleDefinition;
use crate::permission_matrix::PermissionMatrix;
use crate::reporting::{ReportCategory, ReportFrequency};
use crate::role::{RoleDefinitionInput, RolePresentation};

const MODULE_IDS: [&str; 4] = ["user_management", "financial_management", "operations", "marketing"];

fn permission(value: &str) -> Permission {
    Permission::parse(value).unwrap_or_else(|error| panic!("{error}"))
}

fn module(id: &str, permissions: &[&str]) -> ModuleDefinition {
    ModuleDefinition::new(
        id,
        display_label_for_id(id),
        "",
        "Folder",
        permissions.iter().map(|value| permission(value)).collect(),
        Vec::new(),
    )
    .unwrap_or_else(|error| panic!("{error}"))
}

fn role_input(id: &str, modules: &[&str], permissions: &[&str]) -> RoleDefinitionInput {
    RoleDefinitionInput {
        id: id.to_owned(),
        name: display_label_for_id(id),
        description: String::new(),
        modules: modules.iter().map(|value| (*value).to_owned()).collect(),
        permissions: permissions.iter().map(|value| (*value).to_owned()).collect(),
        reports_to: Vec::new(),
        can_manage: Vec::new(),
        presentation: RolePresentation {
            icon: "User".to_owned(),
            color: "#64748b".to_owned(),
        },
    }
}

fn role(id: &str, modules: &[&str], permissions: &[&str]) -> RoleDefinition {
    RoleDefinition::new(role_input(id, modules, permissions))
        .unwrap_or_else(|error| panic!("{error}"))
}

fn fixture_modules() -> Vec<ModuleDefinition> {
    let accounting = SubModuleDefinition::new(
        "accounting",
        "Accounting",
        "",
        "Calculator",
        vec![permission("accounts:read"), permission("invoices:create")],
    )
    .unwrap_or_else(|error| panic!("{error}"));

    vec![
        module("user_management", &["users:read", "users:create"]),
        ModuleDefinition::new(
            "financial_management",
            "Financial Management",
            "",
            "DollarSign",
            vec![permission("finance:read")],
            vec![accounting],
        )
        .unwrap_or_else(|error| panic!("{error}")),
        module("operations", &["operations:read"]),
        module("marketing", &["marketing:read"]),
    ]
}

fn fixture_catalog() -> AccessCatalog {
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
            "system_health",
            "System Health",
            "",
            ReportCategory::System,
            ReportFrequency::Daily,
            "it_department",
            Vec::new(),
        )
        .unwrap_or_else(|error| panic!("{error}")),
    ];

    AccessCatalog::new(
        fixture_modules(),
        vec![
            role("super_admin", &[], &["*"]),
            role(
                "accounts_department",
                &["financial_management"],
                &["accounts:read", "invoices:create"],
            ),
            role("customer", &[], &["bookings:create"]),
        ],
        Vec::new(),
        reports,
    )
    .unwrap_or_else(|error| panic!("{error}"))
}

#[test]
fn find_role_returns_every_declared_role() {
    let catalog = fixture_catalog();
    for role in catalog.roles() {
        assert_eq!(catalog.find_role(role.id().as_str()), Some(role));
    }
    assert!(catalog.find_role("unknown_role").is_none());
}

#[test]
fn wildcard_role_sees_the_whole_registry() {
    let catalog = fixture_catalog();
    let available = catalog.available_modules("super_admin");
    assert_eq!(available.len(), catalog.modules().len());
}

#[test]
fn accounts_department_sees_only_financial_management() {
    let catalog = fixture_catalog();
    let available = catalog.available_modules("accounts_department");
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id().as_str(), "financial_management");
}

#[test]
fn unknown_role_has_no_modules() {
    let catalog = fixture_catalog();
    assert!(catalog.available_modules("ghost").is_empty());
}

#[test]
fn role_label_falls_back_to_formatted_id() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.role_label("accounts_department"), "Accounts Department");
    assert_eq!(catalog.role_label("field_agent"), "Field Agent");
}

#[test]
fn unknown_module_reference_is_rejected() {
    let result = AccessCatalog::new(
        fixture_modules(),
        vec![role("it_department", &["system_admin"], &[])],
        Vec::new(),
        Vec::new(),
    );
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[test]
fn sub_module_id_cannot_be_used_as_role_module() {
    let result = AccessCatalog::new(
        fixture_modules(),
        vec![role("accounts_department", &["accounting"], &[])],
        Vec::new(),
        Vec::new(),
    );
    assert!(result.is_err());
}

#[test]
fn duplicate_role_ids_are_rejected() {
    let result = AccessCatalog::new(
        fixture_modules(),
        vec![role("customer", &[], &[]), role("customer", &[], &[])],
        Vec::new(),
        Vec::new(),
    );
    assert!(result.is_err());
}

#[test]
fn duplicate_sub_module_ids_are_rejected() {
    let mut modules = fixture_modules();
    modules.push(module("accounting", &[]));
    let result = AccessCatalog::new(modules, Vec::new(), Vec::new(), Vec::new());
    assert!(result.is_err());
}

#[test]
fn declared_permissions_include_sub_modules() {
    let catalog = fixture_catalog();
    let declared = catalog.declared_permissions();
    assert!(declared.contains(&permission("accounts:read")));
    assert!(declared.contains(&permission("users:create")));
    assert_eq!(declared.len(), 7);
}

#[test]
fn role_allows_only_explicit_grants() {
    let catalog = fixture_catalog();
    assert!(catalog.role_allows("accounts_department", &permission("accounts:read")));
    // Declared by an accessible module but never granted.
    assert!(!catalog.role_allows("accounts_department", &permission("finance:read")));
    assert!(!catalog.role_allows("accounts_department", &permission("users:read")));
    assert!(catalog.role_allows("super_admin", &permission("users:create")));
    assert!(!catalog.role_allows("ghost", &permission("users:read")));
}

#[test]
fn enforcement_matches_matrix_baseline() {
    let catalog = fixture_catalog();
    let matrix = PermissionMatrix::from_catalog(&catalog);

    for role in catalog.roles() {
        for declared in catalog.declared_permissions() {
            assert_eq!(
                matrix.is_granted(role.id().as_str(), &declared),
                Some(catalog.role_allows(role.id().as_str(), &declared)),
                "{} / {declared}",
                role.id().as_str()
            );
        }
    }
}

#[test]
fn reports_follow_access_list_and_wildcard() {
    let catalog = fixture_catalog();
    let accounts: Vec<&str> = catalog
        .available_reports("accounts_department")
        .iter()
        .map(|report| report.id())
        .collect();
    assert_eq!(accounts, vec!["financial_summary"]);
    assert_eq!(catalog.available_reports("super_admin").len(), 2);
    assert!(catalog.available_reports("customer").is_empty());
}

#[test]
fn diagnostics_report_undeclared_grants_and_unknown_references() {
    let mut input = role_input("hr_department", &[], &["bookings:read"]);
    input.can_manage = vec!["all_employees".to_owned()];
    let catalog = AccessCatalog::new(
        fixture_modules(),
        vec![RoleDefinition::new(input).unwrap_or_else(|error| panic!("{error}"))],
        Vec::new(),
        Vec::new(),
    )
    .unwrap_or_else(|error| panic!("{error}"));

    let diagnostics = catalog.diagnostics();
    assert_eq!(diagnostics.undeclared_permissions.len(), 1);
    assert_eq!(diagnostics.unresolved_role_references.len(), 1);
    assert_eq!(
        diagnostics.unresolved_role_references[0].reference.as_str(),
        "all_employees"
    );
}

#[test]
fn reporting_line_for_unknown_role_is_rejected() {
    let line = ReportingLine {
        role_id: RoleId::new("ghost").unwrap_or_else(|error| panic!("{error}")),
        reports_to: Vec::new(),
        manages: Vec::new(),
        can_view_reports: Vec::new(),
        can_approve: Vec::new(),
    };
    let result = AccessCatalog::new(fixture_modules(), Vec::new(), vec![line], Vec::new());
    assert!(result.is_err());
}

proptest! {
    #[test]
    fn available_modules_match_role_module_set(mask in prop::collection::vec(any::<bool>(), MODULE_IDS.len())) {
        let selected: Vec<&str> = MODULE_IDS
            .iter()
            .zip(&mask)
            .filter_map(|(id, keep)| keep.then_some(*id))
            .collect();
        let catalog = AccessCatalog::new(
            fixture_modules(),
            vec![role("staff_department", &selected, &[])],
            Vec::new(),
            Vec::new(),
        )
        .unwrap_or_else(|error| panic!("{error}"));

        let available: Vec<&str> = catalog
            .available_modules("staff_department")
            .iter()
            .map(|module| module.id().as_str())
            .collect();
        prop_assert_eq!(available, selected);
    }
}
