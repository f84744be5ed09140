//! Loads the access catalog from JSON.
//!
//! The catalog shipped with the binary lives in `catalog/access_catalog.json`.
//! Deployments may replace it with a file of the same shape.

use std::path::Path;

use ombaro_core::{AppError, AppResult};
use ombaro_domain::{
    AccessCatalog, ModuleDefinition, Permission, ReportCategory, ReportDefinition,
    ReportFrequency, ReportingLine, RoleDefinition, RoleDefinitionInput, RoleId,
    RolePresentation, SubModuleDefinition,
};
use serde::Deserialize;
use tracing::{info, warn};

const EMBEDDED_CATALOG: &str = include_str!("../catalog/access_catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    modules: Vec<ModuleEntry>,
    roles: Vec<RoleEntry>,
    #[serde(default)]
    reporting_hierarchy: Vec<ReportingLine>,
    #[serde(default)]
    reports: Vec<ReportEntry>,
}

#[derive(Debug, Deserialize)]
struct SubModuleEntry {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    permissions: Vec<Permission>,
}

#[derive(Debug, Deserialize)]
struct ModuleEntry {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    permissions: Vec<Permission>,
    #[serde(default)]
    sub_modules: Vec<SubModuleEntry>,
}

#[derive(Debug, Deserialize)]
struct RoleEntry {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    icon: String,
    color: String,
    #[serde(default)]
    modules: Vec<String>,
    #[serde(default)]
    permissions: Vec<String>,
    #[serde(default)]
    reports_to: Vec<String>,
    #[serde(default)]
    can_manage: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ReportEntry {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    category: ReportCategory,
    frequency: ReportFrequency,
    generated_by: String,
    access_roles: Vec<RoleId>,
}

/// Loads the catalog from `path`, or the embedded default when `None`.
pub fn load_access_catalog(path: Option<&Path>) -> AppResult<AccessCatalog> {
    let catalog = match path {
        Some(path) => {
            let document = std::fs::read_to_string(path).map_err(|error| {
                AppError::Internal(format!(
                    "failed to read access catalog '{}': {error}",
                    path.display()
                ))
            })?;
            parse_access_catalog(&document)?
        }
        None => parse_access_catalog(EMBEDDED_CATALOG)?,
    };

    info!(
        modules = catalog.modules().len(),
        roles = catalog.roles().len(),
        reports = catalog.reports().len(),
        "access catalog loaded"
    );
    log_diagnostics(&catalog);

    Ok(catalog)
}

/// Parses and validates a catalog document.
pub fn parse_access_catalog(document: &str) -> AppResult<AccessCatalog> {
    let document: CatalogDocument = serde_json::from_str(document)
        .map_err(|error| AppError::Validation(format!("invalid access catalog: {error}")))?;

    let modules = document
        .modules
        .into_iter()
        .map(|entry| {
            let sub_modules = entry
                .sub_modules
                .into_iter()
                .map(|sub| {
                    SubModuleDefinition::new(
                        sub.id,
                        sub.name,
                        sub.description,
                        sub.icon,
                        sub.permissions,
                    )
                })
                .collect::<AppResult<Vec<_>>>()?;
            ModuleDefinition::new(
                entry.id,
                entry.name,
                entry.description,
                entry.icon,
                entry.permissions,
                sub_modules,
            )
        })
        .collect::<AppResult<Vec<_>>>()?;

    let roles = document
        .roles
        .into_iter()
        .map(|entry| {
            RoleDefinition::new(RoleDefinitionInput {
                id: entry.id,
                name: entry.name,
                description: entry.description,
                modules: entry.modules,
                permissions: entry.permissions,
                reports_to: entry.reports_to,
                can_manage: entry.can_manage,
                presentation: RolePresentation {
                    icon: entry.icon,
                    color: entry.color,
                },
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let reports = document
        .reports
        .into_iter()
        .map(|entry| {
            ReportDefinition::new(
                &entry.id,
                entry.title,
                entry.description,
                entry.category,
                entry.frequency,
                entry.generated_by,
                entry.access_roles,
            )
        })
        .collect::<AppResult<Vec<_>>>()?;

    AccessCatalog::new(modules, roles, document.reporting_hierarchy, reports)
}

fn log_diagnostics(catalog: &AccessCatalog) {
    let diagnostics = catalog.diagnostics();
    for finding in &diagnostics.undeclared_permissions {
        warn!(
            role = %finding.role_id,
            permission = %finding.permission,
            "role grants a permission no module declares"
        );
    }
    for finding in &diagnostics.unresolved_role_references {
        warn!(
            role = %finding.role_id,
            reference = %finding.reference,
            "role hierarchy references an id outside the role registry"
        );
    }
}

#[cfg(test)]
mod tests {
    use ombaro_domain::{Permission, WILDCARD_PERMISSION};

    use super::*;

    fn embedded() -> AccessCatalog {
        parse_access_catalog(EMBEDDED_CATALOG).unwrap_or_else(|error| panic!("{error}"))
    }

    #[test]
    fn embedded_catalog_is_complete() {
        let catalog = embedded();
        assert_eq!(catalog.modules().len(), 8);
        assert_eq!(catalog.roles().len(), 22);
        assert_eq!(catalog.reports().len(), 8);
        assert!(catalog.reporting_line("ca_cs").is_some());
    }

    #[test]
    fn super_admin_holds_the_wildcard() {
        let catalog = embedded();
        let super_admin = catalog
            .find_role("super_admin")
            .unwrap_or_else(|| panic!("super_admin missing"));
        assert!(super_admin.has_wildcard());
        assert_eq!(catalog.available_modules("super_admin").len(), 8);
        assert_eq!(catalog.available_reports("super_admin").len(), 8);
        assert_eq!(WILDCARD_PERMISSION, "*");
    }

    #[test]
    fn department_roles_see_only_their_modules() {
        let catalog = embedded();
        let modules: Vec<&str> = catalog
            .available_modules("accounts_department")
            .into_iter()
            .map(|module| module.id().as_str())
            .collect();
        assert_eq!(modules, vec!["financial_management"]);
        assert!(catalog.available_modules("customer").is_empty());
    }

    #[test]
    fn grants_outside_the_registry_are_diagnostics() {
        let diagnostics = embedded().diagnostics();
        let finance_approve = Permission::parse("finance:approve")
            .unwrap_or_else(|error| panic!("{error}"));
        assert!(
            diagnostics
                .undeclared_permissions
                .iter()
                .any(|finding| finding.permission == finance_approve)
        );
        assert!(
            diagnostics
                .unresolved_role_references
                .iter()
                .any(|finding| finding.reference.as_str() == "operations_head")
        );
    }

    #[test]
    fn unknown_module_reference_is_rejected() {
        let document = r##"{
            "modules": [],
            "roles": [{
                "id": "accounts_department",
                "name": "Accounts Department",
                "icon": "Calculator",
                "color": "#22C55E",
                "modules": ["financial_management"]
            }]
        }"##;
        assert!(matches!(
            parse_access_catalog(document),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn malformed_permission_is_rejected() {
        let document = r#"{
            "modules": [{"id": "marketing", "name": "Marketing", "permissions": ["marketing"]}],
            "roles": []
        }"#;
        assert!(parse_access_catalog(document).is_err());
    }

    #[test]
    fn missing_override_file_is_an_error() {
        let result = load_access_catalog(Some(Path::new("/nonexistent/access_catalog.json")));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
