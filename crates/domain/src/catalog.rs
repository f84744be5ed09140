//! The access catalog: module registry, role registry, reporting hierarchy
//! and report definitions, validated together.

use std::collections::{BTreeSet, HashSet};

use ombaro_core::{AppError, AppResult};

use crate::module::{ModuleDefinition, ModuleId};
use crate::permission::{Permission, PermissionGrant};
use crate::reporting::{ReportDefinition, ReportingLine};
use crate::role::{RoleDefinition, RoleId, display_label_for_id};

/// A role permission that no module declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeclaredRolePermission {
    /// Role holding the grant.
    pub role_id: RoleId,
    /// Permission outside every module.
    pub permission: Permission,
}

/// A `reports_to` or `can_manage` entry that does not name a catalog role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRoleReference {
    /// Role holding the reference.
    pub role_id: RoleId,
    /// Referenced id, usually a staff group.
    pub reference: RoleId,
}

/// Non-fatal findings produced while assembling a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogDiagnostics {
    /// Role grants outside the module registry.
    pub undeclared_permissions: Vec<UndeclaredRolePermission>,
    /// Hierarchy references to ids outside the role registry.
    pub unresolved_role_references: Vec<UnresolvedRoleReference>,
}

impl CatalogDiagnostics {
    /// Returns whether there is nothing to report.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.undeclared_permissions.is_empty() && self.unresolved_role_references.is_empty()
    }
}

/// Immutable registry of modules, roles and reports.
#[derive(Debug, Clone)]
pub struct AccessCatalog {
    modules: Vec<ModuleDefinition>,
    roles: Vec<RoleDefinition>,
    reporting_lines: Vec<ReportingLine>,
    reports: Vec<ReportDefinition>,
}

impl AccessCatalog {
    /// Assembles and validates a catalog.
    ///
    /// Fails when module, sub-module, role or report ids repeat, when a role
    /// lists a module that is not a top-level module, or when a reporting line
    /// names an unknown role.
    pub fn new(
        modules: Vec<ModuleDefinition>,
        roles: Vec<RoleDefinition>,
        reporting_lines: Vec<ReportingLine>,
        reports: Vec<ReportDefinition>,
    ) -> AppResult<Self> {
        let mut seen_module_ids = HashSet::new();
        for module in &modules {
            ensure_unique(&mut seen_module_ids, module.id().as_str(), "module")?;
            for sub_module in module.sub_modules() {
                ensure_unique(&mut seen_module_ids, sub_module.id().as_str(), "module")?;
            }
        }

        let top_level_ids: HashSet<&ModuleId> = modules.iter().map(ModuleDefinition::id).collect();

        let mut seen_role_ids = HashSet::new();
        for role in &roles {
            ensure_unique(&mut seen_role_ids, role.id().as_str(), "role")?;

            if let Some(unknown) = role
                .modules()
                .iter()
                .find(|module_id| !top_level_ids.contains(module_id))
            {
                return Err(AppError::Validation(format!(
                    "role '{}' references unknown module '{unknown}'",
                    role.id()
                )));
            }
        }

        let mut seen_lines = HashSet::new();
        for line in &reporting_lines {
            if !seen_role_ids.contains(line.role_id.as_str()) {
                return Err(AppError::Validation(format!(
                    "reporting line references unknown role '{}'",
                    line.role_id
                )));
            }
            ensure_unique(&mut seen_lines, line.role_id.as_str(), "reporting line")?;
        }

        let mut seen_reports = HashSet::new();
        for report in &reports {
            ensure_unique(&mut seen_reports, report.id(), "report")?;
        }

        Ok(Self {
            modules,
            roles,
            reporting_lines,
            reports,
        })
    }

    /// Returns all top-level modules in registry order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleDefinition] {
        &self.modules
    }

    /// Returns all roles in registry order.
    #[must_use]
    pub fn roles(&self) -> &[RoleDefinition] {
        &self.roles
    }

    /// Returns all report definitions.
    #[must_use]
    pub fn reports(&self) -> &[ReportDefinition] {
        &self.reports
    }

    /// Looks up a role by id.
    #[must_use]
    pub fn find_role(&self, role_id: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|role| role.id().as_str() == role_id)
    }

    /// Looks up a top-level module by id.
    #[must_use]
    pub fn find_module(&self, module_id: &str) -> Option<&ModuleDefinition> {
        self.modules
            .iter()
            .find(|module| module.id().as_str() == module_id)
    }

    /// Returns the role name, or the id formatted for display when the role
    /// is not in the catalog.
    #[must_use]
    pub fn role_label(&self, role_id: &str) -> String {
        self.find_role(role_id)
            .map(|role| role.name().to_owned())
            .unwrap_or_else(|| display_label_for_id(role_id))
    }

    /// Returns the modules a role can open, in registry order. Unknown roles
    /// get nothing.
    #[must_use]
    pub fn available_modules(&self, role_id: &str) -> Vec<&ModuleDefinition> {
        self.find_role(role_id)
            .map(|role| self.available_modules_for(role))
            .unwrap_or_default()
    }

    /// Returns the modules the role definition can open, in registry order.
    #[must_use]
    pub fn available_modules_for(&self, role: &RoleDefinition) -> Vec<&ModuleDefinition> {
        let wildcard = role.has_wildcard();
        self.modules
            .iter()
            .filter(|module| wildcard || role.includes_module(module.id()))
            .collect()
    }

    /// Returns every permission declared by a module or sub-module.
    #[must_use]
    pub fn declared_permissions(&self) -> BTreeSet<Permission> {
        self.modules
            .iter()
            .flat_map(ModuleDefinition::all_permissions)
            .cloned()
            .collect()
    }

    /// Returns whether the role grants the permission, wildcard included.
    /// This is the same cell the permission matrix baseline shows; unknown
    /// roles are granted nothing.
    #[must_use]
    pub fn role_allows(&self, role_id: &str, permission: &Permission) -> bool {
        self.find_role(role_id)
            .is_some_and(|role| role.grants(permission))
    }

    /// Returns the reporting line of a role, if one is defined.
    #[must_use]
    pub fn reporting_line(&self, role_id: &str) -> Option<&ReportingLine> {
        self.reporting_lines
            .iter()
            .find(|line| line.role_id.as_str() == role_id)
    }

    /// Returns the reports a role may open. Wildcard roles see every report.
    #[must_use]
    pub fn available_reports(&self, role_id: &str) -> Vec<&ReportDefinition> {
        let wildcard = self.find_role(role_id).is_some_and(RoleDefinition::has_wildcard);
        self.reports
            .iter()
            .filter(|report| wildcard || report.is_accessible_to(role_id))
            .collect()
    }

    /// Collects non-fatal findings worth surfacing at startup.
    #[must_use]
    pub fn diagnostics(&self) -> CatalogDiagnostics {
        let declared = self.declared_permissions();
        let mut diagnostics = CatalogDiagnostics::default();

        for role in &self.roles {
            for grant in role.permissions() {
                if let PermissionGrant::Specific(permission) = grant
                    && !declared.contains(permission)
                {
                    diagnostics
                        .undeclared_permissions
                        .push(UndeclaredRolePermission {
                            role_id: role.id().clone(),
                            permission: permission.clone(),
                        });
                }
            }

            for reference in role.reports_to().iter().chain(role.can_manage()) {
                if self.find_role(reference.as_str()).is_none() {
                    diagnostics
                        .unresolved_role_references
                        .push(UnresolvedRoleReference {
                            role_id: role.id().clone(),
                            reference: reference.clone(),
                        });
                }
            }
        }

        diagnostics
    }
}

fn ensure_unique<'a>(seen: &mut HashSet<&'a str>, id: &'a str, kind: &str) -> AppResult<()> {
    if !seen.insert(id) {
        return Err(AppError::Validation(format!("duplicate {kind} id '{id}'")));
    }

    Ok(())
}

#[cfg(test)]
mod tests;
