//! Role-based access: navigation, server-side permission checks, the
//! permission matrix preview and report visibility.

use std::sync::Arc;

use ombaro_core::{AppError, AppResult, UserIdentity};
use ombaro_domain::{
    AccessCatalog, ModuleDefinition, Permission, PermissionAction, PermissionMatrix,
    ReportDefinition, ReportingLine, RoleDefinition, UserId,
};

/// A single cell flip requested on the permission matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionToggle {
    /// Role row.
    pub role_id: String,
    /// Permission column, `<resource>:<action>`.
    pub permission: String,
}

/// Catalog view of one role with its place in the hierarchy.
#[derive(Debug, Clone)]
pub struct RoleOverview {
    /// Role definition.
    pub role: RoleDefinition,
    /// Reporting line, when the hierarchy defines one.
    pub reporting_line: Option<ReportingLine>,
    /// Modules the role can open.
    pub modules: Vec<ModuleDefinition>,
}

/// Parses the session subject into a user profile id.
pub fn subject_user_id(actor: &UserIdentity) -> AppResult<UserId> {
    UserId::parse(actor.subject())
        .map_err(|_| AppError::Unauthorized("session subject is not a user id".to_owned()))
}

/// Application service answering access questions against the catalog.
#[derive(Clone)]
pub struct AccessService {
    catalog: Arc<AccessCatalog>,
}

impl AccessService {
    /// Creates a new access service over a loaded catalog.
    #[must_use]
    pub fn new(catalog: Arc<AccessCatalog>) -> Self {
        Self { catalog }
    }

    /// Returns the loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &AccessCatalog {
        &self.catalog
    }

    /// Returns all catalog roles.
    #[must_use]
    pub fn roles(&self) -> Vec<RoleDefinition> {
        self.catalog.roles().to_vec()
    }

    /// Returns the modules the role can open, in registry order.
    #[must_use]
    pub fn navigation_for(&self, role_id: &str) -> Vec<ModuleDefinition> {
        self.catalog
            .available_modules(role_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Returns the role with its reporting line and modules.
    #[must_use]
    pub fn role_overview(&self, role_id: &str) -> Option<RoleOverview> {
        let role = self.catalog.find_role(role_id)?;
        Some(RoleOverview {
            role: role.clone(),
            reporting_line: self.catalog.reporting_line(role_id).cloned(),
            modules: self.navigation_for(role_id),
        })
    }

    /// Returns whether the actor's role allows the permission.
    #[must_use]
    pub fn has_permission(&self, actor: &UserIdentity, permission: &Permission) -> bool {
        self.catalog.role_allows(actor.role(), permission)
    }

    /// Ensures the actor's role allows the permission.
    pub fn require_permission(
        &self,
        actor: &UserIdentity,
        permission: &Permission,
    ) -> AppResult<()> {
        if self.has_permission(actor, permission) {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "role '{}' is missing permission '{permission}'",
            actor.role()
        )))
    }

    /// Ensures the actor's role allows `<resource>:<action>`.
    pub fn require(
        &self,
        actor: &UserIdentity,
        resource: &str,
        action: PermissionAction,
    ) -> AppResult<()> {
        self.require_permission(actor, &Permission::new(resource, action)?)
    }

    /// Returns whether the actor's role allows `<resource>:<action>`.
    pub fn allows(
        &self,
        actor: &UserIdentity,
        resource: &str,
        action: PermissionAction,
    ) -> AppResult<bool> {
        Ok(self.has_permission(actor, &Permission::new(resource, action)?))
    }

    /// Returns the baseline permission matrix.
    pub fn permission_matrix(&self, actor: &UserIdentity) -> AppResult<PermissionMatrix> {
        self.require(actor, "roles", PermissionAction::Read)?;
        Ok(PermissionMatrix::from_catalog(&self.catalog))
    }

    /// Applies toggles to a fresh baseline matrix without persisting them.
    pub fn preview_permission_matrix(
        &self,
        actor: &UserIdentity,
        toggles: &[PermissionToggle],
    ) -> AppResult<PermissionMatrix> {
        self.require(actor, "roles", PermissionAction::Update)?;

        let mut matrix = PermissionMatrix::from_catalog(&self.catalog);
        for toggle in toggles {
            let permission = Permission::parse(&toggle.permission)?;
            matrix.toggle(&toggle.role_id, &permission)?;
        }

        Ok(matrix)
    }

    /// Returns the reports the actor's role may open.
    #[must_use]
    pub fn available_reports(&self, actor: &UserIdentity) -> Vec<ReportDefinition> {
        self.catalog
            .available_reports(actor.role())
            .into_iter()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests;
