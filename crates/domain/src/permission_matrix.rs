use std::collections::{BTreeMap, BTreeSet};

use ombaro_core::{AppError, AppResult};

use crate::catalog::AccessCatalog;
use crate::permission::Permission;
use crate::role::RoleId;

/// One role row of the matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrixRow {
    role_id: RoleId,
    role_name: String,
    granted: BTreeSet<Permission>,
}

impl PermissionMatrixRow {
    /// Returns the role id.
    #[must_use]
    pub fn role_id(&self) -> &RoleId {
        &self.role_id
    }

    /// Returns the role display name.
    #[must_use]
    pub fn role_name(&self) -> &str {
        self.role_name.as_str()
    }

    /// Returns the granted permissions of this row.
    #[must_use]
    pub fn granted(&self) -> &BTreeSet<Permission> {
        &self.granted
    }
}

/// Permissions sharing a display category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGroup {
    /// Category, the permission resource.
    pub category: String,
    /// Sorted permissions in the category.
    pub permissions: Vec<Permission>,
}

/// A cell that differs from the catalog baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrixChange {
    /// Row of the changed cell.
    pub role_id: RoleId,
    /// Column of the changed cell.
    pub permission: Permission,
    /// Current value of the cell.
    pub granted: bool,
}

/// Role by permission grid derived from an access catalog.
///
/// The baseline cell for a role and permission is set when the role lists the
/// permission or holds the wildcard. Toggles only affect this value and are
/// never written back to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    permissions: Vec<Permission>,
    rows: Vec<PermissionMatrixRow>,
    baseline: Vec<PermissionMatrixRow>,
}

impl PermissionMatrix {
    /// Builds the baseline matrix for every catalog role and declared permission.
    #[must_use]
    pub fn from_catalog(catalog: &AccessCatalog) -> Self {
        let permissions: Vec<Permission> = catalog.declared_permissions().into_iter().collect();
        let rows: Vec<PermissionMatrixRow> = catalog
            .roles()
            .iter()
            .map(|role| PermissionMatrixRow {
                role_id: role.id().clone(),
                role_name: role.name().to_owned(),
                granted: permissions
                    .iter()
                    .filter(|permission| role.grants(permission))
                    .cloned()
                    .collect(),
            })
            .collect();

        Self {
            permissions,
            baseline: rows.clone(),
            rows,
        }
    }

    /// Returns the sorted permission columns.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns the role rows in catalog order.
    #[must_use]
    pub fn rows(&self) -> &[PermissionMatrixRow] {
        &self.rows
    }

    /// Returns the cell value, or `None` when the role or permission is not
    /// part of the matrix.
    #[must_use]
    pub fn is_granted(&self, role_id: &str, permission: &Permission) -> Option<bool> {
        if !self.has_column(permission) {
            return None;
        }

        self.rows
            .iter()
            .find(|row| row.role_id.as_str() == role_id)
            .map(|row| row.granted.contains(permission))
    }

    /// Flips one cell and returns its new value.
    pub fn toggle(&mut self, role_id: &str, permission: &Permission) -> AppResult<bool> {
        if !self.has_column(permission) {
            return Err(AppError::Validation(format!(
                "permission '{permission}' is not declared by any module"
            )));
        }

        let row = self
            .rows
            .iter_mut()
            .find(|row| row.role_id.as_str() == role_id)
            .ok_or_else(|| AppError::Validation(format!("unknown role '{role_id}'")))?;

        if row.granted.remove(permission) {
            Ok(false)
        } else {
            row.granted.insert(permission.clone());
            Ok(true)
        }
    }

    /// Groups the permission columns by category.
    #[must_use]
    pub fn grouped_permissions(&self) -> Vec<PermissionGroup> {
        let mut groups: BTreeMap<&str, Vec<Permission>> = BTreeMap::new();
        for permission in &self.permissions {
            groups
                .entry(permission.category())
                .or_default()
                .push(permission.clone());
        }

        groups
            .into_iter()
            .map(|(category, permissions)| PermissionGroup {
                category: category.to_owned(),
                permissions,
            })
            .collect()
    }

    /// Lists cells that differ from the catalog baseline, row by row.
    #[must_use]
    pub fn changes(&self) -> Vec<PermissionMatrixChange> {
        self.rows
            .iter()
            .zip(&self.baseline)
            .flat_map(|(current, baseline)| {
                current
                    .granted
                    .symmetric_difference(&baseline.granted)
                    .map(|permission| PermissionMatrixChange {
                        role_id: current.role_id.clone(),
                        permission: permission.clone(),
                        granted: current.granted.contains(permission),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn has_column(&self, permission: &Permission) -> bool {
        self.permissions.binary_search(permission).is_ok()
    }
}
