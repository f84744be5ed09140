use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

use ombaro_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::module::ModuleId;
use crate::permission::{Permission, PermissionGrant, validate_slug};

/// Stable identifier of a role such as `hr_department`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoleId(String);

impl RoleId {
    /// Creates a validated role identifier.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        validate_slug("role id", value.as_ref()).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for RoleId {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoleId> for String {
    fn from(value: RoleId) -> Self {
        value.0
    }
}

/// Formats an identifier for display when no catalog name exists,
/// `hr_department` becomes `Hr Department`.
#[must_use]
pub fn display_label_for_id(id: &str) -> String {
    id.split('_')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Presentation-only attributes of a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePresentation {
    /// Icon name used by the frontend.
    pub icon: String,
    /// Hex color used by the frontend.
    pub color: String,
}

/// Parameters for building a role definition.
#[derive(Debug, Clone)]
pub struct RoleDefinitionInput {
    /// Unique role id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Module ids the role can open.
    pub modules: Vec<String>,
    /// Permission grants, `*` included.
    pub permissions: Vec<String>,
    /// Roles this role reports to.
    pub reports_to: Vec<String>,
    /// Roles or staff groups this role manages.
    pub can_manage: Vec<String>,
    /// Presentation attributes.
    pub presentation: RolePresentation,
}

/// A role in the access catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    id: RoleId,
    name: NonEmptyString,
    description: String,
    modules: BTreeSet<ModuleId>,
    permissions: BTreeSet<PermissionGrant>,
    reports_to: Vec<RoleId>,
    can_manage: Vec<RoleId>,
    presentation: RolePresentation,
}

impl RoleDefinition {
    /// Creates a validated role definition. Module references are checked
    /// against the module registry when the catalog is assembled.
    pub fn new(input: RoleDefinitionInput) -> AppResult<Self> {
        let id = RoleId::new(&input.id)?;
        let modules = input
            .modules
            .iter()
            .map(ModuleId::new)
            .collect::<AppResult<BTreeSet<_>>>()?;
        let permissions = input
            .permissions
            .iter()
            .map(|value| PermissionGrant::parse(value))
            .collect::<AppResult<BTreeSet<_>>>()
            .map_err(|error| {
                AppError::Validation(format!("role '{}' has an invalid permission: {error}", id))
            })?;
        let reports_to = input
            .reports_to
            .iter()
            .map(RoleId::new)
            .collect::<AppResult<Vec<_>>>()?;
        let can_manage = input
            .can_manage
            .iter()
            .map(RoleId::new)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            id,
            name: NonEmptyString::new(input.name)?,
            description: input.description,
            modules,
            permissions,
            reports_to,
            can_manage,
            presentation: input.presentation,
        })
    }

    /// Returns the role id.
    #[must_use]
    pub fn id(&self) -> &RoleId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the module ids the role can open.
    #[must_use]
    pub fn modules(&self) -> &BTreeSet<ModuleId> {
        &self.modules
    }

    /// Returns the declared permission grants.
    #[must_use]
    pub fn permissions(&self) -> &BTreeSet<PermissionGrant> {
        &self.permissions
    }

    /// Returns the roles this role reports to.
    #[must_use]
    pub fn reports_to(&self) -> &[RoleId] {
        &self.reports_to
    }

    /// Returns the roles or staff groups this role manages.
    #[must_use]
    pub fn can_manage(&self) -> &[RoleId] {
        &self.can_manage
    }

    /// Returns presentation attributes.
    #[must_use]
    pub fn presentation(&self) -> &RolePresentation {
        &self.presentation
    }

    /// Returns whether the role holds the `*` wildcard.
    #[must_use]
    pub fn has_wildcard(&self) -> bool {
        self.permissions.contains(&PermissionGrant::All)
    }

    /// Returns whether the role explicitly grants the permission, wildcard included.
    #[must_use]
    pub fn grants(&self, permission: &Permission) -> bool {
        self.permissions.iter().any(|grant| grant.covers(permission))
    }

    /// Returns whether the role lists the module.
    #[must_use]
    pub fn includes_module(&self, module_id: &ModuleId) -> bool {
        self.modules.contains(module_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str, modules: &[&str], permissions: &[&str]) -> RoleDefinitionInput {
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
                color: "#000000".to_owned(),
            },
        }
    }

    #[test]
    fn display_label_formats_snake_case() {
        assert_eq!(display_label_for_id("hr_department"), "Hr Department");
        assert_eq!(display_label_for_id("ca_cs"), "Ca Cs");
        assert_eq!(display_label_for_id(""), "");
    }

    #[test]
    fn wildcard_role_grants_any_permission() {
        let role = RoleDefinition::new(input("super_admin", &[], &["*"]))
            .unwrap_or_else(|error| panic!("{error}"));
        let permission = Permission::parse("payroll:process").unwrap_or_else(|_| panic!("perm"));

        assert!(role.has_wildcard());
        assert!(role.grants(&permission));
    }

    #[test]
    fn enumerated_role_grants_only_listed_permissions() {
        let role = RoleDefinition::new(input(
            "accounts_department",
            &["financial_management"],
            &["accounts:read", "invoices:create"],
        ))
        .unwrap_or_else(|error| panic!("{error}"));

        let listed = Permission::parse("accounts:read").unwrap_or_else(|_| panic!("perm"));
        let missing = Permission::parse("accounts:update").unwrap_or_else(|_| panic!("perm"));
        assert!(!role.has_wildcard());
        assert!(role.grants(&listed));
        assert!(!role.grants(&missing));
    }

    #[test]
    fn malformed_permission_names_the_role() {
        let result = RoleDefinition::new(input("it_department", &[], &["system"]));
        let message = result.err().map(|error| error.to_string()).unwrap_or_default();
        assert!(message.contains("it_department"));
    }
}
