use std::fmt::{Display, Formatter};

use ombaro_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::permission::{Permission, validate_slug};

/// Stable identifier of a feature module or sub-module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ModuleId(String);

impl ModuleId {
    /// Creates a validated module identifier.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        validate_slug("module id", value.as_ref()).map(Self)
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for ModuleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl TryFrom<String> for ModuleId {
    type Error = ombaro_core::AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ModuleId> for String {
    fn from(value: ModuleId) -> Self {
        value.0
    }
}

/// Second-level navigation entry inside a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubModuleDefinition {
    id: ModuleId,
    name: NonEmptyString,
    description: String,
    icon: String,
    permissions: Vec<Permission>,
}

impl SubModuleDefinition {
    /// Creates a sub-module definition.
    pub fn new(
        id: impl AsRef<str>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        permissions: Vec<Permission>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: ModuleId::new(id)?,
            name: NonEmptyString::new(name)?,
            description: description.into(),
            icon: icon.into(),
            permissions,
        })
    }

    /// Returns the sub-module id.
    #[must_use]
    pub fn id(&self) -> &ModuleId {
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

    /// Returns the presentation icon name.
    #[must_use]
    pub fn icon(&self) -> &str {
        self.icon.as_str()
    }

    /// Returns the permissions this sub-module declares.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }
}

/// Top-level feature module shown in the dashboard sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDefinition {
    id: ModuleId,
    name: NonEmptyString,
    description: String,
    icon: String,
    permissions: Vec<Permission>,
    sub_modules: Vec<SubModuleDefinition>,
}

impl ModuleDefinition {
    /// Creates a module definition.
    pub fn new(
        id: impl AsRef<str>,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
        permissions: Vec<Permission>,
        sub_modules: Vec<SubModuleDefinition>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: ModuleId::new(id)?,
            name: NonEmptyString::new(name)?,
            description: description.into(),
            icon: icon.into(),
            permissions,
            sub_modules,
        })
    }

    /// Returns the module id.
    #[must_use]
    pub fn id(&self) -> &ModuleId {
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

    /// Returns the presentation icon name.
    #[must_use]
    pub fn icon(&self) -> &str {
        self.icon.as_str()
    }

    /// Returns the module-level permissions.
    #[must_use]
    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }

    /// Returns the nested sub-modules.
    #[must_use]
    pub fn sub_modules(&self) -> &[SubModuleDefinition] {
        &self.sub_modules
    }

    /// Iterates over module-level and sub-module permissions.
    pub fn all_permissions(&self) -> impl Iterator<Item = &Permission> {
        self.permissions.iter().chain(
            self.sub_modules
                .iter()
                .flat_map(|sub_module| sub_module.permissions.iter()),
        )
    }

    /// Returns whether the module or one of its sub-modules declares the permission.
    #[must_use]
    pub fn declares(&self, permission: &Permission) -> bool {
        self.all_permissions().any(|declared| declared == permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn permission(value: &str) -> Permission {
        Permission::parse(value).unwrap_or_else(|error| panic!("{error}"))
    }

    #[test]
    fn module_id_rejects_spaces() {
        assert!(ModuleId::new("user management").is_err());
    }

    #[test]
    fn declares_covers_sub_module_permissions() {
        let accounting = SubModuleDefinition::new(
            "accounting",
            "Accounting",
            "Bookkeeping",
            "Calculator",
            vec![permission("accounts:read")],
        )
        .unwrap_or_else(|error| panic!("{error}"));
        let module = ModuleDefinition::new(
            "financial_management",
            "Financial Management",
            "",
            "DollarSign",
            vec![permission("finance:read")],
            vec![accounting],
        )
        .unwrap_or_else(|error| panic!("{error}"));

        assert!(module.declares(&permission("finance:read")));
        assert!(module.declares(&permission("accounts:read")));
        assert!(!module.declares(&permission("hr:read")));
        assert_eq!(module.all_permissions().count(), 2);
    }
}
