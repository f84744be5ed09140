use std::fmt::{Display, Formatter};
use std::str::FromStr;

use ombaro_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Wildcard token granting every permission.
pub const WILDCARD_PERMISSION: &str = "*";

/// Validates a catalog identifier: lowercase ASCII, digits and underscores,
/// starting with a letter.
pub(crate) fn validate_slug(kind: &str, value: &str) -> AppResult<String> {
    let value = value.trim();
    let mut chars = value.chars();
    let starts_with_letter = chars.next().is_some_and(|first| first.is_ascii_lowercase());
    let rest_is_valid = chars.all(|character| {
        character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_'
    });

    if !starts_with_letter || !rest_is_valid {
        return Err(AppError::Validation(format!(
            "{kind} '{value}' must be lowercase snake_case"
        )));
    }

    Ok(value.to_owned())
}

/// Closed set of actions a permission can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    /// Read records.
    Read,
    /// Create records.
    Create,
    /// Update records.
    Update,
    /// Delete records.
    Delete,
    /// Export records.
    Export,
    /// Approve requests.
    Approve,
    /// Process payments or payroll.
    Process,
    /// Refund payments.
    Refund,
    /// General management.
    Manage,
    /// Place orders.
    Order,
    /// Respond to customers.
    Respond,
    /// Escalate tickets.
    Escalate,
    /// Resolve tickets.
    Resolve,
    /// Analyze feedback.
    Analyze,
    /// Evaluate performance.
    Evaluate,
    /// Produce reports.
    Report,
    /// Audit compliance.
    Audit,
    /// Conduct audits.
    Conduct,
    /// Configure the system.
    Configure,
    /// Back up the system.
    Backup,
    /// Generate reports.
    Generate,
    /// Provide advice.
    Provide,
}

impl PermissionAction {
    /// Returns the stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Export => "export",
            Self::Approve => "approve",
            Self::Process => "process",
            Self::Refund => "refund",
            Self::Manage => "manage",
            Self::Order => "order",
            Self::Respond => "respond",
            Self::Escalate => "escalate",
            Self::Resolve => "resolve",
            Self::Analyze => "analyze",
            Self::Evaluate => "evaluate",
            Self::Report => "report",
            Self::Audit => "audit",
            Self::Conduct => "conduct",
            Self::Configure => "configure",
            Self::Backup => "backup",
            Self::Generate => "generate",
            Self::Provide => "provide",
        }
    }
}

impl FromStr for PermissionAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "read" => Ok(Self::Read),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "export" => Ok(Self::Export),
            "approve" => Ok(Self::Approve),
            "process" => Ok(Self::Process),
            "refund" => Ok(Self::Refund),
            "manage" => Ok(Self::Manage),
            "order" => Ok(Self::Order),
            "respond" => Ok(Self::Respond),
            "escalate" => Ok(Self::Escalate),
            "resolve" => Ok(Self::Resolve),
            "analyze" => Ok(Self::Analyze),
            "evaluate" => Ok(Self::Evaluate),
            "report" => Ok(Self::Report),
            "audit" => Ok(Self::Audit),
            "conduct" => Ok(Self::Conduct),
            "configure" => Ok(Self::Configure),
            "backup" => Ok(Self::Backup),
            "generate" => Ok(Self::Generate),
            "provide" => Ok(Self::Provide),
            _ => Err(AppError::Validation(format!(
                "unknown permission action '{value}'"
            ))),
        }
    }
}

/// A `<resource>:<action>` permission such as `users:read`.
///
/// Permissions order by their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Permission {
    resource: String,
    action: PermissionAction,
}

impl Permission {
    /// Creates a permission from its parts.
    pub fn new(resource: &str, action: PermissionAction) -> AppResult<Self> {
        Ok(Self {
            resource: validate_slug("permission resource", resource)?,
            action,
        })
    }

    /// Parses a transport value such as `vendors:approve`.
    pub fn parse(value: &str) -> AppResult<Self> {
        let (resource, action) = value.trim().split_once(':').ok_or_else(|| {
            AppError::Validation(format!(
                "permission '{value}' must have the form '<resource>:<action>'"
            ))
        })?;

        Self::new(resource, PermissionAction::from_str(action)?)
    }

    /// Returns the resource part, which doubles as the display category.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.resource.as_str()
    }

    /// Returns the action part.
    #[must_use]
    pub fn action(&self) -> PermissionAction {
        self.action
    }

    /// Returns the display category of the permission.
    #[must_use]
    pub fn category(&self) -> &str {
        self.resource()
    }
}

impl Ord for Permission {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.resource
            .cmp(&other.resource)
            .then_with(|| self.action.as_str().cmp(other.action.as_str()))
    }
}

impl PartialOrd for Permission {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Permission {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}:{}", self.resource, self.action.as_str())
    }
}

impl FromStr for Permission {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Permission {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<Permission> for String {
    fn from(value: Permission) -> Self {
        value.to_string()
    }
}

/// A permission entry on a role: either everything or one permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PermissionGrant {
    /// The `*` wildcard.
    All,
    /// A single named permission.
    Specific(Permission),
}

impl PermissionGrant {
    /// Parses a grant, accepting `*` as the wildcard.
    pub fn parse(value: &str) -> AppResult<Self> {
        if value.trim() == WILDCARD_PERMISSION {
            return Ok(Self::All);
        }

        Permission::parse(value).map(Self::Specific)
    }

    /// Returns whether this grant covers the permission.
    #[must_use]
    pub fn covers(&self, permission: &Permission) -> bool {
        match self {
            Self::All => true,
            Self::Specific(granted) => granted == permission,
        }
    }
}

impl Display for PermissionGrant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => formatter.write_str(WILDCARD_PERMISSION),
            Self::Specific(permission) => permission.fmt(formatter),
        }
    }
}

impl TryFrom<String> for PermissionGrant {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value.as_str())
    }
}

impl From<PermissionGrant> for String {
    fn from(value: PermissionGrant) -> Self {
        value.to_string()
    }
}
