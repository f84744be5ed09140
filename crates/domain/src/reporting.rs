use std::str::FromStr;

use ombaro_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::permission::validate_slug;
use crate::role::RoleId;

/// Position of a role in the organization reporting hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingLine {
    /// Role this line describes.
    pub role_id: RoleId,
    /// Roles or units the role reports to.
    pub reports_to: Vec<RoleId>,
    /// Roles or units the role manages.
    pub manages: Vec<RoleId>,
    /// Report families the role may view.
    pub can_view_reports: Vec<String>,
    /// Request families the role may approve.
    pub can_approve: Vec<String>,
}

/// Business area a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    /// Finance and accounting.
    Financial,
    /// Day-to-day operations.
    Operational,
    /// Human resources.
    Hr,
    /// Marketing and customer analytics.
    Marketing,
    /// Legal and compliance.
    Legal,
    /// IT and infrastructure.
    System,
}

impl ReportCategory {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Financial => "financial",
            Self::Operational => "operational",
            Self::Hr => "hr",
            Self::Marketing => "marketing",
            Self::Legal => "legal",
            Self::System => "system",
        }
    }
}

impl FromStr for ReportCategory {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "financial" => Ok(Self::Financial),
            "operational" => Ok(Self::Operational),
            "hr" => Ok(Self::Hr),
            "marketing" => Ok(Self::Marketing),
            "legal" => Ok(Self::Legal),
            "system" => Ok(Self::System),
            _ => Err(AppError::Validation(format!(
                "unknown report category '{value}'"
            ))),
        }
    }
}

/// How often a report is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFrequency {
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every quarter.
    Quarterly,
    /// Every year.
    Yearly,
}

impl ReportFrequency {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

impl FromStr for ReportFrequency {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(AppError::Validation(format!(
                "unknown report frequency '{value}'"
            ))),
        }
    }
}

/// A report offered on the reporting dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    id: String,
    title: NonEmptyString,
    description: String,
    category: ReportCategory,
    frequency: ReportFrequency,
    generated_by: String,
    access_roles: Vec<RoleId>,
}

impl ReportDefinition {
    /// Creates a validated report definition.
    pub fn new(
        id: &str,
        title: impl Into<String>,
        description: impl Into<String>,
        category: ReportCategory,
        frequency: ReportFrequency,
        generated_by: impl Into<String>,
        access_roles: Vec<RoleId>,
    ) -> AppResult<Self> {
        Ok(Self {
            id: validate_slug("report id", id)?,
            title: NonEmptyString::new(title)?,
            description: description.into(),
            category,
            frequency,
            generated_by: generated_by.into(),
            access_roles,
        })
    }

    /// Returns the report id.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Returns the report title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Returns the business area.
    #[must_use]
    pub fn category(&self) -> ReportCategory {
        self.category
    }

    /// Returns the generation cadence.
    #[must_use]
    pub fn frequency(&self) -> ReportFrequency {
        self.frequency
    }

    /// Returns the producing unit.
    #[must_use]
    pub fn generated_by(&self) -> &str {
        self.generated_by.as_str()
    }

    /// Returns the roles allowed to open the report.
    #[must_use]
    pub fn access_roles(&self) -> &[RoleId] {
        &self.access_roles
    }

    /// Returns whether the role is on the access list.
    #[must_use]
    pub fn is_accessible_to(&self, role_id: &str) -> bool {
        self.access_roles.iter().any(|role| role.as_str() == role_id)
    }
}
