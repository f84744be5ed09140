//! Vendor onboarding applications and their review trail.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use ombaro_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::user::{EmailAddress, MobileNumber, UserId};

/// Review status of a vendor application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorApplicationStatus {
    /// Submitted and waiting for review.
    Pending,
    /// A reviewer picked it up.
    UnderReview,
    /// Accepted. Terminal.
    Approved,
    /// Declined. Terminal.
    Rejected,
    /// Sent back to the applicant for more details.
    AdditionalInfoRequired,
}

impl VendorApplicationStatus {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::AdditionalInfoRequired => "additional_info_required",
        }
    }

    /// Returns whether no further review action is allowed.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// Returns whether the application belongs in the review queue.
    #[must_use]
    pub fn awaits_review(&self) -> bool {
        matches!(self, Self::Pending | Self::UnderReview)
    }

    /// Validates a review transition to `next`.
    pub fn transition_to(self, next: Self) -> AppResult<Self> {
        if self.is_terminal() {
            return Err(AppError::Conflict(format!(
                "vendor application is already {} and cannot become {}",
                self.as_str(),
                next.as_str()
            )));
        }

        Ok(next)
    }
}

impl FromStr for VendorApplicationStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "additional_info_required" => Ok(Self::AdditionalInfoRequired),
            _ => Err(AppError::Validation(format!(
                "unknown vendor application status '{value}'"
            ))),
        }
    }
}

/// Postal address of a vendor business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessAddress {
    /// First address line.
    pub line1: String,
    /// Second address line.
    #[serde(default)]
    pub line2: Option<String>,
    /// City.
    pub city: String,
    /// State.
    pub state: String,
    /// Six-digit postal code.
    pub pincode: String,
}

impl BusinessAddress {
    /// Checks required address parts.
    pub fn validate(&self) -> AppResult<()> {
        for (label, value) in [
            ("address line 1", &self.line1),
            ("city", &self.city),
            ("state", &self.state),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{label} must not be empty")));
            }
        }

        let pincode = self.pincode.trim();
        if pincode.len() != 6 || !pincode.chars().all(|digit| digit.is_ascii_digit()) {
            return Err(AppError::Validation(format!(
                "pincode '{pincode}' must be 6 digits"
            )));
        }

        Ok(())
    }
}

/// A vendor onboarding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorApplication {
    /// Application id.
    pub id: Uuid,
    /// Applicant user.
    pub user_id: UserId,
    /// Registered business name.
    pub business_name: NonEmptyString,
    /// Business kind such as `spa` or `salon`.
    pub business_type: String,
    /// Contact person.
    pub contact_person: NonEmptyString,
    /// Contact mobile.
    pub contact_mobile: MobileNumber,
    /// Contact email.
    pub contact_email: EmailAddress,
    /// Business address.
    pub business_address: BusinessAddress,
    /// Free-form application details such as GST and PAN numbers.
    pub application_data: Value,
    /// Review status.
    pub status: VendorApplicationStatus,
    /// Last reviewer.
    pub reviewed_by: Option<UserId>,
    /// Last review time.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// Rejection reason or information request note.
    pub rejection_reason: Option<String>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Action recorded in the approval history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalAction {
    /// Application approved.
    Approved,
    /// Application rejected.
    Rejected,
    /// Applicant asked for more information.
    InfoRequested,
}

impl ApprovalAction {
    /// Returns the stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::InfoRequested => "info_requested",
        }
    }

    /// Returns the application status this action leads to.
    #[must_use]
    pub fn resulting_status(&self) -> VendorApplicationStatus {
        match self {
            Self::Approved => VendorApplicationStatus::Approved,
            Self::Rejected => VendorApplicationStatus::Rejected,
            Self::InfoRequested => VendorApplicationStatus::AdditionalInfoRequired,
        }
    }
}

impl FromStr for ApprovalAction {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "info_requested" => Ok(Self::InfoRequested),
            _ => Err(AppError::Validation(format!(
                "unknown approval action '{value}'"
            ))),
        }
    }
}

/// One review decision on a vendor application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalHistoryRecord {
    /// Record id.
    pub id: Uuid,
    /// Reviewed application.
    pub application_id: Uuid,
    /// Reviewer.
    pub approved_by: UserId,
    /// Decision.
    pub action: ApprovalAction,
    /// Reviewer comments.
    pub comments: Option<String>,
    /// Decision time.
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_statuses_reject_transitions() {
        assert!(
            VendorApplicationStatus::Approved
                .transition_to(VendorApplicationStatus::Rejected)
                .is_err()
        );
        assert!(matches!(
            VendorApplicationStatus::Rejected.transition_to(VendorApplicationStatus::Approved),
            Err(AppError::Conflict(_))
        ));
        assert_eq!(
            VendorApplicationStatus::AdditionalInfoRequired
                .transition_to(VendorApplicationStatus::Approved)
                .ok(),
            Some(VendorApplicationStatus::Approved)
        );
    }

    #[test]
    fn review_queue_holds_pending_and_under_review() {
        assert!(VendorApplicationStatus::Pending.awaits_review());
        assert!(VendorApplicationStatus::UnderReview.awaits_review());
        assert!(!VendorApplicationStatus::AdditionalInfoRequired.awaits_review());
    }

    #[test]
    fn address_requires_six_digit_pincode() {
        let mut address = BusinessAddress {
            line1: "12 MG Road".to_owned(),
            line2: None,
            city: "Bengaluru".to_owned(),
            state: "Karnataka".to_owned(),
            pincode: "560001".to_owned(),
        };
        assert!(address.validate().is_ok());

        address.pincode = "5600".to_owned();
        assert!(address.validate().is_err());

        address.pincode = "560001".to_owned();
        address.city = "  ".to_owned();
        assert!(address.validate().is_err());
    }

    #[test]
    fn info_request_leads_to_additional_info_required() {
        assert_eq!(
            ApprovalAction::InfoRequested.resulting_status(),
            VendorApplicationStatus::AdditionalInfoRequired
        );
    }
}
