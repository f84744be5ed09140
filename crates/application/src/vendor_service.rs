//! Vendor onboarding applications and their review workflow.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use ombaro_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use ombaro_domain::{
    ApprovalAction, ApprovalHistoryRecord, BusinessAddress, EmailAddress, MobileNumber,
    PermissionAction, UserId, VendorApplication, VendorApplicationStatus,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{AccessService, subject_user_id};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Repository port for `vendor_applications` and `vendor_approval_history`.
#[async_trait]
pub trait VendorApplicationRepository: Send + Sync {
    /// Inserts an application.
    async fn create_application(
        &self,
        application: VendorApplication,
    ) -> AppResult<VendorApplication>;

    /// Finds an application by id.
    async fn find_application(&self, application_id: Uuid)
    -> AppResult<Option<VendorApplication>>;

    /// Lists applications, optionally restricted to some statuses, newest first.
    async fn list_applications(
        &self,
        statuses: Option<&[VendorApplicationStatus]>,
    ) -> AppResult<Vec<VendorApplication>>;

    /// Lists one applicant's applications, newest first.
    async fn list_applications_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<VendorApplication>>;

    /// Stores the review fields of an application. Returns `None` when it
    /// does not exist.
    async fn update_application(
        &self,
        application: VendorApplication,
    ) -> AppResult<Option<VendorApplication>>;

    /// Appends a review history record.
    async fn append_history(&self, record: ApprovalHistoryRecord) -> AppResult<()>;

    /// Lists the review history of an application, newest first.
    async fn list_history(&self, application_id: Uuid) -> AppResult<Vec<ApprovalHistoryRecord>>;
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Parameters for a new vendor application.
#[derive(Debug, Clone)]
pub struct SubmitVendorApplicationInput {
    /// Registered business name.
    pub business_name: String,
    /// Business category.
    pub business_type: String,
    /// Contact person.
    pub contact_person: String,
    /// Contact mobile number.
    pub contact_mobile: String,
    /// Contact email.
    pub contact_email: String,
    /// Business address.
    pub business_address: BusinessAddress,
    /// Free-form application data (documents, tax ids, bank details).
    pub application_data: Value,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for vendor onboarding.
#[derive(Clone)]
pub struct VendorService {
    repository: Arc<dyn VendorApplicationRepository>,
    access_service: AccessService,
}

impl VendorService {
    /// Creates a new vendor service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn VendorApplicationRepository>,
        access_service: AccessService,
    ) -> Self {
        Self {
            repository,
            access_service,
        }
    }

    /// Submits an application as the caller. New applications are pending.
    pub async fn submit_application(
        &self,
        actor: &UserIdentity,
        input: SubmitVendorApplicationInput,
    ) -> AppResult<VendorApplication> {
        let user_id = subject_user_id(actor)?;
        input.business_address.validate()?;
        let business_name = NonEmptyString::new(input.business_name)?;
        let contact_person = NonEmptyString::new(input.contact_person)?;
        let contact_mobile = MobileNumber::new(input.contact_mobile)?;
        let contact_email = EmailAddress::new(input.contact_email)?;

        let open = self.repository.list_applications_for_user(user_id).await?;
        if open
            .iter()
            .any(|application| application.status.awaits_review())
        {
            return Err(AppError::Conflict(
                "an application is already waiting for review".to_owned(),
            ));
        }

        let now = Utc::now();
        self.repository
            .create_application(VendorApplication {
                id: Uuid::new_v4(),
                user_id,
                business_name,
                business_type: input.business_type.trim().to_owned(),
                contact_person,
                contact_mobile,
                contact_email,
                business_address: input.business_address,
                application_data: input.application_data,
                status: VendorApplicationStatus::Pending,
                reviewed_by: None,
                reviewed_at: None,
                rejection_reason: None,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    /// Lists applications with the given status, or all of them.
    pub async fn list_applications(
        &self,
        actor: &UserIdentity,
        status: Option<VendorApplicationStatus>,
    ) -> AppResult<Vec<VendorApplication>> {
        self.access_service
            .require(actor, "vendors", PermissionAction::Read)?;
        match status {
            Some(status) => self.repository.list_applications(Some(&[status])).await,
            None => self.repository.list_applications(None).await,
        }
    }

    /// Lists the caller's own applications.
    pub async fn my_applications(&self, actor: &UserIdentity) -> AppResult<Vec<VendorApplication>> {
        let user_id = subject_user_id(actor)?;
        self.repository.list_applications_for_user(user_id).await
    }

    /// Lists applications waiting for a reviewer.
    pub async fn review_queue(&self, actor: &UserIdentity) -> AppResult<Vec<VendorApplication>> {
        self.access_service
            .require(actor, "vendors", PermissionAction::Read)?;
        self.repository
            .list_applications(Some(&[
                VendorApplicationStatus::Pending,
                VendorApplicationStatus::UnderReview,
            ]))
            .await
    }

    /// Returns an application to its applicant or to a vendor reviewer.
    pub async fn find_application(
        &self,
        actor: &UserIdentity,
        application_id: Uuid,
    ) -> AppResult<Option<VendorApplication>> {
        let Some(application) = self.repository.find_application(application_id).await? else {
            return Ok(None);
        };
        self.require_owner_or_reader(actor, &application)?;
        Ok(Some(application))
    }

    /// Approves an application.
    pub async fn approve(
        &self,
        actor: &UserIdentity,
        application_id: Uuid,
        comments: Option<String>,
    ) -> AppResult<VendorApplication> {
        let comments = comments.and_then(non_blank);
        self.review(actor, application_id, ApprovalAction::Approved, comments)
            .await
    }

    /// Rejects an application. A reason is required.
    pub async fn reject(
        &self,
        actor: &UserIdentity,
        application_id: Uuid,
        reason: &str,
    ) -> AppResult<VendorApplication> {
        let reason = NonEmptyString::new(reason)
            .map_err(|_| AppError::Validation("a rejection reason is required".to_owned()))?;
        self.review(
            actor,
            application_id,
            ApprovalAction::Rejected,
            Some(reason.into()),
        )
        .await
    }

    /// Sends an application back to the applicant for more information.
    pub async fn request_additional_info(
        &self,
        actor: &UserIdentity,
        application_id: Uuid,
        note: &str,
    ) -> AppResult<VendorApplication> {
        let note = NonEmptyString::new(note).map_err(|_| {
            AppError::Validation("a note describing the missing information is required".to_owned())
        })?;
        self.review(
            actor,
            application_id,
            ApprovalAction::InfoRequested,
            Some(note.into()),
        )
        .await
    }

    /// Lists the review history of an application, newest first.
    pub async fn approval_history(
        &self,
        actor: &UserIdentity,
        application_id: Uuid,
    ) -> AppResult<Vec<ApprovalHistoryRecord>> {
        let application = self.require_application(application_id).await?;
        self.require_owner_or_reader(actor, &application)?;
        self.repository.list_history(application_id).await
    }

    async fn review(
        &self,
        actor: &UserIdentity,
        application_id: Uuid,
        action: ApprovalAction,
        comments: Option<String>,
    ) -> AppResult<VendorApplication> {
        self.access_service
            .require(actor, "vendors", PermissionAction::Approve)?;
        let reviewer = subject_user_id(actor)?;

        let mut application = self.require_application(application_id).await?;
        if application.user_id == reviewer {
            return Err(AppError::Forbidden(
                "reviewers cannot act on their own vendor application".to_owned(),
            ));
        }
        application.status = application
            .status
            .transition_to(action.resulting_status())?;

        let now = Utc::now();
        application.reviewed_by = Some(reviewer);
        application.reviewed_at = Some(now);
        application.updated_at = now;
        application.rejection_reason = match action {
            ApprovalAction::Rejected => comments.clone(),
            ApprovalAction::Approved | ApprovalAction::InfoRequested => None,
        };

        let application = self
            .repository
            .update_application(application)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("vendor application '{application_id}' not found"))
            })?;

        self.repository
            .append_history(ApprovalHistoryRecord {
                id: Uuid::new_v4(),
                application_id,
                approved_by: reviewer,
                action,
                comments,
                created_at: now,
            })
            .await?;

        Ok(application)
    }

    async fn require_application(&self, application_id: Uuid) -> AppResult<VendorApplication> {
        self.repository
            .find_application(application_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("vendor application '{application_id}' not found"))
            })
    }

    fn require_owner_or_reader(
        &self,
        actor: &UserIdentity,
        application: &VendorApplication,
    ) -> AppResult<()> {
        if subject_user_id(actor).is_ok_and(|user_id| user_id == application.user_id) {
            return Ok(());
        }

        self.access_service
            .require(actor, "vendors", PermissionAction::Read)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[cfg(test)]
mod tests;
