use std::sync::Arc;

use async_trait::async_trait;
use ombaro_core::{AppError, AppResult};
use ombaro_domain::{
    ApprovalAction, ApprovalHistoryRecord, BusinessAddress, UserId, VendorApplication,
    VendorApplicationStatus,
};
use serde_json::json;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::AccessService;
use crate::test_support::{fixture_catalog, identity};

use super::{SubmitVendorApplicationInput, VendorApplicationRepository, VendorService};

#[derive(Default)]
struct FakeVendorApplicationRepository {
    applications: Mutex<Vec<VendorApplication>>,
    history: Mutex<Vec<ApprovalHistoryRecord>>,
}

#[async_trait]
impl VendorApplicationRepository for FakeVendorApplicationRepository {
    async fn create_application(
        &self,
        application: VendorApplication,
    ) -> AppResult<VendorApplication> {
        self.applications.lock().await.push(application.clone());
        Ok(application)
    }

    async fn find_application(
        &self,
        application_id: Uuid,
    ) -> AppResult<Option<VendorApplication>> {
        Ok(self
            .applications
            .lock()
            .await
            .iter()
            .find(|application| application.id == application_id)
            .cloned())
    }

    async fn list_applications(
        &self,
        statuses: Option<&[VendorApplicationStatus]>,
    ) -> AppResult<Vec<VendorApplication>> {
        Ok(self
            .applications
            .lock()
            .await
            .iter()
            .rev()
            .filter(|application| {
                statuses.is_none_or(|statuses| statuses.contains(&application.status))
            })
            .cloned()
            .collect())
    }

    async fn list_applications_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<VendorApplication>> {
        Ok(self
            .applications
            .lock()
            .await
            .iter()
            .rev()
            .filter(|application| application.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_application(
        &self,
        application: VendorApplication,
    ) -> AppResult<Option<VendorApplication>> {
        let mut applications = self.applications.lock().await;
        Ok(applications
            .iter_mut()
            .find(|stored| stored.id == application.id)
            .map(|stored| {
                *stored = application;
                stored.clone()
            }))
    }

    async fn append_history(&self, record: ApprovalHistoryRecord) -> AppResult<()> {
        self.history.lock().await.push(record);
        Ok(())
    }

    async fn list_history(&self, application_id: Uuid) -> AppResult<Vec<ApprovalHistoryRecord>> {
        Ok(self
            .history
            .lock()
            .await
            .iter()
            .rev()
            .filter(|record| record.application_id == application_id)
            .cloned()
            .collect())
    }
}

fn service() -> VendorService {
    VendorService::new(
        Arc::new(FakeVendorApplicationRepository::default()),
        AccessService::new(fixture_catalog()),
    )
}

fn input(business_name: &str) -> SubmitVendorApplicationInput {
    SubmitVendorApplicationInput {
        business_name: business_name.to_owned(),
        business_type: "spa_products".to_owned(),
        contact_person: "Meera Iyer".to_owned(),
        contact_mobile: "9876543210".to_owned(),
        contact_email: "Meera@Example.com".to_owned(),
        business_address: BusinessAddress {
            line1: "12 MG Road".to_owned(),
            line2: None,
            city: "Bengaluru".to_owned(),
            state: "Karnataka".to_owned(),
            pincode: "560001".to_owned(),
        },
        application_data: json!({"gst_number": "29ABCDE1234F1Z5"}),
    }
}

async fn submitted(service: &VendorService, applicant: UserId) -> VendorApplication {
    service
        .submit_application(&identity(applicant, "customer"), input("Lotus Supplies"))
        .await
        .unwrap_or_else(|error| panic!("{error}"))
}

#[tokio::test]
async fn submitted_application_is_pending_and_visible_to_applicant() {
    let service = service();
    let applicant = UserId::new();
    let application = submitted(&service, applicant).await;

    assert_eq!(application.status, VendorApplicationStatus::Pending);
    assert_eq!(application.contact_email.as_str(), "meera@example.com");

    let mine = service
        .my_applications(&identity(applicant, "customer"))
        .await
        .unwrap_or_default();
    assert_eq!(mine.len(), 1);

    let duplicate = service
        .submit_application(&identity(applicant, "customer"), input("Lotus Again"))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
}

#[tokio::test]
async fn submission_validates_contact_details() {
    let service = service();
    let actor = identity(UserId::new(), "customer");

    let mut bad_mobile = input("Lotus Supplies");
    bad_mobile.contact_mobile = "1234".to_owned();
    assert!(matches!(
        service.submit_application(&actor, bad_mobile).await,
        Err(AppError::Validation(_))
    ));

    let mut bad_pincode = input("Lotus Supplies");
    bad_pincode.business_address.pincode = "56".to_owned();
    assert!(matches!(
        service.submit_application(&actor, bad_pincode).await,
        Err(AppError::Validation(_))
    ));
}

#[tokio::test]
async fn review_queue_requires_vendor_read() {
    let service = service();
    submitted(&service, UserId::new()).await;

    let denied = service
        .review_queue(&identity(UserId::new(), "customer"))
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let queue = service
        .review_queue(&identity(UserId::new(), "admin"))
        .await
        .unwrap_or_default();
    assert_eq!(queue.len(), 1);
}

#[tokio::test]
async fn approval_is_terminal_and_recorded() {
    let service = service();
    let application = submitted(&service, UserId::new()).await;
    let reviewer_id = UserId::new();
    let reviewer = identity(reviewer_id, "admin");

    let approved = service
        .approve(&reviewer, application.id, Some("  documents verified ".to_owned()))
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(approved.status, VendorApplicationStatus::Approved);
    assert_eq!(approved.reviewed_by, Some(reviewer_id));

    let reject_after_approval = service
        .reject(&reviewer, application.id, "changed our mind")
        .await;
    assert!(matches!(reject_after_approval, Err(AppError::Conflict(_))));

    let history = service
        .approval_history(&reviewer, application.id)
        .await
        .unwrap_or_default();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, ApprovalAction::Approved);
    assert_eq!(history[0].comments.as_deref(), Some("documents verified"));
}

#[tokio::test]
async fn rejection_requires_a_reason() {
    let service = service();
    let application = submitted(&service, UserId::new()).await;
    let reviewer = identity(UserId::new(), "super_admin");

    let missing = service.reject(&reviewer, application.id, "   ").await;
    assert!(matches!(missing, Err(AppError::Validation(_))));

    let rejected = service
        .reject(&reviewer, application.id, "incomplete documents")
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(rejected.status, VendorApplicationStatus::Rejected);
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("incomplete documents")
    );
}

#[tokio::test]
async fn info_request_keeps_application_open() {
    let service = service();
    let applicant = UserId::new();
    let application = submitted(&service, applicant).await;
    let reviewer = identity(UserId::new(), "admin");

    let updated = service
        .request_additional_info(&reviewer, application.id, "upload GST certificate")
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(
        updated.status,
        VendorApplicationStatus::AdditionalInfoRequired
    );

    service
        .approve(&reviewer, application.id, None)
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    let history = service
        .approval_history(&identity(applicant, "customer"), application.id)
        .await
        .unwrap_or_default();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].action, ApprovalAction::Approved);
}

#[tokio::test]
async fn reviewing_requires_approve_permission() {
    let service = service();
    let application = submitted(&service, UserId::new()).await;

    let denied = service
        .approve(&identity(UserId::new(), "hr_department"), application.id, None)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden(_))));

    let missing = service
        .approve(&identity(UserId::new(), "admin"), Uuid::new_v4(), None)
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn reviewers_cannot_decide_their_own_application() {
    let service = service();
    let applicant = UserId::new();
    let application = submitted(&service, applicant).await;
    let own_reviewer = identity(applicant, "super_admin");

    let approve = service.approve(&own_reviewer, application.id, None).await;
    assert!(matches!(approve, Err(AppError::Forbidden(_))));
    let reject = service
        .reject(&own_reviewer, application.id, "not eligible")
        .await;
    assert!(matches!(reject, Err(AppError::Forbidden(_))));
    let info = service
        .request_additional_info(&own_reviewer, application.id, "more details")
        .await;
    assert!(matches!(info, Err(AppError::Forbidden(_))));

    let history = service
        .approval_history(&own_reviewer, application.id)
        .await
        .unwrap_or_default();
    assert!(history.is_empty());

    let pending = service
        .find_application(&own_reviewer, application.id)
        .await
        .unwrap_or_else(|error| panic!("{error}"))
        .unwrap_or_else(|| panic!("application not found"));
    assert_eq!(pending.status, VendorApplicationStatus::Pending);
}

#[tokio::test]
async fn strangers_cannot_read_other_applications() {
    let service = service();
    let application = submitted(&service, UserId::new()).await;

    let stranger = service
        .find_application(&identity(UserId::new(), "customer"), application.id)
        .await;
    assert!(matches!(stranger, Err(AppError::Forbidden(_))));

    let by_status = service
        .list_applications(
            &identity(UserId::new(), "admin"),
            Some(VendorApplicationStatus::Approved),
        )
        .await
        .unwrap_or_default();
    assert!(by_status.is_empty());
}
