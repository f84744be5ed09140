use std::collections::HashMap;

use async_trait::async_trait;
use ombaro_application::VendorApplicationRepository;
use ombaro_core::AppResult;
use ombaro_domain::{ApprovalHistoryRecord, UserId, VendorApplication, VendorApplicationStatus};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory vendor application repository for demo runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryVendorApplicationRepository {
    applications: RwLock<HashMap<Uuid, VendorApplication>>,
    history: RwLock<Vec<ApprovalHistoryRecord>>,
}

impl InMemoryVendorApplicationRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            applications: RwLock::new(HashMap::new()),
            history: RwLock::new(Vec::new()),
        }
    }
}

fn newest_first(mut applications: Vec<VendorApplication>) -> Vec<VendorApplication> {
    applications.sort_by(|left, right| right.created_at.cmp(&left.created_at));
    applications
}

#[async_trait]
impl VendorApplicationRepository for InMemoryVendorApplicationRepository {
    async fn create_application(
        &self,
        application: VendorApplication,
    ) -> AppResult<VendorApplication> {
        self.applications
            .write()
            .await
            .insert(application.id, application.clone());
        Ok(application)
    }

    async fn find_application(
        &self,
        application_id: Uuid,
    ) -> AppResult<Option<VendorApplication>> {
        Ok(self.applications.read().await.get(&application_id).cloned())
    }

    async fn list_applications(
        &self,
        statuses: Option<&[VendorApplicationStatus]>,
    ) -> AppResult<Vec<VendorApplication>> {
        let applications = self.applications.read().await;
        Ok(newest_first(
            applications
                .values()
                .filter(|application| {
                    statuses.is_none_or(|statuses| statuses.contains(&application.status))
                })
                .cloned()
                .collect(),
        ))
    }

    async fn list_applications_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<VendorApplication>> {
        let applications = self.applications.read().await;
        Ok(newest_first(
            applications
                .values()
                .filter(|application| application.user_id == user_id)
                .cloned()
                .collect(),
        ))
    }

    async fn update_application(
        &self,
        application: VendorApplication,
    ) -> AppResult<Option<VendorApplication>> {
        let mut applications = self.applications.write().await;
        Ok(applications.get_mut(&application.id).map(|stored| {
            *stored = application;
            stored.clone()
        }))
    }

    async fn append_history(&self, record: ApprovalHistoryRecord) -> AppResult<()> {
        self.history.write().await.push(record);
        Ok(())
    }

    async fn list_history(&self, application_id: Uuid) -> AppResult<Vec<ApprovalHistoryRecord>> {
        let history = self.history.read().await;

        let mut values: Vec<ApprovalHistoryRecord> = history
            .iter()
            .filter(|record| record.application_id == application_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        Ok(values)
    }
}
