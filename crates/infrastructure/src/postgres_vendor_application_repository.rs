//! PostgreSQL-backed vendor application repository.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use ombaro_application::VendorApplicationRepository;
use ombaro_core::{AppError, AppResult, NonEmptyString};
use ombaro_domain::{
    ApprovalAction, ApprovalHistoryRecord, BusinessAddress, EmailAddress, MobileNumber, UserId,
    VendorApplication, VendorApplicationStatus,
};

/// PostgreSQL implementation of the vendor application repository port.
#[derive(Clone)]
pub struct PostgresVendorApplicationRepository {
    pool: PgPool,
}

impl PostgresVendorApplicationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VendorApplicationRow {
    id: Uuid,
    user_id: Uuid,
    business_name: String,
    business_type: String,
    contact_person: String,
    contact_mobile: String,
    contact_email: String,
    business_address: Json<BusinessAddress>,
    application_data: Value,
    status: String,
    reviewed_by: Option<Uuid>,
    reviewed_at: Option<chrono::DateTime<chrono::Utc>>,
    rejection_reason: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<VendorApplicationRow> for VendorApplication {
    type Error = AppError;

    fn try_from(row: VendorApplicationRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |error: AppError| {
            AppError::Internal(format!("stored vendor application '{id}' is invalid: {error}"))
        };

        Ok(Self {
            id,
            user_id: UserId::from_uuid(row.user_id),
            business_name: NonEmptyString::new(row.business_name).map_err(invalid)?,
            business_type: row.business_type,
            contact_person: NonEmptyString::new(row.contact_person).map_err(invalid)?,
            contact_mobile: MobileNumber::new(row.contact_mobile).map_err(invalid)?,
            contact_email: EmailAddress::new(row.contact_email).map_err(invalid)?,
            business_address: row.business_address.0,
            application_data: row.application_data,
            status: row
                .status
                .parse::<VendorApplicationStatus>()
                .map_err(invalid)?,
            reviewed_by: row.reviewed_by.map(UserId::from_uuid),
            reviewed_at: row.reviewed_at,
            rejection_reason: row.rejection_reason,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApprovalHistoryRow {
    id: Uuid,
    application_id: Uuid,
    approved_by: Uuid,
    action: String,
    comments: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<ApprovalHistoryRow> for ApprovalHistoryRecord {
    type Error = AppError;

    fn try_from(row: ApprovalHistoryRow) -> Result<Self, Self::Error> {
        let action = row.action.parse::<ApprovalAction>().map_err(|error| {
            AppError::Internal(format!(
                "stored approval history '{}' is invalid: {error}",
                row.id
            ))
        })?;

        Ok(Self {
            id: row.id,
            application_id: row.application_id,
            approved_by: UserId::from_uuid(row.approved_by),
            action,
            comments: row.comments,
            created_at: row.created_at,
        })
    }
}

const APPLICATION_COLUMNS: &str = "id, user_id, business_name, business_type, contact_person, \
     contact_mobile, contact_email, business_address, application_data, status, reviewed_by, \
     reviewed_at, rejection_reason, created_at, updated_at";

mod history;

#[async_trait]
impl VendorApplicationRepository for PostgresVendorApplicationRepository {
    async fn create_application(
        &self,
        application: VendorApplication,
    ) -> AppResult<VendorApplication> {
        let row = sqlx::query_as::<_, VendorApplicationRow>(&format!(
            r#"
            INSERT INTO vendor_applications (
                id, user_id, business_name, business_type, contact_person, contact_mobile,
                contact_email, business_address, application_data, status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application.id)
        .bind(application.user_id.as_uuid())
        .bind(application.business_name.as_str())
        .bind(application.business_type.as_str())
        .bind(application.contact_person.as_str())
        .bind(application.contact_mobile.as_str())
        .bind(application.contact_email.as_str())
        .bind(Json(&application.business_address))
        .bind(&application.application_data)
        .bind(application.status.as_str())
        .bind(application.created_at)
        .bind(application.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to create vendor application: {error}"))
        })?;

        VendorApplication::try_from(row)
    }

    async fn find_application(
        &self,
        application_id: Uuid,
    ) -> AppResult<Option<VendorApplication>> {
        let row = sqlx::query_as::<_, VendorApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM vendor_applications
            WHERE id = $1
            "#
        ))
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find vendor application: {error}"))
        })?;

        row.map(VendorApplication::try_from).transpose()
    }

    async fn list_applications(
        &self,
        statuses: Option<&[VendorApplicationStatus]>,
    ) -> AppResult<Vec<VendorApplication>> {
        let statuses: Option<Vec<String>> = statuses.map(|statuses| {
            statuses
                .iter()
                .map(|status| status.as_str().to_owned())
                .collect()
        });

        let rows = sqlx::query_as::<_, VendorApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM vendor_applications
            WHERE $1::TEXT[] IS NULL OR status = ANY($1)
            ORDER BY created_at DESC
            "#
        ))
        .bind(statuses)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list vendor applications: {error}"))
        })?;

        rows.into_iter().map(VendorApplication::try_from).collect()
    }

    async fn list_applications_for_user(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<VendorApplication>> {
        let rows = sqlx::query_as::<_, VendorApplicationRow>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM vendor_applications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list vendor applications: {error}"))
        })?;

        rows.into_iter().map(VendorApplication::try_from).collect()
    }

    async fn update_application(
        &self,
        application: VendorApplication,
    ) -> AppResult<Option<VendorApplication>> {
        let row = sqlx::query_as::<_, VendorApplicationRow>(&format!(
            r#"
            UPDATE vendor_applications
            SET status = $2,
                reviewed_by = $3,
                reviewed_at = $4,
                rejection_reason = $5,
                updated_at = $6
            WHERE id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(application.id)
        .bind(application.status.as_str())
        .bind(application.reviewed_by.map(|user_id| user_id.as_uuid()))
        .bind(application.reviewed_at)
        .bind(application.rejection_reason.as_deref())
        .bind(application.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update vendor application: {error}"))
        })?;

        row.map(VendorApplication::try_from).transpose()
    }

    async fn append_history(&self, record: ApprovalHistoryRecord) -> AppResult<()> {
        self.append_history_impl(record).await
    }

    async fn list_history(&self, application_id: Uuid) -> AppResult<Vec<ApprovalHistoryRecord>> {
        self.list_history_impl(application_id).await
    }
}
