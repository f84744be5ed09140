//! PostgreSQL-backed user profile repository.

use async_trait::async_trait;
use sqlx::PgPool;

use ombaro_application::{
    NewUserProfile, UserCredentials, UserListQuery, UserProfileChanges, UserProfileRepository,
};
use ombaro_core::{AppError, AppResult, NonEmptyString};
use ombaro_domain::{EmailAddress, RoleId, UserId, UserProfile, UserStatus};

/// PostgreSQL implementation of the user profile repository port.
#[derive(Clone)]
pub struct PostgresUserProfileRepository {
    pool: PgPool,
}

impl PostgresUserProfileRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserProfileRow {
    id: uuid::Uuid,
    name: String,
    mobile: Option<String>,
    email: Option<String>,
    role: String,
    status: String,
    mobile_verified: bool,
    profile_completed: bool,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CredentialsRow {
    #[sqlx(flatten)]
    profile: UserProfileRow,
    password_hash: Option<String>,
}

impl TryFrom<UserProfileRow> for UserProfile {
    type Error = AppError;

    fn try_from(row: UserProfileRow) -> Result<Self, Self::Error> {
        let invalid = |error: AppError| {
            AppError::Internal(format!("stored user profile '{}' is invalid: {error}", row.id))
        };

        Ok(Self {
            id: UserId::from_uuid(row.id),
            name: NonEmptyString::new(row.name.as_str()).map_err(invalid)?,
            mobile: row.mobile.clone(),
            email: row
                .email
                .as_deref()
                .map(EmailAddress::new)
                .transpose()
                .map_err(invalid)?,
            role: RoleId::new(row.role.as_str()).map_err(invalid)?,
            status: row.status.parse::<UserStatus>().map_err(invalid)?,
            mobile_verified: row.mobile_verified,
            profile_completed: row.profile_completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl TryFrom<CredentialsRow> for UserCredentials {
    type Error = AppError;

    fn try_from(row: CredentialsRow) -> Result<Self, Self::Error> {
        Ok(Self {
            profile: UserProfile::try_from(row.profile)?,
            password_hash: row.password_hash,
        })
    }
}

const PROFILE_COLUMNS: &str = "id, name, mobile, email, role, status, mobile_verified, \
     profile_completed, created_at, updated_at";

mod account;
mod lookup;

#[async_trait]
impl UserProfileRepository for PostgresUserProfileRepository {
    async fn list_profiles(&self, query: &UserListQuery) -> AppResult<Vec<UserProfile>> {
        self.list_profiles_impl(query).await
    }

    async fn find_profile(&self, user_id: UserId) -> AppResult<Option<UserProfile>> {
        self.find_profile_impl(user_id).await
    }

    async fn find_credentials_by_mobile(
        &self,
        mobile: &str,
        role: &RoleId,
    ) -> AppResult<Option<UserCredentials>> {
        self.find_credentials_impl("mobile = $1", mobile, role)
            .await
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
        role: &RoleId,
    ) -> AppResult<Option<UserCredentials>> {
        let email = email.trim().to_lowercase();
        self.find_credentials_impl("LOWER(email) = $1", email.as_str(), role)
            .await
    }

    async fn create_profile(&self, profile: NewUserProfile) -> AppResult<UserProfile> {
        self.create_profile_impl(profile).await
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: UserProfileChanges,
    ) -> AppResult<Option<UserProfile>> {
        self.update_profile_impl(user_id, changes).await
    }

    async fn set_status(
        &self,
        user_id: UserId,
        status: UserStatus,
    ) -> AppResult<Option<UserProfile>> {
        self.set_status_impl(user_id, status).await
    }
}

fn profile_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        let message = if database_error.constraint() == Some("user_profiles_role_mobile_key") {
            "a user with this mobile number already exists for the role"
        } else {
            "a user with this email already exists"
        };
        return AppError::Conflict(message.to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
