//! User profile ports and application service.
//!
//! Owns sign-in against `user_profiles` and the user management screens:
//! filtered listing, creation, updates, status changes and soft deletion.

use std::sync::Arc;

use async_trait::async_trait;

use ombaro_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use ombaro_domain::{
    EmailAddress, MobileNumber, PermissionAction, RoleId, UserId, UserProfile, UserStatus,
};

use crate::AccessService;

mod login;
mod management;

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Profile plus the stored password hash, used only for sign-in.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    /// Stored profile.
    pub profile: UserProfile,
    /// Argon2id password hash, or `None` when password sign-in is disabled.
    pub password_hash: Option<String>,
}

/// Filters for the user list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    /// Only users with this role.
    pub role: Option<RoleId>,
    /// Only users with this status.
    pub status: Option<UserStatus>,
    /// Case-insensitive match on name, email or mobile.
    pub search: Option<String>,
}

/// Row to insert into `user_profiles`.
#[derive(Debug, Clone)]
pub struct NewUserProfile {
    /// Full name.
    pub name: NonEmptyString,
    /// Mobile number or login code.
    pub mobile: Option<String>,
    /// Email address.
    pub email: Option<EmailAddress>,
    /// Catalog role id.
    pub role: RoleId,
    /// Initial status.
    pub status: UserStatus,
    /// Whether the mobile number is already verified.
    pub mobile_verified: bool,
    /// Whether onboarding is already complete.
    pub profile_completed: bool,
    /// Password hash for sign-in.
    pub password_hash: Option<String>,
}

/// Changes applied to an existing profile. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UserProfileChanges {
    /// New full name.
    pub name: Option<NonEmptyString>,
    /// New mobile number.
    pub mobile: Option<MobileNumber>,
    /// New email address.
    pub email: Option<EmailAddress>,
    /// New role.
    pub role: Option<RoleId>,
    /// New onboarding flag.
    pub profile_completed: Option<bool>,
}

/// Repository port for `user_profiles`.
#[async_trait]
pub trait UserProfileRepository: Send + Sync {
    /// Lists profiles matching the query, newest first.
    async fn list_profiles(&self, query: &UserListQuery) -> AppResult<Vec<UserProfile>>;

    /// Finds a profile by id.
    async fn find_profile(&self, user_id: UserId) -> AppResult<Option<UserProfile>>;

    /// Finds sign-in credentials by mobile number and role.
    async fn find_credentials_by_mobile(
        &self,
        mobile: &str,
        role: &RoleId,
    ) -> AppResult<Option<UserCredentials>>;

    /// Finds sign-in credentials by email (case-insensitive) and role.
    async fn find_credentials_by_email(
        &self,
        email: &str,
        role: &RoleId,
    ) -> AppResult<Option<UserCredentials>>;

    /// Inserts a profile. Duplicate emails are a conflict.
    async fn create_profile(&self, profile: NewUserProfile) -> AppResult<UserProfile>;

    /// Applies changes to a profile. Returns `None` when it does not exist.
    async fn update_profile(
        &self,
        user_id: UserId,
        changes: UserProfileChanges,
    ) -> AppResult<Option<UserProfile>>;

    /// Sets the account status. Returns `None` when the profile does not exist.
    async fn set_status(
        &self,
        user_id: UserId,
        status: UserStatus,
    ) -> AppResult<Option<UserProfile>>;
}

/// Port for password hashing operations. Keeps domain/application free of
/// direct cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password using Argon2id.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Authentication outcome
// ---------------------------------------------------------------------------

/// Result of a login attempt.
#[derive(Debug)]
pub enum LoginOutcome {
    /// Credentials matched an active account.
    Authenticated(UserProfile),
    /// Unknown user, wrong password or an account that may not sign in.
    Failed,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Parameters for creating a user from the management screen.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Full name.
    pub name: String,
    /// Mobile number, `^[6-9]\d{9}$`.
    pub mobile: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Catalog role id.
    pub role: String,
    /// Optional initial password.
    pub password: Option<String>,
}

/// Parameters for updating a user from the management screen.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserInput {
    /// New full name.
    pub name: Option<String>,
    /// New mobile number.
    pub mobile: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New catalog role id.
    pub role: Option<String>,
    /// New onboarding flag.
    pub profile_completed: Option<bool>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for sign-in and user management.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserProfileRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    access_service: AccessService,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn UserProfileRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        access_service: AccessService,
    ) -> Self {
        Self {
            repository,
            password_hasher,
            access_service,
        }
    }

    /// Returns a profile by id without permission checks.
    pub async fn find_profile(&self, user_id: UserId) -> AppResult<Option<UserProfile>> {
        self.repository.find_profile(user_id).await
    }

    /// Returns the current session user's profile.
    pub async fn current_profile(&self, actor: &UserIdentity) -> AppResult<Option<UserProfile>> {
        let user_id = crate::subject_user_id(actor)?;
        self.repository.find_profile(user_id).await
    }

    fn require(&self, actor: &UserIdentity, action: PermissionAction) -> AppResult<()> {
        self.access_service.require(actor, "users", action)
    }

    fn known_role(&self, role: &str) -> AppResult<RoleId> {
        let role_id = RoleId::new(role)?;
        if self.access_service.catalog().find_role(role_id.as_str()).is_none() {
            return Err(AppError::Validation(format!("unknown role '{role_id}'")));
        }

        Ok(role_id)
    }
}
