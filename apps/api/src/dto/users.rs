use ombaro_domain::UserProfile;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::common::format_timestamp;

/// API representation of a user profile. The password hash never leaves
/// the repository layer.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/user-profile-response.ts"
)]
pub struct UserProfileResponse {
    pub id: String,
    pub name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub status: String,
    pub mobile_verified: bool,
    pub profile_completed: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Single profile lookup payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/profile-response.ts"
)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: UserProfileResponse,
}

/// Filters accepted by the user list.
#[derive(Debug, Default, Deserialize)]
pub struct UserListQueryParams {
    pub role: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
}

/// Incoming payload for user creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    pub name: String,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub role: String,
    pub password: Option<String>,
}

/// Incoming payload for user updates. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/update-user-request.ts"
)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub profile_completed: Option<bool>,
}

/// Incoming payload for status changes.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/update-user-status-request.ts"
)]
pub struct UpdateUserStatusRequest {
    pub status: String,
}

impl From<UserProfile> for UserProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name.as_str().to_owned(),
            mobile: profile.mobile,
            email: profile.email.map(|email| email.as_str().to_owned()),
            role: profile.role.as_str().to_owned(),
            status: profile.status.as_str().to_owned(),
            mobile_verified: profile.mobile_verified,
            profile_completed: profile.profile_completed,
            created_at: format_timestamp(profile.created_at),
            updated_at: format_timestamp(profile.updated_at),
        }
    }
}

impl From<UpdateUserRequest> for ombaro_application::UpdateUserInput {
    fn from(request: UpdateUserRequest) -> Self {
        Self {
            name: request.name,
            mobile: request.mobile,
            email: request.email,
            role: request.role,
            profile_completed: request.profile_completed,
        }
    }
}

impl From<CreateUserRequest> for ombaro_application::CreateUserInput {
    fn from(request: CreateUserRequest) -> Self {
        Self {
            name: request.name,
            mobile: request.mobile,
            email: request.email,
            role: request.role,
            password: request.password,
        }
    }
}
