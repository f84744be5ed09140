use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::users::UserProfileResponse;

/// Incoming payload for the role-scoped login form.
#[derive(Debug, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/login-request.ts"
)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    pub user_type: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/login-response.ts"
)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserProfileResponse,
}

/// Profile of the session user, `null` when signed out.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../packages/api-types/src/generated/current-user-response.ts"
)]
pub struct CurrentUserResponse {
    pub success: bool,
    pub user: Option<UserProfileResponse>,
}
