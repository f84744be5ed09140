use super::*;

impl PostgresUserProfileRepository {
    pub(super) async fn create_profile_impl(
        &self,
        profile: NewUserProfile,
    ) -> AppResult<UserProfile> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            r#"
            INSERT INTO user_profiles (
                id, name, mobile, email, role, status,
                mobile_verified, profile_completed, password_hash
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(UserId::new().as_uuid())
        .bind(profile.name.as_str())
        .bind(profile.mobile.as_deref())
        .bind(profile.email.as_ref().map(EmailAddress::as_str))
        .bind(profile.role.as_str())
        .bind(profile.status.as_str())
        .bind(profile.mobile_verified)
        .bind(profile.profile_completed)
        .bind(profile.password_hash.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| profile_conflict_or_internal(error, "create user profile"))?;

        UserProfile::try_from(row)
    }

    pub(super) async fn update_profile_impl(
        &self,
        user_id: UserId,
        changes: UserProfileChanges,
    ) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            r#"
            UPDATE user_profiles
            SET name = COALESCE($2, name),
                mobile = COALESCE($3, mobile),
                email = COALESCE($4, email),
                role = COALESCE($5, role),
                profile_completed = COALESCE($6, profile_completed),
                updated_at = now()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(changes.name.as_ref().map(NonEmptyString::as_str))
        .bind(changes.mobile.as_ref().map(|mobile| mobile.as_str()))
        .bind(changes.email.as_ref().map(EmailAddress::as_str))
        .bind(changes.role.as_ref().map(RoleId::as_str))
        .bind(changes.profile_completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| profile_conflict_or_internal(error, "update user profile"))?;

        row.map(UserProfile::try_from).transpose()
    }

    pub(super) async fn set_status_impl(
        &self,
        user_id: UserId,
        status: UserStatus,
    ) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            r#"
            UPDATE user_profiles
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to set user status: {error}")))?;

        row.map(UserProfile::try_from).transpose()
    }
}
