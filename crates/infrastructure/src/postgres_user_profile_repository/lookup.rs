use super::*;

impl PostgresUserProfileRepository {
    pub(super) async fn list_profiles_impl(
        &self,
        query: &UserListQuery,
    ) -> AppResult<Vec<UserProfile>> {
        let search = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|search| !search.is_empty())
            .map(str::to_lowercase);

        let rows = sqlx::query_as::<_, UserProfileRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM user_profiles
            WHERE ($1::TEXT IS NULL OR role = $1)
              AND ($2::TEXT IS NULL OR status = $2)
              AND (
                $3::TEXT IS NULL
                OR strpos(LOWER(name), $3) > 0
                OR strpos(LOWER(email), $3) > 0
                OR strpos(mobile, $3) > 0
              )
            ORDER BY created_at DESC
            "#
        ))
        .bind(query.role.as_ref().map(RoleId::as_str))
        .bind(query.status.map(|status| status.as_str()))
        .bind(search)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list user profiles: {error}")))?;

        rows.into_iter().map(UserProfile::try_from).collect()
    }

    pub(super) async fn find_profile_impl(
        &self,
        user_id: UserId,
    ) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, UserProfileRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM user_profiles
            WHERE id = $1
            "#
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user profile: {error}")))?;

        row.map(UserProfile::try_from).transpose()
    }

    /// `predicate` is one of the fixed login lookups; `$1` is the username.
    pub(super) async fn find_credentials_impl(
        &self,
        predicate: &'static str,
        username: &str,
        role: &RoleId,
    ) -> AppResult<Option<UserCredentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}, password_hash
            FROM user_profiles
            WHERE {predicate} AND role = $2
            ORDER BY created_at
            LIMIT 1
            "#
        ))
        .bind(username)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user credentials: {error}")))?;

        row.map(UserCredentials::try_from).transpose()
    }
}
