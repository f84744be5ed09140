use super::*;

impl UserService {
    /// Authenticates a user for the role they picked on the login screen.
    ///
    /// `username` is matched against the mobile number first and the email
    /// second, both scoped to `user_type`. Every failure is reported as
    /// [`LoginOutcome::Failed`].
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        user_type: &str,
    ) -> AppResult<LoginOutcome> {
        let username = username.trim();
        let Ok(role) = RoleId::new(user_type) else {
            return Ok(LoginOutcome::Failed);
        };

        let mut credentials = self
            .repository
            .find_credentials_by_mobile(username, &role)
            .await?;
        if credentials.is_none() {
            credentials = self
                .repository
                .find_credentials_by_email(&username.to_lowercase(), &role)
                .await?;
        }

        let Some(credentials) = credentials else {
            // Hash anyway so unknown accounts take as long as known ones.
            let _ = self.password_hasher.hash_password(password);
            return Ok(LoginOutcome::Failed);
        };

        let Some(stored_hash) = credentials.password_hash.as_deref() else {
            let _ = self.password_hasher.hash_password(password);
            return Ok(LoginOutcome::Failed);
        };

        if !self
            .password_hasher
            .verify_password(password, stored_hash)?
        {
            return Ok(LoginOutcome::Failed);
        }

        if !credentials.profile.is_active() {
            return Ok(LoginOutcome::Failed);
        }

        Ok(LoginOutcome::Authenticated(credentials.profile))
    }
}
