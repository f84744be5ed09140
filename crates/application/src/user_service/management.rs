use super::*;

impl UserService {
    /// Lists users matching the filters.
    pub async fn list_users(
        &self,
        actor: &UserIdentity,
        query: UserListQuery,
    ) -> AppResult<Vec<UserProfile>> {
        self.require(actor, PermissionAction::Read)?;
        self.repository.list_profiles(&query).await
    }

    /// Returns one user.
    pub async fn get_user(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
    ) -> AppResult<Option<UserProfile>> {
        self.require(actor, PermissionAction::Read)?;
        self.repository.find_profile(user_id).await
    }

    /// Creates an active user.
    pub async fn create_user(
        &self,
        actor: &UserIdentity,
        input: CreateUserInput,
    ) -> AppResult<UserProfile> {
        self.require(actor, PermissionAction::Create)?;

        let name = NonEmptyString::new(input.name)?;
        let mobile = non_blank(input.mobile).map(MobileNumber::new).transpose()?;
        let email = non_blank(input.email).map(EmailAddress::new).transpose()?;
        if mobile.is_none() && email.is_none() {
            return Err(AppError::Validation(
                "a user needs a mobile number or an email address".to_owned(),
            ));
        }

        let role = self.known_role(&input.role)?;
        let password_hash = non_blank(input.password)
            .map(|password| self.password_hasher.hash_password(&password))
            .transpose()?;

        self.repository
            .create_profile(NewUserProfile {
                name,
                mobile: mobile.map(String::from),
                email,
                role,
                status: UserStatus::Active,
                mobile_verified: false,
                profile_completed: false,
                password_hash,
            })
            .await
    }

    /// Updates name, contact details, role or the onboarding flag.
    pub async fn update_user(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AppResult<UserProfile> {
        self.require(actor, PermissionAction::Update)?;

        let changes = UserProfileChanges {
            name: input.name.map(NonEmptyString::new).transpose()?,
            mobile: non_blank(input.mobile).map(MobileNumber::new).transpose()?,
            email: non_blank(input.email).map(EmailAddress::new).transpose()?,
            role: input
                .role
                .map(|role| self.known_role(&role))
                .transpose()?,
            profile_completed: input.profile_completed,
        };

        self.repository
            .update_profile(user_id, changes)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))
    }

    /// Activates, deactivates or suspends a user.
    pub async fn set_user_status(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        status: UserStatus,
    ) -> AppResult<UserProfile> {
        self.require(actor, PermissionAction::Update)?;
        self.ensure_not_self(actor, user_id, status)?;

        self.repository
            .set_status(user_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))
    }

    /// Deletes a user by marking the profile inactive.
    pub async fn delete_user(&self, actor: &UserIdentity, user_id: UserId) -> AppResult<()> {
        self.require(actor, PermissionAction::Delete)?;
        self.ensure_not_self(actor, user_id, UserStatus::Inactive)?;

        self.repository
            .set_status(user_id, UserStatus::Inactive)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' not found")))
    }

    fn ensure_not_self(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        status: UserStatus,
    ) -> AppResult<()> {
        if status != UserStatus::Active && actor.subject() == user_id.to_string() {
            return Err(AppError::Conflict(
                "you cannot deactivate your own account".to_owned(),
            ));
        }

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
