use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use ombaro_application::{
    NewUserProfile, UserCredentials, UserListQuery, UserProfileChanges, UserProfileRepository,
};
use ombaro_core::{AppError, AppResult};
use ombaro_domain::{EmailAddress, MobileNumber, RoleId, UserId, UserProfile, UserStatus};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct StoredProfile {
    profile: UserProfile,
    password_hash: Option<String>,
}

impl From<StoredProfile> for UserCredentials {
    fn from(stored: StoredProfile) -> Self {
        Self {
            profile: stored.profile,
            password_hash: stored.password_hash,
        }
    }
}

/// In-memory user profile repository for demo runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryUserProfileRepository {
    profiles: RwLock<HashMap<UserId, StoredProfile>>,
}

impl InMemoryUserProfileRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: RwLock::new(HashMap::new()),
        }
    }
}

fn ensure_email_free(
    profiles: &HashMap<UserId, StoredProfile>,
    email: &EmailAddress,
    except: Option<UserId>,
) -> AppResult<()> {
    let taken = profiles.values().any(|stored| {
        Some(stored.profile.id) != except && stored.profile.email.as_ref() == Some(email)
    });
    if taken {
        return Err(AppError::Conflict(format!(
            "a user with email '{}' already exists",
            email.as_str()
        )));
    }

    Ok(())
}

fn ensure_mobile_free(
    profiles: &HashMap<UserId, StoredProfile>,
    mobile: &str,
    role: &RoleId,
    except: Option<UserId>,
) -> AppResult<()> {
    let taken = profiles.values().any(|stored| {
        Some(stored.profile.id) != except
            && &stored.profile.role == role
            && stored.profile.mobile.as_deref() == Some(mobile)
    });
    if taken {
        return Err(AppError::Conflict(format!(
            "a user with mobile '{mobile}' already exists for role '{}'",
            role.as_str()
        )));
    }

    Ok(())
}

#[async_trait]
impl UserProfileRepository for InMemoryUserProfileRepository {
    async fn list_profiles(&self, query: &UserListQuery) -> AppResult<Vec<UserProfile>> {
        let profiles = self.profiles.read().await;

        let mut values: Vec<UserProfile> = profiles
            .values()
            .map(|stored| &stored.profile)
            .filter(|profile| query.role.as_ref().is_none_or(|role| &profile.role == role))
            .filter(|profile| query.status.is_none_or(|status| profile.status == status))
            .filter(|profile| {
                query
                    .search
                    .as_deref()
                    .is_none_or(|search| profile.matches_search(search))
            })
            .cloned()
            .collect();
        values.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        Ok(values)
    }

    async fn find_profile(&self, user_id: UserId) -> AppResult<Option<UserProfile>> {
        Ok(self
            .profiles
            .read()
            .await
            .get(&user_id)
            .map(|stored| stored.profile.clone()))
    }

    async fn find_credentials_by_mobile(
        &self,
        mobile: &str,
        role: &RoleId,
    ) -> AppResult<Option<UserCredentials>> {
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .find(|stored| {
                &stored.profile.role == role && stored.profile.mobile.as_deref() == Some(mobile)
            })
            .cloned()
            .map(UserCredentials::from))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
        role: &RoleId,
    ) -> AppResult<Option<UserCredentials>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .profiles
            .read()
            .await
            .values()
            .find(|stored| {
                &stored.profile.role == role
                    && stored
                        .profile
                        .email
                        .as_ref()
                        .is_some_and(|stored_email| stored_email.as_str() == email)
            })
            .cloned()
            .map(UserCredentials::from))
    }

    async fn create_profile(&self, profile: NewUserProfile) -> AppResult<UserProfile> {
        let mut profiles = self.profiles.write().await;
        if let Some(email) = profile.email.as_ref() {
            ensure_email_free(&profiles, email, None)?;
        }
        if let Some(mobile) = profile.mobile.as_deref() {
            ensure_mobile_free(&profiles, mobile, &profile.role, None)?;
        }

        let now = Utc::now();
        let stored = StoredProfile {
            profile: UserProfile {
                id: UserId::new(),
                name: profile.name,
                mobile: profile.mobile,
                email: profile.email,
                role: profile.role,
                status: profile.status,
                mobile_verified: profile.mobile_verified,
                profile_completed: profile.profile_completed,
                created_at: now,
                updated_at: now,
            },
            password_hash: profile.password_hash,
        };
        let created = stored.profile.clone();
        profiles.insert(created.id, stored);

        Ok(created)
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: UserProfileChanges,
    ) -> AppResult<Option<UserProfile>> {
        let mut profiles = self.profiles.write().await;
        let Some((current_role, current_mobile)) = profiles
            .get(&user_id)
            .map(|stored| (stored.profile.role.clone(), stored.profile.mobile.clone()))
        else {
            return Ok(None);
        };

        if let Some(email) = changes.email.as_ref() {
            ensure_email_free(&profiles, email, Some(user_id))?;
        }
        let role = changes.role.as_ref().unwrap_or(&current_role);
        let mobile = changes
            .mobile
            .as_ref()
            .map(MobileNumber::as_str)
            .or(current_mobile.as_deref());
        if let Some(mobile) = mobile {
            ensure_mobile_free(&profiles, mobile, role, Some(user_id))?;
        }

        let Some(stored) = profiles.get_mut(&user_id) else {
            return Ok(None);
        };
        let profile = &mut stored.profile;
        if let Some(name) = changes.name {
            profile.name = name;
        }
        if let Some(mobile) = changes.mobile {
            profile.mobile = Some(mobile.as_str().to_owned());
        }
        if changes.email.is_some() {
            profile.email = changes.email;
        }
        if let Some(role) = changes.role {
            profile.role = role;
        }
        if let Some(profile_completed) = changes.profile_completed {
            profile.profile_completed = profile_completed;
        }
        profile.updated_at = Utc::now();

        Ok(Some(profile.clone()))
    }

    async fn set_status(
        &self,
        user_id: UserId,
        status: UserStatus,
    ) -> AppResult<Option<UserProfile>> {
        let mut profiles = self.profiles.write().await;
        Ok(profiles.get_mut(&user_id).map(|stored| {
            stored.profile.status = status;
            stored.profile.updated_at = Utc::now();
            stored.profile.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use ombaro_core::NonEmptyString;

    use super::*;

    fn new_profile(name: &str, email: Option<&str>, role: &str) -> NewUserProfile {
        NewUserProfile {
            name: NonEmptyString::new(name).unwrap_or_else(|error| panic!("{error}")),
            mobile: Some("1234".to_owned()),
            email: email
                .map(|email| EmailAddress::new(email).unwrap_or_else(|error| panic!("{error}"))),
            role: RoleId::new(role).unwrap_or_else(|error| panic!("{error}")),
            status: UserStatus::Active,
            mobile_verified: true,
            profile_completed: true,
            password_hash: Some("hash".to_owned()),
        }
    }

    #[tokio::test]
    async fn credentials_are_scoped_by_role() {
        let repository = InMemoryUserProfileRepository::new();
        repository
            .create_profile(new_profile("Asha", Some("asha@ombaro.com"), "admin"))
            .await
            .unwrap_or_else(|error| panic!("{error}"));
        repository
            .create_profile(new_profile("Ravi", None, "customer"))
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        let admin = RoleId::new("admin").unwrap_or_else(|error| panic!("{error}"));
        let by_mobile = repository
            .find_credentials_by_mobile("1234", &admin)
            .await
            .unwrap_or_default();
        assert_eq!(
            by_mobile.map(|credentials| credentials.profile.name.as_str().to_owned()),
            Some("Asha".to_owned())
        );

        let by_email = repository
            .find_credentials_by_email(" ASHA@ombaro.com ", &admin)
            .await
            .unwrap_or_default();
        assert!(by_email.is_some_and(|credentials| credentials.password_hash.is_some()));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repository = InMemoryUserProfileRepository::new();
        let first = repository
            .create_profile(new_profile("Asha", Some("asha@ombaro.com"), "admin"))
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        let duplicate = repository
            .create_profile(new_profile("Other", Some("asha@ombaro.com"), "customer"))
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let same_owner = repository
            .update_profile(
                first.id,
                UserProfileChanges {
                    email: Some(
                        EmailAddress::new("asha@ombaro.com")
                            .unwrap_or_else(|error| panic!("{error}")),
                    ),
                    ..UserProfileChanges::default()
                },
            )
            .await;
        assert!(matches!(same_owner, Ok(Some(_))));
    }

    #[tokio::test]
    async fn mobile_is_unique_within_a_role() {
        let repository = InMemoryUserProfileRepository::new();
        repository
            .create_profile(new_profile("Asha", None, "employee"))
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        let duplicate = repository
            .create_profile(new_profile("Asha Again", None, "employee"))
            .await;
        assert!(matches!(duplicate, Err(AppError::Conflict(_))));

        let vendor = repository
            .create_profile(new_profile("Asha", None, "vendor"))
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        let moved = repository
            .update_profile(
                vendor.id,
                UserProfileChanges {
                    role: Some(RoleId::new("employee").unwrap_or_else(|error| panic!("{error}"))),
                    ..UserProfileChanges::default()
                },
            )
            .await;
        assert!(matches!(moved, Err(AppError::Conflict(_))));

        let renumbered = repository
            .update_profile(
                vendor.id,
                UserProfileChanges {
                    mobile: MobileNumber::new("9876543210").ok(),
                    role: Some(RoleId::new("employee").unwrap_or_else(|error| panic!("{error}"))),
                    ..UserProfileChanges::default()
                },
            )
            .await
            .unwrap_or_else(|error| panic!("{error}"));
        assert!(renumbered.is_some_and(|profile| profile.role.as_str() == "employee"));
    }

    #[tokio::test]
    async fn list_filters_by_status_and_search() {
        let repository = InMemoryUserProfileRepository::new();
        let asha = repository
            .create_profile(new_profile("Asha", Some("asha@ombaro.com"), "admin"))
            .await
            .unwrap_or_else(|error| panic!("{error}"));
        repository
            .create_profile(NewUserProfile {
                mobile: Some("9876500001".to_owned()),
                ..new_profile("Ravi", None, "admin")
            })
            .await
            .unwrap_or_else(|error| panic!("{error}"));
        repository
            .set_status(asha.id, UserStatus::Inactive)
            .await
            .unwrap_or_else(|error| panic!("{error}"));

        let active = repository
            .list_profiles(&UserListQuery {
                status: Some(UserStatus::Active),
                ..UserListQuery::default()
            })
            .await
            .unwrap_or_default();
        assert_eq!(active.len(), 1);

        let searched = repository
            .list_profiles(&UserListQuery {
                search: Some("ASHA".to_owned()),
                ..UserListQuery::default()
            })
            .await
            .unwrap_or_default();
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].status, UserStatus::Inactive);

        let missing = repository
            .set_status(UserId::new(), UserStatus::Active)
            .await
            .unwrap_or_else(|error| panic!("{error}"));
        assert!(missing.is_none());
    }
}
