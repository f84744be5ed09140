use std::sync::Arc;

use axum::Json;
use ombaro_core::UserIdentity;
use ombaro_domain::RoleId;
use ombaro_infrastructure::load_access_catalog;

use crate::api_config::{ApiConfig, DataBackend};
use crate::api_services::{Repositories, build_app_state};
use crate::auth::identity_for;
use crate::error::ApiResult;
use crate::state::AppState;

pub(crate) struct TestApp {
    pub state: AppState,
    pub repositories: Repositories,
}

impl TestApp {
    /// Session identity of the demo account seeded for `role`.
    pub async fn identity(&self, role: &str) -> UserIdentity {
        let role = RoleId::new(role).unwrap_or_else(|error| panic!("{error}"));
        let credentials = self
            .repositories
            .users
            .find_credentials_by_mobile("1234", &role)
            .await
            .unwrap_or_else(|error| panic!("{error}"))
            .unwrap_or_else(|| panic!("no demo account for role '{}'", role.as_str()));

        identity_for(&credentials.profile)
    }
}

fn test_config() -> ApiConfig {
    ApiConfig {
        migrate_only: false,
        data_backend: DataBackend::Memory,
        database_url: None,
        frontend_origins: vec!["http://localhost:3000".to_owned()],
        api_host: "127.0.0.1".to_owned(),
        api_port: 0,
        cookie_secure: false,
        access_catalog_path: None,
        dev_seed: true,
        business_offset: chrono::FixedOffset::east_opt(19_800)
            .unwrap_or_else(|| panic!("business offset")),
    }
}

/// App state over in-memory repositories holding the demo accounts.
pub(crate) async fn seeded_app() -> TestApp {
    let catalog = Arc::new(load_access_catalog(None).unwrap_or_else(|error| panic!("{error}")));
    let repositories = Repositories::in_memory();
    crate::dev_seed::run(&catalog, &repositories)
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    TestApp {
        state: build_app_state(catalog, repositories.clone(), &test_config()),
        repositories,
    }
}

pub(crate) fn into_body<T>(result: ApiResult<Json<T>>) -> T {
    match result {
        Ok(Json(body)) => body,
        Err(error) => panic!("handler failed: {}", error.0),
    }
}
