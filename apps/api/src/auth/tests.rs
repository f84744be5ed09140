use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use ombaro_application::UpdateUserInput;
use ombaro_core::{AppError, UserIdentity};
use ombaro_domain::UserId;
use tower_sessions::{MemoryStore, Session};

use super::{
    SESSION_ABSOLUTE_TIMEOUT_SECONDS, SESSION_CREATED_AT_KEY, SESSION_USER_KEY,
    current_user_handler, login_handler, logout_handler,
};
use crate::dto::LoginRequest;
use crate::handlers::test_support::{TestApp, into_body, seeded_app};
use crate::middleware::authenticated_identity;

fn new_session() -> Session {
    Session::new(None, Arc::new(MemoryStore::default()), None)
}

fn login_request(username: &str, password: &str, user_type: &str) -> Json<LoginRequest> {
    Json(LoginRequest {
        username: username.to_owned(),
        password: password.to_owned(),
        user_type: user_type.to_owned(),
    })
}

#[tokio::test]
async fn login_stores_the_identity_in_the_session() {
    let app = seeded_app().await;
    let session = new_session();

    let response = into_body(
        login_handler(
            State(app.state.clone()),
            session.clone(),
            login_request("1234", "1234", "hr_department"),
        )
        .await,
    );
    assert!(response.success);
    assert_eq!(response.user.role, "hr_department");

    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .unwrap_or_default();
    assert!(identity.is_some_and(|identity| identity.subject() == response.user.id));

    let current = into_body(current_user_handler(State(app.state.clone()), session).await);
    assert!(current.user.is_some_and(|user| user.id == response.user.id));
}

#[tokio::test]
async fn login_accepts_email_as_username() {
    let app = seeded_app().await;

    let response = into_body(
        login_handler(
            State(app.state.clone()),
            new_session(),
            login_request(" Employee@Ombaro.com ", "1234", "employee"),
        )
        .await,
    );
    assert_eq!(response.user.email.as_deref(), Some("employee@ombaro.com"));
}

#[tokio::test]
async fn failed_logins_are_unauthorized() {
    let app = seeded_app().await;
    let session = new_session();

    let wrong_password = login_handler(
        State(app.state.clone()),
        session.clone(),
        login_request("1234", "4321", "admin"),
    )
    .await;
    assert!(matches!(wrong_password, Err(error) if matches!(error.0, AppError::Unauthorized(_))));

    let unknown_role = login_handler(
        State(app.state.clone()),
        session.clone(),
        login_request("1234", "1234", "astronaut"),
    )
    .await;
    assert!(matches!(unknown_role, Err(error) if matches!(error.0, AppError::Unauthorized(_))));

    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .unwrap_or_default();
    assert!(identity.is_none());
}

#[tokio::test]
async fn signed_out_sessions_have_no_current_user() {
    let app = seeded_app().await;
    let session = new_session();

    let anonymous = into_body(current_user_handler(State(app.state.clone()), session.clone()).await);
    assert!(anonymous.success);
    assert!(anonymous.user.is_none());

    into_body(
        login_handler(
            State(app.state.clone()),
            session.clone(),
            login_request("1234", "1234", "customer"),
        )
        .await,
    );
    let Json(logout) = logout_handler(session.clone())
        .await
        .unwrap_or_else(|error| panic!("{}", error.0));
    assert!(logout.success);

    let after = into_body(current_user_handler(State(app.state.clone()), session).await);
    assert!(after.user.is_none());
}

async fn signed_in(app: &TestApp, role: &str) -> (Session, UserId) {
    let session = new_session();
    let response = into_body(
        login_handler(
            State(app.state.clone()),
            session.clone(),
            login_request("1234", "1234", role),
        )
        .await,
    );
    let user_id = UserId::parse(response.user.id.as_str()).unwrap_or_else(|error| panic!("{error}"));
    (session, user_id)
}

#[tokio::test]
async fn deactivated_accounts_lose_their_session() {
    let app = seeded_app().await;
    let (session, user_id) = signed_in(&app, "hr_department").await;
    assert!(authenticated_identity(&app.state, &session).await.is_ok());

    app.state
        .user_service
        .delete_user(&app.identity("admin").await, user_id)
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    let result = authenticated_identity(&app.state, &session).await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));

    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .unwrap_or_default();
    assert!(identity.is_none());

    let current = into_body(current_user_handler(State(app.state.clone()), session).await);
    assert!(current.user.is_none());
}

#[tokio::test]
async fn role_changes_apply_to_existing_sessions() {
    let app = seeded_app().await;
    let (session, user_id) = signed_in(&app, "employee").await;

    app.state
        .user_service
        .update_user(
            &app.identity("admin").await,
            user_id,
            UpdateUserInput {
                name: None,
                mobile: Some("9876501234".to_owned()),
                email: None,
                role: Some("hr_department".to_owned()),
                profile_completed: None,
            },
        )
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    let identity = authenticated_identity(&app.state, &session)
        .await
        .unwrap_or_else(|error| panic!("{error}"));
    assert_eq!(identity.role(), "hr_department");
    assert_eq!(identity.subject(), user_id.to_string());
}

#[tokio::test]
async fn sessions_expire_after_the_absolute_timeout() {
    let app = seeded_app().await;
    let (session, _) = signed_in(&app, "customer").await;

    session
        .insert(
            SESSION_CREATED_AT_KEY,
            chrono::Utc::now().timestamp() - SESSION_ABSOLUTE_TIMEOUT_SECONDS - 1,
        )
        .await
        .unwrap_or_else(|error| panic!("{error}"));

    let result = authenticated_identity(&app.state, &session).await;
    assert!(matches!(result, Err(AppError::Unauthorized(_))));

    let anonymous = authenticated_identity(&app.state, &new_session()).await;
    assert!(matches!(anonymous, Err(AppError::Unauthorized(_))));
}
