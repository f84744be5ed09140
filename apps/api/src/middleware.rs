use axum::extract::{Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use ombaro_core::{AppError, AppResult, UserIdentity};
use tower_sessions::Session;
use tracing::warn;

use crate::auth::{active_session_profile, identity_for};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn require_auth(
    State(state): State<AppState>,
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = authenticated_identity(&state, &session).await?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Identity rebuilt from the stored profile, so role changes apply at once.
pub(crate) async fn authenticated_identity(
    state: &AppState,
    session: &Session,
) -> AppResult<UserIdentity> {
    active_session_profile(state, session)
        .await?
        .map(|profile| identity_for(&profile))
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            warn!(path = %request.uri().path(), "cross-site mutation blocked");
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if !origin_is_allowed(&state.frontend_origins, origin, referer) {
            warn!(
                path = %request.uri().path(),
                origin,
                "mutation from unknown origin blocked"
            );
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

fn origin_is_allowed(allowed_origins: &[String], origin: &str, referer: &str) -> bool {
    allowed_origins.iter().any(|allowed| {
        origin == allowed
            || referer
                .strip_prefix(allowed.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use axum::http::Method;

    use super::{is_state_changing_method, origin_is_allowed};

    fn allowed() -> Vec<String> {
        vec![
            "http://localhost:5000".to_owned(),
            "https://admin.ombaro.com".to_owned(),
        ]
    }

    #[test]
    fn allowlisted_origin_or_referer_passes() {
        assert!(origin_is_allowed(&allowed(), "https://admin.ombaro.com", ""));
        assert!(origin_is_allowed(
            &allowed(),
            "",
            "http://localhost:5000/admin/users"
        ));
    }

    #[test]
    fn lookalike_referer_is_rejected() {
        assert!(!origin_is_allowed(
            &allowed(),
            "",
            "https://admin.ombaro.com.evil.test/login"
        ));
        assert!(!origin_is_allowed(&allowed(), "", ""));
    }

    #[test]
    fn only_writes_are_checked() {
        assert!(is_state_changing_method(&Method::DELETE));
        assert!(!is_state_changing_method(&Method::GET));
        assert!(!is_state_changing_method(&Method::OPTIONS));
    }
}
