use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use ombaro_core::AppError;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

pub fn build_router<Store>(
    app_state: AppState,
    session_layer: SessionManagerLayer<Store>,
) -> Result<Router, AppError>
where
    Store: SessionStore + Clone,
{
    let cors_layer = cors::build_cors_layer(&app_state.frontend_origins)?;

    let public_routes = Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/auth/current-user", get(auth::current_user_handler))
        .route(
            "/api/users/profile/{user_id}",
            get(handlers::users::profile_handler),
        );

    Ok(Router::new()
        .merge(public_routes)
        .merge(access_routes(&app_state))
        .merge(user_routes(&app_state))
        .merge(department_routes(&app_state))
        .merge(vendor_routes(&app_state))
        .merge(attendance_routes(&app_state))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(session_layer)
        .with_state(app_state))
}

fn access_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/access/roles",
            get(handlers::access::list_roles_handler),
        )
        .route(
            "/api/access/roles/{role_id}",
            get(handlers::access::role_overview_handler),
        )
        .route(
            "/api/access/navigation",
            get(handlers::access::navigation_handler),
        )
        .route(
            "/api/access/check",
            get(handlers::access::check_permission_handler),
        )
        .route(
            "/api/admin/permission-matrix",
            get(handlers::access::permission_matrix_handler),
        )
        .route(
            "/api/admin/permission-matrix/preview",
            post(handlers::access::preview_permission_matrix_handler),
        )
        .route("/api/reports", get(handlers::reports::list_reports_handler))
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ))
}

fn user_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/users",
            get(handlers::users::list_users_handler).post(handlers::users::create_user_handler),
        )
        .route(
            "/api/users/{user_id}",
            get(handlers::users::get_user_handler)
                .put(handlers::users::update_user_handler)
                .delete(handlers::users::delete_user_handler),
        )
        .route(
            "/api/users/{user_id}/status",
            put(handlers::users::update_user_status_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ))
}

fn department_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/departments",
            get(handlers::departments::list_departments_handler)
                .post(handlers::departments::create_department_handler),
        )
        .route(
            "/api/departments/mine",
            get(handlers::departments::my_assignments_handler),
        )
        .route(
            "/api/departments/primary",
            get(handlers::departments::my_primary_department_handler),
        )
        .route(
            "/api/departments/code/{code}",
            get(handlers::departments::get_department_by_code_handler),
        )
        .route(
            "/api/departments/widgets/{widget_id}",
            delete(handlers::departments::delete_widget_handler),
        )
        .route(
            "/api/departments/{department_id}",
            get(handlers::departments::get_department_handler)
                .put(handlers::departments::update_department_handler),
        )
        .route(
            "/api/departments/{department_id}/modules",
            get(handlers::departments::department_modules_handler),
        )
        .route(
            "/api/departments/{department_id}/access",
            get(handlers::departments::department_access_handler),
        )
        .route(
            "/api/departments/{department_id}/assignments",
            post(handlers::departments::assign_user_handler),
        )
        .route(
            "/api/departments/{department_id}/widgets",
            get(handlers::departments::list_widgets_handler)
                .put(handlers::departments::save_widget_handler),
        )
        .route(
            "/api/departments/{department_id}/settings",
            get(handlers::departments::department_settings_handler),
        )
        .route(
            "/api/departments/{department_id}/settings/{setting_key}",
            put(handlers::departments::update_setting_handler),
        )
        .route(
            "/api/departments/{department_id}/activity",
            get(handlers::departments::department_activity_handler)
                .post(handlers::departments::log_activity_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ))
}

fn vendor_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/vendor/applications",
            get(handlers::vendor::list_applications_handler)
                .post(handlers::vendor::submit_application_handler),
        )
        .route(
            "/api/vendor/applications/mine",
            get(handlers::vendor::my_applications_handler),
        )
        .route(
            "/api/vendor/applications/queue",
            get(handlers::vendor::review_queue_handler),
        )
        .route(
            "/api/vendor/applications/{application_id}",
            get(handlers::vendor::get_application_handler),
        )
        .route(
            "/api/vendor/applications/{application_id}/approve",
            post(handlers::vendor::approve_application_handler),
        )
        .route(
            "/api/vendor/applications/{application_id}/reject",
            post(handlers::vendor::reject_application_handler),
        )
        .route(
            "/api/vendor/applications/{application_id}/request-info",
            post(handlers::vendor::request_info_handler),
        )
        .route(
            "/api/vendor/applications/{application_id}/history",
            get(handlers::vendor::approval_history_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ))
}

fn attendance_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/attendance",
            get(handlers::attendance::my_attendance_handler),
        )
        .route(
            "/api/attendance/check-in",
            post(handlers::attendance::check_in_handler),
        )
        .route(
            "/api/attendance/check-out",
            post(handlers::attendance::check_out_handler),
        )
        .route(
            "/api/leaves",
            post(handlers::attendance::apply_leave_handler),
        )
        .route(
            "/api/leaves/mine",
            get(handlers::attendance::my_leaves_handler),
        )
        .route(
            "/api/leaves/pending",
            get(handlers::attendance::pending_leaves_handler),
        )
        .route(
            "/api/leaves/{leave_id}/approve",
            post(handlers::attendance::approve_leave_handler),
        )
        .route(
            "/api/leaves/{leave_id}/reject",
            post(handlers::attendance::reject_leave_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ))
}
