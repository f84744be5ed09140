use super::*;

pub async fn list_widgets_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
) -> ApiResult<Json<Vec<DepartmentWidgetResponse>>> {
    let widgets = state
        .department_service
        .my_widgets(&user, department_id)
        .await?
        .into_iter()
        .map(DepartmentWidgetResponse::from)
        .collect();

    Ok(Json(widgets))
}

pub async fn save_widget_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
    Json(payload): Json<SaveWidgetRequest>,
) -> ApiResult<Json<DepartmentWidgetResponse>> {
    let widget = state
        .department_service
        .save_widget(&user, payload.into_input(department_id)?)
        .await?;

    Ok(Json(DepartmentWidgetResponse::from(widget)))
}

pub async fn delete_widget_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(widget_id): Path<Uuid>,
) -> ApiResult<Json<SuccessResponse>> {
    state
        .department_service
        .delete_widget(&user, widget_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn department_settings_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
) -> ApiResult<Json<DepartmentSettingsResponse>> {
    let settings = state
        .department_service
        .settings(&user, department_id)
        .await?;

    Ok(Json(DepartmentSettingsResponse {
        department_id: department_id.to_string(),
        settings,
    }))
}

pub async fn update_setting_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path((department_id, setting_key)): Path<(Uuid, String)>,
    Json(payload): Json<UpdateSettingRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let setting_type = payload
        .setting_type
        .as_deref()
        .map(str::parse::<SettingType>)
        .transpose()?
        .unwrap_or_default();

    state
        .department_service
        .update_setting(
            &user,
            department_id,
            setting_key.as_str(),
            payload.setting_value,
            setting_type,
        )
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn department_activity_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
    Query(query): Query<ActivityLogQuery>,
) -> ApiResult<Json<Vec<DepartmentActivityResponse>>> {
    let entries = state
        .department_service
        .activity_log(&user, department_id, query.limit)
        .await?
        .into_iter()
        .map(DepartmentActivityResponse::from)
        .collect();

    Ok(Json(entries))
}

pub async fn log_activity_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserIdentity>,
    Path(department_id): Path<Uuid>,
    Json(payload): Json<LogActivityRequest>,
) -> ApiResult<(StatusCode, Json<DepartmentActivityResponse>)> {
    let entry = state
        .department_service
        .log_activity(&user, department_id, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(DepartmentActivityResponse::from(entry)),
    ))
}
