use std::collections::BTreeMap;

use ombaro_domain::{DepartmentActivityLog, DepartmentSetting, DepartmentWidget, SettingType};
use serde_json::Value;

use crate::department_ports::{
    DEFAULT_ACTIVITY_LIMIT, LogActivityInput, MAX_ACTIVITY_LIMIT, SaveWidgetInput,
};

use super::*;

impl DepartmentService {
    /// Lists the caller's visible widgets on a department dashboard.
    pub async fn my_widgets(
        &self,
        actor: &UserIdentity,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentWidget>> {
        self.require_department_access(actor, department_id).await?;
        let user_id = subject_user_id(actor)?;
        self.repository.list_widgets(user_id, department_id).await
    }

    /// Creates or replaces one of the caller's widgets.
    pub async fn save_widget(
        &self,
        actor: &UserIdentity,
        input: SaveWidgetInput,
    ) -> AppResult<DepartmentWidget> {
        self.require_department_access(actor, input.department_id)
            .await?;
        let user_id = subject_user_id(actor)?;

        let id = match input.id {
            Some(widget_id) => {
                self.require_own_widget(user_id, widget_id).await?;
                widget_id
            }
            None => Uuid::new_v4(),
        };

        self.repository
            .save_widget(DepartmentWidget {
                id,
                user_id,
                department_id: input.department_id,
                widget_type: input.widget_type,
                widget_key: input.widget_key,
                title: NonEmptyString::new(input.title)?,
                configuration: input.configuration,
                position: input.position,
                is_visible: input.is_visible,
                display_order: input.display_order,
            })
            .await
    }

    /// Deletes one of the caller's widgets.
    pub async fn delete_widget(&self, actor: &UserIdentity, widget_id: Uuid) -> AppResult<()> {
        let user_id = subject_user_id(actor)?;
        self.require_own_widget(user_id, widget_id).await?;
        self.repository.delete_widget(widget_id).await?;
        Ok(())
    }

    /// Returns the department settings as a key to value map.
    pub async fn settings(
        &self,
        actor: &UserIdentity,
        department_id: Uuid,
    ) -> AppResult<BTreeMap<String, Value>> {
        self.require_department_access(actor, department_id).await?;
        let settings = self.repository.list_settings(department_id).await?;
        Ok(settings
            .into_iter()
            .map(|setting| (setting.setting_key, setting.setting_value))
            .collect())
    }

    /// Sets one department setting. Heads, deputies and configurators only.
    pub async fn update_setting(
        &self,
        actor: &UserIdentity,
        department_id: Uuid,
        setting_key: &str,
        setting_value: Value,
        setting_type: SettingType,
    ) -> AppResult<()> {
        let role = self.require_department_access(actor, department_id).await?;
        let leads_department = matches!(role, Some(AssignmentType::Head | AssignmentType::Deputy));
        if !leads_department
            && !self
                .access_service
                .allows(actor, "admin", PermissionAction::Configure)?
        {
            return Err(AppError::Forbidden(
                "only department heads and deputies can change settings".to_owned(),
            ));
        }

        let setting_key = NonEmptyString::new(setting_key)?;
        self.repository
            .upsert_setting(DepartmentSetting {
                department_id,
                setting_key: setting_key.into(),
                setting_value,
                setting_type,
            })
            .await
    }

    /// Appends an entry to the department activity log as the caller.
    pub async fn log_activity(
        &self,
        actor: &UserIdentity,
        department_id: Uuid,
        input: LogActivityInput,
    ) -> AppResult<DepartmentActivityLog> {
        self.require_department_access(actor, department_id).await?;
        let action = NonEmptyString::new(input.action)?;

        let entry = DepartmentActivityLog {
            id: Uuid::new_v4(),
            department_id,
            user_id: subject_user_id(actor)?,
            action: action.into(),
            module_key: input.module_key,
            resource_type: input.resource_type,
            resource_id: input.resource_id,
            description: input.description,
            metadata: input.metadata.unwrap_or_else(|| serde_json::json!({})),
            created_at: Utc::now(),
        };
        self.repository.append_activity(entry.clone()).await?;
        Ok(entry)
    }

    /// Lists the newest activity entries, 50 by default and at most 200.
    pub async fn activity_log(
        &self,
        actor: &UserIdentity,
        department_id: Uuid,
        limit: Option<usize>,
    ) -> AppResult<Vec<DepartmentActivityLog>> {
        self.require_department_access(actor, department_id).await?;
        let limit = limit
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT);
        self.repository.list_activity(department_id, limit).await
    }

    async fn require_own_widget(&self, user_id: UserId, widget_id: Uuid) -> AppResult<()> {
        let widget = self
            .repository
            .find_widget(widget_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("widget '{widget_id}' not found")))?;

        if widget.user_id != user_id {
            return Err(AppError::Forbidden(format!(
                "widget '{widget_id}' belongs to another user"
            )));
        }

        Ok(())
    }
}
