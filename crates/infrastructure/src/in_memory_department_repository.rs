use std::collections::HashMap;

use async_trait::async_trait;
use ombaro_application::DepartmentRepository;
use ombaro_core::{AppError, AppResult};
use ombaro_domain::{
    Department, DepartmentActivityLog, DepartmentModule, DepartmentSetting, DepartmentStatus,
    DepartmentUserAssignment, DepartmentWidget, UserId,
};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory department repository for demo runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryDepartmentRepository {
    departments: RwLock<HashMap<Uuid, Department>>,
    modules: RwLock<HashMap<(Uuid, String), DepartmentModule>>,
    assignments: RwLock<HashMap<Uuid, DepartmentUserAssignment>>,
    widgets: RwLock<HashMap<Uuid, DepartmentWidget>>,
    settings: RwLock<HashMap<(Uuid, String), DepartmentSetting>>,
    activity: RwLock<Vec<DepartmentActivityLog>>,
}

impl InMemoryDepartmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            departments: RwLock::new(HashMap::new()),
            modules: RwLock::new(HashMap::new()),
            assignments: RwLock::new(HashMap::new()),
            widgets: RwLock::new(HashMap::new()),
            settings: RwLock::new(HashMap::new()),
            activity: RwLock::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DepartmentRepository for InMemoryDepartmentRepository {
    async fn list_active_departments(&self) -> AppResult<Vec<Department>> {
        let departments = self.departments.read().await;

        let mut values: Vec<Department> = departments
            .values()
            .filter(|department| department.status == DepartmentStatus::Active)
            .cloned()
            .collect();
        values.sort_by(|left, right| left.name.cmp(&right.name));

        Ok(values)
    }

    async fn find_department(&self, department_id: Uuid) -> AppResult<Option<Department>> {
        Ok(self.departments.read().await.get(&department_id).cloned())
    }

    async fn find_department_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        Ok(self
            .departments
            .read()
            .await
            .values()
            .find(|department| department.code.as_str() == code)
            .cloned())
    }

    async fn create_department(&self, department: Department) -> AppResult<Department> {
        let mut departments = self.departments.write().await;
        if departments
            .values()
            .any(|stored| stored.code == department.code)
        {
            return Err(AppError::Conflict(format!(
                "department code '{}' is already in use",
                department.code
            )));
        }

        departments.insert(department.id, department.clone());
        Ok(department)
    }

    async fn update_department(&self, department: Department) -> AppResult<Option<Department>> {
        let mut departments = self.departments.write().await;
        Ok(departments.get_mut(&department.id).map(|stored| {
            *stored = department;
            stored.clone()
        }))
    }

    async fn list_department_modules(
        &self,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentModule>> {
        let modules = self.modules.read().await;

        let mut values: Vec<DepartmentModule> = modules
            .iter()
            .filter_map(|((stored_department_id, _), module)| {
                (stored_department_id == &department_id).then_some(module.clone())
            })
            .collect();
        values.sort_by(|left, right| {
            left.display_order
                .cmp(&right.display_order)
                .then_with(|| left.module_key.cmp(&right.module_key))
        });

        Ok(values)
    }

    async fn save_department_module(
        &self,
        module: DepartmentModule,
    ) -> AppResult<DepartmentModule> {
        let key = (module.department_id, module.module_key.clone());
        let mut modules = self.modules.write().await;

        // Keep the original row id so parent links stay valid.
        let mut module = module;
        if let Some(existing) = modules.get(&key) {
            module.id = existing.id;
        }
        modules.insert(key, module.clone());

        Ok(module)
    }

    async fn list_user_assignments(
        &self,
        user_id: UserId,
    ) -> AppResult<Vec<DepartmentUserAssignment>> {
        let assignments = self.assignments.read().await;

        let mut values: Vec<DepartmentUserAssignment> = assignments
            .values()
            .filter(|assignment| assignment.user_id == user_id && assignment.is_active())
            .cloned()
            .collect();
        values.sort_by(|left, right| {
            right
                .is_primary
                .cmp(&left.is_primary)
                .then_with(|| left.assigned_at.cmp(&right.assigned_at))
        });

        Ok(values)
    }

    async fn create_assignment(
        &self,
        assignment: DepartmentUserAssignment,
    ) -> AppResult<DepartmentUserAssignment> {
        let mut assignments = self.assignments.write().await;
        if assignments.values().any(|stored| {
            stored.user_id == assignment.user_id && stored.department_id == assignment.department_id
        }) {
            return Err(AppError::Conflict(format!(
                "user '{}' is already assigned to department '{}'",
                assignment.user_id, assignment.department_id
            )));
        }

        assignments.insert(assignment.id, assignment.clone());
        Ok(assignment)
    }

    async fn list_widgets(
        &self,
        user_id: UserId,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentWidget>> {
        let widgets = self.widgets.read().await;

        let mut values: Vec<DepartmentWidget> = widgets
            .values()
            .filter(|widget| {
                widget.user_id == user_id
                    && widget.department_id == department_id
                    && widget.is_visible
            })
            .cloned()
            .collect();
        values.sort_by_key(|widget| widget.display_order);

        Ok(values)
    }

    async fn find_widget(&self, widget_id: Uuid) -> AppResult<Option<DepartmentWidget>> {
        Ok(self.widgets.read().await.get(&widget_id).cloned())
    }

    async fn save_widget(&self, widget: DepartmentWidget) -> AppResult<DepartmentWidget> {
        self.widgets
            .write()
            .await
            .insert(widget.id, widget.clone());
        Ok(widget)
    }

    async fn delete_widget(&self, widget_id: Uuid) -> AppResult<bool> {
        Ok(self.widgets.write().await.remove(&widget_id).is_some())
    }

    async fn list_settings(&self, department_id: Uuid) -> AppResult<Vec<DepartmentSetting>> {
        let settings = self.settings.read().await;

        let mut values: Vec<DepartmentSetting> = settings
            .values()
            .filter(|setting| setting.department_id == department_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| left.setting_key.cmp(&right.setting_key));

        Ok(values)
    }

    async fn upsert_setting(&self, setting: DepartmentSetting) -> AppResult<()> {
        self.settings.write().await.insert(
            (setting.department_id, setting.setting_key.clone()),
            setting,
        );
        Ok(())
    }

    async fn append_activity(&self, entry: DepartmentActivityLog) -> AppResult<()> {
        self.activity.write().await.push(entry);
        Ok(())
    }

    async fn list_activity(
        &self,
        department_id: Uuid,
        limit: usize,
    ) -> AppResult<Vec<DepartmentActivityLog>> {
        let activity = self.activity.read().await;

        let mut values: Vec<DepartmentActivityLog> = activity
            .iter()
            .filter(|entry| entry.department_id == department_id)
            .cloned()
            .collect();
        values.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        values.truncate(limit);

        Ok(values)
    }
}
