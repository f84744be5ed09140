//! Department workspace service.

use std::sync::Arc;

use chrono::Utc;
use ombaro_core::{AppError, AppResult, NonEmptyString, UserIdentity};
use ombaro_domain::{
    AssignmentStatus, AssignmentType, Department, DepartmentModuleNode, DepartmentStatus,
    DepartmentUserAssignment, PermissionAction, UserId, build_department_module_tree,
    highest_assignment_type,
};
use uuid::Uuid;

use crate::department_ports::{
    AssignUserInput, CreateDepartmentInput, DepartmentRepository, UpdateDepartmentInput,
};
use crate::{AccessService, subject_user_id};

mod workspace;

/// Application service for departments and their workspaces.
#[derive(Clone)]
pub struct DepartmentService {
    repository: Arc<dyn DepartmentRepository>,
    access_service: AccessService,
}

impl DepartmentService {
    /// Creates a new department service.
    #[must_use]
    pub fn new(repository: Arc<dyn DepartmentRepository>, access_service: AccessService) -> Self {
        Self {
            repository,
            access_service,
        }
    }

    /// Lists active departments ordered by name.
    pub async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.repository.list_active_departments().await
    }

    /// Returns a department by id.
    pub async fn find_department(&self, department_id: Uuid) -> AppResult<Option<Department>> {
        self.repository.find_department(department_id).await
    }

    /// Returns a department by code.
    pub async fn find_department_by_code(&self, code: &str) -> AppResult<Option<Department>> {
        self.repository
            .find_department_by_code(&code.trim().to_uppercase())
            .await
    }

    /// Creates an active department.
    pub async fn create_department(
        &self,
        actor: &UserIdentity,
        input: CreateDepartmentInput,
    ) -> AppResult<Department> {
        self.access_service
            .require(actor, "admin", PermissionAction::Create)?;

        let code = NonEmptyString::new(input.code.trim().to_uppercase())?;
        if self
            .repository
            .find_department_by_code(code.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "department code '{code}' is already in use"
            )));
        }

        let now = Utc::now();
        self.repository
            .create_department(Department {
                id: Uuid::new_v4(),
                name: NonEmptyString::new(input.name)?,
                code,
                description: input.description,
                parent_department_id: input.parent_department_id,
                head_user_id: None,
                department_type: input.department_type,
                status: DepartmentStatus::Active,
                email: input.email,
                phone: input.phone,
                location: input.location,
                budget_allocated: input.budget_allocated,
                employee_count: 0,
                settings: serde_json::json!({}),
                created_at: now,
                updated_at: now,
            })
            .await
    }

    /// Applies a partial update to a department.
    pub async fn update_department(
        &self,
        actor: &UserIdentity,
        department_id: Uuid,
        input: UpdateDepartmentInput,
    ) -> AppResult<Department> {
        self.access_service
            .require(actor, "admin", PermissionAction::Update)?;

        let mut department = self.require_department(department_id).await?;
        if let Some(name) = input.name {
            department.name = NonEmptyString::new(name)?;
        }
        if let Some(description) = input.description {
            department.description = description;
        }
        if let Some(department_type) = input.department_type {
            department.department_type = department_type;
        }
        if let Some(status) = input.status {
            department.status = status;
        }
        if input.head_user_id.is_some() {
            department.head_user_id = input.head_user_id;
        }
        if input.email.is_some() {
            department.email = input.email;
        }
        if input.phone.is_some() {
            department.phone = input.phone;
        }
        if input.location.is_some() {
            department.location = input.location;
        }
        if input.budget_allocated.is_some() {
            department.budget_allocated = input.budget_allocated;
        }
        if let Some(employee_count) = input.employee_count {
            if employee_count < 0 {
                return Err(AppError::Validation(
                    "employee count must not be negative".to_owned(),
                ));
            }
            department.employee_count = employee_count;
        }
        if let Some(settings) = input.settings {
            department.settings = settings;
        }
        department.updated_at = Utc::now();

        self.repository
            .update_department(department)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("department '{department_id}' not found")))
    }

    /// Returns the enabled module tree of a department.
    pub async fn department_modules(
        &self,
        actor: &UserIdentity,
        department_id: Uuid,
    ) -> AppResult<Vec<DepartmentModuleNode>> {
        self.require_department_access(actor, department_id).await?;
        let modules = self
            .repository
            .list_department_modules(department_id)
            .await?;
        Ok(build_department_module_tree(modules))
    }

    /// Lists the caller's active assignments, primary first.
    pub async fn my_assignments(
        &self,
        actor: &UserIdentity,
    ) -> AppResult<Vec<DepartmentUserAssignment>> {
        let user_id = subject_user_id(actor)?;
        self.repository.list_user_assignments(user_id).await
    }

    /// Returns the caller's primary department.
    pub async fn my_primary_department(
        &self,
        actor: &UserIdentity,
    ) -> AppResult<Option<Department>> {
        let user_id = subject_user_id(actor)?;
        let assignments = self.repository.list_user_assignments(user_id).await?;
        let Some(primary) = assignments
            .iter()
            .find(|assignment| assignment.is_primary && assignment.is_active())
        else {
            return Ok(None);
        };

        self.repository.find_department(primary.department_id).await
    }

    /// Assigns a user to a department.
    pub async fn assign_user(
        &self,
        actor: &UserIdentity,
        input: AssignUserInput,
    ) -> AppResult<DepartmentUserAssignment> {
        self.access_service
            .require(actor, "admin", PermissionAction::Update)?;
        self.require_department(input.department_id).await?;

        if let Some(role_id) = input.role_id.as_deref()
            && self.access_service.catalog().find_role(role_id).is_none()
        {
            return Err(AppError::Validation(format!("unknown role '{role_id}'")));
        }

        let existing = self.repository.list_user_assignments(input.user_id).await?;
        if existing
            .iter()
            .any(|assignment| assignment.department_id == input.department_id)
        {
            return Err(AppError::Conflict(format!(
                "user '{}' is already assigned to department '{}'",
                input.user_id, input.department_id
            )));
        }
        if input.is_primary && existing.iter().any(|assignment| assignment.is_primary) {
            return Err(AppError::Conflict(format!(
                "user '{}' already has a primary department",
                input.user_id
            )));
        }

        let now = Utc::now();
        self.repository
            .create_assignment(DepartmentUserAssignment {
                id: Uuid::new_v4(),
                user_id: input.user_id,
                department_id: input.department_id,
                role_id: input.role_id,
                assignment_type: input.assignment_type,
                is_primary: input.is_primary,
                status: AssignmentStatus::Active,
                assigned_at: now,
                valid_from: now,
                valid_until: None,
            })
            .await
    }

    /// Returns whether the user holds an active assignment in the department.
    pub async fn user_has_access(&self, user_id: UserId, department_id: Uuid) -> AppResult<bool> {
        Ok(self.user_department_role(user_id, department_id).await?.is_some())
    }

    /// Returns the user's highest-ranked active assignment type in the department.
    pub async fn user_department_role(
        &self,
        user_id: UserId,
        department_id: Uuid,
    ) -> AppResult<Option<AssignmentType>> {
        let assignments = self.repository.list_user_assignments(user_id).await?;
        Ok(highest_assignment_type(
            assignments
                .iter()
                .filter(|assignment| assignment.department_id == department_id),
        ))
    }

    async fn require_department(&self, department_id: Uuid) -> AppResult<Department> {
        self.repository
            .find_department(department_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("department '{department_id}' not found")))
    }

    /// Administrators see every department; everyone else needs an active
    /// assignment.
    async fn require_department_access(
        &self,
        actor: &UserIdentity,
        department_id: Uuid,
    ) -> AppResult<Option<AssignmentType>> {
        let user_id = subject_user_id(actor)?;
        let role = self.user_department_role(user_id, department_id).await?;
        if role.is_some()
            || self
                .access_service
                .allows(actor, "admin", PermissionAction::Read)?
        {
            return Ok(role);
        }

        Err(AppError::Forbidden(format!(
            "user '{user_id}' has no access to department '{department_id}'"
        )))
    }
}
