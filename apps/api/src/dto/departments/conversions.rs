use ombaro_application::{
    AssignUserInput, CreateDepartmentInput, LogActivityInput, SaveWidgetInput,
    UpdateDepartmentInput,
};
use ombaro_core::AppResult;
use ombaro_domain::{
    Department, DepartmentActivityLog, DepartmentModule, DepartmentModuleNode,
    DepartmentUserAssignment, DepartmentWidget, UserId,
};
use uuid::Uuid;

use super::types::{
    AssignUserRequest, CreateDepartmentRequest, DepartmentActivityResponse,
    DepartmentAssignmentResponse, DepartmentModuleNodeResponse, DepartmentModuleResponse,
    DepartmentResponse, DepartmentWidgetResponse, LogActivityRequest, SaveWidgetRequest,
    UpdateDepartmentRequest,
};
use crate::dto::common::{format_timestamp, parse_uuid};

impl From<Department> for DepartmentResponse {
    fn from(department: Department) -> Self {
        Self {
            id: department.id.to_string(),
            name: department.name.as_str().to_owned(),
            code: department.code.as_str().to_owned(),
            description: department.description,
            parent_department_id: department.parent_department_id.map(|id| id.to_string()),
            head_user_id: department.head_user_id.map(|id| id.to_string()),
            department_type: department.department_type.as_str().to_owned(),
            status: department.status.as_str().to_owned(),
            email: department.email,
            phone: department.phone,
            location: department.location,
            budget_allocated: department.budget_allocated,
            employee_count: department.employee_count,
            settings: department.settings,
            created_at: format_timestamp(department.created_at),
            updated_at: format_timestamp(department.updated_at),
        }
    }
}

impl TryFrom<CreateDepartmentRequest> for CreateDepartmentInput {
    type Error = ombaro_core::AppError;

    fn try_from(request: CreateDepartmentRequest) -> AppResult<Self> {
        Ok(Self {
            name: request.name,
            code: request.code,
            description: request.description,
            department_type: request.department_type.parse()?,
            parent_department_id: request
                .parent_department_id
                .as_deref()
                .map(|value| parse_uuid(value, "parent_department_id"))
                .transpose()?,
            email: request.email,
            phone: request.phone,
            location: request.location,
            budget_allocated: request.budget_allocated,
        })
    }
}

impl TryFrom<UpdateDepartmentRequest> for UpdateDepartmentInput {
    type Error = ombaro_core::AppError;

    fn try_from(request: UpdateDepartmentRequest) -> AppResult<Self> {
        Ok(Self {
            name: request.name,
            description: request.description,
            department_type: request
                .department_type
                .map(|value| value.parse())
                .transpose()?,
            status: request.status.map(|value| value.parse()).transpose()?,
            head_user_id: request
                .head_user_id
                .as_deref()
                .map(UserId::parse)
                .transpose()?,
            email: request.email,
            phone: request.phone,
            location: request.location,
            budget_allocated: request.budget_allocated,
            employee_count: request.employee_count,
            settings: request.settings,
        })
    }
}

impl From<DepartmentModule> for DepartmentModuleResponse {
    fn from(module: DepartmentModule) -> Self {
        Self {
            id: module.id.to_string(),
            department_id: module.department_id.to_string(),
            module_key: module.module_key,
            module_name: module.module_name,
            description: module.description,
            icon: module.icon,
            display_order: module.display_order,
            is_enabled: module.is_enabled,
            parent_module_id: module.parent_module_id.map(|id| id.to_string()),
            required_permissions: module.required_permissions,
        }
    }
}

impl From<DepartmentModuleNode> for DepartmentModuleNodeResponse {
    fn from(node: DepartmentModuleNode) -> Self {
        Self {
            module: DepartmentModuleResponse::from(node.module),
            sub_modules: node
                .sub_modules
                .into_iter()
                .map(DepartmentModuleResponse::from)
                .collect(),
        }
    }
}

impl From<DepartmentUserAssignment> for DepartmentAssignmentResponse {
    fn from(assignment: DepartmentUserAssignment) -> Self {
        Self {
            id: assignment.id.to_string(),
            user_id: assignment.user_id.to_string(),
            department_id: assignment.department_id.to_string(),
            role_id: assignment.role_id,
            assignment_type: assignment.assignment_type.as_str().to_owned(),
            is_primary: assignment.is_primary,
            status: assignment.status.as_str().to_owned(),
            assigned_at: format_timestamp(assignment.assigned_at),
            valid_from: format_timestamp(assignment.valid_from),
            valid_until: assignment.valid_until.map(format_timestamp),
        }
    }
}

impl AssignUserRequest {
    pub fn into_input(self, department_id: Uuid) -> AppResult<AssignUserInput> {
        Ok(AssignUserInput {
            user_id: UserId::parse(&self.user_id)?,
            department_id,
            assignment_type: self.assignment_type.parse()?,
            is_primary: self.is_primary,
            role_id: self.role_id,
        })
    }
}

impl From<DepartmentWidget> for DepartmentWidgetResponse {
    fn from(widget: DepartmentWidget) -> Self {
        Self {
            id: widget.id.to_string(),
            department_id: widget.department_id.to_string(),
            widget_type: widget.widget_type.as_str().to_owned(),
            widget_key: widget.widget_key,
            title: widget.title.as_str().to_owned(),
            configuration: widget.configuration,
            position: widget.position,
            is_visible: widget.is_visible,
            display_order: widget.display_order,
        }
    }
}

impl SaveWidgetRequest {
    pub fn into_input(self, department_id: Uuid) -> AppResult<SaveWidgetInput> {
        Ok(SaveWidgetInput {
            id: self
                .id
                .as_deref()
                .map(|value| parse_uuid(value, "widget id"))
                .transpose()?,
            department_id,
            widget_type: self.widget_type.parse()?,
            widget_key: self.widget_key,
            title: self.title,
            configuration: self.configuration,
            position: self.position,
            is_visible: self.is_visible,
            display_order: self.display_order,
        })
    }
}

impl From<DepartmentActivityLog> for DepartmentActivityResponse {
    fn from(entry: DepartmentActivityLog) -> Self {
        Self {
            id: entry.id.to_string(),
            department_id: entry.department_id.to_string(),
            user_id: entry.user_id.to_string(),
            action: entry.action,
            module_key: entry.module_key,
            resource_type: entry.resource_type,
            resource_id: entry.resource_id,
            description: entry.description,
            metadata: entry.metadata,
            created_at: format_timestamp(entry.created_at),
        }
    }
}

impl From<LogActivityRequest> for LogActivityInput {
    fn from(request: LogActivityRequest) -> Self {
        Self {
            action: request.action,
            module_key: request.module_key,
            resource_type: request.resource_type,
            resource_id: request.resource_id,
            description: request.description,
            metadata: request.metadata,
        }
    }
}
