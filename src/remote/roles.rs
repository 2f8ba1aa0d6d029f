//! Role and permission administration.

use super::*;

impl ApiClient {
    pub async fn list_roles(&self, page: u32, size: u32) -> Result<Page<RoleResponse>, ApiError> {
        let req = ApiRequest::get("list roles", "/roles")
            .query("page", page)
            .query("size", size);
        self.call(req).await?.into_result()
    }

    pub async fn get_role(&self, role_id: &str) -> Result<RoleResponse, ApiError> {
        let req = ApiRequest::get("get role", "/roles").segment(role_id);
        self.call(req).await?.into_result()
    }

    pub async fn create_role(&self, request: &RoleRequest) -> Result<RoleResponse, ApiError> {
        require_name(&request.role_name, "Role name")?;
        let req = ApiRequest::post("create role", "/roles").json(request)?;
        self.call(req).await?.into_result()
    }

    pub async fn update_role(
        &self,
        role_id: &str,
        request: &RoleRequest,
    ) -> Result<RoleResponse, ApiError> {
        require_name(&request.role_name, "Role name")?;
        let req = ApiRequest::put("update role", "/roles").segment(role_id).json(request)?;
        self.call(req).await?.into_result()
    }

    pub async fn delete_role(&self, role_id: &str) -> Result<(), ApiError> {
        let req = ApiRequest::delete("delete role", "/roles").segment(role_id);
        self.call::<serde_json::Value>(req).await?.into_unit()
    }

    pub async fn add_permission_to_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> Result<RoleResponse, ApiError> {
        let req = ApiRequest::post("grant permission", "/roles")
            .segment(role_id)
            .segment("permissions")
            .segment(permission_id);
        self.call(req).await?.into_result()
    }

    pub async fn remove_permission_from_role(
        &self,
        role_id: &str,
        permission_id: &str,
    ) -> Result<RoleResponse, ApiError> {
        let req = ApiRequest::delete("revoke permission", "/roles")
            .segment(role_id)
            .segment("permissions")
            .segment(permission_id);
        self.call(req).await?.into_result()
    }

    pub async fn list_permissions(
        &self,
        page: u32,
        size: u32,
    ) -> Result<Page<PermissionResponse>, ApiError> {
        let req = ApiRequest::get("list permissions", "/permissions")
            .query("page", page)
            .query("size", size);
        self.call(req).await?.into_result()
    }

    pub async fn get_permission(&self, permission_id: &str) -> Result<PermissionResponse, ApiError> {
        let req = ApiRequest::get("get permission", "/permissions").segment(permission_id);
        self.call(req).await?.into_result()
    }

    pub async fn create_permission(
        &self,
        request: &PermissionRequest,
    ) -> Result<PermissionResponse, ApiError> {
        require_name(&request.permission, "Permission")?;
        let req = ApiRequest::post("create permission", "/permissions").json(request)?;
        self.call(req).await?.into_result()
    }

    pub async fn update_permission(
        &self,
        permission_id: &str,
        request: &PermissionRequest,
    ) -> Result<PermissionResponse, ApiError> {
        require_name(&request.permission, "Permission")?;
        let req = ApiRequest::put("update permission", "/permissions")
            .segment(permission_id)
            .json(request)?;
        self.call(req).await?.into_result()
    }

    pub async fn delete_permission(&self, permission_id: &str) -> Result<(), ApiError> {
        let req = ApiRequest::delete("delete permission", "/permissions").segment(permission_id);
        self.call::<serde_json::Value>(req).await?.into_unit()
    }
}

fn require_name(value: &str, what: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} is required", what)));
    }
    Ok(())
}
