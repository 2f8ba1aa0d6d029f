use super::*;

pub const DEFAULT_USER_PAGE_SIZE: u32 = 12;

impl ApiClient {
    /// `GET /users?page&size`.
    pub async fn list_users(&self, page: u32, size: u32) -> Result<Page<UserResponse>, ApiError> {
        let req = ApiRequest::get("list users", "/users")
            .query("page", page)
            .query("size", size);
        self.call(req).await?.into_result()
    }

    /// `GET /users/{id}`, returning the envelope so callers can tell a
    /// non-success code from a transport failure.
    pub async fn get_user_response(
        &self,
        user_id: &str,
    ) -> Result<ApiResponse<UserResponse>, ApiError> {
        let req = ApiRequest::get("get user", "/users").segment(user_id);
        self.call(req).await
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserResponse, ApiError> {
        self.get_user_response(user_id).await?.into_result()
    }

    /// `POST /users`.
    pub async fn create_user(&self, request: &RegisterRequest) -> Result<UserResponse, ApiError> {
        if request.username.trim().is_empty() || request.password.is_empty() {
            return Err(ApiError::Validation(
                "Username and password are required".to_string(),
            ));
        }
        if request.mail.trim().is_empty() {
            return Err(ApiError::Validation("Email is required".to_string()));
        }
        let req = ApiRequest::post("create user", "/users").json(request)?;
        self.call(req).await?.into_result()
    }

    /// `PUT /users/{id}`.
    pub async fn update_user(
        &self,
        user_id: &str,
        request: &UserUpdateRequest,
    ) -> Result<UserResponse, ApiError> {
        if request.username.trim().is_empty() {
            return Err(ApiError::Validation("Username is required".to_string()));
        }
        let req = ApiRequest::put("update user", "/users").segment(user_id).json(request)?;
        self.call(req).await?.into_result()
    }

    /// `DELETE /users/{id}`.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let req = ApiRequest::delete("delete user", "/users").segment(user_id);
        self.call::<serde_json::Value>(req).await?.into_unit()
    }
}
