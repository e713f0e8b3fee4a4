//! Auth Endpoints

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{LoginRequest, LoginResponse, User};

/// Exchange credentials for a bearer token
pub async fn login(api: &ApiClient, username: &str, password: &str) -> Result<String, ApiError> {
    let body = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };
    let resp: LoginResponse = api.post_json("/auth/login", &body).await?;
    Ok(resp.access_token)
}

pub async fn current_user(api: &ApiClient) -> Result<User, ApiError> {
    api.get_json("/auth/me").await
}
