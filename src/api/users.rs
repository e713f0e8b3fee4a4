//! User Admin Endpoints

use super::{seg, ApiClient};
use crate::error::ApiError;
use crate::models::{Id, User, UserPatch};

pub async fn list_users(api: &ApiClient) -> Result<Vec<User>, ApiError> {
    api.get_json("/users/").await
}

pub async fn set_admin(api: &ApiClient, id: &Id, is_admin: bool) -> Result<User, ApiError> {
    api.put_json(&format!("/users/{}", seg(id)), &UserPatch { is_admin }).await
}

pub async fn delete_user(api: &ApiClient, id: &Id) -> Result<(), ApiError> {
    api.delete(&format!("/users/{}", seg(id)), None).await.map(|_| ())
}
