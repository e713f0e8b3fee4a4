//! Problem Endpoints

use super::{seg, ApiClient};
use crate::error::ApiError;
use crate::models::{Id, Problem, ProblemDetail, ProblemPayload};

pub async fn list_problems(api: &ApiClient) -> Result<Vec<Problem>, ApiError> {
    api.get_json("/problems/").await
}

pub async fn get_problem(api: &ApiClient, id: &Id) -> Result<ProblemDetail, ApiError> {
    api.get_json(&format!("/problems/{}", seg(id))).await
}

pub async fn create_problem(api: &ApiClient, payload: &ProblemPayload) -> Result<ProblemDetail, ApiError> {
    api.post_json("/problems/", payload).await
}

pub async fn update_problem(api: &ApiClient, id: &Id, payload: &ProblemPayload) -> Result<ProblemDetail, ApiError> {
    api.put_json(&format!("/problems/{}", seg(id)), payload).await
}

pub async fn delete_problem(api: &ApiClient, id: &Id) -> Result<(), ApiError> {
    api.delete(&format!("/problems/{}", seg(id)), None).await.map(|_| ())
}
