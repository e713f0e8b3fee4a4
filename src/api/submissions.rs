//! Submission Endpoints

use super::{seg, ApiClient};
use crate::error::ApiError;
use crate::models::{Id, NewSubmission, Submission};

pub async fn submit_solution(api: &ApiClient, submission: &NewSubmission) -> Result<Submission, ApiError> {
    api.post_json("/submissions/", submission).await
}

/// Own submissions, or everyone's for admins (decided by the backend)
pub async fn list_submissions(api: &ApiClient) -> Result<Vec<Submission>, ApiError> {
    api.get_json("/submissions/").await
}

pub async fn get_submission(api: &ApiClient, id: &Id) -> Result<Submission, ApiError> {
    api.get_json(&format!("/submissions/{}", seg(id))).await
}
