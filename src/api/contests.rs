//! Contest Endpoints
//!
//! Also the HTTP implementation of [`ContestBackend`] used by the reconciler.

use async_trait::async_trait;

use super::{seg, ApiClient};
use crate::error::ApiError;
use crate::models::{AssociationPatch, Contest, ContestPayload, Id, NewAssociation};
use crate::reconciler::{ContestBackend, RemoteSnapshot};

pub async fn list_contests(api: &ApiClient) -> Result<Vec<Contest>, ApiError> {
    api.get_json("/contests/").await
}

pub async fn get_contest(api: &ApiClient, id: &Id) -> Result<Contest, ApiError> {
    api.get_json(&format!("/contests/{}", seg(id))).await
}

pub async fn create_contest(api: &ApiClient, payload: &ContestPayload) -> Result<Contest, ApiError> {
    api.post_json("/contests/", payload).await
}

pub async fn update_contest(api: &ApiClient, id: &Id, payload: &ContestPayload) -> Result<Contest, ApiError> {
    api.put_json(&format!("/contests/{}", seg(id)), payload).await
}

pub async fn delete_contest(api: &ApiClient, id: &Id) -> Result<(), ApiError> {
    api.delete(&format!("/contests/{}", seg(id)), None).await.map(|_| ())
}

fn association_path(contest_id: &Id, link_id: &Id) -> String {
    format!("/contests/{}/problems/{}", seg(contest_id), seg(link_id))
}

#[async_trait(?Send)]
impl ContestBackend for ApiClient {
    async fn create_contest(&self, payload: &ContestPayload) -> Result<Id, ApiError> {
        create_contest(self, payload).await.map(|c| c.id)
    }

    async fn update_contest(&self, contest_id: &Id, payload: &ContestPayload) -> Result<(), ApiError> {
        update_contest(self, contest_id, payload).await.map(|_| ())
    }

    async fn fetch_snapshot(&self, contest_id: &Id) -> Result<RemoteSnapshot, ApiError> {
        let (contest, version): (Contest, _) = self
            .get_json_versioned(&format!("/contests/{}", seg(contest_id)))
            .await?;
        Ok(RemoteSnapshot {
            entries: contest.problems,
            version,
        })
    }

    async fn create_association(&self, contest_id: &Id, body: &NewAssociation) -> Result<Option<String>, ApiError> {
        self.post_versioned(&format!("/contests/{}/problems", seg(contest_id)), body)
            .await
    }

    async fn update_association(
        &self,
        contest_id: &Id,
        link_id: &Id,
        patch: &AssociationPatch,
        if_match: Option<&str>,
    ) -> Result<Option<String>, ApiError> {
        self.put_versioned(&association_path(contest_id, link_id), patch, if_match)
            .await
    }

    async fn delete_association(
        &self,
        contest_id: &Id,
        link_id: &Id,
        if_match: Option<&str>,
    ) -> Result<Option<String>, ApiError> {
        self.delete(&association_path(contest_id, link_id), if_match).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_association_path_encodes_ids() {
        assert_eq!(
            association_path(&Id::from("7"), &Id::from("a 1")),
            "/contests/7/problems/a%201"
        );
    }
}
