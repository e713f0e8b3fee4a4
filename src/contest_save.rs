//! Contest Save Flow
//!
//! Validate, write the contest's own fields, then reconcile its problems.

use tracing::info;

use crate::error::SubmitError;
use crate::models::Id;
use crate::reconciler::{reconcile, ContestBackend, SyncReport};
use crate::roster::Roster;
use crate::validator::{validate_contest, ContestForm};

/// Result of pressing "Save".
///
/// `contest_id` is set as soon as the contest exists on the server, even if
/// a later step failed, so the editor can switch to edit mode before retrying
/// instead of creating a second contest.
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub contest_id: Option<Id>,
    pub result: Result<SyncReport, SubmitError>,
}

impl SaveOutcome {
    fn failed(contest_id: Option<Id>, error: impl Into<SubmitError>) -> Self {
        Self {
            contest_id,
            result: Err(error.into()),
        }
    }
}

pub async fn save_contest<B: ContestBackend + ?Sized>(
    backend: &B,
    existing: Option<&Id>,
    form: &ContestForm,
    roster: &Roster,
) -> SaveOutcome {
    let draft = match validate_contest(form, roster) {
        Ok(draft) => draft,
        Err(e) => return SaveOutcome::failed(existing.cloned(), e),
    };
    let payload = draft.payload();

    let contest_id = match existing {
        Some(id) => {
            if let Err(e) = backend.update_contest(id, &payload).await {
                return SaveOutcome::failed(Some(id.clone()), e);
            }
            id.clone()
        }
        None => match backend.create_contest(&payload).await {
            Ok(id) => {
                info!("[CONTEST] Created contest {}", id);
                id
            }
            Err(e) => return SaveOutcome::failed(None, e),
        },
    };

    let result = reconcile(backend, &contest_id, roster).await.map_err(SubmitError::from);
    SaveOutcome {
        contest_id: Some(contest_id),
        result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::Problem;
    use crate::testing::{assoc, Call, FakeBackend};

    fn form() -> ContestForm {
        ContestForm {
            title: "Spring Cup".to_string(),
            description: "Qualifier".to_string(),
            start_time: "2024-04-01T09:00".to_string(),
            end_time: "2024-04-01T13:00".to_string(),
        }
    }

    fn roster_with(ids: &[&str]) -> Roster {
        let mut roster = Roster::new();
        for id in ids {
            roster.add_item(&Problem {
                id: Id::from(*id),
                title: id.to_string(),
                difficulty: String::new(),
                tags: vec![],
            });
        }
        roster
    }

    #[tokio::test]
    async fn test_invalid_form_makes_no_calls() {
        let backend = FakeBackend::new(vec![assoc("a1", "p1", 1, 100)]);

        let mut bad = form();
        bad.title = String::new();
        let outcome = save_contest(&backend, Some(&Id::from("c1")), &bad, &roster_with(&["p1"])).await;
        assert_eq!(outcome.result, Err(SubmitError::Invalid(ValidationError::MissingTitle)));

        let mut bad = form();
        bad.end_time = bad.start_time.clone();
        let outcome = save_contest(&backend, None, &bad, &roster_with(&["p1"])).await;
        assert_eq!(outcome.result, Err(SubmitError::Invalid(ValidationError::EndNotAfterStart)));

        let outcome = save_contest(&backend, Some(&Id::from("c1")), &form(), &Roster::new()).await;
        assert_eq!(outcome.result, Err(SubmitError::Invalid(ValidationError::EmptyRoster)));

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_orders_never_reach_backend() {
        let backend = FakeBackend::new(vec![]);
        let mut roster = roster_with(&["p1", "p2", "p3"]);
        roster.set_order(&Id::from("p3"), "1").unwrap();

        let outcome = save_contest(&backend, None, &form(), &roster).await;
        assert_eq!(outcome.result, Err(SubmitError::Invalid(ValidationError::DuplicateOrder(1))));
        assert_eq!(outcome.contest_id, None);
        assert!(backend.calls().is_empty());
        assert!(backend.rows().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_attach_problems() {
        let backend = FakeBackend::new(vec![]);
        let outcome = save_contest(&backend, None, &form(), &roster_with(&["p1", "p2"])).await;

        assert_eq!(outcome.contest_id, Some(Id::from("c-new")));
        assert_eq!(outcome.result.unwrap().done, 2);
        let calls = backend.calls();
        assert_eq!(calls[0], Call::CreateContest { title: "Spring Cup".to_string() });
        assert_eq!(calls[1], Call::FetchSnapshot { contest_id: "c-new".to_string() });
        assert_eq!(calls.len(), 4);
    }

    #[tokio::test]
    async fn test_edit_updates_then_reconciles() {
        let backend = FakeBackend::new(vec![assoc("a1", "p1", 1, 100)]);
        let outcome = save_contest(&backend, Some(&Id::from("c1")), &form(), &roster_with(&["p1"])).await;

        assert!(outcome.result.is_ok());
        assert_eq!(
            backend.calls(),
            vec![
                Call::UpdateContest { contest_id: "c1".to_string() },
                Call::FetchSnapshot { contest_id: "c1".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_failed_sync_still_reports_new_contest() {
        let backend = FakeBackend::new(vec![]);
        backend.fail_mutation_at(0);
        let outcome = save_contest(&backend, None, &form(), &roster_with(&["p1"])).await;

        assert_eq!(outcome.contest_id, Some(Id::from("c-new")));
        assert!(matches!(outcome.result, Err(SubmitError::Sync(_))));
    }
}
