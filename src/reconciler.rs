//! Contest Problem Reconciler
//!
//! Converges the server's contest-problem associations to the local roster
//! with as few calls as possible, reusing existing association rows instead
//! of deleting and recreating them.
//!
//! # Algorithm
//!
//! 1. Fetch a fresh snapshot of the associations
//! 2. Walk the roster by ascending order: update rows whose order/points
//!    differ, create rows that don't exist
//! 3. Delete rows whose problem is no longer in the roster
//! 4. Execute one call at a time through a [`SyncQueue`]
//!
//! Calls are never issued concurrently: the backend enforces unique orders per
//! contest and parallel writes would race on them. A failure stops the queue;
//! calls already made are not rolled back. Running again re-diffs against a
//! fresh snapshot, where the applied calls show up as no-ops.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{ApiError, SyncError};
use crate::models::{AssociationPatch, ContestPayload, ContestProblem, Id, NewAssociation};
use crate::roster::Roster;

/// Server state of a contest's associations at one point in time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemoteSnapshot {
    pub entries: Vec<ContestProblem>,
    /// Opaque version (HTTP `ETag`) when the backend provides one
    pub version: Option<String>,
}

/// Backend operations the contest editor needs.
///
/// Mutating association calls return the resource's new version, if any, so
/// the next call can send it as a precondition.
#[async_trait(?Send)]
pub trait ContestBackend {
    async fn create_contest(&self, payload: &ContestPayload) -> Result<Id, ApiError>;

    async fn update_contest(&self, contest_id: &Id, payload: &ContestPayload) -> Result<(), ApiError>;

    async fn fetch_snapshot(&self, contest_id: &Id) -> Result<RemoteSnapshot, ApiError>;

    async fn create_association(
        &self,
        contest_id: &Id,
        body: &NewAssociation,
    ) -> Result<Option<String>, ApiError>;

    async fn update_association(
        &self,
        contest_id: &Id,
        link_id: &Id,
        patch: &AssociationPatch,
        if_match: Option<&str>,
    ) -> Result<Option<String>, ApiError>;

    async fn delete_association(
        &self,
        contest_id: &Id,
        link_id: &Id,
        if_match: Option<&str>,
    ) -> Result<Option<String>, ApiError>;
}

/// One backend call needed to converge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOp {
    Create { problem_id: Id, order: u32, points: u32 },
    Update { link_id: Id, problem_id: Id, order: u32, points: u32 },
    Delete { link_id: Id, problem_id: Id },
}

impl fmt::Display for SyncOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOp::Create { problem_id, order, points } => {
                write!(f, "add problem {} (#{}, {} pts)", problem_id, order, points)
            }
            SyncOp::Update { link_id, problem_id, order, points } => {
                write!(f, "update problem {} via {} (#{}, {} pts)", problem_id, link_id, order, points)
            }
            SyncOp::Delete { link_id, problem_id } => {
                write!(f, "remove problem {} via {}", problem_id, link_id)
            }
        }
    }
}

/// Compute the calls that turn `snapshot` into `roster`.
///
/// If the server holds several rows for the same problem, the first is kept
/// and the rest are deleted.
pub fn plan(roster: &Roster, snapshot: &[ContestProblem]) -> Vec<SyncOp> {
    let mut matched: HashMap<&Id, &ContestProblem> = HashMap::new();
    for assoc in snapshot {
        matched.entry(&assoc.problem_id).or_insert(assoc);
    }

    let mut local: Vec<_> = roster.items().iter().collect();
    local.sort_by_key(|item| item.order);

    let mut ops = Vec::new();
    for item in local {
        match matched.get(&item.problem_id) {
            Some(remote) if remote.order == item.order && remote.points == item.points => {}
            Some(remote) => ops.push(SyncOp::Update {
                link_id: remote.id.clone(),
                problem_id: item.problem_id.clone(),
                order: item.order,
                points: item.points,
            }),
            None => ops.push(SyncOp::Create {
                problem_id: item.problem_id.clone(),
                order: item.order,
                points: item.points,
            }),
        }
    }

    for assoc in snapshot {
        let is_kept = roster.contains(&assoc.problem_id)
            && matched.get(&assoc.problem_id).is_some_and(|kept| kept.id == assoc.id);
        if !is_kept {
            ops.push(SyncOp::Delete {
                link_id: assoc.id.clone(),
                problem_id: assoc.problem_id.clone(),
            });
        }
    }

    ops
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskState {
    Pending,
    InFlight,
    Done,
    Failed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncTask {
    pub op: SyncOp,
    pub state: TaskState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
    pub pending: usize,
}

/// Sequential executor for a planned batch.
///
/// Tasks move `Pending -> InFlight -> Done | Failed`. `run` starts from the
/// first task that isn't `Done`, so calling it again after a failure resumes
/// the batch.
#[derive(Debug, Clone)]
pub struct SyncQueue {
    contest_id: Id,
    tasks: Vec<SyncTask>,
    version: Option<String>,
}

impl SyncQueue {
    pub fn new(contest_id: Id, ops: Vec<SyncOp>, version: Option<String>) -> Self {
        Self {
            contest_id,
            tasks: ops
                .into_iter()
                .map(|op| SyncTask { op, state: TaskState::Pending })
                .collect(),
            version,
        }
    }

    pub fn tasks(&self) -> &[SyncTask] {
        &self.tasks
    }

    pub fn is_complete(&self) -> bool {
        self.tasks.iter().all(|t| t.state == TaskState::Done)
    }

    pub fn report(&self) -> SyncReport {
        let mut report = SyncReport {
            total: self.tasks.len(),
            ..Default::default()
        };
        for task in &self.tasks {
            match task.state {
                TaskState::Done => report.done += 1,
                TaskState::Failed(_) => report.failed += 1,
                TaskState::Pending | TaskState::InFlight => report.pending += 1,
            }
        }
        report
    }

    pub async fn run<B: ContestBackend + ?Sized>(&mut self, backend: &B) -> Result<SyncReport, SyncError> {
        for idx in 0..self.tasks.len() {
            if self.tasks[idx].state == TaskState::Done {
                continue;
            }
            self.tasks[idx].state = TaskState::InFlight;
            debug!("[SYNC] {}", self.tasks[idx].op);

            let result = execute(backend, &self.contest_id, &self.tasks[idx].op, self.version.as_deref()).await;
            match result {
                Ok(version) => {
                    self.version = version;
                    self.tasks[idx].state = TaskState::Done;
                }
                Err(e) => {
                    warn!("[SYNC] Failed to {}: {}", self.tasks[idx].op, e);
                    self.tasks[idx].state = TaskState::Failed(e.clone());
                    let report = self.report();
                    return Err(SyncError::Interrupted {
                        source: e,
                        applied: report.done,
                        total: report.total,
                    });
                }
            }
        }
        Ok(self.report())
    }
}

async fn execute<B: ContestBackend + ?Sized>(
    backend: &B,
    contest_id: &Id,
    op: &SyncOp,
    version: Option<&str>,
) -> Result<Option<String>, ApiError> {
    match op {
        SyncOp::Create { problem_id, order, points } => {
            let body = NewAssociation {
                problem_id: problem_id.clone(),
                order: *order,
                points: *points,
            };
            backend.create_association(contest_id, &body).await
        }
        SyncOp::Update { link_id, order, points, .. } => {
            let patch = AssociationPatch {
                order: *order,
                points: *points,
            };
            backend.update_association(contest_id, link_id, &patch, version).await
        }
        SyncOp::Delete { link_id, .. } => backend.delete_association(contest_id, link_id, version).await,
    }
}

/// Fetch a fresh snapshot, plan, and execute.
pub async fn reconcile<B: ContestBackend + ?Sized>(
    backend: &B,
    contest_id: &Id,
    roster: &Roster,
) -> Result<SyncReport, SyncError> {
    let snapshot = backend
        .fetch_snapshot(contest_id)
        .await
        .map_err(SyncError::Snapshot)?;
    let ops = plan(roster, &snapshot.entries);
    info!(
        "[SYNC] Contest {}: {} change(s) against {} remote row(s)",
        contest_id,
        ops.len(),
        snapshot.entries.len()
    );

    let mut queue = SyncQueue::new(contest_id.clone(), ops, snapshot.version);
    queue.run(backend).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Problem;
    use crate::testing::{assoc, Call, FakeBackend};

    fn roster(entries: &[(&str, u32, u32)]) -> Roster {
        let mut roster = Roster::new();
        for (id, _, _) in entries {
            roster.add_item(&Problem {
                id: Id::from(*id),
                title: id.to_string(),
                difficulty: String::new(),
                tags: vec![],
            });
        }
        for (id, order, points) in entries {
            roster.set_points(&Id::from(*id), &points.to_string()).unwrap();
            roster.set_order(&Id::from(*id), &order.to_string()).unwrap();
        }
        roster
    }

    fn contest() -> Id {
        Id::from("c1")
    }

    #[test]
    fn test_plan_create_only() {
        let ops = plan(&roster(&[("p1", 1, 100)]), &[]);
        assert_eq!(
            ops,
            vec![SyncOp::Create { problem_id: Id::from("p1"), order: 1, points: 100 }]
        );
    }

    #[test]
    fn test_plan_single_combined_update() {
        let ops = plan(&roster(&[("p1", 2, 50)]), &[assoc("a1", "p1", 1, 50)]);
        assert_eq!(
            ops,
            vec![SyncOp::Update { link_id: Id::from("a1"), problem_id: Id::from("p1"), order: 2, points: 50 }]
        );
    }

    #[test]
    fn test_plan_delete_only() {
        let ops = plan(&Roster::new(), &[assoc("a1", "p1", 1, 100)]);
        assert_eq!(ops, vec![SyncOp::Delete { link_id: Id::from("a1"), problem_id: Id::from("p1") }]);
    }

    #[test]
    fn test_plan_unchanged_is_empty() {
        let ops = plan(
            &roster(&[("p1", 1, 100), ("p2", 2, 200)]),
            &[assoc("a2", "p2", 2, 200), assoc("a1", "p1", 1, 100)],
        );
        assert!(ops.is_empty());
    }

    #[test]
    fn test_plan_walks_roster_by_order_then_deletes() {
        let ops = plan(
            &roster(&[("p3", 1, 10), ("p1", 2, 10)]),
            &[assoc("a1", "p1", 1, 10), assoc("a2", "p2", 2, 10)],
        );
        assert_eq!(
            ops,
            vec![
                SyncOp::Create { problem_id: Id::from("p3"), order: 1, points: 10 },
                SyncOp::Update { link_id: Id::from("a1"), problem_id: Id::from("p1"), order: 2, points: 10 },
                SyncOp::Delete { link_id: Id::from("a2"), problem_id: Id::from("p2") },
            ]
        );
    }

    #[test]
    fn test_plan_removes_duplicate_remote_rows() {
        let ops = plan(
            &roster(&[("p1", 1, 100)]),
            &[assoc("a1", "p1", 1, 100), assoc("a7", "p1", 2, 100)],
        );
        assert_eq!(ops, vec![SyncOp::Delete { link_id: Id::from("a7"), problem_id: Id::from("p1") }]);
    }

    #[tokio::test]
    async fn test_reconcile_creates_into_empty_contest() {
        let backend = FakeBackend::new(vec![]);
        let report = reconcile(&backend, &contest(), &roster(&[("p1", 1, 100)])).await.unwrap();

        assert_eq!(report, SyncReport { total: 1, done: 1, failed: 0, pending: 0 });
        assert_eq!(
            backend.mutations(),
            vec![Call::Create { problem_id: "p1".to_string(), order: 1, points: 100 }]
        );
    }

    #[tokio::test]
    async fn test_reconcile_issues_one_update() {
        let backend = FakeBackend::new(vec![assoc("a1", "p1", 1, 50)]);
        reconcile(&backend, &contest(), &roster(&[("p1", 2, 50)])).await.unwrap();

        assert_eq!(
            backend.mutations(),
            vec![Call::Update { link_id: "a1".to_string(), order: 2, points: 50, if_match: None }]
        );
    }

    #[tokio::test]
    async fn test_reconcile_empty_roster_deletes() {
        let backend = FakeBackend::new(vec![assoc("a1", "p1", 1, 100)]);
        reconcile(&backend, &contest(), &Roster::new()).await.unwrap();

        assert_eq!(
            backend.mutations(),
            vec![Call::Delete { link_id: "a1".to_string(), if_match: None }]
        );
        assert!(backend.state().is_empty());
    }

    #[tokio::test]
    async fn test_reconcile_converges_and_is_idempotent() {
        let backend = FakeBackend::new(vec![
            assoc("a1", "p1", 1, 100),
            assoc("a2", "p2", 2, 100),
            assoc("a3", "p3", 3, 100),
        ]);
        let local = roster(&[("p3", 1, 300), ("p4", 2, 50), ("p1", 3, 100)]);

        reconcile(&backend, &contest(), &local).await.unwrap();
        assert_eq!(
            backend.state(),
            vec![
                ("p1".to_string(), 3, 100),
                ("p3".to_string(), 1, 300),
                ("p4".to_string(), 2, 50),
            ]
        );
        // a3 and a1 were reused, not recreated
        assert!(backend.rows().iter().any(|r| r.id == Id::from("a3")));
        assert!(backend.rows().iter().any(|r| r.id == Id::from("a1")));

        let before = backend.mutations().len();
        let report = reconcile(&backend, &contest(), &local).await.unwrap();
        assert_eq!(report.total, 0);
        assert_eq!(backend.mutations().len(), before);
    }

    #[tokio::test]
    async fn test_failure_stops_and_resume_finishes() {
        let backend = FakeBackend::new(vec![assoc("a1", "p1", 1, 100)]);
        let local = roster(&[("p2", 1, 100), ("p3", 2, 100)]);
        let snapshot = backend.fetch_snapshot(&contest()).await.unwrap();
        let mut queue = SyncQueue::new(contest(), plan(&local, &snapshot.entries), snapshot.version);
        assert_eq!(queue.report().pending, 3);

        backend.fail_mutation_at(1);
        let err = queue.run(&backend).await.unwrap_err();
        assert_eq!(
            err,
            SyncError::Interrupted {
                source: ApiError::Transport("injected failure".to_string()),
                applied: 1,
                total: 3,
            }
        );
        assert_eq!(queue.tasks()[0].state, TaskState::Done);
        assert!(matches!(queue.tasks()[1].state, TaskState::Failed(_)));
        assert_eq!(queue.tasks()[2].state, TaskState::Pending);
        // No rollback: p2 is on the server, p1 still there
        assert_eq!(backend.state().len(), 2);

        backend.clear_failure();
        let report = queue.run(&backend).await.unwrap();
        assert!(queue.is_complete());
        assert_eq!(report, SyncReport { total: 3, done: 3, failed: 0, pending: 0 });
        assert_eq!(
            backend.state(),
            vec![("p2".to_string(), 1, 100), ("p3".to_string(), 2, 100)]
        );
    }

    #[tokio::test]
    async fn test_rerun_after_failure_converges() {
        let backend = FakeBackend::new(vec![]);
        let local = roster(&[("p1", 1, 100), ("p2", 2, 100), ("p3", 3, 100)]);

        backend.fail_mutation_at(2);
        assert!(reconcile(&backend, &contest(), &local).await.is_err());
        backend.clear_failure();

        let report = reconcile(&backend, &contest(), &local).await.unwrap();
        assert_eq!(report.total, 1);
        assert_eq!(backend.state().len(), 3);
    }

    #[tokio::test]
    async fn test_snapshot_failure_issues_no_mutations() {
        let backend = FakeBackend::new(vec![]);
        backend.fail_snapshot();
        let err = reconcile(&backend, &contest(), &roster(&[("p1", 1, 1)])).await.unwrap_err();
        assert!(matches!(err, SyncError::Snapshot(_)));
        assert!(backend.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_versioned_calls_send_if_match() {
        let backend = FakeBackend::new(vec![assoc("a1", "p1", 1, 100), assoc("a2", "p2", 2, 100)]).with_versioning();
        reconcile(&backend, &contest(), &roster(&[("p1", 1, 70)])).await.unwrap();

        assert_eq!(
            backend.mutations(),
            vec![
                Call::Update { link_id: "a1".to_string(), order: 1, points: 70, if_match: Some("v0".to_string()) },
                Call::Delete { link_id: "a2".to_string(), if_match: Some("v1".to_string()) },
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_change_surfaces_conflict() {
        let backend = FakeBackend::new(vec![assoc("a1", "p1", 1, 100)]).with_versioning();
        let local = roster(&[("p1", 1, 5)]);
        let snapshot = backend.fetch_snapshot(&contest()).await.unwrap();
        let mut queue = SyncQueue::new(contest(), plan(&local, &snapshot.entries), snapshot.version);

        backend.touch_externally();
        let err = queue.run(&backend).await.unwrap_err();
        assert_eq!(err.api_error(), &ApiError::Conflict);
        assert_eq!(backend.state(), vec![("p1".to_string(), 1, 100)]);
    }
}
