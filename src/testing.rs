//! In-memory backend for reconciler and editor tests.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;

use crate::error::ApiError;
use crate::models::{AssociationPatch, ContestPayload, ContestProblem, Id, NewAssociation};
use crate::reconciler::{ContestBackend, RemoteSnapshot};

pub fn assoc(link_id: &str, problem_id: &str, order: u32, points: u32) -> ContestProblem {
    ContestProblem {
        id: Id::from(link_id),
        problem_id: Id::from(problem_id),
        order,
        points,
        title: None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateContest { title: String },
    UpdateContest { contest_id: String },
    FetchSnapshot { contest_id: String },
    Create { problem_id: String, order: u32, points: u32 },
    Update { link_id: String, order: u32, points: u32, if_match: Option<String> },
    Delete { link_id: String, if_match: Option<String> },
}

impl Call {
    fn is_mutation(&self) -> bool {
        matches!(self, Call::Create { .. } | Call::Update { .. } | Call::Delete { .. })
    }
}

/// Records every call; association writes go to a single contest's rows
#[derive(Default)]
pub struct FakeBackend {
    rows: RefCell<Vec<ContestProblem>>,
    calls: RefCell<Vec<Call>>,
    next_link: Cell<u32>,
    attempts: Cell<usize>,
    fail_at: Cell<Option<usize>>,
    snapshot_fails: Cell<bool>,
    version: Cell<Option<u32>>,
}

impl FakeBackend {
    pub fn new(rows: Vec<ContestProblem>) -> Self {
        Self {
            rows: RefCell::new(rows),
            next_link: Cell::new(100),
            ..Default::default()
        }
    }

    /// Report an ETag and enforce `If-Match` on updates and deletes
    pub fn with_versioning(self) -> Self {
        self.version.set(Some(0));
        self
    }

    /// Fail the n-th association write (0-based, counted across runs)
    pub fn fail_mutation_at(&self, n: usize) {
        self.fail_at.set(Some(n));
    }

    pub fn clear_failure(&self) {
        self.fail_at.set(None);
    }

    pub fn fail_snapshot(&self) {
        self.snapshot_fails.set(true);
    }

    /// Simulate another admin editing the contest
    pub fn touch_externally(&self) {
        if let Some(v) = self.version.get() {
            self.version.set(Some(v + 1));
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls.borrow().iter().filter(|c| c.is_mutation()).cloned().collect()
    }

    pub fn rows(&self) -> Vec<ContestProblem> {
        self.rows.borrow().clone()
    }

    /// `(problem_id, order, points)` sorted by problem id
    pub fn state(&self) -> Vec<(String, u32, u32)> {
        let mut state: Vec<_> = self
            .rows
            .borrow()
            .iter()
            .map(|r| (r.problem_id.to_string(), r.order, r.points))
            .collect();
        state.sort();
        state
    }

    fn current_version(&self) -> Option<String> {
        self.version.get().map(|v| format!("v{}", v))
    }

    fn begin_write(&self, if_match: Option<&str>) -> Result<(), ApiError> {
        let attempt = self.attempts.get();
        self.attempts.set(attempt + 1);
        if self.fail_at.get() == Some(attempt) {
            return Err(ApiError::Transport("injected failure".to_string()));
        }
        if let (Some(expected), Some(current)) = (if_match, self.current_version()) {
            if expected != current {
                return Err(ApiError::Conflict);
            }
        }
        Ok(())
    }

    fn finish_write(&self, call: Call) -> Option<String> {
        self.calls.borrow_mut().push(call);
        if let Some(v) = self.version.get() {
            self.version.set(Some(v + 1));
        }
        self.current_version()
    }
}

#[async_trait(?Send)]
impl ContestBackend for FakeBackend {
    async fn create_contest(&self, payload: &ContestPayload) -> Result<Id, ApiError> {
        self.calls.borrow_mut().push(Call::CreateContest {
            title: payload.title.clone(),
        });
        Ok(Id::from("c-new"))
    }

    async fn update_contest(&self, contest_id: &Id, _payload: &ContestPayload) -> Result<(), ApiError> {
        self.calls.borrow_mut().push(Call::UpdateContest {
            contest_id: contest_id.to_string(),
        });
        Ok(())
    }

    async fn fetch_snapshot(&self, contest_id: &Id) -> Result<RemoteSnapshot, ApiError> {
        self.calls.borrow_mut().push(Call::FetchSnapshot {
            contest_id: contest_id.to_string(),
        });
        if self.snapshot_fails.get() {
            return Err(ApiError::Transport("snapshot unavailable".to_string()));
        }
        Ok(RemoteSnapshot {
            entries: self.rows(),
            version: self.current_version(),
        })
    }

    async fn create_association(&self, _contest_id: &Id, body: &NewAssociation) -> Result<Option<String>, ApiError> {
        self.begin_write(None)?;
        let link = self.next_link.get();
        self.next_link.set(link + 1);
        self.rows.borrow_mut().push(ContestProblem {
            id: Id::new(format!("a{}", link)),
            problem_id: body.problem_id.clone(),
            order: body.order,
            points: body.points,
            title: None,
        });
        Ok(self.finish_write(Call::Create {
            problem_id: body.problem_id.to_string(),
            order: body.order,
            points: body.points,
        }))
    }

    async fn update_association(
        &self,
        _contest_id: &Id,
        link_id: &Id,
        patch: &AssociationPatch,
        if_match: Option<&str>,
    ) -> Result<Option<String>, ApiError> {
        self.begin_write(if_match)?;
        {
            let mut rows = self.rows.borrow_mut();
            let row = rows
                .iter_mut()
                .find(|r| &r.id == link_id)
                .ok_or(ApiError::Rejected { status: 404, detail: None })?;
            row.order = patch.order;
            row.points = patch.points;
        }
        Ok(self.finish_write(Call::Update {
            link_id: link_id.to_string(),
            order: patch.order,
            points: patch.points,
            if_match: if_match.map(str::to_string),
        }))
    }

    async fn delete_association(
        &self,
        _contest_id: &Id,
        link_id: &Id,
        if_match: Option<&str>,
    ) -> Result<Option<String>, ApiError> {
        self.begin_write(if_match)?;
        self.rows.borrow_mut().retain(|r| &r.id != link_id);
        Ok(self.finish_write(Call::Delete {
            link_id: link_id.to_string(),
            if_match: if_match.map(str::to_string),
        }))
    }
}
