//! Contest Roster
//!
//! The ordered list of problems attached to a contest while it is being
//! edited. Lives only in memory; saving goes through the reconciler.
//!
//! Invariants kept by every operation:
//! - no two items share a problem id
//! - after `remove_item`, orders are exactly `1..=len`
//! - items are kept sorted by `order` (ties keep their previous positions)
//!
//! Numeric edits never panic or corrupt state: invalid input returns a
//! `FieldError` and leaves the roster untouched.

use crate::error::FieldError;
use crate::models::{ContestProblem, Id, Problem};

pub const DEFAULT_POINTS: u32 = 100;

/// A problem attached to a contest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterItem {
    pub problem_id: Id,
    pub title: String,
    pub order: u32,
    pub points: u32,
    /// Association id on the server, `None` for items added in this session
    pub remote_link_id: Option<Id>,
}

impl RosterItem {
    pub fn is_new(&self) -> bool {
        self.remote_link_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    items: Vec<RosterItem>,
    default_points: u32,
}

impl Default for Roster {
    fn default() -> Self {
        Self::with_default_points(DEFAULT_POINTS)
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_points(default_points: u32) -> Self {
        Self {
            items: Vec::new(),
            default_points,
        }
    }

    /// Hydrate from a contest loaded from the server.
    ///
    /// Titles come from the association when the backend embeds them, else
    /// from the problem pool, else the problem id is shown.
    pub fn from_associations(associations: &[ContestProblem], pool: &[Problem], default_points: u32) -> Self {
        let mut items: Vec<RosterItem> = Vec::with_capacity(associations.len());
        for assoc in associations {
            if items.iter().any(|i| i.problem_id == assoc.problem_id) {
                continue;
            }
            let title = assoc
                .title
                .clone()
                .or_else(|| pool.iter().find(|p| p.id == assoc.problem_id).map(|p| p.title.clone()))
                .unwrap_or_else(|| assoc.problem_id.to_string());
            items.push(RosterItem {
                problem_id: assoc.problem_id.clone(),
                title,
                order: assoc.order,
                points: assoc.points,
                remote_link_id: Some(assoc.id.clone()),
            });
        }
        items.sort_by_key(|i| i.order);
        Self { items, default_points }
    }

    pub fn items(&self) -> &[RosterItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, problem_id: &Id) -> bool {
        self.position(problem_id).is_some()
    }

    pub fn total_points(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.points)).sum()
    }

    fn position(&self, problem_id: &Id) -> Option<usize> {
        self.items.iter().position(|i| &i.problem_id == problem_id)
    }

    /// Append a problem at the end. Returns `false` if it is already present.
    pub fn add_item(&mut self, problem: &Problem) -> bool {
        if self.contains(&problem.id) {
            return false;
        }
        let order = self.items.len() as u32 + 1;
        self.items.push(RosterItem {
            problem_id: problem.id.clone(),
            title: problem.title.clone(),
            order,
            points: self.default_points,
            remote_link_id: None,
        });
        true
    }

    /// Remove a problem and renumber the rest to `1..=len`
    pub fn remove_item(&mut self, problem_id: &Id) -> bool {
        let Some(idx) = self.position(problem_id) else {
            return false;
        };
        self.items.remove(idx);
        self.renumber();
        true
    }

    fn renumber(&mut self) {
        for (idx, item) in self.items.iter_mut().enumerate() {
            item.order = idx as u32 + 1;
        }
    }

    /// Set an item's order from raw input and re-sort.
    ///
    /// Stable sort: if another item already has the same order, whichever was
    /// earlier in the list stays first.
    pub fn set_order(&mut self, problem_id: &Id, raw: &str) -> Result<(), FieldError> {
        let idx = self.position(problem_id).ok_or(FieldError::UnknownItem)?;
        let order = parse_bounded(raw, 1)?;
        self.items[idx].order = order;
        self.items.sort_by_key(|i| i.order);
        Ok(())
    }

    /// Set an item's points from raw input. Does not re-sort.
    pub fn set_points(&mut self, problem_id: &Id, raw: &str) -> Result<(), FieldError> {
        let idx = self.position(problem_id).ok_or(FieldError::UnknownItem)?;
        self.items[idx].points = parse_bounded(raw, 0)?;
        Ok(())
    }

    /// Swap with the previous row. No-op on the first row.
    pub fn move_up(&mut self, problem_id: &Id) -> bool {
        match self.position(problem_id) {
            Some(idx) if idx > 0 => {
                self.swap(idx - 1, idx);
                true
            }
            _ => false,
        }
    }

    /// Swap with the next row. No-op on the last row.
    pub fn move_down(&mut self, problem_id: &Id) -> bool {
        match self.position(problem_id) {
            Some(idx) if idx + 1 < self.items.len() => {
                self.swap(idx, idx + 1);
                true
            }
            _ => false,
        }
    }

    // Swaps both the order values and the positions
    fn swap(&mut self, a: usize, b: usize) {
        let order_a = self.items[a].order;
        self.items[a].order = self.items[b].order;
        self.items[b].order = order_a;
        self.items.swap(a, b);
    }

    /// Pool entries not yet in the roster whose title or tags contain `search`
    /// (case-insensitive). Recomputed on every call.
    pub fn filtered_available<'a>(
        &'a self,
        pool: &'a [Problem],
        search: &str,
    ) -> impl Iterator<Item = &'a Problem> + 'a {
        let needle = search.trim().to_lowercase();
        pool.iter()
            .filter(move |p| !self.contains(&p.id) && p.matches(&needle))
    }
}

fn parse_bounded(raw: &str, min: i64) -> Result<u32, FieldError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| FieldError::NotANumber(trimmed.to_string()))?;
    if value < min {
        return Err(FieldError::OutOfRange { value, min });
    }
    u32::try_from(value).map_err(|_| FieldError::OutOfRange { value, min })
}
