//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Id, Problem, User};

/// App-wide state shared by all pages
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Logged-in user, `None` when anonymous or not loaded yet
    pub current_user: Option<User>,
    /// Whether the stored token has been checked against `/auth/me`
    pub session_checked: bool,
    /// Cached problem pool (list page, contest editor picker)
    pub problems: Vec<Problem>,
    /// Whether `problems` has been fetched at least once
    pub problems_loaded: bool,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn is_admin(store: &AppStore) -> bool {
    store
        .current_user()
        .with(|user| user.as_ref().is_some_and(|u| u.is_admin))
}

/// Record the outcome of a session check or login
pub fn store_set_user(store: &AppStore, user: Option<User>) {
    store.current_user().set(user);
    store.session_checked().set(true);
}

/// Replace the cached problem pool
pub fn store_set_problems(store: &AppStore, problems: Vec<Problem>) {
    store.problems().set(problems);
    store.problems_loaded().set(true);
}

/// Insert or replace a problem in the cached pool
pub fn store_upsert_problem(store: &AppStore, problem: Problem) {
    let field = store.problems();
    let mut problems = field.write();
    match problems.iter_mut().find(|p| p.id == problem.id) {
        Some(existing) => *existing = problem,
        None => problems.push(problem),
    }
}

/// Remove a problem from the cached pool by ID
pub fn store_remove_problem(store: &AppStore, problem_id: &Id) {
    store.problems().write().retain(|p| &p.id != problem_id);
}

/// Forget everything tied to the current session
pub fn store_clear_session(store: &AppStore) {
    store.current_user().set(None);
    store.session_checked().set(true);
    store.problems().set(Vec::new());
    store.problems_loaded().set(false);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(id: &str, title: &str) -> Problem {
        Problem {
            id: Id::from(id),
            title: title.to_string(),
            difficulty: String::new(),
            tags: vec![],
        }
    }

    fn titles(store: &AppStore) -> Vec<String> {
        store
            .problems()
            .with_untracked(|ps| ps.iter().map(|p| p.title.clone()).collect())
    }

    #[test]
    fn test_upsert_replaces_or_appends() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());

        store_upsert_problem(&store, problem("p1", "Maze"));
        store_upsert_problem(&store, problem("p2", "Knapsack"));
        store_upsert_problem(&store, problem("p1", "Maze II"));
        assert_eq!(titles(&store), ["Maze II", "Knapsack"]);

        store_remove_problem(&store, &Id::from("p1"));
        assert_eq!(titles(&store), ["Knapsack"]);
    }
}
