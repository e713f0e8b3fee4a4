//! Judge Frontend App
//!
//! Provides shared state and the route table.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;
use reactive_stores::Store;
use tracing::{info, warn};

use crate::api;
use crate::components::{BannerView, NavBar};
use crate::config::AppConfig;
use crate::context::AppContext;
use crate::error::ApiError;
use crate::pages::*;
use crate::store::{store_set_user, AppState, AppStateStoreFields};

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new(AppConfig::load());
    let store = Store::new(AppState::default());

    // Provide context to all children
    provide_context(ctx);
    provide_context(store);

    // Resolve who the token belongs to whenever it changes
    Effect::new(move |_| {
        if ctx.token.get().is_none() {
            store_set_user(&store, None);
            return;
        }
        store.session_checked().set(false);
        spawn_local(async move {
            match api::current_user(&ctx.api()).await {
                Ok(user) => {
                    info!("[AUTH] Session user {} (admin={})", user.username, user.is_admin);
                    store_set_user(&store, Some(user));
                }
                Err(e) => {
                    warn!("[AUTH] Session check failed: {}", e);
                    if e == ApiError::Unauthorized {
                        ctx.show_api_error(&e);
                    }
                    store_set_user(&store, None);
                }
            }
        });
    });

    view! {
        <Router>
            <NavBar />
            <main class="main-content">
                <BannerView />
                <Routes fallback=|| view! { <p class="notice">"Page not found."</p> }>
                    <Route path=path!("/") view=|| view! { <Redirect path="/problems" /> } />
                    <Route path=path!("/login") view=LoginPage />
                    <Route path=path!("/problems") view=ProblemListPage />
                    <Route path=path!("/problems/:id") view=ProblemDetailPage />
                    <Route path=path!("/contests") view=ContestListPage />
                    <Route
                        path=path!("/submissions")
                        view=|| view! { <RequireLogin><SubmissionListPage /></RequireLogin> }
                    />
                    <Route
                        path=path!("/submissions/:id")
                        view=|| view! { <RequireLogin><SubmissionDetailPage /></RequireLogin> }
                    />
                    <Route
                        path=path!("/admin/problems")
                        view=|| view! { <RequireAdmin><AdminProblemsPage /></RequireAdmin> }
                    />
                    <Route
                        path=path!("/admin/problems/new")
                        view=|| view! { <RequireAdmin><ProblemEditorPage /></RequireAdmin> }
                    />
                    <Route
                        path=path!("/admin/problems/:id/edit")
                        view=|| view! { <RequireAdmin><ProblemEditorPage /></RequireAdmin> }
                    />
                    <Route
                        path=path!("/admin/contests/new")
                        view=|| view! { <RequireAdmin><ContestEditorPage /></RequireAdmin> }
                    />
                    <Route
                        path=path!("/admin/contests/:id/edit")
                        view=|| view! { <RequireAdmin><ContestEditorPage /></RequireAdmin> }
                    />
                    <Route
                        path=path!("/admin/users")
                        view=|| view! { <RequireAdmin><AdminUsersPage /></RequireAdmin> }
                    />
                    <Route
                        path=path!("/admin/logs")
                        view=|| view! { <RequireAdmin><AdminLogsPage /></RequireAdmin> }
                    />
                </Routes>
            </main>
        </Router>
    }
}
