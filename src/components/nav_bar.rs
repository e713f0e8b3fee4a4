//! Navigation Bar
//!
//! Top links, with the admin section only for admins.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;
use tracing::info;

use crate::context::use_app_context;
use crate::store::{is_admin, store_clear_session, use_app_store, AppStateStoreFields};

#[component]
pub fn NavBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = use_navigate();

    let on_logout = move |_| {
        info!("[AUTH] Logging out");
        ctx.set_session_token(None);
        store_clear_session(&store);
        ctx.show_info("Logged out");
        navigate("/login", Default::default());
    };

    view! {
        <nav class="nav-bar">
            <span class="nav-brand">"Online Judge"</span>
            <A href="/problems">"Problems"</A>
            <A href="/contests">"Contests"</A>
            <A href="/submissions">"Submissions"</A>
            <Show when=move || is_admin(&store)>
                <span class="nav-admin">
                    <A href="/admin/problems">"Manage Problems"</A>
                    <A href="/admin/contests/new">"New Contest"</A>
                    <A href="/admin/users">"Users"</A>
                    <A href="/admin/logs">"Logs"</A>
                </span>
            </Show>
            <span class="nav-spacer"></span>
            {move || match store.current_user().get() {
                Some(user) => view! {
                    <span class="nav-user">
                        <span class="nav-username">{user.username}</span>
                        <button class="nav-logout" on:click=on_logout.clone()>"Log out"</button>
                    </span>
                }
                .into_any(),
                None => view! { <A href="/login">"Log in"</A> }.into_any(),
            }}
        </nav>
    }
}
