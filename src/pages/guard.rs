//! Route Guards
//!
//! Anonymous visitors are sent to the login page; admin pages show a notice
//! to everyone else.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::context::use_app_context;
use crate::store::{is_admin, use_app_store, AppStateStoreFields};

#[component]
pub fn RequireLogin(children: ChildrenFn) -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if ctx.token.get().is_none() {
            navigate("/login", Default::default());
        }
    });

    view! {
        <Show when=move || ctx.token.get().is_some()>
            {children()}
        </Show>
    }
}

#[component]
pub fn RequireAdmin(children: ChildrenFn) -> impl IntoView {
    let store = use_app_store();
    let children = StoredValue::new(children);

    view! {
        <RequireLogin>
            {move || {
                if !store.session_checked().get() {
                    view! { <p class="loading">"Checking session..."</p> }.into_any()
                } else if is_admin(&store) {
                    children.with_value(|children| children()).into_any()
                } else {
                    view! { <p class="notice">"This page requires administrator access."</p> }.into_any()
                }
            }}
        </RequireLogin>
    }
}
