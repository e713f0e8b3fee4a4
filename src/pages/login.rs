//! Login Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use tracing::{info, warn};

use crate::api;
use crate::context::use_app_context;

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let user = username.get().trim().to_string();
        let pass = password.get();
        if user.is_empty() || pass.is_empty() {
            ctx.show_error("Enter your username and password");
            return;
        }

        set_busy.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::login(&ctx.api(), &user, &pass).await {
                Ok(token) => {
                    info!("[AUTH] Logged in as {}", user);
                    // App reloads the current user when the token changes
                    ctx.set_session_token(Some(token));
                    ctx.clear_banner();
                    set_password.set(String::new());
                    navigate("/problems", Default::default());
                }
                Err(e) => {
                    warn!("[AUTH] Login failed: {}", e);
                    ctx.show_api_error(&e);
                }
            }
            set_busy.set(false);
        });
    };

    view! {
        <section class="login-page">
            <h1>"Log in"</h1>
            <form class="login-form" on:submit=on_submit>
                <label>
                    "Username"
                    <input
                        type="text"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| set_username.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Password"
                    <input
                        type="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                    />
                </label>
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Logging in..." } else { "Log in" }}
                </button>
            </form>
        </section>
    }
}
