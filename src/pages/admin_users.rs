//! Admin: User Management

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;

use crate::api;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::User;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (users, set_users) = signal(Vec::<User>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::list_users(&ctx.api()).await {
                Ok(list) => set_users.set(list),
                Err(e) => ctx.show_api_error(&e),
            }
        });
    });

    let is_self = move |user: &User| {
        store
            .current_user()
            .with(|me| me.as_ref().is_some_and(|me| me.id == user.id))
    };

    view! {
        <section class="admin-users-page">
            <h1>"Users"</h1>
            <table class="user-table">
                <thead>
                    <tr>
                        <th>"ID"</th>
                        <th>"Username"</th>
                        <th>"Email"</th>
                        <th>"Admin"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || users.get()
                        key=|u| (u.id.clone(), u.is_admin)
                        children=move |user: User| {
                            let myself = is_self(&user);
                            let toggle_id = user.id.clone();
                            let make_admin = !user.is_admin;
                            let on_toggle = move |_| {
                                let id = toggle_id.clone();
                                spawn_local(async move {
                                    match api::set_admin(&ctx.api(), &id, make_admin).await {
                                        Ok(updated) => {
                                            info!("[USERS] {} admin={}", updated.username, updated.is_admin);
                                            set_users.update(|list| {
                                                if let Some(u) = list.iter_mut().find(|u| u.id == updated.id) {
                                                    *u = updated;
                                                }
                                            });
                                        }
                                        Err(e) => ctx.show_api_error(&e),
                                    }
                                });
                            };
                            let delete_id = user.id.clone();
                            let subject = format!("user \"{}\"", user.username);
                            let (deleting, set_deleting) = signal(false);
                            let on_delete = Callback::new(move |_| {
                                let id = delete_id.clone();
                                set_deleting.set(true);
                                spawn_local(async move {
                                    match api::delete_user(&ctx.api(), &id).await {
                                        Ok(()) => {
                                            info!("[USERS] Deleted user {}", id);
                                            set_users.update(|list| list.retain(|u| u.id != id));
                                            ctx.show_info("User deleted");
                                        }
                                        Err(e) => {
                                            set_deleting.set(false);
                                            ctx.show_api_error(&e);
                                        }
                                    }
                                });
                            });
                            view! {
                                <tr>
                                    <td>{user.id.to_string()}</td>
                                    <td>{user.username.clone()}</td>
                                    <td>{user.email.clone().unwrap_or_default()}</td>
                                    <td>{if user.is_admin { "Yes" } else { "No" }}</td>
                                    <td class="row-actions">
                                        // Admins can't demote or delete themselves here
                                        <Show when=move || !myself>
                                            <button class="toggle-admin-btn" on:click=on_toggle.clone()>
                                                {if make_admin { "Make admin" } else { "Revoke admin" }}
                                            </button>
                                            <DeleteConfirmButton subject=subject.clone() pending=deleting on_confirm=on_delete />
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </section>
    }
}
