//! Admin: Problem Management

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use tracing::info;

use crate::api;
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::Problem;
use crate::pages::problem_list::refresh_problems;
use crate::store::{store_remove_problem, use_app_store, AppStateStoreFields};

#[component]
pub fn AdminProblemsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    // Always refetch; other admins may have changed the pool
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        refresh_problems(ctx, store);
    });

    view! {
        <section class="admin-problems-page">
            <div class="page-header">
                <h1>"Manage problems"</h1>
                <A href="/admin/problems/new">"New problem"</A>
            </div>
            <table class="problem-table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Title"</th>
                        <th>"Difficulty"</th>
                        <th>"Tags"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || store.problems().get()
                        key=|p| p.id.clone()
                        children=move |problem: Problem| {
                            let edit_href = format!("/admin/problems/{}/edit", api::seg(&problem.id));
                            let problem_id = problem.id.clone();
                            let subject = format!("problem \"{}\"", problem.title);
                            let (deleting, set_deleting) = signal(false);
                            let on_delete = Callback::new(move |_| {
                                let id = problem_id.clone();
                                set_deleting.set(true);
                                spawn_local(async move {
                                    match api::delete_problem(&ctx.api(), &id).await {
                                        Ok(()) => {
                                            info!("[PROBLEMS] Deleted problem {}", id);
                                            store_remove_problem(&store, &id);
                                            ctx.show_info("Problem deleted");
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
                                    <td>{problem.id.to_string()}</td>
                                    <td>{problem.title.clone()}</td>
                                    <td class="difficulty">{problem.difficulty.clone()}</td>
                                    <td class="tags">{problem.tags.join(", ")}</td>
                                    <td class="row-actions">
                                        <A href=edit_href>"Edit"</A>
                                        <DeleteConfirmButton subject=subject pending=deleting on_confirm=on_delete />
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
