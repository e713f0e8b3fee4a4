//! Contest List Page

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use tracing::info;

use crate::api;
use crate::clock::{self, ContestPhase};
use crate::components::DeleteConfirmButton;
use crate::context::use_app_context;
use crate::models::Contest;
use crate::store::{is_admin, use_app_store};

fn phase_of(contest: &Contest) -> Option<ContestPhase> {
    let start = clock::parse_datetime(&contest.start_time)?;
    let end = clock::parse_datetime(&contest.end_time)?;
    Some(ContestPhase::of(&start, &end, &clock::now()))
}

#[component]
pub fn ContestListPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let (contests, set_contests) = signal(Vec::<Contest>::new());

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::list_contests(&ctx.api()).await {
                Ok(list) => set_contests.set(list),
                Err(e) => ctx.show_api_error(&e),
            }
        });
    });

    view! {
        <section class="contest-list-page">
            <div class="page-header">
                <h1>"Contests"</h1>
                <Show when=move || is_admin(&store)>
                    <A href="/admin/contests/new">"New contest"</A>
                </Show>
            </div>
            <table class="contest-table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Start"</th>
                        <th>"End"</th>
                        <th>"Problems"</th>
                        <th>"Status"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || contests.get()
                        key=|c| c.id.clone()
                        children=move |contest: Contest| {
                            let (phase_label, phase_class) = match phase_of(&contest) {
                                Some(phase) => (phase.label(), format!("phase phase-{}", phase.label().to_lowercase())),
                                None => ("-", "phase".to_string()),
                            };
                            let edit_href = format!("/admin/contests/{}/edit", api::seg(&contest.id));
                            let contest_id = contest.id.clone();
                            let title = contest.title.clone();
                            let subject = format!("contest \"{}\"", contest.title);
                            let (deleting, set_deleting) = signal(false);
                            let on_delete = Callback::new(move |_| {
                                let id = contest_id.clone();
                                let title = title.clone();
                                set_deleting.set(true);
                                spawn_local(async move {
                                    match api::delete_contest(&ctx.api(), &id).await {
                                        Ok(()) => {
                                            info!("[CONTEST] Deleted contest {}", id);
                                            set_contests.update(|list| list.retain(|c| c.id != id));
                                            ctx.show_info(format!("Deleted \"{}\"", title));
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
                                    <td>{contest.title.clone()}</td>
                                    <td>{clock::to_display(&contest.start_time)}</td>
                                    <td>{clock::to_display(&contest.end_time)}</td>
                                    <td>{contest.problems.len()}</td>
                                    <td><span class=phase_class>{phase_label}</span></td>
                                    <td class="row-actions">
                                        <Show when=move || is_admin(&store)>
                                            <A href=edit_href.clone()>"Edit"</A>
                                            <DeleteConfirmButton subject=subject.clone() pending=deleting on_confirm=on_delete />
                                        </Show>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <Show when=move || contests.with(Vec::is_empty)>
                <p class="notice">"No contests yet."</p>
            </Show>
        </section>
    }
}
