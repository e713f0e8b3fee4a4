//! Submissions Page
//!
//! The backend decides whose submissions come back (own, or all for admins).

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::clock;
use crate::components::{Pager, StatusBadge};
use crate::context::use_app_context;
use crate::models::Submission;
use crate::paging::paginate;

#[component]
pub fn SubmissionListPage() -> impl IntoView {
    let ctx = use_app_context();
    let page_size = ctx.config().page_size;

    let (submissions, set_submissions) = signal(Vec::<Submission>::new());
    let (loaded, set_loaded) = signal(false);
    let page_number = RwSignal::new(1usize);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            match api::list_submissions(&ctx.api()).await {
                Ok(mut list) => {
                    // Newest first
                    list.reverse();
                    set_submissions.set(list);
                }
                Err(e) => ctx.show_api_error(&e),
            }
            set_loaded.set(true);
        });
    });

    let page = Memo::new(move |_| submissions.with(|list| paginate(list, page_number.get(), page_size)));

    view! {
        <section class="submission-list-page">
            <div class="page-header">
                <h1>"Submissions"</h1>
                <button on:click=move |_| ctx.reload()>"Refresh"</button>
            </div>
            <Show when=move || loaded.get() fallback=|| view! { <p class="loading">"Loading..."</p> }>
                <table class="submission-table">
                    <thead>
                        <tr>
                            <th>"ID"</th>
                            <th>"Problem"</th>
                            <th>"User"</th>
                            <th>"Language"</th>
                            <th>"Status"</th>
                            <th>"Time"</th>
                            <th>"Memory"</th>
                            <th>"Submitted"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || page.get().items
                            key=|s| (s.id.clone(), s.status)
                            children=move |sub: Submission| {
                                let href = format!("/submissions/{}", api::seg(&sub.id));
                                let problem_href = format!("/problems/{}", api::seg(&sub.problem_id));
                                let problem_label = sub.problem_title.clone().unwrap_or_else(|| sub.problem_id.to_string());
                                view! {
                                    <tr>
                                        <td><A href=href>{sub.id.to_string()}</A></td>
                                        <td><A href=problem_href>{problem_label}</A></td>
                                        <td>{sub.username.clone().unwrap_or_default()}</td>
                                        <td>{sub.language.clone()}</td>
                                        <td><StatusBadge status=sub.status /></td>
                                        <td>{sub.time_ms.map(|ms| format!("{} ms", ms)).unwrap_or_default()}</td>
                                        <td>{sub.memory_kb.map(|kb| format!("{} KB", kb)).unwrap_or_default()}</td>
                                        <td>{clock::to_display(&sub.created_at)}</td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
                <Show when=move || submissions.with(Vec::is_empty)>
                    <p class="notice">"No submissions yet."</p>
                </Show>
                <Pager current=page_number total_pages=Signal::derive(move || page.get().total_pages) />
            </Show>
        </section>
    }
}
