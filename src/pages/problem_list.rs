//! Problem List Page
//!
//! Client-side search over the cached pool, paginated.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;

use crate::api;
use crate::components::Pager;
use crate::context::{use_app_context, AppContext};
use crate::models::Problem;
use crate::paging::paginate;
use crate::store::{store_set_problems, use_app_store, AppStateStoreFields, AppStore};

/// Fetch the pool into the store unless it is already there
pub fn ensure_problems_loaded(ctx: AppContext, store: AppStore) {
    if store.problems_loaded().get_untracked() {
        return;
    }
    refresh_problems(ctx, store);
}

pub fn refresh_problems(ctx: AppContext, store: AppStore) {
    spawn_local(async move {
        match api::list_problems(&ctx.api()).await {
            Ok(problems) => {
                tracing::debug!("[PROBLEMS] Loaded {} problems", problems.len());
                store_set_problems(&store, problems);
            }
            Err(e) => ctx.show_api_error(&e),
        }
    });
}

#[component]
pub fn ProblemListPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let page_size = ctx.config().page_size;

    let (search, set_search) = signal(String::new());
    let page_number = RwSignal::new(1usize);

    Effect::new(move |prev: Option<u32>| {
        let trigger = ctx.reload_trigger.get();
        if prev.is_some() {
            refresh_problems(ctx, store);
        } else {
            ensure_problems_loaded(ctx, store);
        }
        trigger
    });

    let page = Memo::new(move |_| {
        let needle = search.get().trim().to_lowercase();
        store.problems().with(|problems| {
            let matching: Vec<Problem> = problems.iter().filter(|p| p.matches(&needle)).cloned().collect();
            paginate(&matching, page_number.get(), page_size)
        })
    });

    view! {
        <section class="problem-list-page">
            <h1>"Problems"</h1>
            <input
                type="search"
                class="list-search"
                placeholder="Search by title or tag..."
                prop:value=move || search.get()
                on:input=move |ev| {
                    set_search.set(event_target_value(&ev));
                    page_number.set(1);
                }
            />
            <table class="problem-table">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Title"</th>
                        <th>"Difficulty"</th>
                        <th>"Tags"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || page.get().items
                        key=|p| p.id.clone()
                        children=move |problem: Problem| {
                            let href = format!("/problems/{}", api::seg(&problem.id));
                            view! {
                                <tr>
                                    <td>{problem.id.to_string()}</td>
                                    <td><A href=href>{problem.title.clone()}</A></td>
                                    <td class="difficulty">{problem.difficulty.clone()}</td>
                                    <td class="tags">{problem.tags.join(", ")}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
            <p class="list-count">{move || format!("{} problems", page.get().total_items)}</p>
            <Pager current=page_number total_pages=Signal::derive(move || page.get().total_pages) />
        </section>
    }
}
