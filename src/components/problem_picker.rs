//! Problem Picker Component
//!
//! Searchable list of pool problems that are not yet in the roster.

use leptos::prelude::*;
use tracing::debug;

use crate::models::Problem;
use crate::roster::Roster;

/// Suggestions shown at once
const MAX_RESULTS: usize = 50;

#[component]
pub fn ProblemPicker(
    roster: RwSignal<Roster>,
    #[prop(into)] pool: Signal<Vec<Problem>>,
) -> impl IntoView {
    let (search, set_search) = signal(String::new());

    let available = move || {
        let needle = search.get();
        roster.with(|r| {
            pool.with(|p| {
                r.filtered_available(p, &needle)
                    .take(MAX_RESULTS)
                    .cloned()
                    .collect::<Vec<_>>()
            })
        })
    };

    let add = move |problem: Problem| {
        roster.update(|r| {
            if r.add_item(&problem) {
                debug!("[ROSTER] Added problem {}", problem.id);
            }
        });
    };

    view! {
        <div class="problem-picker">
            <input
                type="search"
                class="picker-search"
                placeholder="Search problems by title or tag..."
                prop:value=move || search.get()
                on:input=move |ev| set_search.set(event_target_value(&ev))
            />
            <ul class="picker-list">
                <For
                    each=available
                    key=|p| p.id.clone()
                    children=move |problem: Problem| {
                        let tags = problem.tags.join(", ");
                        let title = problem.title.clone();
                        let difficulty = problem.difficulty.clone();
                        view! {
                            <li class="picker-item">
                                <span class="picker-title">{title}</span>
                                <span class="picker-difficulty">{difficulty}</span>
                                <span class="picker-tags">{tags}</span>
                                <button type="button" on:click=move |_| add(problem.clone())>"Add"</button>
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || pool.with(Vec::is_empty)>
                <p class="picker-empty">"The problem pool is empty."</p>
            </Show>
        </div>
    }
}
