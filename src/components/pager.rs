//! Pager Component
//!
//! Prev/next controls for client-side paginated lists.

use leptos::prelude::*;

/// `current` is 1-based; the owning page clamps it through `paging::paginate`.
#[component]
pub fn Pager(
    current: RwSignal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
) -> impl IntoView {
    view! {
        <Show when=move || { total_pages.get() > 1 }>
            <div class="pager">
                <button
                    disabled=move || current.get() <= 1
                    on:click=move |_| current.update(|n| *n = n.saturating_sub(1).max(1))
                >
                    "‹ Prev"
                </button>
                <span class="pager-info">
                    {move || format!("Page {} of {}", current.get(), total_pages.get())}
                </span>
                <button
                    disabled=move || current.get() >= total_pages.get()
                    on:click=move |_| current.update(|n| *n = (*n + 1).min(total_pages.get_untracked()))
                >
                    "Next ›"
                </button>
            </div>
        </Show>
    }
}
