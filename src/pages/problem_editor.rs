//! Admin: Problem Editor
//!
//! Create or edit a problem, with a live statement preview.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use tracing::info;

use crate::api;
use crate::context::use_app_context;
use crate::markdown::{render_statement, trigger_math_render};
use crate::models::{Id, DIFFICULTIES};
use crate::store::{store_upsert_problem, use_app_store};
use crate::validator::{validate_problem, ProblemForm};

const DEFAULT_TIME_LIMIT_MS: &str = "1000";
const DEFAULT_MEMORY_LIMIT_KB: &str = "262144";

#[component]
pub fn ProblemEditorPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = use_navigate();
    let params = use_params_map();

    let problem_id = params.read_untracked().get("id").map(Id::from);
    let is_new = problem_id.is_none();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let difficulty = RwSignal::new(DIFFICULTIES[0].0.to_string());
    let tags = RwSignal::new(String::new());
    let time_limit = RwSignal::new(DEFAULT_TIME_LIMIT_MS.to_string());
    let memory_limit = RwSignal::new(DEFAULT_MEMORY_LIMIT_KB.to_string());
    let (loaded, set_loaded) = signal(is_new);
    let (saving, set_saving) = signal(false);
    let (show_preview, set_show_preview) = signal(false);

    if let Some(id) = problem_id.clone() {
        spawn_local(async move {
            match api::get_problem(&ctx.api(), &id).await {
                Ok(detail) => {
                    title.set(detail.title);
                    description.set(detail.description);
                    if !detail.difficulty.is_empty() {
                        difficulty.set(detail.difficulty);
                    }
                    tags.set(detail.tags.join(", "));
                    if let Some(ms) = detail.time_limit_ms {
                        time_limit.set(ms.to_string());
                    }
                    if let Some(kb) = detail.memory_limit_kb {
                        memory_limit.set(kb.to_string());
                    }
                    set_loaded.set(true);
                }
                Err(e) => ctx.show_api_error(&e),
            }
        });
    }

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = ProblemForm {
            title: title.get_untracked(),
            description: description.get_untracked(),
            difficulty: difficulty.get_untracked(),
            tags: tags.get_untracked(),
            time_limit_ms: time_limit.get_untracked(),
            memory_limit_kb: memory_limit.get_untracked(),
        };
        let payload = match validate_problem(&form) {
            Ok(payload) => payload,
            Err(e) => {
                ctx.show_error(e.to_string());
                return;
            }
        };

        set_saving.set(true);
        let existing = problem_id.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            let api = ctx.api();
            let result = match &existing {
                Some(id) => api::update_problem(&api, id, &payload).await,
                None => api::create_problem(&api, &payload).await,
            };
            match result {
                Ok(saved) => {
                    info!("[PROBLEMS] Saved problem {}", saved.id);
                    store_upsert_problem(&store, saved.summary());
                    ctx.show_info("Problem saved");
                    navigate("/admin/problems", Default::default());
                }
                Err(e) => ctx.show_api_error(&e),
            }
            set_saving.set(false);
        });
    };

    let toggle_preview = move |_| {
        let now_shown = !show_preview.get_untracked();
        set_show_preview.set(now_shown);
        if now_shown {
            trigger_math_render(".statement-preview");
        }
    };

    view! {
        <section class="problem-editor-page">
            <h1>{if is_new { "New problem" } else { "Edit problem" }}</h1>
            <Show when=move || loaded.get() fallback=|| view! { <p class="loading">"Loading problem..."</p> }>
                <form class="problem-form" on:submit=on_save.clone()>
                    <label>
                        "Title"
                        <input
                            type="text"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Difficulty"
                        <select
                            prop:value=move || difficulty.get()
                            on:change=move |ev| difficulty.set(event_target_value(&ev))
                        >
                            {DIFFICULTIES.iter().map(|(value, label)| {
                                view! { <option value=*value>{*label}</option> }
                            }).collect_view()}
                        </select>
                    </label>
                    <label>
                        "Tags (comma separated)"
                        <input
                            type="text"
                            prop:value=move || tags.get()
                            on:input=move |ev| tags.set(event_target_value(&ev))
                        />
                    </label>
                    <div class="limit-row">
                        <label>
                            "Time limit (ms)"
                            <input
                                type="number"
                                min="1"
                                prop:value=move || time_limit.get()
                                on:input=move |ev| time_limit.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "Memory limit (KB)"
                            <input
                                type="number"
                                min="1"
                                prop:value=move || memory_limit.get()
                                on:input=move |ev| memory_limit.set(event_target_value(&ev))
                            />
                        </label>
                    </div>
                    <label>
                        "Statement (Markdown, $math$ supported)"
                        <textarea
                            rows="16"
                            prop:value=move || description.get()
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <button type="button" class="preview-toggle" on:click=toggle_preview>
                        {move || if show_preview.get() { "Hide preview" } else { "Show preview" }}
                    </button>
                    <Show when=move || show_preview.get()>
                        <div
                            class="statement-preview markdown-body"
                            inner_html=move || render_statement(&description.get())
                        ></div>
                    </Show>
                    <div class="form-actions">
                        <button type="submit" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save problem" }}
                        </button>
                    </div>
                </form>
            </Show>
        </section>
    }
}
