//! Contest Editor Page
//!
//! Create and edit share this page. The roster lives only here until Save,
//! which validates, writes the contest fields, then reconciles problems.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use tracing::{info, warn};

use crate::api;
use crate::clock;
use crate::components::{ProblemPicker, RosterTable};
use crate::context::use_app_context;
use crate::contest_save::save_contest;
use crate::models::{Contest, Id};
use crate::pages::problem_list::ensure_problems_loaded;
use crate::roster::Roster;
use crate::store::{store_set_problems, use_app_store, AppStateStoreFields};
use crate::validator::ContestForm;

/// Datetime from the backend as a `datetime-local` value
fn input_value(raw: &str) -> String {
    clock::parse_datetime(raw)
        .map(|dt| clock::to_input_value(&dt))
        .unwrap_or_else(|| raw.to_string())
}

#[component]
pub fn ContestEditorPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let navigate = use_navigate();
    let params = use_params_map();
    let default_points = ctx.config().default_points;

    // `None` until the contest exists on the server
    let contest_id = RwSignal::new(params.read_untracked().get("id").map(Id::from));
    let is_new = contest_id.get_untracked().is_none();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let start_time = RwSignal::new(String::new());
    let end_time = RwSignal::new(String::new());
    let roster = RwSignal::new(Roster::with_default_points(default_points));
    let (loaded, set_loaded) = signal(is_new);
    let (saving, set_saving) = signal(false);

    match contest_id.get_untracked() {
        None => ensure_problems_loaded(ctx, store),
        // Edit mode: the pool supplies titles, so load it before hydrating
        Some(id) => spawn_local(async move {
            let api = ctx.api();
            if !store.problems_loaded().get_untracked() {
                match api::list_problems(&api).await {
                    Ok(problems) => store_set_problems(&store, problems),
                    Err(err) => warn!("[CONTEST] Problem pool unavailable: {}", err),
                }
            }
            match api::get_contest(&api, &id).await {
                Ok(contest) => {
                    let Contest { title: t, description: d, start_time: s, end_time: e, problems, .. } = contest;
                    title.set(t);
                    description.set(d);
                    start_time.set(input_value(&s));
                    end_time.set(input_value(&e));
                    let hydrated = store
                        .problems()
                        .with_untracked(|pool| Roster::from_associations(&problems, pool, default_points));
                    info!("[CONTEST] Loaded contest {} with {} problems", id, hydrated.len());
                    roster.set(hydrated);
                    set_loaded.set(true);
                }
                Err(err) => ctx.show_api_error(&err),
            }
        }),
    }

    let on_save = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let form = ContestForm {
            title: title.get_untracked(),
            description: description.get_untracked(),
            start_time: start_time.get_untracked(),
            end_time: end_time.get_untracked(),
        };
        let snapshot = roster.get_untracked();
        let existing = contest_id.get_untracked();

        set_saving.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let outcome = save_contest(&ctx.api(), existing.as_ref(), &form, &snapshot).await;
            if existing.is_none() && outcome.contest_id.is_some() {
                // Retry must edit this contest, not create another one
                contest_id.set(outcome.contest_id.clone());
            }
            match outcome.result {
                Ok(report) => {
                    info!("[CONTEST] Saved ({} problem changes)", report.done);
                    ctx.show_info("Contest saved");
                    navigate("/contests", Default::default());
                }
                Err(err) => {
                    warn!("[CONTEST] Save failed: {}", err);
                    ctx.show_submit_error(&err);
                }
            }
            set_saving.set(false);
        });
    };

    let pool = Signal::derive(move || store.problems().get());

    view! {
        <section class="contest-editor-page">
            <h1>{move || if contest_id.get().is_some() { "Edit contest" } else { "New contest" }}</h1>
            <Show when=move || loaded.get() fallback=|| view! { <p class="loading">"Loading contest..."</p> }>
                <form class="contest-form" on:submit=on_save.clone()>
                    <label>
                        "Title"
                        <input
                            type="text"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                    </label>
                    <label>
                        "Description"
                        <textarea
                            rows="6"
                            prop:value=move || description.get()
                            on:input=move |ev| description.set(event_target_value(&ev))
                        ></textarea>
                    </label>
                    <div class="time-row">
                        <label>
                            "Start time"
                            <input
                                type="datetime-local"
                                prop:value=move || start_time.get()
                                on:input=move |ev| start_time.set(event_target_value(&ev))
                            />
                        </label>
                        <label>
                            "End time"
                            <input
                                type="datetime-local"
                                prop:value=move || end_time.get()
                                on:input=move |ev| end_time.set(event_target_value(&ev))
                            />
                        </label>
                    </div>

                    <h2>"Problems"</h2>
                    <RosterTable roster=roster />
                    <h3>"Add problems"</h3>
                    <ProblemPicker roster=roster pool=pool />

                    <div class="form-actions">
                        <button type="submit" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save contest" }}
                        </button>
                    </div>
                </form>
            </Show>
        </section>
    }
}
