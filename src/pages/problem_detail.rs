//! Problem Detail Page
//!
//! Statement rendered from Markdown, plus the submit form.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params_map};
use tracing::info;

use crate::api;
use crate::context::use_app_context;
use crate::markdown::{render_statement, trigger_math_render};
use crate::models::{Id, NewSubmission, ProblemDetail, LANGUAGES};

#[component]
pub fn ProblemDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let params = use_params_map();
    let problem_id = move || params.read().get("id").map(Id::from);

    let (problem, set_problem) = signal::<Option<ProblemDetail>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let Some(id) = problem_id() else { return };
        spawn_local(async move {
            match api::get_problem(&ctx.api(), &id).await {
                Ok(detail) => {
                    set_problem.set(Some(detail));
                    trigger_math_render(".problem-statement");
                }
                Err(e) => ctx.show_api_error(&e),
            }
        });
    });

    view! {
        <section class="problem-detail-page">
            {move || match problem.get() {
                None => view! { <p class="loading">"Loading problem..."</p> }.into_any(),
                Some(detail) => {
                    let html = render_statement(&detail.description);
                    let limits = format!(
                        "Time limit: {} · Memory limit: {}",
                        detail.time_limit_ms.map_or("-".to_string(), |ms| format!("{} ms", ms)),
                        detail.memory_limit_kb.map_or("-".to_string(), |kb| format!("{} KB", kb)),
                    );
                    view! {
                        <h1>{detail.title.clone()}</h1>
                        <p class="problem-meta">
                            <span class="difficulty">{detail.difficulty.clone()}</span>
                            <span class="tags">{detail.tags.join(", ")}</span>
                        </p>
                        <p class="problem-limits">{limits}</p>
                        <div class="problem-statement markdown-body" inner_html=html></div>
                        <SubmitForm problem_id=detail.id.clone() />
                    }
                    .into_any()
                }
            }}
        </section>
    }
}

#[component]
fn SubmitForm(problem_id: Id) -> impl IntoView {
    let ctx = use_app_context();
    let navigate = use_navigate();

    let (language, set_language) = signal(LANGUAGES[0].0.to_string());
    let (code, set_code) = signal(String::new());
    let (busy, set_busy) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if ctx.token.get_untracked().is_none() {
            ctx.show_error("Log in to submit a solution");
            return;
        }
        let source = code.get();
        if source.trim().is_empty() {
            ctx.show_error("Code is empty");
            return;
        }
        let submission = NewSubmission {
            problem_id: problem_id.clone(),
            language: language.get(),
            code: source,
        };

        set_busy.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::submit_solution(&ctx.api(), &submission).await {
                Ok(created) => {
                    info!("[SUBMIT] Submission {} for problem {}", created.id, submission.problem_id);
                    ctx.show_info("Submitted");
                    navigate(&format!("/submissions/{}", api::seg(&created.id)), Default::default());
                }
                Err(e) => ctx.show_api_error(&e),
            }
            set_busy.set(false);
        });
    };

    view! {
        <form class="submit-form" on:submit=on_submit>
            <h2>"Submit"</h2>
            <select
                class="language-select"
                prop:value=move || language.get()
                on:change=move |ev| set_language.set(event_target_value(&ev))
            >
                {LANGUAGES.iter().map(|(value, label)| {
                    view! { <option value=*value>{*label}</option> }
                }).collect_view()}
            </select>
            <textarea
                class="code-input"
                rows="18"
                spellcheck="false"
                placeholder="Paste your solution here"
                prop:value=move || code.get()
                on:input=move |ev| set_code.set(event_target_value(&ev))
            ></textarea>
            <button type="submit" disabled=move || busy.get()>
                {move || if busy.get() { "Submitting..." } else { "Submit" }}
            </button>
        </form>
    }
}
