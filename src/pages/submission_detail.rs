//! Submission Detail Page
//!
//! Polls until judging finishes.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use tracing::debug;

use crate::api;
use crate::clock;
use crate::components::StatusBadge;
use crate::context::use_app_context;
use crate::models::{Id, Submission};

const POLL_INTERVAL_MS: u32 = 2000;
const MAX_POLLS: u32 = 60;

#[component]
pub fn SubmissionDetailPage() -> impl IntoView {
    let ctx = use_app_context();
    let params = use_params_map();
    let submission_id = move || params.read().get("id").map(Id::from);

    let (submission, set_submission) = signal::<Option<Submission>>(None);

    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        let Some(id) = submission_id() else { return };
        spawn_local(async move {
            for attempt in 0..MAX_POLLS {
                match api::get_submission(&ctx.api(), &id).await {
                    Ok(sub) => {
                        let finished = sub.status.is_final();
                        set_submission.set(Some(sub));
                        if finished {
                            break;
                        }
                    }
                    Err(e) => {
                        ctx.show_api_error(&e);
                        break;
                    }
                }
                debug!("[SUBMIT] Submission {} still judging (poll {})", id, attempt + 1);
                TimeoutFuture::new(POLL_INTERVAL_MS).await;
            }
        });
    });

    view! {
        <section class="submission-detail-page">
            {move || match submission.get() {
                None => view! { <p class="loading">"Loading submission..."</p> }.into_any(),
                Some(sub) => {
                    let problem_href = format!("/problems/{}", api::seg(&sub.problem_id));
                    let problem_label = sub.problem_title.clone().unwrap_or_else(|| sub.problem_id.to_string());
                    view! {
                        <h1>{format!("Submission {}", sub.id)}</h1>
                        <dl class="submission-meta">
                            <dt>"Problem"</dt>
                            <dd><A href=problem_href>{problem_label}</A></dd>
                            <dt>"Status"</dt>
                            <dd><StatusBadge status=sub.status /></dd>
                            <dt>"Language"</dt>
                            <dd>{sub.language.clone()}</dd>
                            <dt>"Score"</dt>
                            <dd>{sub.score.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Time"</dt>
                            <dd>{sub.time_ms.map(|ms| format!("{} ms", ms)).unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Memory"</dt>
                            <dd>{sub.memory_kb.map(|kb| format!("{} KB", kb)).unwrap_or_else(|| "-".to_string())}</dd>
                            <dt>"Submitted"</dt>
                            <dd>{clock::to_display(&sub.created_at)}</dd>
                        </dl>
                        {sub.code.clone().map(|code| view! { <pre class="submission-code"><code>{code}</code></pre> })}
                    }
                    .into_any()
                }
            }}
        </section>
    }
}
