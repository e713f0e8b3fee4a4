use leptos::prelude::*;

use crate::components::LogPanel;

#[component]
pub fn AdminLogsPage() -> impl IntoView {
    view! {
        <section class="admin-logs-page">
            <h1>"Diagnostics"</h1>
            <LogPanel />
        </section>
    }
}
