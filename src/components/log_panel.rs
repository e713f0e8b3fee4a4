//! Diagnostics Panel
//!
//! Shows the tail of the in-memory log buffer kept by `console-logger`.

use leptos::prelude::*;

#[component]
pub fn LogPanel() -> impl IntoView {
    let (lines, set_lines) = signal(console_logger::recent_lines());

    let refresh = move |_| set_lines.set(console_logger::recent_lines());
    let clear = move |_| {
        console_logger::clear_recent();
        set_lines.set(Vec::new());
    };

    view! {
        <section class="log-panel">
            <div class="log-panel-header">
                <h2>"Recent log"</h2>
                <button on:click=refresh>"Refresh"</button>
                <button on:click=clear>"Clear"</button>
                <span class="log-count">{move || format!("{} lines", lines.get().len())}</span>
            </div>
            <pre class="log-lines">
                {move || lines.get().join("\n")}
            </pre>
        </section>
    }
}
