//! Delete Button
//!
//! Two-step delete for admin rows: the first click asks, "Yes" sends. The
//! owning row flips `pending` while its DELETE is in flight, which hides both
//! steps so one confirmation sends exactly one request.

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Idle,
    Asking,
    Pending,
}

impl Step {
    fn of(asking: bool, pending: bool) -> Self {
        match (asking, pending) {
            (_, true) => Step::Pending,
            (true, false) => Step::Asking,
            (false, false) => Step::Idle,
        }
    }
}

#[component]
pub fn DeleteConfirmButton(
    /// Shown in the prompt, e.g. `contest "Spring Cup"`
    #[prop(into)]
    subject: String,
    #[prop(into)] pending: Signal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (asking, set_asking) = signal(false);
    let prompt = format!("Delete {}?", subject);

    let confirm = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        // A stale click after the request started is ignored
        if Step::of(asking.get_untracked(), pending.get_untracked()) == Step::Asking {
            set_asking.set(false);
            on_confirm.run(());
        }
    };

    move || match Step::of(asking.get(), pending.get()) {
        Step::Pending => view! { <span class="delete-pending">"Deleting..."</span> }.into_any(),
        Step::Asking => view! {
            <span class="delete-confirm">
                <span class="delete-confirm-text">{prompt.clone()}</span>
                <button class="confirm-btn" on:click=confirm>"Yes"</button>
                <button
                    class="cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_asking.set(false);
                    }
                >
                    "No"
                </button>
            </span>
        }
        .into_any(),
        Step::Idle => view! {
            <button
                class="delete-btn"
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_asking.set(true);
                }
            >
                "Delete"
            </button>
        }
        .into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_request_hides_confirmation() {
        assert_eq!(Step::of(false, false), Step::Idle);
        assert_eq!(Step::of(true, false), Step::Asking);
        // In flight wins over an open prompt, so "Yes" can't fire twice
        assert_eq!(Step::of(true, true), Step::Pending);
        assert_eq!(Step::of(false, true), Step::Pending);
    }
}
