use leptos::prelude::*;

use crate::models::SubmissionStatus;

#[component]
pub fn StatusBadge(status: SubmissionStatus) -> impl IntoView {
    view! { <span class=status.css_class()>{status.label()}</span> }
}
