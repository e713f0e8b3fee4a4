//! Page Banner
//!
//! Inline error/info message driven by `AppContext`.

use leptos::prelude::*;

use crate::context::{use_app_context, BannerKind};

#[component]
pub fn BannerView() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        ctx.banner.get().map(|banner| {
            let class = match banner.kind {
                BannerKind::Error => "banner banner-error",
                BannerKind::Info => "banner banner-info",
            };
            view! {
                <div class=class role="alert">
                    <span class="banner-message">{banner.message}</span>
                    <button class="banner-close" on:click=move |_| ctx.clear_banner()>"×"</button>
                </div>
            }
        })
    }
}
