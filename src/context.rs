//! Application Context
//!
//! Shared handles provided via Leptos Context API: configuration, the session
//! token, the page banner and a reload trigger.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::error::{ApiError, SubmitError};
use crate::session;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Info,
}

/// Inline message shown at the top of the current page
#[derive(Clone, Debug, PartialEq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    /// Distinguishes repeated identical messages for auto-dismiss
    pub seq: u32,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    /// Bearer token - read
    pub token: ReadSignal<Option<String>>,
    /// Bearer token - write
    set_token: WriteSignal<Option<String>>,
    /// Current banner - read
    pub banner: ReadSignal<Option<Banner>>,
    /// Current banner - write
    set_banner: WriteSignal<Option<Banner>>,
    /// Trigger to refetch page data - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to refetch page data - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        let (token, set_token) = signal(session::load_token());
        let (banner, set_banner) = signal::<Option<Banner>>(None);
        let (reload_trigger, set_reload_trigger) = signal(0u32);
        Self {
            config: StoredValue::new(config),
            token,
            set_token,
            banner,
            set_banner,
            reload_trigger,
            set_reload_trigger,
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// Client carrying the current token
    pub fn api(&self) -> ApiClient {
        let base = self.config.with_value(|c| c.api_base_url.clone());
        ApiClient::new(&base, self.token.get_untracked())
    }

    /// Store a new token (login) or drop it (logout)
    pub fn set_session_token(&self, token: Option<String>) {
        match &token {
            Some(t) => session::save_token(t),
            None => session::clear_token(),
        }
        self.set_token.set(token);
    }

    /// Trigger a reload of page data
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    /// Errors stay until replaced or dismissed
    pub fn show_error(&self, message: impl Into<String>) {
        self.push_banner(BannerKind::Error, message.into());
    }

    /// Info banners disappear after the configured timeout
    pub fn show_info(&self, message: impl Into<String>) {
        let seq = self.push_banner(BannerKind::Info, message.into());
        let timeout = self.config.with_value(|c| c.banner_timeout_ms);
        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(timeout).await;
            if ctx.banner.get_untracked().is_some_and(|b| b.seq == seq) {
                ctx.clear_banner();
            }
        });
    }

    /// Report a backend error; an expired session also drops the token
    pub fn show_api_error(&self, error: &ApiError) {
        if *error == ApiError::Unauthorized {
            self.set_session_token(None);
        }
        self.show_error(error.user_message());
    }

    pub fn show_submit_error(&self, error: &SubmitError) {
        if error.api_error() == Some(&ApiError::Unauthorized) {
            self.set_session_token(None);
        }
        self.show_error(error.user_message());
    }

    pub fn clear_banner(&self) {
        self.set_banner.set(None);
    }

    fn push_banner(&self, kind: BannerKind, message: String) -> u32 {
        let seq = self.banner.get_untracked().map_or(0, |b| b.seq.wrapping_add(1));
        self.set_banner.set(Some(Banner { kind, message, seq }));
        seq
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
