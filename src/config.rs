//! Runtime Configuration
//!
//! Read once at startup from `window.__JUDGE_CONFIG__` (set by the hosting
//! page), falling back per field to build-time env and defaults.

use serde::Deserialize;
use tracing::{info, warn};
use wasm_bindgen::JsValue;

const WINDOW_CONFIG_KEY: &str = "__JUDGE_CONFIG__";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend, without trailing slash
    pub api_base_url: String,
    /// Points given to a problem when it is added to a contest
    pub default_points: u32,
    /// Rows per page on list pages
    pub page_size: usize,
    /// How long informational banners stay up
    pub banner_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("JUDGE_API_BASE").unwrap_or("/api").to_string(),
            default_points: 100,
            page_size: 20,
            banner_timeout_ms: 5000,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let mut config = Self::from_window().unwrap_or_else(|| {
            info!("[CONFIG] {} not set, using defaults", WINDOW_CONFIG_KEY);
            Self::default().normalized()
        });
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            config.api_base_url = absolute_base(&config.api_base_url, &origin);
        }
        info!("[CONFIG] API base: {}", config.api_base_url);
        config
    }

    fn from_window() -> Option<Self> {
        let window = web_sys::window()?;
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(WINDOW_CONFIG_KEY)).ok()?;
        if raw.is_undefined() || raw.is_null() {
            return None;
        }
        match serde_wasm_bindgen::from_value::<AppConfig>(raw) {
            Ok(config) => Some(config.normalized()),
            Err(e) => {
                warn!("[CONFIG] Invalid {}: {}", WINDOW_CONFIG_KEY, e);
                None
            }
        }
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        self.api_base_url = trimmed.to_string();
        self.page_size = self.page_size.max(1);
        self
    }
}

/// The HTTP client needs absolute URLs; a path-only base is served by the
/// same origin as the app.
fn absolute_base(base: &str, origin: &str) -> String {
    if base.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), base)
    } else {
        base.to_string()
    }
}
