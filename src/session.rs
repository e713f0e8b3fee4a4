//! Session Token Storage
//!
//! The bearer token lives in `localStorage` so a reload keeps the user logged in.

use tracing::warn;

const TOKEN_KEY: &str = "judge.access_token";

fn storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.is_empty())
}

pub fn save_token(token: &str) {
    match storage() {
        Some(store) => {
            if store.set_item(TOKEN_KEY, token).is_err() {
                warn!("[SESSION] Failed to persist token");
            }
        }
        None => warn!("[SESSION] localStorage unavailable, token kept in memory only"),
    }
}

pub fn clear_token() {
    if let Some(store) = storage() {
        let _ = store.remove_item(TOKEN_KEY);
    }
}
