//! Judge Frontend Entry Point

mod api;
mod app;
mod clock;
mod components;
mod config;
mod contest_save;
mod context;
mod error;
mod markdown;
mod models;
mod pages;
mod paging;
mod reconciler;
mod roster;
mod session;
mod store;
mod validator;

#[cfg(test)]
mod testing;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init_logger("Judge", tracing::Level::DEBUG) {
        web_sys::console::warn_1(&format!("[APP] Logger not installed: {}", e).into());
    }
    mount_to_body(App);
}
