//! REST Backend Bindings
//!
//! Typed wrappers over the judge's HTTP API, organized by domain.

mod client;
mod auth;
mod problems;
mod contests;
mod submissions;
mod users;

pub use client::{seg, ApiClient};

// Re-export all public items
pub use auth::*;
pub use problems::*;
pub use contests::*;
pub use submissions::*;
pub use users::*;
