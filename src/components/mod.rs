//! UI Components
//!
//! Reusable Leptos components.

mod banner;
mod delete_confirm_button;
mod log_panel;
mod nav_bar;
mod pager;
mod problem_picker;
mod roster_table;
mod status_badge;

pub use banner::BannerView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use log_panel::LogPanel;
pub use nav_bar::NavBar;
pub use pager::Pager;
pub use problem_picker::ProblemPicker;
pub use roster_table::RosterTable;
pub use status_badge::StatusBadge;
