//! Routed Pages

mod admin_logs;
mod admin_problems;
mod admin_users;
mod contest_editor;
mod contest_list;
mod guard;
mod login;
mod problem_detail;
mod problem_editor;
mod problem_list;
mod submission_detail;
mod submission_list;

pub use admin_logs::AdminLogsPage;
pub use admin_problems::AdminProblemsPage;
pub use admin_users::AdminUsersPage;
pub use contest_editor::ContestEditorPage;
pub use contest_list::ContestListPage;
pub use guard::{RequireAdmin, RequireLogin};
pub use login::LoginPage;
pub use problem_detail::ProblemDetailPage;
pub use problem_editor::ProblemEditorPage;
pub use problem_list::ProblemListPage;
pub use submission_detail::SubmissionDetailPage;
pub use submission_list::SubmissionListPage;
