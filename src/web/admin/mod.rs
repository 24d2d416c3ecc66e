mod auth;
mod dashboard;
mod exports;
mod types;

pub use auth::require_admin;
pub use dashboard::{dashboard, list_registrations, refresh};
pub use exports::{download_pdf, download_spreadsheet};
pub use types::DashboardQuery;
