pub mod admin;
pub mod auth;
pub mod registration;
pub mod responses;
pub mod router;
pub mod state;
pub mod templates;

pub use state::AppState;
