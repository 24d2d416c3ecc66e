use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;

use crate::web::{AppState, auth::cookie_guard};

pub fn require_admin(state: &AppState, jar: &CookieJar) -> Result<(), Redirect> {
    if cookie_guard(state, jar.clone()).is_unlocked() {
        Ok(())
    } else {
        Err(Redirect::to("/admin"))
    }
}
