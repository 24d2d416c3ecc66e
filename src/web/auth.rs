use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    config::AdminSecret,
    web::{AppState, responses::Notice, templates::render_admin_login_page},
};

pub const ADMIN_COOKIE: &str = "kkr_admin";
const UNLOCKED_FLAG: &str = "true";

pub const LOGIN_OK: Notice = Notice::success("Login Berhasil", "Selamat datang di panel admin");
pub const LOGIN_FAILED: Notice =
    Notice::error("Login Gagal", "Password salah. Silakan coba lagi.");
pub const LOGGED_OUT: Notice = Notice::success("Logout", "Sesi admin telah diakhiri");

/// Durable storage for the admin "unlocked" flag.
pub trait SessionStore {
    fn load_flag(&self) -> bool;
    fn persist_flag(&mut self);
    fn clear_flag(&mut self);
}

/// Keeps the flag in a browser cookie.
pub struct CookieSessionStore {
    jar: CookieJar,
}

impl CookieSessionStore {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    fn base_cookie(value: &'static str) -> Cookie<'static> {
        let mut cookie = Cookie::new(ADMIN_COOKIE, value);
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie
    }
}

impl SessionStore for CookieSessionStore {
    fn load_flag(&self) -> bool {
        self.jar
            .get(ADMIN_COOKIE)
            .is_some_and(|cookie| cookie.value() == UNLOCKED_FLAG)
    }

    fn persist_flag(&mut self) {
        self.jar = self.jar.clone().add(Self::base_cookie(UNLOCKED_FLAG));
    }

    fn clear_flag(&mut self) {
        self.jar = self.jar.clone().remove(Self::base_cookie(""));
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    Locked,
    Unlocked,
}

/// Admin gate. A persisted flag is trusted on restore without re-checking the
/// secret; hardening that belongs in the [`SessionStore`].
pub struct AdminGuard<'a, S: SessionStore> {
    secret: &'a AdminSecret,
    store: S,
    state: SessionState,
}

impl<'a, S: SessionStore> AdminGuard<'a, S> {
    pub fn restore(secret: &'a AdminSecret, store: S) -> Self {
        let state = if store.load_flag() {
            SessionState::Unlocked
        } else {
            SessionState::Locked
        };
        Self {
            secret,
            store,
            state,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state() == SessionState::Unlocked
    }

    pub fn attempt_login(&mut self, candidate: &str) -> Notice {
        if self.secret.matches(candidate) {
            self.state = SessionState::Unlocked;
            self.store.persist_flag();
            info!("admin session unlocked");
            LOGIN_OK
        } else {
            warn!("admin login rejected");
            LOGIN_FAILED
        }
    }

    pub fn logout(&mut self) -> Notice {
        self.state = SessionState::Locked;
        self.store.clear_flag();
        info!("admin session locked");
        LOGGED_OUT
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

pub fn cookie_guard(state: &AppState, jar: CookieJar) -> AdminGuard<'_, CookieSessionStore> {
    AdminGuard::restore(state.admin_secret(), CookieSessionStore::new(jar))
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

pub async fn process_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), (StatusCode, Html<String>)> {
    let mut guard = cookie_guard(&state, jar);
    let notice = guard.attempt_login(&form.password);

    if !guard.is_unlocked() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Html(render_admin_login_page(Some(&notice))),
        ));
    }

    Ok((guard.into_store().into_jar(), Redirect::to("/admin?status=logged_in")))
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    let mut guard = cookie_guard(&state, jar);
    guard.logout();
    (guard.into_store().into_jar(), Redirect::to("/admin?status=logged_out"))
}
