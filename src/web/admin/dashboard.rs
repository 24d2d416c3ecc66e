use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use axum_extra::extract::cookie::CookieJar;

use super::{DashboardQuery, require_admin};
use crate::{
    report::LOAD_FAILED,
    store::Registration,
    web::{
        AppState,
        auth::{LOGGED_OUT, cookie_guard},
        responses::{ApiMessage, json_error},
        templates::{render_admin_login_page, render_admin_panel},
    },
};

/// Login form while locked; otherwise reloads the listing and shows it.
pub async fn dashboard(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<DashboardQuery>,
) -> Html<String> {
    if !cookie_guard(&state, jar).is_unlocked() {
        let notice = params.notice().filter(|notice| *notice == LOGGED_OUT);
        return Html(render_admin_login_page(notice.as_ref()));
    }

    let (board, load_notice) = state.refresh_board().await;
    let notice = load_notice.or_else(|| params.notice());

    Html(render_admin_panel(
        board.records(),
        board.loaded_at(),
        notice.as_ref(),
        state.report_settings(),
    ))
}

/// The panel reloads from the store on every view, so refreshing is only a
/// redirect back to it. Exports read the board that view left behind.
pub async fn refresh(State(state): State<AppState>, jar: CookieJar) -> Redirect {
    if let Err(redirect) = require_admin(&state, &jar) {
        return redirect;
    }
    Redirect::to("/admin")
}

pub async fn list_registrations(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<Vec<Registration>>, (StatusCode, Json<ApiMessage>)> {
    if require_admin(&state, &jar).is_err() {
        return Err(json_error(
            StatusCode::UNAUTHORIZED,
            "Silakan login sebagai admin terlebih dahulu",
        ));
    }

    match state.refresh_board().await {
        (board, None) => Ok(Json(board.records().to_vec())),
        (_, Some(_)) => Err(json_error(StatusCode::BAD_GATEWAY, LOAD_FAILED.description)),
    }
}
