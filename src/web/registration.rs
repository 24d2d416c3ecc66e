use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
    response::Html,
};

use crate::{
    store::RegistrationFields,
    submission::{self, SubmitError},
    web::{
        AppState,
        responses::{ApiMessage, json_error},
        templates::render_registration_page,
    },
};

pub async fn registration_page() -> Html<String> {
    Html(render_registration_page(&RegistrationFields::default(), None))
}

/// Handles the HTML form. The page is re-rendered in place so a failed
/// submission keeps what the attendee typed.
pub async fn submit_registration(
    State(state): State<AppState>,
    Form(mut form): Form<RegistrationFields>,
) -> (StatusCode, Html<String>) {
    match submission::submit(state.store(), &mut form).await {
        Ok(submitted) => (
            StatusCode::OK,
            Html(render_registration_page(&form, Some(&submitted.notice))),
        ),
        Err(err) => (
            submit_error_status(&err),
            Html(render_registration_page(&form, Some(&err.notice()))),
        ),
    }
}

pub async fn submit_registration_api(
    State(state): State<AppState>,
    Json(mut form): Json<RegistrationFields>,
) -> (StatusCode, Json<ApiMessage>) {
    match submission::submit(state.store(), &mut form).await {
        Ok(submitted) => (
            StatusCode::OK,
            Json(ApiMessage::new(submitted.notice.description).with_object_id(submitted.object_id)),
        ),
        Err(err) => json_error(submit_error_status(&err), err.notice().description),
    }
}

fn submit_error_status(err: &SubmitError) -> StatusCode {
    match err {
        SubmitError::MissingFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitError::Store(_) => StatusCode::BAD_GATEWAY,
    }
}
