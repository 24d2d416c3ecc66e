use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

/// Canonical JSON payload for API responses.
#[derive(Debug, Serialize, Clone)]
pub struct ApiMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            object_id: None,
        }
    }

    pub fn with_object_id(mut self, object_id: Option<String>) -> Self {
        self.object_id = object_id;
        self
    }
}

/// Helper for controllers that need to return `(StatusCode, Json<ApiMessage>)`.
pub fn json_error(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiMessage>) {
    (status, Json(ApiMessage::new(message)))
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// User-facing toast shown after an action.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: &'static str,
    pub description: &'static str,
}

impl Notice {
    pub const fn success(title: &'static str, description: &'static str) -> Self {
        Self {
            kind: NoticeKind::Success,
            title,
            description,
        }
    }

    pub const fn error(title: &'static str, description: &'static str) -> Self {
        Self {
            kind: NoticeKind::Error,
            title,
            description,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
