//! services/api/src/web/envelope.rs
//!
//! The uniform `{success, data, message}` response wrapper. The original
//! front-end also reads a `count` on list routes and a `pageId` on payment
//! reads, so those ride along as optional fields.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use techpro_core::ports::PortError;

#[derive(Debug, Serialize)]
pub struct Envelope<T = ()> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "pageId")]
    pub page_id: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            message: None,
            count: None,
            page_id: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_page_id(mut self, page_id: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            data: None,
            message: Some(message.into()),
            count: None,
            page_id: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Envelope {
            success: false,
            data: None,
            message: Some(message.into()),
            count: None,
            page_id: None,
        }
    }
}

/// The error arm every handler returns: a status code plus a failure
/// envelope.
pub type Failure = (StatusCode, Json<Envelope>);

pub fn fail(status: StatusCode, message: impl Into<String>) -> Failure {
    (status, Json(Envelope::error(message)))
}

/// Converts a port error into a failure response. NotFound/Invalid/Conflict
/// carry their own client-safe messages; storage failures show only the
/// route's fixed `fallback` (the detail was already logged by the adapter).
pub fn port_failure(err: PortError, fallback: &str) -> Failure {
    match err {
        PortError::NotFound(msg) => fail(StatusCode::NOT_FOUND, msg),
        PortError::Invalid(msg) => fail(StatusCode::BAD_REQUEST, msg),
        PortError::Conflict(msg) => fail(StatusCode::BAD_REQUEST, msg),
        PortError::Unauthorized => fail(StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS"),
        PortError::Storage(_) => fail(StatusCode::INTERNAL_SERVER_ERROR, fallback),
    }
}
