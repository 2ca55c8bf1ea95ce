//! HTTP adapter mapping for domain errors.
//!
//! Keeps the domain error HTTP-agnostic while giving handlers consistent
//! responses: 400 carries the JSON error payload, 404 has an empty body and
//! 500 hides internal detail behind a generic message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message returned in place of internal failure detail.
pub const GENERIC_FAILURE_MESSAGE: &str = "A problem happened while handling your request.";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact(error: &Error) -> Error {
    let redacted = Error::internal(GENERIC_FAILURE_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        match self.code() {
            ErrorCode::NotFound => builder.finish(),
            ErrorCode::InternalError => {
                error!(
                    error = %self,
                    trace_id = self.trace_id().unwrap_or_default(),
                    "request failed"
                );
                builder.json(redact(self))
            }
            ErrorCode::InvalidRequest => builder.json(self),
        }
    }
}
