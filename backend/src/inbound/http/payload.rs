//! Request body decoding.
//!
//! Bodies are read as raw bytes so that an absent or `null` payload can be
//! reported as a bad request rather than an extractor failure.

use serde::de::DeserializeOwned;

use crate::domain::{Error, FieldErrors};

const BODY_FIELD: &str = "body";

/// Decode a required JSON body.
///
/// # Errors
///
/// Returns an invalid-request error when the body is empty, `null`, or not a
/// JSON document of the expected shape.
pub fn parse_json_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(missing_body());
    }
    let parsed: Option<T> = serde_json::from_slice(body).map_err(|err| {
        Error::from(FieldErrors::single(
            BODY_FIELD,
            "malformed_body",
            format!("The request body could not be read: {err}"),
        ))
    })?;
    parsed.ok_or_else(missing_body)
}

fn missing_body() -> Error {
    FieldErrors::single(BODY_FIELD, "required", "A request body is required.").into()
}
