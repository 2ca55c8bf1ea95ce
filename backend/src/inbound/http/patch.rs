//! JSON Patch (RFC 6902) support for partial point-of-interest updates.
//!
//! Operations target the update representation (`/name`, `/description`).
//! Path segments are matched case-insensitively, so `/Name` works too.

use json_patch::Patch;
use serde_json::Value;

use crate::domain::{Error, FieldErrors};
use crate::inbound::http::dto::PointOfInterestForUpdateDto;

const PATCH_FIELD: &str = "patch";
const TARGET_FIELDS: [&str; 2] = ["name", "description"];

fn invalid_patch(message: impl Into<String>) -> Error {
    FieldErrors::single(PATCH_FIELD, "invalid_patch", message).into()
}

fn canonical_field(segment: &str) -> Option<&'static str> {
    TARGET_FIELDS
        .into_iter()
        .find(|field| field.eq_ignore_ascii_case(segment))
}

/// Rewrite the first pointer segment to the canonical field name.
fn normalise_pointer(pointer: &str) -> String {
    let Some(rest) = pointer.strip_prefix('/') else {
        return pointer.to_owned();
    };
    let (head, tail) = rest.split_once('/').map_or((rest, None), |(h, t)| (h, Some(t)));
    match (canonical_field(head), tail) {
        (Some(field), Some(tail)) => format!("/{field}/{tail}"),
        (Some(field), None) => format!("/{field}"),
        (None, _) => pointer.to_owned(),
    }
}

fn normalise_operations(document: &mut Value) {
    let Some(operations) = document.as_array_mut() else {
        return;
    };
    for operation in operations.iter_mut().filter_map(Value::as_object_mut) {
        for key in ["path", "from"] {
            if let Some(Value::String(pointer)) = operation.get_mut(key) {
                *pointer = normalise_pointer(pointer);
            }
        }
    }
}

/// Decode a patch document from a request body.
///
/// # Errors
///
/// Returns an invalid-request error when the body is empty, `null` or not a
/// sequence of patch operations.
pub fn parse_patch(body: &[u8]) -> Result<Patch, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(invalid_patch("A patch document is required."));
    }
    let mut document: Value = serde_json::from_slice(body)
        .map_err(|err| invalid_patch(format!("The patch document could not be read: {err}")))?;
    if document.is_null() {
        return Err(invalid_patch("A patch document is required."));
    }
    normalise_operations(&mut document);
    serde_json::from_value(document)
        .map_err(|err| invalid_patch(format!("The patch document is invalid: {err}")))
}

/// Apply `patch` to a working copy of `target`.
///
/// # Errors
///
/// Returns an invalid-request error when an operation fails or leaves the
/// document outside the update shape.
pub fn apply_patch(
    target: &PointOfInterestForUpdateDto,
    patch: &Patch,
) -> Result<PointOfInterestForUpdateDto, Error> {
    let mut document = serde_json::to_value(target)
        .map_err(|err| Error::internal(format!("update document serialisation failed: {err}")))?;
    json_patch::patch(&mut document, &patch.0).map_err(|err| invalid_patch(err.to_string()))?;

    if let Some(unknown) = document
        .as_object()
        .and_then(|fields| fields.keys().find(|key| canonical_field(key).is_none()))
    {
        return Err(invalid_patch(format!(
            "The target location specified by path segment '{unknown}' was not found."
        )));
    }
    serde_json::from_value(document).map_err(|err| invalid_patch(err.to_string()))
}
