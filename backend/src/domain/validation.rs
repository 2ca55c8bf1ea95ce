//! Boundary validation for point-of-interest payloads.
//!
//! Field names match the externally visible property names (`Name`,
//! `Description`) so clients can attach messages to form fields. Every
//! violation is collected; nothing short-circuits after the first failure.

use serde::Serialize;
use serde_json::json;

use super::Error;

/// Maximum length of a point-of-interest name, in characters.
pub const NAME_MAX_LEN: usize = 50;
/// Maximum length of a point-of-interest description, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 200;

const NAME_FIELD: &str = "Name";
const DESCRIPTION_FIELD: &str = "Description";

/// A single field-scoped validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
    pub code: &'static str,
}

/// Ordered collection of validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, code: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
            code,
        });
    }

    /// A collection holding exactly one violation.
    pub fn single(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, code, message);
        errors
    }

    /// Whether no violation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the recorded violations in detection order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether any violation targets `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::invalid_request("one or more validation errors occurred")
            .with_details(json!({ "fieldErrors": errors.0 }))
    }
}

fn max_length_message(field: &str, max: usize) -> String {
    format!("The field {field} must be a string with a maximum length of '{max}'.")
}

/// Validate a point-of-interest name/description pair.
///
/// The name/description distinctness rule is checked first, followed by the
/// declared field constraints.
///
/// # Examples
/// ```
/// use city_info::domain::validate_point_of_interest;
///
/// assert!(validate_point_of_interest("Louvre", Some("Museum")).is_ok());
///
/// let errors = validate_point_of_interest("Louvre", Some("Louvre")).unwrap_err();
/// assert!(errors.has_field("Description"));
/// ```
pub fn validate_point_of_interest(
    name: &str,
    description: Option<&str>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    if description == Some(name) {
        errors.push(
            DESCRIPTION_FIELD,
            "name_equals_description",
            "The provided description should be different from the name.",
        );
    }

    if name.trim().is_empty() {
        errors.push(NAME_FIELD, "required", "You should provide a name value.");
    } else if name.chars().count() > NAME_MAX_LEN {
        errors.push(
            NAME_FIELD,
            "max_length",
            max_length_message(NAME_FIELD, NAME_MAX_LEN),
        );
    }

    if description.is_some_and(|text| text.chars().count() > DESCRIPTION_MAX_LEN) {
        errors.push(
            DESCRIPTION_FIELD,
            "max_length",
            max_length_message(DESCRIPTION_FIELD, DESCRIPTION_MAX_LEN),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    fn codes(errors: &FieldErrors) -> Vec<(&'static str, &'static str)> {
        errors.iter().map(|e| (e.field, e.code)).collect()
    }

    #[rstest]
    #[case("Central Park", None)]
    #[case("Central Park", Some("The most visited urban park in the U.S."))]
    #[case("Central Park", Some(""))]
    fn accepts_valid_pairs(#[case] name: &str, #[case] description: Option<&str>) {
        assert!(validate_point_of_interest(name, description).is_ok());
    }

    #[rstest]
    fn rejects_identical_name_and_description_on_description() {
        let errors = validate_point_of_interest("Louvre", Some("Louvre")).expect_err("equal");
        assert_eq!(codes(&errors), vec![("Description", "name_equals_description")]);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn rejects_blank_name(#[case] name: &str) {
        let errors = validate_point_of_interest(name, Some("x")).expect_err("blank");
        assert_eq!(codes(&errors), vec![("Name", "required")]);
    }

    #[rstest]
    fn length_bounds_are_inclusive() {
        let name = "n".repeat(NAME_MAX_LEN);
        let description = "d".repeat(DESCRIPTION_MAX_LEN);
        assert!(validate_point_of_interest(&name, Some(&description)).is_ok());
    }

    #[rstest]
    fn collects_every_violation_in_order() {
        let name = "n".repeat(NAME_MAX_LEN + 1);
        let errors = validate_point_of_interest(&name, Some(&name)).expect_err("invalid");
        assert_eq!(
            codes(&errors),
            vec![
                ("Description", "name_equals_description"),
                ("Name", "max_length"),
            ]
        );
    }

    #[rstest]
    fn long_description_is_reported() {
        let description = "d".repeat(DESCRIPTION_MAX_LEN + 1);
        let errors = validate_point_of_interest("ok", Some(&description)).expect_err("long");
        assert_eq!(codes(&errors), vec![("Description", "max_length")]);
    }

    #[rstest]
    fn converts_into_invalid_request_with_field_errors() {
        let errors = validate_point_of_interest("", None).expect_err("blank");
        let err = Error::from(errors);

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let first = err
            .details()
            .and_then(|d| d.get("fieldErrors"))
            .and_then(|v| v.get(0))
            .expect("field error");
        assert_eq!(first.get("field").and_then(|v| v.as_str()), Some("Name"));
    }
}
