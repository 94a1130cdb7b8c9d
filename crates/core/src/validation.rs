//! Conversion of `validator` results into [`CoreError::Validation`].
//!
//! The resulting `details` payload has the shape:
//!
//! ```json
//! { "fields": { "email": [ { "code": "email", "message": "must be a valid email address" } ] } }
//! ```
//!
//! Errors inside `#[validate(nested)]` fields are flattened into dotted
//! paths (`profile.display_name`, `contacts[1].email`).

use serde_json::{json, Map, Value};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Validate `input`, mapping failures to a field-level validation error.
pub fn validate<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(|errors| validation_error(&errors))
}

/// Build a [`CoreError::Validation`] from collected field errors.
///
/// Field names are listed in sorted order in both the message and `details`.
pub fn validation_error(errors: &ValidationErrors) -> CoreError {
    let mut fields = Map::new();
    collect_fields(errors, "", &mut fields);

    let mut names: Vec<String> = fields.keys().cloned().collect();
    names.sort();

    CoreError::validation_with(
        format!("Invalid value for field(s): {}", names.join(", ")),
        json!({ "fields": Value::Object(fields) }),
    )
}

fn collect_fields(errors: &ValidationErrors, prefix: &str, fields: &mut Map<String, Value>) {
    for (field, kind) in errors.errors() {
        let path = format!("{prefix}{field}");
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                let entries: Vec<Value> = field_errors
                    .iter()
                    .map(|e| {
                        json!({
                            "code": e.code,
                            "message": e.message.as_deref().unwrap_or("invalid value"),
                        })
                    })
                    .collect();
                fields.insert(path, Value::Array(entries));
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_fields(inner, &format!("{path}."), fields);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_fields(inner, &format!("{path}[{index}]."), fields);
                }
            }
        }
    }
}

/// Custom `validator` rule: reject strings that are empty after trimming.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
