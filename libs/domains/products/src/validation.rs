//! Request validation.
//!
//! Rules are declared on the DTOs with `validator` attributes. This module
//! runs them and folds every violation into a single message, which is what
//! ends up in the 400 response body.

use axum::{Json, extract::rejection::JsonRejection};
use validator::{Validate, ValidationErrors};

use crate::error::{ProductError, ProductResult};

/// Run the declared rules for `value`, returning it unchanged when it passes.
pub fn validate<T: Validate>(value: T) -> ProductResult<T> {
    value
        .validate()
        .map_err(|e| ProductError::Validation(summarize(&e)))?;
    Ok(value)
}

/// Unwrap a JSON body and validate it. Deserialization failures (missing
/// fields, wrong types, malformed JSON) are reported the same way as rule
/// violations.
pub fn validated_body<T: Validate>(body: Result<Json<T>, JsonRejection>) -> ProductResult<T> {
    let Json(value) = body.map_err(|rejection| {
        ProductError::Validation(format!("Validation error: {}", rejection.body_text()))
    })?;
    validate(value)
}

/// Render all field errors as one line, fields in lexical order.
pub fn summarize(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let issues: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{} at \"{}\"", message, field)
            })
        })
        .collect();

    format!("Validation error: {}", issues.join("; "))
}
