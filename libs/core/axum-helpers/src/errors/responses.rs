//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "code": 2001,
        "error": "DATABASE_ERROR",
        "message": "Database error occurred"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "code": 1001,
        "error": "VALIDATION_ERROR",
        "message": "Validation error: Must be between 3 and 255 characters long at \"name\""
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

/// 400 for endpoints that also enforce a unique key
#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error or Duplicate Resource",
    content_type = "application/json",
    examples(
        ("Validation" = (
            summary = "Field rule failed",
            value = json!({
                "code": 1001,
                "error": "VALIDATION_ERROR",
                "message": "Validation error: Must be between 0 and 1000000 at \"price\""
            })
        )),
        ("Duplicate" = (
            summary = "Unique key already taken",
            value = json!({
                "code": 1007,
                "error": "CONFLICT",
                "message": "Product with name 'Widget' already exists"
            })
        ))
    )
)]
pub struct BadRequestConflictResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid ID",
    content_type = "application/json",
    example = json!({
        "code": 1002,
        "error": "INVALID_ID",
        "message": "Invalid ID format. Please provide a valid number."
    })
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "code": 1004,
        "error": "NOT_FOUND",
        "message": "Resource not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
