//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "error": "Validation Error",
        "details": [
            "\"name\" is not allowed to be empty",
            "\"status\" must be one of [active, inactive]"
        ]
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid identifier",
    content_type = "application/json",
    example = json!({
        "error": "Invalid item ID"
    })
)]
pub struct BadRequestIdentifierResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Malformed JSON body",
    content_type = "application/json",
    example = json!({
        "error": "Invalid JSON",
        "message": "Failed to parse the request body as JSON: expected value at line 1 column 1"
    })
)]
pub struct BadRequestJsonResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "Item not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error - Storage failure",
    content_type = "application/json",
    example = json!({
        "error": "Failed to fetch items",
        "message": "Something went wrong"
    })
)]
pub struct StorageErrorResponse(pub ErrorResponse);
