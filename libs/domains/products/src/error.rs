use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Message returned for any id that does not parse as a product id.
pub const INVALID_ID_MESSAGE: &str = "Invalid ID format. Please provide a valid number.";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("{0}")]
    Validation(String),

    #[error("{INVALID_ID_MESSAGE} Got '{0}'")]
    InvalidId(String),

    #[error("Product {0} not found")]
    NotFound(i32),

    #[error("Product with name '{0}' already exists")]
    DuplicateName(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::Validation(msg),
            ProductError::InvalidId(_) => AppError::InvalidId(INVALID_ID_MESSAGE.to_string()),
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            // 400 on this API, carrying the CONFLICT code
            ProductError::DuplicateName(name) => AppError::DuplicateResource(format!(
                "Product with name '{}' already exists",
                name
            )),
            ProductError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<sea_orm::DbErr> for ProductError {
    fn from(err: sea_orm::DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}
