use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{ProductError, ProductResult};

pub const PRICE_MAX: f64 = 1_000_000.0;
pub const TAKE_MAX: i64 = 100;

/// Optional fields may be left out, but an explicit `null` is a type error.
fn reject_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<T>::deserialize(deserializer)? {
        Some(value) => Ok(Some(value)),
        None => Err(de::Error::custom("expected a value, found null")),
    }
}

/// Product entity - a persisted product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Generated identifier, never reused
    pub id: i32,
    /// Unique product name
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// Name of the product image file
    pub image_name: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 3, max = 255, message = "Must be between 3 and 255 characters long"))]
    pub name: String,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Must be between 3 and 255 characters long"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = PRICE_MAX, message = "Must be between 0 and 1000000"))]
    pub price: f64,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Must be between 3 and 255 characters long"))]
    pub image_name: Option<String>,
}

/// DTO for partially updating a product; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Must be between 3 and 255 characters long"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Must be between 3 and 255 characters long"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = PRICE_MAX, message = "Must be between 0 and 1000000"))]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "reject_null", skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 3, max = 255, message = "Must be between 3 and 255 characters long"))]
    pub image_name: Option<String>,
}

/// Raw list query parameters, as they arrive on the URL
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Number of products to skip (integer >= 0)
    #[param(value_type = Option<i64>)]
    pub skip: Option<String>,
    /// Maximum number of products to return (integer 1..=100)
    #[param(value_type = Option<i64>)]
    pub take: Option<String>,
}

impl ProductQuery {
    /// Parse the raw parameters as integers. Bounds are checked separately
    /// by validating the returned [`ProductPage`].
    pub fn parse(&self) -> ProductResult<ProductPage> {
        Ok(ProductPage {
            skip: parse_query_int("skip", self.skip.as_deref())?,
            take: parse_query_int("take", self.take.as_deref())?,
        })
    }
}

/// Validated list query
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Validate)]
pub struct ProductPage {
    #[validate(range(min = 0, message = "Must be 0 or more"))]
    pub skip: Option<i64>,
    #[validate(range(min = 1, max = TAKE_MAX, message = "Must be between 1 and 100"))]
    pub take: Option<i64>,
}

/// Offset/limit handed to the repository. `None` means the clause is left
/// out of the query entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

impl Pagination {
    pub fn take(take: Option<u64>) -> Self {
        Self { skip: None, take }
    }

    pub fn skip_take(skip: u64, take: Option<u64>) -> Self {
        Self {
            skip: Some(skip),
            take,
        }
    }
}

/// Parse a path id into a product id.
pub fn parse_id(raw: &str) -> ProductResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ProductError::InvalidId(raw.to_string()))
}

/// Parse an optional integer query parameter. Missing and empty values are `None`.
pub fn parse_query_int(name: &str, raw: Option<&str>) -> ProductResult<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse::<i64>().map(Some).map_err(|_| {
            ProductError::Validation(format!(
                "Validation failed (numeric string is expected) at \"{}\"",
                name
            ))
        }),
    }
}

impl Product {
    /// Create a new product from CreateProduct DTO
    pub fn new(id: i32, input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            image_name: input.image_name,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply updates from UpdateProduct DTO
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image_name) = update.image_name {
            self.image_name = Some(image_name);
        }
        // Never move backwards, even if the clock does
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
