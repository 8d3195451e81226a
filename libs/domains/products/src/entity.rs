use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{CreateProduct, Product, UpdateProduct};

/// Sea-ORM Entity for the products table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, column_type = "String(StringLen::N(255))")]
    pub name: String,
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    #[sea_orm(column_type = "String(StringLen::N(255))", nullable)]
    pub image_name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Conversion from Sea-ORM Model to domain Product
impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            price: model.price,
            image_name: model.image_name,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// Conversion from domain CreateProduct to Sea-ORM ActiveModel; the id comes from the sequence
impl From<CreateProduct> for ActiveModel {
    fn from(input: CreateProduct) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            id: NotSet,
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            image_name: Set(input.image_name),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

impl ActiveModel {
    /// Column-level patch of row `id`: only fields present in `input` and
    /// `updated_at` end up in the `SET` list.
    pub fn patch(id: i32, input: UpdateProduct) -> Self {
        ActiveModel {
            id: Unchanged(id),
            name: input.name.map_or(NotSet, Set),
            description: input.description.map_or(NotSet, |d| Set(Some(d))),
            price: input.price.map_or(NotSet, Set),
            image_name: input.image_name.map_or(NotSet, |i| Set(Some(i))),
            created_at: NotSet,
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
