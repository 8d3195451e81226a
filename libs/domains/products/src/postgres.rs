use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Schema,
};

use crate::{
    entity,
    error::{ProductError, ProductResult},
    models::{CreateProduct, Pagination, Product, UpdateProduct},
    repository::ProductRepository,
};

/// PostgreSQL-backed product repository
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `products` table if it does not exist yet.
    pub async fn init_schema(&self) -> ProductResult<()> {
        let backend = self.db.get_database_backend();
        let mut table = Schema::new(backend).create_table_from_entity(entity::Entity);
        table.if_not_exists();

        self.db.execute_raw(backend.build(&table)).await?;
        tracing::info!("Ensured products table exists");
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(product_id = model.id, "Created product");
        Ok(model.into())
    }

    async fn count(&self) -> ProductResult<u64> {
        Ok(entity::Entity::find().count(&self.db).await?)
    }

    async fn list(&self, page: Pagination) -> ProductResult<Vec<Product>> {
        let mut query = entity::Entity::find().order_by_asc(entity::Column::Id);

        // Only attach the clauses that were asked for
        if let Some(skip) = page.skip {
            query = query.offset(skip);
        }
        if let Some(take) = page.take {
            query = query.limit(take);
        }

        let models = query.all(&self.db).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn get_by_name(&self, name: &str) -> ProductResult<Option<Product>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: i32, input: UpdateProduct) -> ProductResult<Product> {
        // Single UPDATE .. RETURNING; no row back means the id is gone
        let model = entity::ActiveModel::patch(id, input)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => ProductError::NotFound(id),
                other => other.into(),
            })?;

        tracing::info!(product_id = id, "Updated product");
        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> ProductResult<Product> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ProductError::NotFound(id));
        }

        tracing::info!(product_id = id, "Deleted product");
        Ok(model.into())
    }
}
