//! Postgres-backed product store.
//!
//! Every mutation is issued as a single SQL statement, so the product row is
//! the unit of mutual exclusion even with multiple API processes on one
//! database. The order path relies on the conditional form
//! `UPDATE ... SET stock = stock - $2 WHERE id = $1 AND stock >= $2`:
//! either the decrement commits atomically or no row is affected.
//!
//! ## Error mapping
//!
//! | SQLx error | SQLSTATE | DomainError | Scenario |
//! |------------|----------|-------------|----------|
//! | Database (unique violation) | `23505` | `DuplicateSku` | SKU already taken |
//! | Database (other) | any other | `Storage` | Constraint/driver failure |
//! | Pool/network errors | n/a | `Storage` | Connection failures |
//!
//! The table definition lives in `crates/infra/schema.sql`.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;

use warehouse_core::{DomainError, DomainResult, ProductId};
use warehouse_events::EventBus;
use warehouse_products::{DEFAULT_STOCK, NewProduct, Product, ProductPatch, ProductSaved,
    ProductStore};

/// Postgres store behind a connection pool.
///
/// `PgPool` is `Send + Sync`; the store can be shared across handlers.
#[derive(Debug)]
pub struct PostgresProductStore<B> {
    pool: Arc<PgPool>,
    bus: B,
}

impl<B> PostgresProductStore<B>
where
    B: EventBus<ProductSaved>,
{
    pub fn with_bus(pool: PgPool, bus: B) -> Self {
        Self {
            pool: Arc::new(pool),
            bus,
        }
    }

    fn notify_saved(&self, product: &Product) {
        if let Err(e) = self.bus.publish(ProductSaved::of(product)) {
            tracing::warn!("product notification publish failed: {e:?}");
        }
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::from_uuid(row.try_get::<uuid::Uuid, _>("id")?),
        sku: row.try_get("sku")?,
        name: row.try_get("name")?,
        description: row.try_get::<Option<String>, _>("description")?,
        stock: row.try_get("stock")?,
    })
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

fn map_sqlx_error(op: &str, e: sqlx::Error) -> DomainError {
    DomainError::storage(format!("{op}: {e}"))
}

#[async_trait]
impl<B> ProductStore for PostgresProductStore<B>
where
    B: EventBus<ProductSaved>,
{
    #[instrument(skip(self, new), fields(sku = %new.sku), err)]
    async fn create(&self, new: NewProduct) -> DomainResult<Product> {
        let product = Product {
            id: ProductId::new(),
            sku: new.sku,
            name: new.name,
            description: new.description,
            stock: new.stock.unwrap_or(DEFAULT_STOCK),
        };

        sqlx::query(
            r#"
            INSERT INTO products (id, sku, name, description, stock)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.sku)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.stock)
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::duplicate_sku(&product.sku)
            } else {
                map_sqlx_error("create", e)
            }
        })?;

        self.notify_saved(&product);
        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> DomainResult<Product> {
        let row = sqlx::query(
            r#"
            SELECT id, sku, name, description, stock
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("get", e))?;

        match row {
            Some(row) => row_to_product(&row).map_err(|e| map_sqlx_error("get", e)),
            None => Err(DomainError::not_found()),
        }
    }

    #[instrument(skip(self), err)]
    async fn list(&self) -> DomainResult<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, sku, name, description, stock
            FROM products
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list", e))?;

        let mut products = Vec::with_capacity(rows.len());
        for row in &rows {
            products.push(row_to_product(row).map_err(|e| map_sqlx_error("list", e))?);
        }
        Ok(products)
    }

    #[instrument(skip(self, patch), fields(product_id = %id), err)]
    async fn update(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let attempted_sku = patch.sku.clone().unwrap_or_default();

        let row = sqlx::query(
            r#"
            UPDATE products
            SET sku = COALESCE($2, sku),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, sku, name, description, stock
            "#,
        )
        .bind(id.as_uuid())
        .bind(&patch.sku)
        .bind(&patch.name)
        .bind(&patch.description)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::duplicate_sku(attempted_sku.clone())
            } else {
                map_sqlx_error("update", e)
            }
        })?;

        let product = match row {
            Some(row) => row_to_product(&row).map_err(|e| map_sqlx_error("update", e))?,
            None => return Err(DomainError::not_found()),
        };

        self.notify_saved(&product);
        Ok(product)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> DomainResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn add_stock(&self, id: ProductId, amount: i64) -> DomainResult<i64> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, sku, name, description, stock
            "#,
        )
        .bind(id.as_uuid())
        .bind(amount)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("add_stock", e))?;

        let product = match row {
            Some(row) => row_to_product(&row).map_err(|e| map_sqlx_error("add_stock", e))?,
            None => return Err(DomainError::not_found()),
        };

        self.notify_saved(&product);
        Ok(product.stock)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn deduct_stock(&self, id: ProductId, quantity: i64) -> DomainResult<i64> {
        // Atomic conditional update: commits only when enough stock remains.
        let row = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock - $2,
                updated_at = NOW()
            WHERE id = $1 AND stock >= $2
            RETURNING id, sku, name, description, stock
            "#,
        )
        .bind(id.as_uuid())
        .bind(quantity)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("deduct_stock", e))?;

        if let Some(row) = row {
            let product = row_to_product(&row).map_err(|e| map_sqlx_error("deduct_stock", e))?;
            self.notify_saved(&product);
            return Ok(product.stock);
        }

        // No row affected: the product is gone, or the stock was short.
        // The available amount reported here is a snapshot for the error
        // message; the refusal itself was decided atomically above.
        let available = sqlx::query("SELECT stock FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("deduct_stock", e))?;

        match available {
            Some(row) => Err(DomainError::InsufficientStock {
                requested: quantity,
                available: row
                    .try_get("stock")
                    .map_err(|e| map_sqlx_error("deduct_stock", e))?,
            }),
            None => Err(DomainError::not_found()),
        }
    }
}
