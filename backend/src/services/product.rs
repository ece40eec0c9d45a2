//! Product catalog service

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use shared::{non_empty, CreateProductInput, Pagination, Product, UpdateProductInput};

/// Product service for managing the catalog
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Database row for a product
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    id: i64,
    sku: String,
    name: String,
    description: Option<String>,
    category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            sku: row.sku,
            name: row.name,
            description: row.description,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Filters for listing products
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Pagination,
}

pub(crate) const PRODUCT_COLUMNS: &str =
    "id, sku, name, description, category, created_at, updated_at";

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a product; a duplicate SKU is rejected
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (sku, name, description, category)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(input.sku.trim())
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(non_empty(input.category))
        .fetch_one(&self.db)
        .await
        .map_err(|e| AppError::from_constraint(e, "sku", "Product"))?;

        tracing::info!(product_id = row.id, sku = %row.sku, "product created");
        Ok(row.into())
    }

    /// List products ordered by id
    pub async fn list_products(&self, filter: &ProductFilter) -> AppResult<Vec<Product>> {
        let pattern = filter.search.as_ref().map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            SELECT {}
            FROM products
            WHERE ($1::TEXT IS NULL OR category = $1)
              AND ($2::TEXT IS NULL
                   OR name ILIKE $2
                   OR description ILIKE $2
                   OR sku ILIKE $2)
            ORDER BY id
            OFFSET $3 LIMIT $4
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(&filter.category)
        .bind(pattern)
        .bind(filter.page.skip)
        .bind(filter.page.limit)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID
    pub async fn get_product(&self, product_id: i64) -> AppResult<Product> {
        sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .map(Product::from)
        .ok_or_else(|| AppError::NotFound("Product".to_string()))
    }

    /// Update a product; absent fields are left unchanged
    pub async fn update_product(
        &self,
        product_id: i64,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET sku = COALESCE($2, sku),
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                category = COALESCE($5, category),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        ))
        .bind(product_id)
        .bind(input.sku.as_deref().map(str::trim))
        .bind(input.name.as_deref().map(str::trim))
        .bind(&input.description)
        .bind(&input.category)
        .fetch_optional(&self.db)
        .await
        .map_err(|e| AppError::from_constraint(e, "sku", "Product"))?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }

    /// Delete a product; blocked while inventory, sales or orders reference it
    pub async fn delete_product(&self, product_id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id)
            .execute(&self.db)
            .await
            .map_err(|e| AppError::from_constraint(e, "id", "Product"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product".to_string()));
        }

        tracing::info!(product_id, "product deleted");
        Ok(())
    }
}
