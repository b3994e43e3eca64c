//! Product repository for the catalog.

use sqlx::PgPool;

use frostbites_core::{NewProduct, Product, ProductId};

use super::RepositoryError;

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT product_id, product_name, product_price, product_img
            FROM products
            ORDER BY product_id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a validated product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a product with this name exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (product_name, product_price, product_img)
            VALUES ($1, $2, $3)
            RETURNING product_id, product_name, product_price, product_img
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "product name already exists"))
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Conflict` if another product has this name.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        sqlx::query_as::<_, Product>(
            r"
            UPDATE products
            SET product_name = $1, product_price = $2, product_img = $3
            WHERE product_id = $4
            RETURNING product_id, product_name, product_price, product_img
            ",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(&product.image_url)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::from_insert(e, "product name already exists"))?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE product_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
