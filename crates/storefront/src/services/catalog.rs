//! Product catalog with a read-through cache.
//!
//! The full product list is cached for one minute. Every mutation goes to
//! the database first and then drops the cached list, so the next read sees
//! the change.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::debug;

use frostbites_core::{NewProduct, Product, ProductId};

use crate::db::{ProductRepository, RepositoryError};

const CACHE_TTL: Duration = Duration::from_secs(60);

/// Cache key. The catalog is small enough to cache as a single list.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
enum CacheKey {
    AllProducts,
}

/// Catalog access shared across handlers.
#[derive(Clone)]
pub struct ProductCatalog {
    inner: Arc<ProductCatalogInner>,
}

struct ProductCatalogInner {
    pool: PgPool,
    cache: Cache<CacheKey, Arc<Vec<Product>>>,
}

impl ProductCatalog {
    /// Create a catalog backed by the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(ProductCatalogInner { pool, cache }),
        }
    }

    fn repository(&self) -> ProductRepository<'_> {
        ProductRepository::new(&self.inner.pool)
    }

    /// All products ordered by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the list is not cached and the query fails.
    pub async fn list(&self) -> Result<Arc<Vec<Product>>, RepositoryError> {
        if let Some(products) = self.inner.cache.get(&CacheKey::AllProducts).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let products = Arc::new(self.repository().list().await?);
        self.inner
            .cache
            .insert(CacheKey::AllProducts, Arc::clone(&products))
            .await;

        Ok(products)
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns the repository error if the insert fails.
    pub async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let created = self.repository().create(product).await?;
        self.invalidate().await;
        Ok(created)
    }

    /// Replace a product's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn update(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let updated = self.repository().update(id, product).await?;
        self.invalidate().await;
        Ok(updated)
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        self.repository().delete(id).await?;
        self.invalidate().await;
        Ok(())
    }

    /// Drop the cached product list.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(&CacheKey::AllProducts).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use frostbites_core::Price;
    use sqlx::postgres::PgPoolOptions;

    fn catalog() -> ProductCatalog {
        // Never connects: tests only touch the cache
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/frostbites_test")
            .unwrap();
        ProductCatalog::new(pool)
    }

    fn vanilla() -> Product {
        Product {
            product_id: ProductId::new(1),
            product_name: "Vanilla".to_string(),
            product_price: Price::from_cents(350),
            product_img: "https://cdn.frostbites.co/vanilla.jpg".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_served_from_cache() {
        let catalog = catalog();
        catalog
            .inner
            .cache
            .insert(CacheKey::AllProducts, Arc::new(vec![vanilla()]))
            .await;

        let products = catalog.list().await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_name, "Vanilla");
    }

    #[tokio::test]
    async fn test_invalidate_drops_cached_list() {
        let catalog = catalog();
        catalog
            .inner
            .cache
            .insert(CacheKey::AllProducts, Arc::new(vec![vanilla()]))
            .await;

        catalog.invalidate().await;
        assert!(catalog.inner.cache.get(&CacheKey::AllProducts).await.is_none());
    }
}
