//! The shop page's copy of the product catalog.
//!
//! Loaded on mount with [`Catalog::refresh`]. Admin actions update it in
//! place: a created product is appended from the server's response, an edit
//! triggers a full refetch, and a delete drops the entry locally.

use tracing::{debug, instrument};

use frostbites_core::{Product, ProductDraft, ProductId};

use crate::api::CatalogApi;
use crate::error::ClientError;
use crate::notice::Notices;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Replace the cached list with the server's.
    ///
    /// On failure the list is left as it was and an error notice is queued.
    #[instrument(skip_all)]
    pub async fn refresh<A: CatalogApi>(&mut self, api: &A, notices: &mut Notices) {
        match api.list_products().await {
            Ok(response) => {
                debug!(count = response.products.len(), "Catalog loaded");
                self.products = response.products;
            }
            Err(e) => notices.error(e.to_string()),
        }
    }

    /// Create a product from the admin form.
    ///
    /// The draft is validated first; an invalid draft is returned as
    /// [`ClientError::Validation`] without any request being made.
    ///
    /// # Errors
    ///
    /// Returns the validation failure, [`ClientError::MissingToken`] when
    /// signed out, or the API error (also queued as a notice).
    #[instrument(skip_all, fields(name = %draft.name))]
    pub async fn create<A: CatalogApi>(
        &mut self,
        api: &A,
        token: Option<&str>,
        draft: &ProductDraft,
        notices: &mut Notices,
    ) -> Result<Product, ClientError> {
        draft.validate()?;
        let token = token.ok_or(ClientError::MissingToken)?;

        match api.create_product(token, draft).await {
            Ok(response) => {
                notices.success(response.message);
                self.products.push(response.product.clone());
                Ok(response.product)
            }
            Err(e) => {
                notices.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Save an edited product, then reload the list.
    ///
    /// # Errors
    ///
    /// Same as [`Catalog::create`].
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn update<A: CatalogApi>(
        &mut self,
        api: &A,
        token: Option<&str>,
        id: ProductId,
        draft: &ProductDraft,
        notices: &mut Notices,
    ) -> Result<(), ClientError> {
        draft.validate()?;
        let token = token.ok_or(ClientError::MissingToken)?;

        match api.update_product(token, id, draft).await {
            Ok(response) => {
                notices.success(response.message);
                self.refresh(api, notices).await;
                Ok(())
            }
            Err(e) => {
                notices.error(e.to_string());
                Err(e)
            }
        }
    }

    /// Delete a product and drop it from the list.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] when signed out, or the API error
    /// (also queued as a notice).
    #[instrument(skip_all, fields(product_id = %id))]
    pub async fn delete<A: CatalogApi>(
        &mut self,
        api: &A,
        token: Option<&str>,
        id: ProductId,
        notices: &mut Notices,
    ) -> Result<(), ClientError> {
        let token = token.ok_or(ClientError::MissingToken)?;

        match api.delete_product(token, id).await {
            Ok(response) => {
                self.products.retain(|p| p.product_id != id);
                notices.success(response.message);
                Ok(())
            }
            Err(e) => {
                notices.error(e.to_string());
                Err(e)
            }
        }
    }
}
