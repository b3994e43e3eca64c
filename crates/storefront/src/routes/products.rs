//! Product catalog route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use tracing::{info, instrument};

use frostbites_core::ProductId;
use frostbites_core::api::{MessageResponse, ProductRequest, ProductResponse, ProductsResponse};

use crate::db::RepositoryError;
use crate::error::{AppError, Result};
use crate::middleware::RequireAdmin;
use crate::routes::{ApiJson, ApiPath};
use crate::state::AppState;

/// `GET /product`: the whole catalog, ordered by ID.
pub async fn index(State(state): State<AppState>) -> Result<Json<ProductsResponse>> {
    let products = state.catalog().list().await?;
    Ok(Json(ProductsResponse {
        products: products.as_ref().clone(),
    }))
}

/// `POST /product/create`: add a product (admin only).
#[instrument(skip_all, fields(admin_id = %admin.user_id))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<ProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>)> {
    let new_product = draft.validate()?;
    let product = state.catalog().create(&new_product).await?;
    info!(product_id = %product.product_id, name = %product.product_name, "Product created");

    let message = format!("{} created", product.product_name);
    Ok((
        StatusCode::CREATED,
        Json(ProductResponse {
            success: true,
            product,
            message,
        }),
    ))
}

/// `PUT /product/{id}`: replace a product's fields (admin only).
#[instrument(skip_all, fields(admin_id = %admin.user_id, product_id = %id))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(draft): ApiJson<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    let new_product = draft.validate()?;
    let product = state
        .catalog()
        .update(id, &new_product)
        .await
        .map_err(|e| not_found_or(e, id))?;
    info!("Product updated");

    let message = format!("{} updated", product.product_name);
    Ok(Json(ProductResponse {
        success: true,
        product,
        message,
    }))
}

/// `DELETE /product/{id}`: remove a product (admin only).
#[instrument(skip_all, fields(admin_id = %admin.user_id, product_id = %id))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<MessageResponse>> {
    state
        .catalog()
        .delete(id)
        .await
        .map_err(|e| not_found_or(e, id))?;
    info!("Product deleted");

    Ok(Json(MessageResponse {
        success: true,
        message: "Product deleted".to_string(),
    }))
}

fn not_found_or(err: RepositoryError, id: ProductId) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::NotFound(format!("Product {id} not found")),
        other => AppError::Database(other),
    }
}
