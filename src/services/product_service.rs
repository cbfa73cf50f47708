use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::productos::{CategoryList, ProductList, ProductQuery},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Product, ProductDraft},
    response::{ApiResponse, Meta},
    state::AppState,
    storefront::catalog::{self, TODOS},
};

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    let products = state.store.list().await?;

    let search = query.q.unwrap_or_default();
    let category = query
        .categoria
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| TODOS.to_string());

    let items: Vec<Product> = if search.is_empty() && category == TODOS {
        products
    } else {
        catalog::filter(&products, &search, &category)
            .into_iter()
            .cloned()
            .collect()
    };

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Productos", ProductList { items }, Some(meta)))
}

pub async fn list_categories(state: &AppState) -> AppResult<ApiResponse<CategoryList>> {
    let products = state.store.list().await?;
    let items = catalog::categories(&products);
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Categorias", CategoryList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: Uuid) -> AppResult<ApiResponse<Product>> {
    let product = state.store.get(id).await?.ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Producto", product, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    draft: ProductDraft,
) -> AppResult<ApiResponse<Product>> {
    draft.validate()?;
    let product = state.store.create(draft).await?;
    tracing::info!(
        product_id = %product.id,
        subject = user.subject.as_deref().unwrap_or("-"),
        "producto created"
    );
    Ok(ApiResponse::success(
        "Producto created",
        product,
        Some(Meta::empty()),
    ))
}

/// Full replace: every field of the stored product takes the draft's value.
pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    draft: ProductDraft,
) -> AppResult<ApiResponse<Product>> {
    draft.validate()?;
    let product = state
        .store
        .update(id, draft)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::info!(
        product_id = %product.id,
        subject = user.subject.as_deref().unwrap_or("-"),
        "producto updated"
    );
    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    if !state.store.delete(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(
        product_id = %id,
        subject = user.subject.as_deref().unwrap_or("-"),
        "producto deleted"
    );
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
