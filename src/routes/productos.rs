use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::productos::{CategoryList, ProductList, ProductQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Product, ProductDraft},
    response::ApiResponse,
    services::product_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/categorias", get(list_categories))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[utoipa::path(
    get,
    path = "/api/productos",
    params(ProductQuery),
    responses(
        (status = 200, description = "List productos, optionally filtered", body = ApiResponse<ProductList>)
    ),
    tag = "Productos"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = product_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/productos/categorias",
    responses(
        (status = 200, description = "Distinct categories, sorted", body = ApiResponse<CategoryList>)
    ),
    tag = "Productos"
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = product_service::list_categories(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/productos/{id}",
    params(
        ("id" = Uuid, Path, description = "Producto ID")
    ),
    responses(
        (status = 200, description = "Get producto", body = ApiResponse<Product>),
        (status = 404, description = "Producto not found"),
    ),
    tag = "Productos"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/productos",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Create producto", body = ApiResponse<Product>),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Field validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Productos"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProductDraft>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    let resp = product_service::create_product(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/productos/{id}",
    params(
        ("id" = Uuid, Path, description = "Producto ID")
    ),
    request_body = ProductDraft,
    responses(
        (status = 200, description = "Replaced producto", body = ApiResponse<Product>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Producto not found"),
        (status = 422, description = "Field validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Productos"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductDraft>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = product_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/productos/{id}",
    params(
        ("id" = Uuid, Path, description = "Producto ID")
    ),
    responses(
        (status = 200, description = "Deleted producto", body = ApiResponse<serde_json::Value>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Producto not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Productos"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = product_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}
