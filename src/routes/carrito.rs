use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::carrito::{CartQuote, QuoteRequest},
    error::AppResult,
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/cotizar", post(quote_cart))
}

#[utoipa::path(
    post,
    path = "/api/carrito/cotizar",
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Cart priced against the current catalog", body = ApiResponse<CartQuote>)
    ),
    tag = "Carrito"
)]
pub async fn quote_cart(
    State(state): State<AppState>,
    Json(payload): Json<QuoteRequest>,
) -> AppResult<Json<ApiResponse<CartQuote>>> {
    let resp = cart_service::quote_cart(&state, payload).await?;
    Ok(Json(resp))
}
