use crate::{
    dto::carrito::{CartQuote, QuoteLine, QuoteRequest},
    error::{AppError, AppResult},
    response::{ApiResponse, Meta},
    state::AppState,
    storefront::cart::Cart,
};

/// Price a cart against the current catalog. Lines for unknown products are
/// reported in `faltantes` and contribute nothing to the total.
pub async fn quote_cart(
    state: &AppState,
    payload: QuoteRequest,
) -> AppResult<ApiResponse<CartQuote>> {
    let products = state.store.list().await?;
    let cart =
        Cart::from_items(payload.items).map_err(|err| AppError::BadRequest(err.to_string()))?;

    let lineas = cart
        .items()
        .iter()
        .filter_map(|item| {
            products
                .iter()
                .find(|p| p.id == item.producto_id)
                .map(|p| QuoteLine {
                    producto: p.clone(),
                    cantidad: item.cantidad,
                    subtotal: p.precio_venta * rust_decimal::Decimal::from(item.cantidad),
                })
        })
        .collect::<Vec<_>>();

    let quote = CartQuote {
        total: cart.compute_total(&products),
        cantidad_total: cart.total_item_count(),
        faltantes: cart.missing(&products),
        lineas,
    };
    let meta = Meta::total(cart.items().len());
    Ok(ApiResponse::success("Carrito", quote, Some(meta)))
}
