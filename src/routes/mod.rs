use axum::Router;

use crate::state::AppState;

pub mod carrito;
pub mod doc;
pub mod health;
pub mod productos;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/productos", productos::router())
        .nest("/carrito", carrito::router())
}
