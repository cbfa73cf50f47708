use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        carrito::{CartQuote, QuoteLine, QuoteRequest},
        productos::{CategoryList, ProductList, ProductQuery},
    },
    models::{Product, ProductDraft},
    response::{ApiResponse, Meta},
    routes::{carrito, health, productos},
    storefront::cart::CartLineItem,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        health::readiness,
        productos::list_products,
        productos::list_categories,
        productos::get_product,
        productos::create_product,
        productos::update_product,
        productos::delete_product,
        carrito::quote_cart
    ),
    components(
        schemas(
            Product,
            ProductDraft,
            ProductList,
            CategoryList,
            ProductQuery,
            CartLineItem,
            QuoteRequest,
            QuoteLine,
            CartQuote,
            health::HealthData,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<CategoryList>,
            ApiResponse<CartQuote>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Productos", description = "Product catalog endpoints"),
        (name = "Carrito", description = "Cart pricing endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
