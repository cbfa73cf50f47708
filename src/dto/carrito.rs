use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{models::Product, storefront::cart::CartLineItem};

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct QuoteRequest {
    pub items: Vec<CartLineItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub producto: Product,
    pub cantidad: u32,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartQuote {
    pub lineas: Vec<QuoteLine>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub cantidad_total: u64,
    /// Referenced products that no longer exist; they count as zero.
    pub faltantes: Vec<Uuid>,
}
