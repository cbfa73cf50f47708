use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Largest value a `NUMERIC(10, 2)` column holds.
const MONEY_MAX: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// A catalog entry as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub nombre: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    pub precio_venta: Decimal,
    pub stock: i32,
    pub categoria: String,
    pub imagen_url: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 12.5)]
    pub costo: Decimal,
    pub codigo_producto: i32,
    pub codigo_visible: String,
    pub marca: Option<String>,
    pub talla: Option<String>,
    pub color: Option<String>,
    pub genero: Option<String>,
}

/// Every client-supplied product field. Used for create and for `PUT`, which
/// replaces all fields (absent optionals are cleared).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[validate(length(min = 1, max = 150), custom(function = "validate_not_blank"))]
    pub nombre: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 19.99)]
    #[validate(custom(function = "validate_money"))]
    pub precio_venta: Decimal,
    #[validate(range(min = 0))]
    pub stock: i32,
    #[validate(length(min = 1, max = 100), custom(function = "validate_not_blank"))]
    pub categoria: String,
    pub imagen_url: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 12.5)]
    #[validate(custom(function = "validate_money"))]
    pub costo: Decimal,
    pub codigo_producto: i32,
    #[validate(length(min = 1, max = 50), custom(function = "validate_not_blank"))]
    pub codigo_visible: String,
    pub marca: Option<String>,
    pub talla: Option<String>,
    pub color: Option<String>,
    pub genero: Option<String>,
}

impl Product {
    pub fn from_draft(id: Uuid, draft: ProductDraft) -> Self {
        Self {
            id,
            nombre: draft.nombre,
            precio_venta: draft.precio_venta,
            stock: draft.stock,
            categoria: draft.categoria,
            imagen_url: draft.imagen_url,
            costo: draft.costo,
            codigo_producto: draft.codigo_producto,
            codigo_visible: draft.codigo_visible,
            marca: draft.marca,
            talla: draft.talla,
            color: draft.color,
            genero: draft.genero,
        }
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("negative").with_message("must not be negative".into()));
    }
    if value.normalize().scale() > 2 {
        return Err(ValidationError::new("scale")
            .with_message("at most 2 decimal places are allowed".into()));
    }
    if *value > MONEY_MAX {
        return Err(ValidationError::new("range")
            .with_message("must not exceed 99999999.99".into()));
    }
    Ok(())
}
