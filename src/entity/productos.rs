use sea_orm::entity::prelude::*;

use crate::models::Product;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "productos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub nombre: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub precio_venta: Decimal,
    pub stock: i32,
    pub categoria: String,
    pub imagen_url: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub costo: Decimal,
    pub codigo_producto: i32,
    pub codigo_visible: String,
    pub marca: Option<String>,
    pub talla: Option<String>,
    pub color: Option<String>,
    pub genero: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(model: Model) -> Self {
        Product {
            id: model.id,
            nombre: model.nombre,
            precio_venta: model.precio_venta,
            stock: model.stock,
            categoria: model.categoria,
            imagen_url: model.imagen_url,
            costo: model.costo,
            codigo_producto: model.codigo_producto,
            codigo_visible: model.codigo_visible,
            marca: model.marca,
            talla: model.talla,
            color: model.color,
            genero: model.genero,
        }
    }
}
