use std::str::FromStr;

use inventario_api::{
    config::AppConfig,
    db::{bootstrap_schema, create_pool, orm_from_pool},
    models::ProductDraft,
    store::{PgProductStore, ProductStore},
};
use rust_decimal::Decimal;
use validator::Validate;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url)?;
    // Ensure the table exists.
    bootstrap_schema(&pool).await?;

    let store = PgProductStore::new(orm_from_pool(&pool));
    if !store.list().await?.is_empty() {
        println!("productos already has rows, nothing to seed");
        return Ok(());
    }

    for draft in sample_products()? {
        draft.validate()?;
        let product = store.create(draft).await?;
        println!("Seeded {} ({})", product.nombre, product.id);
    }

    println!("Seed completed");
    Ok(())
}

fn draft(
    nombre: &str,
    categoria: &str,
    precio_venta: &str,
    costo: &str,
    stock: i32,
    codigo_producto: i32,
    codigo_visible: &str,
) -> anyhow::Result<ProductDraft> {
    Ok(ProductDraft {
        nombre: nombre.to_string(),
        precio_venta: Decimal::from_str(precio_venta)?,
        stock,
        categoria: categoria.to_string(),
        imagen_url: None,
        costo: Decimal::from_str(costo)?,
        codigo_producto,
        codigo_visible: codigo_visible.to_string(),
        marca: None,
        talla: None,
        color: None,
        genero: None,
    })
}

fn sample_products() -> anyhow::Result<Vec<ProductDraft>> {
    Ok(vec![
        ProductDraft {
            marca: Some("Nativa".into()),
            talla: Some("M".into()),
            color: Some("Blanco".into()),
            genero: Some("Unisex".into()),
            ..draft("Camiseta Básica", "Camisetas", "39.90", "18.50", 40, 1001, "CAM-001")?
        },
        ProductDraft {
            marca: Some("Denimco".into()),
            talla: Some("32".into()),
            color: Some("Azul".into()),
            genero: Some("Hombre".into()),
            ..draft("Pantalón Jean Clásico", "Pantalones", "119.00", "62.00", 25, 1002, "PAN-002")?
        },
        ProductDraft {
            talla: Some("S".into()),
            color: Some("Rosa".into()),
            genero: Some("Mujer".into()),
            ..draft("Vestido Floral", "Vestidos", "149.90", "71.30", 12, 1003, "VES-003")?
        },
        ProductDraft {
            marca: Some("Andes".into()),
            talla: Some("L".into()),
            color: Some("Negro".into()),
            ..draft("Chaqueta Acolchada", "Chaquetas", "259.00", "140.00", 8, 1004, "CHA-004")?
        },
        ProductDraft {
            color: Some("Beige".into()),
            ..draft("Gorra de Algodón", "Accesorios", "29.90", "9.80", 60, 1005, "ACC-005")?
        },
    ])
}
