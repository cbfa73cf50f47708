use std::str::FromStr;

use inventario_api::{
    models::Product,
    storefront::catalog::{Catalog, TODOS, categories, filter, normalize},
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn product(nombre: &str, categoria: &str) -> Product {
    Product {
        id: Uuid::new_v4(),
        nombre: nombre.to_string(),
        precio_venta: Decimal::from_str("10.00").unwrap(),
        stock: 1,
        categoria: categoria.to_string(),
        imagen_url: None,
        costo: Decimal::from_str("5.00").unwrap(),
        codigo_producto: 1,
        codigo_visible: "X-1".to_string(),
        marca: None,
        talla: None,
        color: None,
        genero: None,
    }
}

fn names<'a>(products: &[&'a Product]) -> Vec<&'a str> {
    products.iter().map(|p| p.nombre.as_str()).collect()
}

fn sample() -> Vec<Product> {
    vec![
        product("Café de Colombia", "bebidas"),
        product("Camiseta Niño", "ropa"),
        product("Té verde", "bebidas"),
        product("Pantalón", "ropa"),
        product("cafetera", "hogar"),
    ]
}

#[test]
fn empty_search_with_todos_returns_everything_in_order() {
    let products = sample();
    let result = filter(&products, "", TODOS);
    let expected: Vec<&Product> = products.iter().collect();
    assert_eq!(result, expected);
}

#[test]
fn empty_input_stays_empty() {
    assert!(filter(&[], "cafe", TODOS).is_empty());
}

#[test]
fn search_ignores_accents_and_case() {
    let products = vec![product("Café", "bebidas")];
    for query in ["cafe", "CAFE", "café", "CaFÉ", "af"] {
        assert_eq!(filter(&products, query, TODOS).len(), 1, "query {query:?}");
    }
    assert!(filter(&products, "cafes", TODOS).is_empty());
}

#[test]
fn decomposed_input_matches_precomposed_names() {
    let products = vec![product("Niño", "ropa")];
    // "n" + combining tilde
    assert_eq!(filter(&products, "nin\u{0303}o", TODOS).len(), 1);
}

#[test]
fn category_is_exact_and_anded_with_search() {
    let products = sample();
    assert_eq!(
        names(&filter(&products, "caf", "bebidas")),
        vec!["Café de Colombia"]
    );
    assert_eq!(
        names(&filter(&products, "caf", TODOS)),
        vec!["Café de Colombia", "cafetera"]
    );
    assert!(filter(&products, "", "Bebidas").is_empty());
    assert_eq!(
        names(&filter(&products, "", "ropa")),
        vec!["Camiseta Niño", "Pantalón"]
    );
}

#[test]
fn filtering_is_repeatable() {
    let products = sample();
    let first = filter(&products, "a", "ropa");
    let second = filter(&products, "a", "ropa");
    assert_eq!(first, second);
    assert_eq!(products.len(), 5);
}

#[test]
fn normalize_strips_marks_and_lowercases() {
    assert_eq!(normalize("ÁRBOL Pingüino"), "arbol pinguino");
    assert_eq!(normalize(""), "");
}

#[test]
fn categories_are_distinct_and_sorted() {
    assert_eq!(categories(&sample()), vec!["bebidas", "hogar", "ropa"]);
}

#[test]
fn catalog_tracks_current_selection() {
    let mut catalog = Catalog::new();
    assert_eq!(catalog.category(), TODOS);
    catalog.replace_products(sample());
    assert_eq!(catalog.visible().len(), 5);

    catalog.set_search("TE");
    catalog.set_category("bebidas");
    assert_eq!(names(&catalog.visible()), vec!["Té verde"]);

    catalog.set_category(TODOS);
    assert_eq!(
        names(&catalog.visible()),
        vec!["Té verde", "cafetera"]
    );
}

#[test]
fn find_only_returns_loaded_products() {
    let products = sample();
    let known = products[1].id;
    let mut catalog = Catalog::new();
    assert!(catalog.find(known).is_none());

    catalog.replace_products(products);
    assert_eq!(catalog.find(known).map(|p| p.id), Some(known));
    assert!(catalog.find(Uuid::new_v4()).is_none());
}
