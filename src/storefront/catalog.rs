//! Search and category filtering over the last-fetched product list.

use std::collections::BTreeSet;

use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

use crate::models::Product;

/// Category value that matches every product.
pub const TODOS: &str = "todos";

/// Fold text for comparison: canonical decomposition, combining marks
/// (U+0300..=U+036F) removed, lowercase. `"Café"` and `"CAFE"` both become `"cafe"`.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// Keep products whose name contains `search` (accent and case insensitive)
/// and whose category equals `category`, unless `category` is [`TODOS`].
///
/// Input order is preserved. An empty search matches every name.
pub fn filter<'a>(products: &'a [Product], search: &str, category: &str) -> Vec<&'a Product> {
    let needle = normalize(search);
    products
        .iter()
        .filter(|p| normalize(&p.nombre).contains(&needle))
        .filter(|p| category == TODOS || p.categoria == category)
        .collect()
}

/// Distinct categories, sorted, for populating a category selector.
pub fn categories(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.categoria.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// The storefront's view of the catalog: the products last fetched from the
/// API plus the current search box and category selector values.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    search: String,
    category: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            search: String::new(),
            category: TODOS.to_string(),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The loaded product with this id, if any.
    pub fn find(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Products that pass the current search and category selection.
    pub fn visible(&self) -> Vec<&Product> {
        filter(&self.products, &self.search, &self.category)
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.products)
    }
}
