use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Product, ProductDraft},
    store::ProductStore,
};

/// Process-local `ProductStore`. Keeps insertion order; nothing survives a restart.
#[derive(Default)]
pub struct MemoryProductStore {
    rows: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            rows: RwLock::new(products),
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        let product = Product::from_draft(Uuid::new_v4(), draft);
        self.rows.write().await.push(product.clone());
        Ok(product)
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        Ok(self.rows.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Product>> {
        Ok(self.rows.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> AppResult<Option<Product>> {
        let mut rows = self.rows.write().await;
        let Some(slot) = rows.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        *slot = Product::from_draft(id, draft);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(rows.len() != before)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
