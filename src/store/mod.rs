//! Product persistence behind a trait so the HTTP layer does not care where rows live.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Product, ProductDraft},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

/// CRUD over the `productos` table. Callers validate drafts before they get here.
///
/// Each call is a single-row operation; the backing database's isolation is
/// the only concurrency guard.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Insert a new product with a freshly generated id.
    async fn create(&self, draft: ProductDraft) -> AppResult<Product>;

    /// Every stored product. No ordering is promised.
    async fn list(&self) -> AppResult<Vec<Product>>;

    async fn get(&self, id: Uuid) -> AppResult<Option<Product>>;

    /// Replace every field of an existing product. `None` when the id is unknown.
    async fn update(&self, id: Uuid, draft: ProductDraft) -> AppResult<Option<Product>>;

    /// `false` when nothing was deleted.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Cheap round-trip used by the readiness probe.
    async fn ping(&self) -> AppResult<()>;
}
