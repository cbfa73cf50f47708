use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, DatabaseConnection, EntityTrait, QuerySelect,
    TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity::productos::{ActiveModel, Entity as Productos},
    error::AppResult,
    models::{Product, ProductDraft},
    store::ProductStore,
};

/// `ProductStore` backed by Postgres through SeaORM.
#[derive(Clone)]
pub struct PgProductStore {
    orm: DatabaseConnection,
}

impl PgProductStore {
    pub fn new(orm: DatabaseConnection) -> Self {
        Self { orm }
    }
}

fn apply_draft(active: &mut ActiveModel, draft: ProductDraft) {
    active.nombre = Set(draft.nombre);
    active.precio_venta = Set(draft.precio_venta);
    active.stock = Set(draft.stock);
    active.categoria = Set(draft.categoria);
    active.imagen_url = Set(draft.imagen_url);
    active.costo = Set(draft.costo);
    active.codigo_producto = Set(draft.codigo_producto);
    active.codigo_visible = Set(draft.codigo_visible);
    active.marca = Set(draft.marca);
    active.talla = Set(draft.talla);
    active.color = Set(draft.color);
    active.genero = Set(draft.genero);
}

#[async_trait]
impl ProductStore for PgProductStore {
    /// The id is generated here, so the column's `uuid_generate_v4()` default is never used.
    async fn create(&self, draft: ProductDraft) -> AppResult<Product> {
        let mut active = ActiveModel {
            id: Set(Uuid::new_v4()),
            ..Default::default()
        };
        apply_draft(&mut active, draft);
        let model = active.insert(&self.orm).await?;
        Ok(model.into())
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        let items = Productos::find()
            .all(&self.orm)
            .await?
            .into_iter()
            .map(Product::from)
            .collect();
        Ok(items)
    }

    async fn get(&self, id: Uuid) -> AppResult<Option<Product>> {
        let found = Productos::find_by_id(id).one(&self.orm).await?;
        Ok(found.map(Product::from))
    }

    async fn update(&self, id: Uuid, draft: ProductDraft) -> AppResult<Option<Product>> {
        // Row lock so a concurrent delete cannot land between read and write.
        let txn = self.orm.begin().await?;
        let existing = match Productos::find_by_id(id).lock_exclusive().one(&txn).await? {
            Some(model) => model,
            None => {
                txn.rollback().await?;
                return Ok(None);
            }
        };

        let mut active: ActiveModel = existing.into();
        apply_draft(&mut active, draft);
        let model = active.update(&txn).await?;
        txn.commit().await?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = Productos::delete_by_id(id).exec(&self.orm).await?;
        Ok(result.rows_affected > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        self.orm.ping().await?;
        Ok(())
    }
}
