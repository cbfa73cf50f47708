//! Shopping cart ("carrito"): line items, totals and best-effort persistence.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::watch;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    models::Product,
    storefront::storage::{KeyValueStore, StorageError},
};

/// Key under which the cart is persisted.
pub const CART_KEY: &str = "carrito";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be greater than 0")]
    InvalidQuantity,

    #[error("quantity overflow for product {0}")]
    Overflow(Uuid),
}

/// One product reference and how many units of it are in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    pub producto_id: Uuid,
    pub cantidad: u32,
}

/// Line items in insertion order, at most one per product, never with quantity 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw line items: zero quantities are dropped and
    /// repeated products are merged into their first occurrence. A merge
    /// that overflows `u32` is rejected like [`Cart::add_item`].
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for item in items {
            if item.cantidad == 0 {
                continue;
            }
            cart.add_item(item.producto_id, item.cantidad)?;
        }
        Ok(cart)
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn position(&self, producto_id: Uuid) -> Option<usize> {
        self.items.iter().position(|i| i.producto_id == producto_id)
    }

    /// Add `cantidad` units, accumulating onto an existing line for the same product.
    pub fn add_item(&mut self, producto_id: Uuid, cantidad: u32) -> Result<(), CartError> {
        if cantidad == 0 {
            return Err(CartError::InvalidQuantity);
        }
        match self.position(producto_id) {
            Some(idx) => {
                let slot = &mut self.items[idx];
                slot.cantidad = slot
                    .cantidad
                    .checked_add(cantidad)
                    .ok_or(CartError::Overflow(producto_id))?;
            }
            None => self.items.push(CartLineItem {
                producto_id,
                cantidad,
            }),
        }
        Ok(())
    }

    /// Set the quantity of a line; 0 removes it. Returns whether the cart changed.
    pub fn set_quantity(&mut self, producto_id: Uuid, cantidad: u32) -> bool {
        if cantidad == 0 {
            return self.remove_item(producto_id);
        }
        match self.position(producto_id) {
            Some(idx) if self.items[idx].cantidad == cantidad => false,
            Some(idx) => {
                self.items[idx].cantidad = cantidad;
                true
            }
            None => {
                self.items.push(CartLineItem {
                    producto_id,
                    cantidad,
                });
                true
            }
        }
    }

    /// Returns whether a line was removed.
    pub fn remove_item(&mut self, producto_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.producto_id != producto_id);
        self.items.len() != before
    }

    /// Sum of `cantidad * precioVenta`. Lines whose product is not in
    /// `products` contribute nothing.
    pub fn compute_total(&self, products: &[Product]) -> Decimal {
        let prices = price_index(products);
        self.items
            .iter()
            .filter_map(|item| {
                prices
                    .get(&item.producto_id)
                    .map(|price| *price * Decimal::from(item.cantidad))
            })
            .sum()
    }

    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.cantidad)).sum()
    }

    /// Product ids referenced by the cart but absent from `products`.
    pub fn missing(&self, products: &[Product]) -> Vec<Uuid> {
        let prices = price_index(products);
        self.items
            .iter()
            .map(|i| i.producto_id)
            .filter(|id| !prices.contains_key(id))
            .collect()
    }
}

fn price_index(products: &[Product]) -> HashMap<Uuid, Decimal> {
    products.iter().map(|p| (p.id, p.precio_venta)).collect()
}

/// The session cart: a [`Cart`] mirrored to a [`KeyValueStore`] after every
/// mutation, with a watch channel carrying the item count for badges.
///
/// Persistence is best effort. The first failed write is logged and the
/// ledger stays memory-only for the rest of the session; the in-memory cart
/// is never affected.
pub struct CartLedger<S> {
    cart: Cart,
    store: S,
    durable: bool,
    count_tx: watch::Sender<u64>,
}

impl<S: KeyValueStore> CartLedger<S> {
    /// Restore the cart saved under [`CART_KEY`]. A missing, unreadable or
    /// corrupt entry starts an empty cart.
    pub fn open(store: S) -> Self {
        let mut durable = true;
        let cart = match store.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLineItem>>(&raw) {
                Ok(items) => Cart::from_items(items).unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "stored cart is invalid, starting empty");
                    Cart::new()
                }),
                Err(err) => {
                    tracing::warn!(error = %err, "stored cart is corrupt, starting empty");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(err) => {
                tracing::warn!(error = %err, "cart storage unavailable, keeping cart in memory only");
                durable = false;
                Cart::new()
            }
        };

        let (count_tx, _) = watch::channel(cart.total_item_count());
        Self {
            cart,
            store,
            durable,
            count_tx,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// `false` once a persistence failure has switched the ledger to memory-only.
    pub fn is_durable(&self) -> bool {
        self.durable
    }

    /// Receiver that always holds the current [`Cart::total_item_count`].
    pub fn subscribe_count(&self) -> watch::Receiver<u64> {
        self.count_tx.subscribe()
    }

    pub fn add_item(&mut self, producto_id: Uuid, cantidad: u32) -> Result<(), CartError> {
        self.cart.add_item(producto_id, cantidad)?;
        self.commit();
        Ok(())
    }

    /// Replace the whole cart. On error the current cart is kept.
    pub fn set_cart(&mut self, items: Vec<CartLineItem>) -> Result<(), CartError> {
        self.cart = Cart::from_items(items)?;
        self.commit();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cart = Cart::new();
        self.commit();
    }

    pub fn remove_item(&mut self, producto_id: Uuid) -> bool {
        let changed = self.cart.remove_item(producto_id);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn set_quantity(&mut self, producto_id: Uuid, cantidad: u32) -> bool {
        let changed = self.cart.set_quantity(producto_id, cantidad);
        if changed {
            self.commit();
        }
        changed
    }

    pub fn compute_total(&self, products: &[Product]) -> Decimal {
        self.cart.compute_total(products)
    }

    pub fn total_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    fn commit(&mut self) {
        self.persist();
        self.count_tx.send_replace(self.cart.total_item_count());
    }

    fn persist(&mut self) {
        if !self.durable {
            tracing::debug!("cart storage disabled for this session, skipping save");
            return;
        }
        if let Err(err) = self.write_through() {
            tracing::warn!(error = %err, "saving cart failed, keeping cart in memory only");
            self.durable = false;
        }
    }

    fn write_through(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(self.cart.items())?;
        self.store.set(CART_KEY, &raw)
    }
}
