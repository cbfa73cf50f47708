//! Client-side storefront logic: what the shop page does with the product list.

pub mod cart;
pub mod catalog;
pub mod notify;
pub mod shell;
pub mod storage;
