//! Digital Store cart core.
//!
//! The shopper's in-progress order lives in a single [`CartStore`] per
//! execution context. The store owns the line sequence, persists it through
//! a [`CartStorage`] adapter after every mutation, and broadcasts changes
//! to subscribers. Everything else the storefront touches (catalog reads,
//! order submission) goes through the narrow collaborator traits in
//! [`catalog`] and [`order`]; their real implementations live outside this
//! repository.
//!
//! # Modules
//!
//! - [`cart`] - The cart aggregate with derived totals
//! - [`line`] - Cart line items with add-time product snapshots
//! - [`store`] - The cart store: mutation, persistence, notification
//! - [`storage`] - Durable key-value persistence adapters
//! - [`catalog`] - Read-only product catalog collaborator
//! - [`order`] - Order submission collaborator

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod line;
pub mod order;
pub mod storage;
pub mod store;

pub use cart::Cart;
pub use catalog::{Catalog, CatalogError, InMemoryCatalog};
pub use line::CartLine;
pub use order::{CustomerInfo, InMemoryOrderSink, OrderDraft, OrderError, OrderSink, OrderStatus};
pub use storage::{CART_STORAGE_KEY, CartStorage, JsonFileStorage, MemoryStorage, StorageError};
pub use store::{CartStore, SubscriptionId};
