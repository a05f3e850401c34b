//! Digital Store Core - Shared types library.
//!
//! This crate provides common types used across all Digital Store components:
//! - `cart` - The client-side shopping cart core
//! - storefront and admin front ends (out of tree)
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog products, and customization fields/values

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
