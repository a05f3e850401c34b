//! Core types for Digital Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customization;
pub mod id;
pub mod product;

pub use customization::{CustomizationField, CustomizationKind, CustomizationValue, Customizations};
pub use id::*;
pub use product::Product;
