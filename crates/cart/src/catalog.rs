//! Read-only product catalog collaborator.
//!
//! The real catalog lives in the hosted document store and is managed by
//! the admin console, both outside this repository. This module only
//! defines the narrow lookup interface the storefront consumes, plus an
//! in-memory implementation used by tests.

use thiserror::Error;

use digital_store_core::{Product, ProductId};

/// Errors surfaced by a catalog backend.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The backend could not be reached.
    #[error("catalog backend unavailable: {0}")]
    Unavailable(String),

    /// The backend returned a document this version cannot read.
    #[error("unreadable product document: {0}")]
    Unreadable(String),
}

/// Read-only product lookups.
pub trait Catalog {
    /// Look up one product by id. `Ok(None)` means not found.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the backend fails; absence is not an
    /// error.
    fn product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError>;

    /// List the full catalog in display order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the backend fails.
    fn products(&self) -> Result<Vec<Product>, CatalogError>;
}

/// Catalog held fully in memory, used by tests and demos.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
}

impl InMemoryCatalog {
    /// Build a catalog from a fixed product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

impl Catalog for InMemoryCatalog {
    fn product(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.products.iter().find(|p| &p.id == id).cloned())
    }

    fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }
}
