//! Catalog product shape consumed by the storefront.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::customization::{CustomizationField, Customizations};
use super::id::ProductId;

/// A catalog product.
///
/// Cart lines snapshot `title`, `price`, and `image_url` at add time, so
/// later catalog edits never reach lines that are already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Document id assigned by the catalog backend.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Long-form description shown on the product page.
    #[serde(default)]
    pub description: String,
    /// Unit price in the shop currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Image URL, empty when the product has no image.
    #[serde(default)]
    pub image_url: String,
    /// Customization inputs offered on the product page.
    #[serde(default)]
    pub customizations: Vec<CustomizationField>,
}

impl Product {
    /// Seed the selection map shown when the product page first renders.
    #[must_use]
    pub fn default_customizations(&self) -> Customizations {
        self.customizations
            .iter()
            .map(|field| (field.label.clone(), field.default_value()))
            .collect()
    }
}
