//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use digital_store_core::{Customizations, LineId, Product, ProductId};

/// One line item in the cart.
///
/// Everything except `quantity` is a snapshot taken when the line was
/// added: later catalog edits never change existing lines, and two lines
/// created from the same product stay independent. The serde names are the
/// camelCase field names of the persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Unique within the cart's lifetime, never reused.
    pub line_id: LineId,
    /// Catalog product this line originated from (reference only).
    pub product_id: ProductId,
    /// Product title at add time.
    pub title: String,
    /// Unit price at add time.
    #[serde(with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Product image URL at add time, possibly empty.
    #[serde(default)]
    pub image_url: String,
    /// Selections made on the product page; immutable after add.
    #[serde(default)]
    pub customizations: Customizations,
    /// Always at least 1; "set below 1" is defined as line removal.
    pub quantity: u32,
}

impl CartLine {
    /// Snapshot a catalog product into a fresh line with quantity 1.
    #[must_use]
    pub fn from_product(product: &Product, customizations: Customizations) -> Self {
        Self {
            line_id: generate_line_id(&product.id),
            product_id: product.id.clone(),
            title: product.title.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            customizations,
            quantity: 1,
        }
    }

    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Generate a fresh line id.
///
/// Keeps the legacy `{productId}_{suffix}` shape, but the suffix is a v4
/// UUID: the web storefront used a millisecond timestamp, which could
/// collide for two adds in the same tick.
fn generate_line_id(product_id: &ProductId) -> LineId {
    LineId::new(format!("{product_id}_{}", Uuid::new_v4()))
}
