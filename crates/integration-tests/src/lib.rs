//! Integration tests for Digital Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p digital-store-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Shopper-facing cart scenarios against in-memory storage
//! - `persistence` - Durable record round-trips against real files
//! - `checkout` - Drafting and submitting orders from the cart
//!
//! Everything here runs against the in-process crates; no external services
//! are involved. The shared product fixtures live in [`fixtures`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures {
    //! Catalog fixtures shared across the test binaries.

    use rust_decimal::Decimal;

    use digital_store_core::{
        CustomizationField, CustomizationKind, Product, ProductId,
    };

    /// A plain $9.99 mug with no customizations.
    #[must_use]
    pub fn mug() -> Product {
        Product {
            id: ProductId::new("p1"),
            title: "Mug".to_string(),
            description: "A mug.".to_string(),
            price: Decimal::new(999, 2),
            image_url: "https://img.example/mug.png".to_string(),
            customizations: Vec::new(),
        }
    }

    /// A customizable tee: color select, engraving text, gift-wrap checkbox.
    #[must_use]
    pub fn tee() -> Product {
        Product {
            id: ProductId::new("p2"),
            title: "Tee".to_string(),
            description: String::new(),
            price: Decimal::new(1950, 2),
            image_url: String::new(),
            customizations: vec![
                CustomizationField {
                    label: "Color".to_string(),
                    kind: CustomizationKind::Select {
                        options: vec!["Black".to_string(), "White".to_string()],
                    },
                },
                CustomizationField {
                    label: "Engraving".to_string(),
                    kind: CustomizationKind::Text,
                },
                CustomizationField {
                    label: "Gift wrap".to_string(),
                    kind: CustomizationKind::Checkbox,
                },
            ],
        }
    }
}
