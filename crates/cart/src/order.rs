//! Order submission collaborator.
//!
//! Checkout snapshots the cart into an [`OrderDraft`] and hands it to an
//! [`OrderSink`]; the real sink writes to the hosted document store outside
//! this repository. The store itself never talks to the sink - after a
//! successful submission the checkout flow calls
//! [`CartStore::clear`](crate::store::CartStore::clear).

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use digital_store_core::OrderId;

use crate::cart::Cart;
use crate::line::CartLine;

/// Errors surfaced while drafting or submitting an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Checkout is not offered on an empty cart.
    #[error("cannot place an order from an empty cart")]
    EmptyCart,

    /// The backend rejected the submission.
    #[error("order backend rejected the submission: {0}")]
    Rejected(String),

    /// The backend could not be reached.
    #[error("order backend unavailable: {0}")]
    Unavailable(String),
}

/// Contact details collected on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Order lifecycle status. New submissions always start pending; later
/// transitions belong to the admin console, not this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
}

/// A placed order as handed to the order sink.
///
/// Field names match the order documents the legacy storefront wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub customer: CustomerInfo,
    #[serde(default)]
    pub notes: String,
    /// Snapshot of the cart lines at submission time.
    pub items: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderDraft {
    /// Snapshot `cart` into a submittable order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::EmptyCart`] when the cart has no lines; the
    /// storefront redirects away from checkout in that case.
    pub fn from_cart(
        customer: CustomerInfo,
        cart: &Cart,
        notes: impl Into<String>,
    ) -> Result<Self, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        Ok(Self {
            customer,
            notes: notes.into(),
            items: cart.lines().to_vec(),
            total: cart.total(),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        })
    }
}

/// Records a placed order, returning its id.
pub trait OrderSink {
    /// Submit `order` to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError`] when the backend rejects the order or cannot
    /// be reached.
    fn submit(&self, order: &OrderDraft) -> Result<OrderId, OrderError>;
}

/// Sink that records orders in memory, used by tests.
#[derive(Debug, Default)]
pub struct InMemoryOrderSink {
    orders: RefCell<Vec<OrderDraft>>,
}

impl InMemoryOrderSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every order submitted so far, in submission order.
    #[must_use]
    pub fn orders(&self) -> Vec<OrderDraft> {
        self.orders.borrow().clone()
    }
}

impl OrderSink for InMemoryOrderSink {
    fn submit(&self, order: &OrderDraft) -> Result<OrderId, OrderError> {
        let mut orders = self.orders.borrow_mut();
        orders.push(order.clone());
        Ok(OrderId::new(format!("order-{}", orders.len())))
    }
}

#[cfg(test)]
mod tests {
    use digital_store_core::{Customizations, LineId, ProductId};

    use super::*;

    fn customer() -> CustomerInfo {
        CustomerInfo {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: String::new(),
        }
    }

    fn cart_with_lines() -> Cart {
        Cart::from_lines(vec![CartLine {
            line_id: LineId::new("p1_a"),
            product_id: ProductId::new("p1"),
            title: "Mug".to_string(),
            unit_price: Decimal::new(999, 2),
            image_url: String::new(),
            customizations: Customizations::new(),
            quantity: 3,
        }])
    }

    #[test]
    fn test_draft_snapshots_cart() {
        let cart = cart_with_lines();
        let draft = OrderDraft::from_cart(customer(), &cart, "ring twice").unwrap();

        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.total, Decimal::new(2997, 2));
        assert_eq!(draft.status, OrderStatus::Pending);
        assert_eq!(draft.notes, "ring twice");
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let err = OrderDraft::from_cart(customer(), &Cart::new(), "").unwrap_err();
        assert!(matches!(err, OrderError::EmptyCart));
    }

    #[test]
    fn test_status_wire_value() {
        let json = serde_json::to_value(OrderStatus::Pending).unwrap();
        assert_eq!(json, serde_json::json!("pending"));
    }

    #[test]
    fn test_in_memory_sink_assigns_ids() {
        let sink = InMemoryOrderSink::new();
        let draft = OrderDraft::from_cart(customer(), &cart_with_lines(), "").unwrap();

        let first = sink.submit(&draft).unwrap();
        let second = sink.submit(&draft).unwrap();

        assert_ne!(first, second);
        assert_eq!(sink.orders().len(), 2);
    }
}
