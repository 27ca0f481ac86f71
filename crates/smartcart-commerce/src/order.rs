//! Order types and status state machine.
//!
//! An order is an immutable-once-created snapshot of a cart at checkout
//! time. Line items copy name, price, and image so history stays accurate
//! even when catalog products change or go away. Only the fulfillment
//! status (and its delivered/paid bookkeeping) mutates afterwards.

use crate::cart::CartItem;
use crate::catalog::{current_timestamp, Product};
use crate::error::CommerceError;
use crate::ids::{OrderId, ProductId, UserId};
use crate::money::Money;
use crate::pricing::CheckoutPricing;
use serde::{Deserialize, Serialize};

/// Order fulfillment status.
///
/// Legal transitions: `Pending -> Processing -> Shipped -> Delivered`,
/// with `Cancelled` reachable from any non-terminal state. `Delivered`
/// and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting processing.
    #[default]
    Pending,
    /// Order confirmed and being prepared.
    Processing,
    /// Order handed to the carrier.
    Shipped,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(OrderStatus::Pending),
            "processing" => Some(OrderStatus::Processing),
            "shipped" => Some(OrderStatus::Shipped),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Check if the status is terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Check whether a transition to `next` is legal.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if *self == next {
            return false;
        }
        match (*self, next) {
            (from, OrderStatus::Cancelled) => !from.is_terminal(),
            (OrderStatus::Pending, OrderStatus::Processing) => true,
            (OrderStatus::Processing, OrderStatus::Shipped) => true,
            (OrderStatus::Shipped, OrderStatus::Delivered) => true,
            _ => false,
        }
    }
}

/// Payment method chosen at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// Card payment.
    Card,
    /// bKash mobile payment.
    Bkash,
    /// Nagad mobile payment.
    Nagad,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Card => "card",
            PaymentMethod::Bkash => "bkash",
            PaymentMethod::Nagad => "nagad",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cod" => Some(PaymentMethod::Cod),
            "card" => Some(PaymentMethod::Card),
            "bkash" => Some(PaymentMethod::Bkash),
            "nagad" => Some(PaymentMethod::Nagad),
            _ => None,
        }
    }
}

/// Shipping address captured on the order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone: String,
}

impl ShippingAddress {
    /// Check that every field is filled in.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.street.trim().is_empty()
            && !self.city.trim().is_empty()
            && !self.state.trim().is_empty()
            && !self.zip_code.trim().is_empty()
            && !self.country.trim().is_empty()
            && !self.phone.trim().is_empty()
    }
}

/// A line item snapshot on an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Product that was ordered (reference for convenience only).
    pub product_id: ProductId,
    /// Product name at order time.
    pub name: String,
    /// Quantity ordered.
    pub quantity: i64,
    /// Unit price from the cart's snapshot.
    pub price: Money,
    /// Primary product image at order time.
    pub image: Option<String>,
}

impl OrderItem {
    /// Build the snapshot from a cart line and its catalog product.
    pub fn from_cart_item(item: &CartItem, product: &Product) -> Self {
        Self {
            product_id: item.product_id.clone(),
            name: product.name.clone(),
            quantity: item.quantity,
            price: item.price,
            image: product.primary_image().map(str::to_string),
        }
    }

    /// Line total (price * quantity).
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Unique order identifier.
    pub id: OrderId,
    /// Customer who placed the order.
    pub user_id: UserId,
    /// Immutable item snapshots.
    pub items: Vec<OrderItem>,
    /// Shipping address.
    pub shipping_address: ShippingAddress,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Pricing breakdown computed at checkout.
    pub pricing: CheckoutPricing,
    /// Fulfillment status.
    pub status: OrderStatus,
    /// Whether payment has been captured.
    pub is_paid: bool,
    /// Unix timestamp of payment capture.
    pub paid_at: Option<i64>,
    /// Whether the order has been delivered.
    pub is_delivered: bool,
    /// Unix timestamp of delivery.
    pub delivered_at: Option<i64>,
    /// Carrier tracking number, set by admin.
    pub tracking_number: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Order {
    /// Create a new pending order from checkout inputs.
    pub fn new(
        user_id: UserId,
        items: Vec<OrderItem>,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
        pricing: CheckoutPricing,
    ) -> Self {
        let now = current_timestamp();
        Self {
            id: OrderId::generate(),
            user_id,
            items,
            shipping_address,
            payment_method,
            pricing,
            status: OrderStatus::Pending,
            is_paid: false,
            paid_at: None,
            is_delivered: false,
            delivered_at: None,
            tracking_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Total item count.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Transition the order to a new status, validating the move.
    ///
    /// Reaching `Delivered` sets the delivered flag and timestamp; no
    /// other transition touches them.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), CommerceError> {
        if !self.status.can_transition_to(next) {
            return Err(CommerceError::InvalidStatusTransition {
                from: self.status.as_str().to_string(),
                to: next.as_str().to_string(),
            });
        }
        self.status = next;
        self.updated_at = current_timestamp();
        if next == OrderStatus::Delivered {
            self.is_delivered = true;
            self.delivered_at = Some(self.updated_at);
        }
        Ok(())
    }

    /// Record payment capture.
    pub fn mark_paid(&mut self) {
        self.is_paid = true;
        self.paid_at = Some(current_timestamp());
        self.updated_at = current_timestamp();
    }

    /// Set the carrier tracking number.
    pub fn set_tracking_number(&mut self, tracking: impl Into<String>) {
        self.tracking_number = Some(tracking.into());
        self.updated_at = current_timestamp();
    }
}
