//! Order store: insert-once orders, listings, and admin statistics.

use crate::collection::{Collection, Document};
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use smartcart_commerce::money::{Currency, Money};
use smartcart_commerce::order::{Order, OrderStatus};
use smartcart_commerce::{CommerceError, OrderId, UserId};
use std::collections::BTreeMap;

impl Document for Order {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// A page of orders for the admin listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

/// Aggregate order statistics for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStats {
    pub total_orders: usize,
    /// Revenue over paid orders only.
    pub total_revenue: Money,
    /// Order counts keyed by status string.
    pub orders_by_status: BTreeMap<String, usize>,
}

/// The order store.
#[derive(Default)]
pub struct OrderStore {
    orders: Collection<Order>,
}

impl OrderStore {
    pub const DEFAULT_PAGE_LIMIT: usize = 10;

    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly created order.
    pub fn insert(&self, order: Order) -> Result<(), StoreError> {
        self.orders.insert(order)
    }

    /// Get an order by ID.
    pub fn get(&self, id: &OrderId) -> Result<Order, CommerceError> {
        self.orders
            .get(id.as_str())?
            .ok_or_else(|| CommerceError::OrderNotFound(id.to_string()))
    }

    /// All orders for a user, newest first.
    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Order>, StoreError> {
        let mut orders = self.orders.filter(|o| &o.user_id == user_id)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    /// Paginated listing of all orders, newest first.
    pub fn list_all(&self, page: usize, limit: usize) -> Result<OrderPage, StoreError> {
        let mut orders = self.orders.all()?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        let total = orders.len();
        let limit = if limit == 0 { Self::DEFAULT_PAGE_LIMIT } else { limit };
        let pages = total.div_ceil(limit).max(1);
        let page = page.max(1).min(pages);
        let orders = orders
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok(OrderPage {
            orders,
            page,
            pages,
            total,
        })
    }

    /// Apply a validated status transition to an order.
    ///
    /// The state machine in the domain type decides legality; the store
    /// just runs it under the write lock and persists the result.
    pub fn update_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<Order, CommerceError> {
        let result = self
            .orders
            .update(id.as_str(), |order| {
                order.transition_to(status)?;
                if let Some(tracking) = tracking_number {
                    order.set_tracking_number(tracking);
                }
                Ok::<Order, CommerceError>(order.clone())
            })
            .map_err(|e| e.map_not_found(CommerceError::OrderNotFound(id.to_string())))?;
        result
    }

    /// Mark an order paid.
    pub fn mark_paid(&self, id: &OrderId) -> Result<Order, CommerceError> {
        self.orders
            .update(id.as_str(), |order| {
                order.mark_paid();
                order.clone()
            })
            .map_err(|e| e.map_not_found(CommerceError::OrderNotFound(id.to_string())))
    }

    /// Aggregate statistics for the admin dashboard.
    pub fn stats(&self) -> Result<OrderStats, StoreError> {
        let orders = self.orders.all()?;
        let total_orders = orders.len();

        let mut revenue_cents = 0i64;
        let mut orders_by_status: BTreeMap<String, usize> = BTreeMap::new();
        for order in &orders {
            if order.is_paid {
                revenue_cents = revenue_cents.saturating_add(order.pricing.total_price.amount_cents);
            }
            *orders_by_status
                .entry(order.status.as_str().to_string())
                .or_insert(0) += 1;
        }

        Ok(OrderStats {
            total_orders,
            total_revenue: Money::new(revenue_cents, Currency::USD),
            orders_by_status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcart_commerce::order::{OrderItem, PaymentMethod, ShippingAddress};
    use smartcart_commerce::pricing::CheckoutPricing;
    use smartcart_commerce::ProductId;

    fn address() -> ShippingAddress {
        ShippingAddress {
            name: "Test User".to_string(),
            street: "1 Main Street".to_string(),
            city: "Springfield".to_string(),
            state: "IL".to_string(),
            zip_code: "62704".to_string(),
            country: "USA".to_string(),
            phone: "+15551234567".to_string(),
        }
    }

    fn order_for(user: &str, subtotal_cents: i64) -> Order {
        let items = vec![OrderItem {
            product_id: ProductId::new("prod-1"),
            name: "Widget".to_string(),
            quantity: 1,
            price: Money::new(subtotal_cents, Currency::USD),
            image: None,
        }];
        Order::new(
            UserId::new(user),
            items,
            address(),
            PaymentMethod::Card,
            CheckoutPricing::compute(Money::new(subtotal_cents, Currency::USD)).unwrap(),
        )
    }

    #[test]
    fn test_list_for_user_is_scoped() {
        let store = OrderStore::new();
        store.insert(order_for("alice", 1000)).unwrap();
        store.insert(order_for("alice", 2000)).unwrap();
        store.insert(order_for("bob", 3000)).unwrap();

        let alice = store.list_for_user(&UserId::new("alice")).unwrap();
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|o| o.user_id.as_str() == "alice"));
    }

    #[test]
    fn test_list_all_pagination() {
        let store = OrderStore::new();
        for i in 0..25 {
            store.insert(order_for("u", 100 * (i + 1))).unwrap();
        }

        let page = store.list_all(1, 10).unwrap();
        assert_eq!(page.total, 25);
        assert_eq!(page.pages, 3);
        assert_eq!(page.orders.len(), 10);

        let last = store.list_all(3, 10).unwrap();
        assert_eq!(last.orders.len(), 5);

        // Out-of-range pages clamp to the last page
        let clamped = store.list_all(99, 10).unwrap();
        assert_eq!(clamped.page, 3);
    }

    #[test]
    fn test_update_status_enforces_state_machine() {
        let store = OrderStore::new();
        let order = order_for("u", 1000);
        let id = order.id.clone();
        store.insert(order).unwrap();

        assert!(store
            .update_status(&id, OrderStatus::Delivered, None)
            .is_err());

        let updated = store
            .update_status(&id, OrderStatus::Processing, Some("TRK-42".to_string()))
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Processing);
        assert_eq!(updated.tracking_number.as_deref(), Some("TRK-42"));
    }

    #[test]
    fn test_stats_count_paid_revenue_only() {
        let store = OrderStore::new();
        let paid = order_for("u", 10000); // total 110.00 paid
        let paid_id = paid.id.clone();
        store.insert(paid).unwrap();
        store.insert(order_for("u", 5000)).unwrap(); // unpaid
        store.mark_paid(&paid_id).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.total_revenue.amount_cents, 11000);
        assert_eq!(stats.orders_by_status.get("pending"), Some(&2));
    }
}
