//! The shop service: cart, checkout, and catalog operations over the
//! document stores.
//!
//! Cart mutations re-fetch the product and check the requested
//! quantity against current stock before persisting. Order creation
//! snapshots the cart, reserves stock atomically, records the order,
//! and clears the cart; a failed reservation leaves every store
//! untouched.

use crate::carts::CartStore;
use crate::catalog::{CatalogStore, ProductFilter, ProductPage};
use crate::orders::{OrderPage, OrderStats, OrderStore};
use serde::{Deserialize, Serialize};
use smartcart_commerce::cart::{Cart, CartItem, CartTotals};
use smartcart_commerce::catalog::{Category, Product, ProductUpdate};
use smartcart_commerce::money::Money;
use smartcart_commerce::order::{
    Order, OrderItem, OrderStatus, PaymentMethod, ShippingAddress,
};
use smartcart_commerce::pricing::CheckoutPricing;
use smartcart_commerce::{CartItemId, CommerceError, OrderId, ProductId, UserId};
use tracing::{debug, info, warn};

/// A cart line joined with its product's display fields, mirroring the
/// populated cart responses the storefront serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineView {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub name: String,
    pub image: Option<String>,
    pub quantity: i64,
    /// Price snapshot from add-time.
    pub price: Money,
    /// Current catalog price, for "price changed" hints.
    pub current_price: Money,
    /// Current catalog stock.
    pub stock: i64,
}

/// A cart with derived totals, the wire shape of every cart endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total_items: i64,
    pub total_price: Money,
}

impl CartView {
    /// The empty-cart shape returned before a cart exists.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            total_price: Money::default(),
        }
    }
}

/// The storefront service.
#[derive(Default)]
pub struct Shop {
    catalog: CatalogStore,
    carts: CartStore,
    orders: OrderStore,
}

impl Shop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn orders(&self) -> &OrderStore {
        &self.orders
    }

    // ---- Cart operations ----

    /// Get a user's cart, or the empty shape if none exists yet.
    pub fn get_cart(&self, user_id: &UserId) -> Result<CartView, CommerceError> {
        match self.carts.get(user_id)? {
            Some(cart) => self.cart_view(&cart),
            None => Ok(CartView::empty()),
        }
    }

    /// Add a product to the cart.
    ///
    /// Validates the product is active and the added quantity fits
    /// current stock. A line already in the cart merges the quantity
    /// unchecked and re-snapshots its price to the current catalog
    /// price; an over-stock merged line is caught per line at checkout,
    /// where stock is reserved atomically.
    pub fn add_to_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<CartView, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let product = self.catalog.get_active(product_id)?;
        if !product.can_fulfill(quantity) {
            return Err(CommerceError::InsufficientStock {
                product: product.name,
                requested: quantity,
                available: product.stock,
            });
        }

        let mut cart = self.carts.get_or_create(user_id)?;
        cart.add_item(product_id.clone(), quantity, product.price)?;
        debug!(user = %user_id, product = %product_id, quantity, "cart item added");
        let view = self.cart_view(&cart)?;
        self.carts.save(cart)?;
        Ok(view)
    }

    /// Set a cart line's quantity, re-validating against current stock.
    ///
    /// On rejection the cart is left unchanged.
    pub fn update_cart_item(
        &self,
        user_id: &UserId,
        item_id: &CartItemId,
        quantity: i64,
    ) -> Result<CartView, CommerceError> {
        if quantity < 1 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        let mut cart = self
            .carts
            .get(user_id)?
            .ok_or_else(|| CommerceError::CartNotFound(user_id.to_string()))?;
        let item = cart
            .get_item(item_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(item_id.to_string()))?;

        let product = self.catalog.get_active(&item.product_id)?;
        if !product.can_fulfill(quantity) {
            return Err(CommerceError::InsufficientStock {
                product: product.name,
                requested: quantity,
                available: product.stock,
            });
        }

        cart.set_quantity(item_id, quantity)?;
        let view = self.cart_view(&cart)?;
        self.carts.save(cart)?;
        Ok(view)
    }

    /// Remove a line from the cart.
    pub fn remove_from_cart(
        &self,
        user_id: &UserId,
        item_id: &CartItemId,
    ) -> Result<CartView, CommerceError> {
        let mut cart = self
            .carts
            .get(user_id)?
            .ok_or_else(|| CommerceError::CartNotFound(user_id.to_string()))?;
        cart.remove_item(item_id)?;
        let view = self.cart_view(&cart)?;
        self.carts.save(cart)?;
        Ok(view)
    }

    /// Clear the cart. Clearing a cart that never existed is a no-op.
    pub fn clear_cart(&self, user_id: &UserId) -> Result<CartView, CommerceError> {
        if let Some(mut cart) = self.carts.get(user_id)? {
            cart.clear();
            self.carts.save(cart)?;
        }
        Ok(CartView::empty())
    }

    // ---- Checkout ----

    /// Create an order from the user's cart.
    ///
    /// Sequence: validate the cart is non-empty, snapshot line items
    /// from the catalog, reserve stock atomically for every line,
    /// record the order, clear the cart. Failure at the reservation
    /// step aborts before anything is written.
    pub fn place_order(
        &self,
        user_id: &UserId,
        shipping_address: ShippingAddress,
        payment_method: PaymentMethod,
    ) -> Result<Order, CommerceError> {
        if !shipping_address.is_complete() {
            return Err(CommerceError::Validation(
                "Shipping address is incomplete".to_string(),
            ));
        }

        let mut cart = self.carts.get(user_id)?.unwrap_or_else(|| Cart::new(user_id.clone()));
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        // Snapshot items while products are still resolvable.
        let mut items = Vec::with_capacity(cart.items.len());
        for line in &cart.items {
            let product = self.catalog.get_active(&line.product_id)?;
            items.push(OrderItem::from_cart_item(line, &product));
        }

        // Atomic all-or-nothing stock reservation.
        let lines: Vec<(ProductId, i64)> = cart
            .items
            .iter()
            .map(|i| (i.product_id.clone(), i.quantity))
            .collect();
        if let Err(e) = self.catalog.reserve_stock(&lines) {
            warn!(user = %user_id, error = %e, "checkout rejected at stock reservation");
            return Err(e);
        }

        let items_price = cart.total_price()?;
        let pricing = CheckoutPricing::compute(items_price)?;
        let order = Order::new(
            user_id.clone(),
            items,
            shipping_address,
            payment_method,
            pricing,
        );

        if let Err(e) = self.orders.insert(order.clone()) {
            // Put the stock back rather than strand it.
            for (product_id, quantity) in &lines {
                if let Err(restock_err) = self.catalog.restock(product_id, *quantity) {
                    warn!(
                        product = %product_id,
                        quantity,
                        error = %restock_err,
                        "failed to return reserved stock after order insert error"
                    );
                }
            }
            return Err(e.into());
        }

        cart.clear();
        self.carts.save(cart)?;

        info!(
            user = %user_id,
            order = %order.id,
            total = %order.pricing.total_price,
            "order placed"
        );
        Ok(order)
    }

    /// Fetch an order, enforcing that the caller owns it or is admin.
    pub fn get_order(
        &self,
        id: &OrderId,
        caller: &UserId,
        caller_is_admin: bool,
    ) -> Result<Order, CommerceError> {
        let order = self.orders.get(id)?;
        if &order.user_id != caller && !caller_is_admin {
            return Err(CommerceError::NotAuthorized);
        }
        Ok(order)
    }

    /// All of a user's orders, newest first.
    pub fn list_user_orders(&self, user_id: &UserId) -> Result<Vec<Order>, CommerceError> {
        Ok(self.orders.list_for_user(user_id)?)
    }

    /// Admin: paginated listing of all orders.
    pub fn list_all_orders(&self, page: usize, limit: usize) -> Result<OrderPage, CommerceError> {
        Ok(self.orders.list_all(page, limit)?)
    }

    /// Admin: aggregate order statistics.
    pub fn order_stats(&self) -> Result<OrderStats, CommerceError> {
        Ok(self.orders.stats()?)
    }

    /// Admin: validated order status transition.
    pub fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<Order, CommerceError> {
        self.orders.update_status(id, status, tracking_number)
    }

    // ---- Catalog operations ----

    pub fn list_products(&self, filter: &ProductFilter) -> Result<ProductPage, CommerceError> {
        Ok(self.catalog.list(filter)?)
    }

    pub fn get_product(&self, id: &ProductId) -> Result<Product, CommerceError> {
        self.catalog.get_active(id)
    }

    pub fn featured_products(&self) -> Result<Vec<Product>, CommerceError> {
        Ok(self.catalog.featured()?)
    }

    /// Category names, for the storefront's category navigation.
    pub fn categories(&self) -> Vec<&'static str> {
        Category::all().iter().map(|c| c.as_str()).collect()
    }

    /// Admin: add a product to the catalog.
    pub fn create_product(&self, product: Product) -> Result<Product, CommerceError> {
        if product.price.is_negative() {
            return Err(CommerceError::Validation(
                "Price must be non-negative".to_string(),
            ));
        }
        if product.stock < 0 {
            return Err(CommerceError::Validation(
                "Stock must be non-negative".to_string(),
            ));
        }
        self.catalog.insert(product.clone())?;
        info!(product = %product.id, name = %product.name, "product created");
        Ok(product)
    }

    /// Admin: partial product update.
    pub fn update_product(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CommerceError> {
        if update.price.map(|p| p.is_negative()).unwrap_or(false) {
            return Err(CommerceError::Validation(
                "Price must be non-negative".to_string(),
            ));
        }
        if update.stock.map(|s| s < 0).unwrap_or(false) {
            return Err(CommerceError::Validation(
                "Stock must be non-negative".to_string(),
            ));
        }
        self.catalog.update(id, update)
    }

    /// Admin: soft-delete a product.
    pub fn delete_product(&self, id: &ProductId) -> Result<(), CommerceError> {
        self.catalog.soft_delete(id)
    }

    // ---- Internal ----

    /// Join cart lines with their products for the response shape.
    fn cart_view(&self, cart: &Cart) -> Result<CartView, CommerceError> {
        let mut items = Vec::with_capacity(cart.items.len());
        for line in &cart.items {
            items.push(self.line_view(line)?);
        }
        let CartTotals {
            total_items,
            total_price,
        } = cart.totals()?;
        Ok(CartView {
            items,
            total_items,
            total_price,
        })
    }

    fn line_view(&self, line: &CartItem) -> Result<CartLineView, CommerceError> {
        // A product can go inactive after landing in a cart; keep the
        // line renderable from its snapshot.
        let (name, image, current_price, stock) = match self.catalog.get(&line.product_id)? {
            Some(p) => (
                p.name.clone(),
                p.primary_image().map(str::to_string),
                p.price,
                p.stock,
            ),
            None => (line.product_id.to_string(), None, line.price, 0),
        };
        Ok(CartLineView {
            id: line.id.clone(),
            product_id: line.product_id.clone(),
            name,
            image,
            quantity: line.quantity,
            price: line.price,
            current_price,
            stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcart_commerce::money::Currency;

    fn usd(cents: i64) -> Money {
        Money::new(cents, Currency::USD)
    }

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

    fn shop_with_product(price_cents: i64, stock: i64) -> (Shop, ProductId) {
        let shop = Shop::new();
        let product = Product::new("Widget", Category::Electronics, usd(price_cents), stock);
        let id = product.id.clone();
        shop.create_product(product).unwrap();
        (shop, id)
    }

    #[test]
    fn test_get_cart_before_first_add_is_empty_shape() {
        let shop = Shop::new();
        let view = shop.get_cart(&UserId::new("u")).unwrap();
        assert!(view.items.is_empty());
        assert_eq!(view.total_items, 0);
        assert_eq!(view.total_price.amount_cents, 0);
    }

    #[test]
    fn test_add_to_cart_snapshots_current_price() {
        let (shop, product_id) = shop_with_product(1000, 10);
        let user = UserId::new("u");

        let view = shop.add_to_cart(&user, &product_id, 2).unwrap();
        assert_eq!(view.total_items, 2);
        assert_eq!(view.items[0].price.amount_cents, 1000);

        // Catalog price changes, then the same product is added again:
        // quantity merges and the snapshot follows the new price.
        shop.update_product(
            &product_id,
            ProductUpdate {
                price: Some(usd(1500)),
                ..Default::default()
            },
        )
        .unwrap();

        let view = shop.add_to_cart(&user, &product_id, 1).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 3);
        assert_eq!(view.items[0].price.amount_cents, 1500);
    }

    #[test]
    fn test_add_to_cart_unknown_product() {
        let shop = Shop::new();
        let result = shop.add_to_cart(&UserId::new("u"), &ProductId::new("nope"), 1);
        assert!(matches!(result, Err(CommerceError::ProductNotFound(_))));
    }

    #[test]
    fn test_add_to_cart_reports_available_stock() {
        let (shop, product_id) = shop_with_product(1000, 3);
        let result = shop.add_to_cart(&UserId::new("u"), &product_id, 5);
        match result {
            Err(CommerceError::InsufficientStock {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, 5);
                assert_eq!(available, 3);
            }
            other => panic!("expected insufficient stock, got {other:?}"),
        }
    }

    #[test]
    fn test_add_to_cart_merges_past_stock_checkout_catches_it() {
        let (shop, product_id) = shop_with_product(1000, 3);
        let user = UserId::new("u");
        shop.add_to_cart(&user, &product_id, 2).unwrap();

        // Only the added quantity is checked against stock, so a second
        // add of 2 merges to 4 even though only 3 are on the shelf.
        let view = shop.add_to_cart(&user, &product_id, 2).unwrap();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].quantity, 4);

        // The over-stock line is rejected at checkout, untouched.
        let result = shop.place_order(&user, address(), PaymentMethod::Cod);
        match result {
            Err(CommerceError::InsufficientStock {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, 4);
                assert_eq!(available, 3);
            }
            other => panic!("expected insufficient stock, got {other:?}"),
        }
        assert_eq!(shop.catalog().get(&product_id).unwrap().unwrap().stock, 3);
        assert_eq!(shop.get_cart(&user).unwrap().total_items, 4);
    }

    #[test]
    fn test_update_cart_item_over_stock_leaves_cart_unchanged() {
        let (shop, product_id) = shop_with_product(1000, 3);
        let user = UserId::new("u");
        let view = shop.add_to_cart(&user, &product_id, 2).unwrap();
        let item_id = view.items[0].id.clone();

        let result = shop.update_cart_item(&user, &item_id, 10);
        assert!(matches!(
            result,
            Err(CommerceError::InsufficientStock { .. })
        ));

        let after = shop.get_cart(&user).unwrap();
        assert_eq!(after.items[0].quantity, 2);
        assert_eq!(after.total_items, 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let (shop, product_id) = shop_with_product(1000, 10);
        let user = UserId::new("u");
        let view = shop.add_to_cart(&user, &product_id, 2).unwrap();
        let item_id = view.items[0].id.clone();

        let view = shop.remove_from_cart(&user, &item_id).unwrap();
        assert!(view.items.is_empty());

        shop.add_to_cart(&user, &product_id, 1).unwrap();
        shop.clear_cart(&user).unwrap();
        assert_eq!(shop.get_cart(&user).unwrap().total_items, 0);
    }

    #[test]
    fn test_place_order_happy_path() {
        let (shop, product_id) = shop_with_product(5000, 10);
        let user = UserId::new("u");
        shop.add_to_cart(&user, &product_id, 2).unwrap();

        let order = shop
            .place_order(&user, address(), PaymentMethod::Cod)
            .unwrap();

        // Snapshot copied name/price, pricing formulas applied
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].name, "Widget");
        assert_eq!(order.pricing.items_price.amount_cents, 10000);
        assert_eq!(order.pricing.tax_price.amount_cents, 1000);
        assert_eq!(order.pricing.shipping_price.amount_cents, 0);
        assert_eq!(order.pricing.total_price.amount_cents, 11000);

        // Stock decremented by exactly the ordered quantity
        let product = shop.catalog().get(&product_id).unwrap().unwrap();
        assert_eq!(product.stock, 8);

        // Cart zeroed
        assert_eq!(shop.get_cart(&user).unwrap().total_items, 0);

        // Order is retrievable by its owner
        let fetched = shop.get_order(&order.id, &user, false).unwrap();
        assert_eq!(fetched.id, order.id);
    }

    #[test]
    fn test_place_order_shipping_fee_below_threshold() {
        let (shop, product_id) = shop_with_product(2000, 10);
        let user = UserId::new("u");
        shop.add_to_cart(&user, &product_id, 2).unwrap(); // $40.00

        let order = shop
            .place_order(&user, address(), PaymentMethod::Card)
            .unwrap();
        assert_eq!(order.pricing.tax_price.amount_cents, 400);
        assert_eq!(order.pricing.shipping_price.amount_cents, 1000);
        assert_eq!(order.pricing.total_price.amount_cents, 5400);
    }

    #[test]
    fn test_place_order_empty_cart_rejected() {
        let shop = Shop::new();
        let user = UserId::new("u");
        let result = shop.place_order(&user, address(), PaymentMethod::Cod);
        assert!(matches!(result, Err(CommerceError::EmptyCart)));
        assert_eq!(shop.orders().list_all(1, 10).unwrap().total, 0);
    }

    #[test]
    fn test_place_order_insufficient_stock_aborts_cleanly() {
        let (shop, product_id) = shop_with_product(1000, 5);
        let user = UserId::new("u");
        shop.add_to_cart(&user, &product_id, 5).unwrap();

        // Another checkout drains the stock first
        shop.catalog()
            .reserve_stock(&[(product_id.clone(), 3)])
            .unwrap();

        let result = shop.place_order(&user, address(), PaymentMethod::Cod);
        assert!(matches!(
            result,
            Err(CommerceError::InsufficientStock { .. })
        ));

        // No order recorded, cart intact, stock untouched by the failure
        assert_eq!(shop.orders().list_all(1, 10).unwrap().total, 0);
        assert_eq!(shop.get_cart(&user).unwrap().total_items, 5);
        assert_eq!(shop.catalog().get(&product_id).unwrap().unwrap().stock, 2);
    }

    #[test]
    fn test_place_order_incomplete_address_rejected() {
        let (shop, product_id) = shop_with_product(1000, 5);
        let user = UserId::new("u");
        shop.add_to_cart(&user, &product_id, 1).unwrap();

        let mut addr = address();
        addr.phone = String::new();
        let result = shop.place_order(&user, addr, PaymentMethod::Cod);
        assert!(matches!(result, Err(CommerceError::Validation(_))));
    }

    #[test]
    fn test_get_order_ownership() {
        let (shop, product_id) = shop_with_product(1000, 5);
        let owner = UserId::new("owner");
        shop.add_to_cart(&owner, &product_id, 1).unwrap();
        let order = shop.place_order(&owner, address(), PaymentMethod::Cod).unwrap();

        let stranger = UserId::new("stranger");
        assert!(matches!(
            shop.get_order(&order.id, &stranger, false),
            Err(CommerceError::NotAuthorized)
        ));
        // Admin can read anyone's order
        assert!(shop.get_order(&order.id, &stranger, true).is_ok());
    }

    #[test]
    fn test_delivered_status_bookkeeping_via_shop() {
        let (shop, product_id) = shop_with_product(1000, 5);
        let user = UserId::new("u");
        shop.add_to_cart(&user, &product_id, 1).unwrap();
        let order = shop.place_order(&user, address(), PaymentMethod::Cod).unwrap();

        shop.update_order_status(&order.id, OrderStatus::Processing, None)
            .unwrap();
        let shipped = shop
            .update_order_status(&order.id, OrderStatus::Shipped, Some("TRK-1".to_string()))
            .unwrap();
        assert!(!shipped.is_delivered);
        assert!(shipped.delivered_at.is_none());

        let delivered = shop
            .update_order_status(&order.id, OrderStatus::Delivered, None)
            .unwrap();
        assert!(delivered.is_delivered);
        assert!(delivered.delivered_at.is_some());
    }

    #[test]
    fn test_product_validation() {
        let shop = Shop::new();
        let mut bad = Product::new("Bad", Category::Other, usd(-1), 1);
        assert!(shop.create_product(bad.clone()).is_err());
        bad.price = usd(100);
        bad.stock = -5;
        assert!(shop.create_product(bad).is_err());
    }

    #[test]
    fn test_categories_listing() {
        let shop = Shop::new();
        let categories = shop.categories();
        assert_eq!(categories.len(), 9);
        assert!(categories.contains(&"electronics"));
    }
}
