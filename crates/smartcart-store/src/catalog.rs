//! Product catalog store.

use crate::collection::{Collection, Document};
use crate::error::StoreError;
use serde::{Deserialize, Serialize};
use smartcart_commerce::catalog::{Category, Product, ProductUpdate};
use smartcart_commerce::{CommerceError, ProductId};

impl Document for Product {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

/// Query filter for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    /// Restrict to one category.
    pub category: Option<Category>,
    /// 1-indexed page.
    pub page: usize,
    /// Page size.
    pub limit: usize,
}

impl ProductFilter {
    pub const DEFAULT_LIMIT: usize = 12;

    fn page(&self) -> usize {
        self.page.max(1)
    }

    fn limit(&self) -> usize {
        if self.limit == 0 {
            Self::DEFAULT_LIMIT
        } else {
            self.limit
        }
    }
}

/// A page of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

/// The product catalog store.
#[derive(Default)]
pub struct CatalogStore {
    products: Collection<Product>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new product.
    pub fn insert(&self, product: Product) -> Result<(), StoreError> {
        self.products.insert(product)
    }

    /// Get any product by ID, active or not.
    pub fn get(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        self.products.get(id.as_str())
    }

    /// Get a product that is visible to shoppers.
    ///
    /// Inactive products are reported as not found, like the original
    /// storefront does.
    pub fn get_active(&self, id: &ProductId) -> Result<Product, CommerceError> {
        let product = self
            .products
            .get(id.as_str())?
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))?;
        if !product.is_purchasable() {
            return Err(CommerceError::ProductNotFound(id.to_string()));
        }
        Ok(product)
    }

    /// List active products matching the filter, newest first, paginated.
    pub fn list(&self, filter: &ProductFilter) -> Result<ProductPage, StoreError> {
        let search = filter.search.as_deref().map(str::to_lowercase);
        let mut matched = self.products.filter(|p| {
            p.is_active
                && filter.category.map(|c| p.category == c).unwrap_or(true)
                && search
                    .as_deref()
                    .map(|s| p.name.to_lowercase().contains(s))
                    .unwrap_or(true)
        })?;
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));

        let total = matched.len();
        let limit = filter.limit();
        let pages = total.div_ceil(limit).max(1);
        let page = filter.page().min(pages);
        let products = matched
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        Ok(ProductPage {
            products,
            page,
            pages,
            total,
        })
    }

    /// Active products on the featured shelf.
    pub fn featured(&self) -> Result<Vec<Product>, StoreError> {
        let mut featured = self.products.filter(|p| p.is_active && p.featured)?;
        featured.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(featured)
    }

    /// Apply a partial update to a product.
    pub fn update(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CommerceError> {
        self.products
            .update(id.as_str(), |p| {
                p.apply_update(update);
                p.clone()
            })
            .map_err(|e| e.map_not_found(CommerceError::ProductNotFound(id.to_string())))
    }

    /// Soft-delete a product: hides it from shoppers but keeps the
    /// document so order snapshots stay navigable.
    pub fn soft_delete(&self, id: &ProductId) -> Result<(), CommerceError> {
        self.products
            .update(id.as_str(), |p| {
                p.is_active = false;
            })
            .map_err(|e| e.map_not_found(CommerceError::ProductNotFound(id.to_string())))
    }

    /// Reserve stock for a set of order lines, atomically.
    ///
    /// The check and the decrement for every line happen under one write
    /// lock, all-or-nothing: if any line cannot be fulfilled, no stock is
    /// touched and the insufficient line is reported with its available
    /// quantity. This is what closes the check-then-act race between
    /// concurrent checkouts.
    pub fn reserve_stock(
        &self,
        lines: &[(ProductId, i64)],
    ) -> Result<(), CommerceError> {
        self.products.with_all_mut(|map| {
            // Validate every line before mutating anything.
            for (product_id, quantity) in lines {
                let product = map
                    .get(product_id.as_str())
                    .filter(|p| p.is_purchasable())
                    .ok_or_else(|| CommerceError::ProductNotFound(product_id.to_string()))?;
                if product.stock < *quantity {
                    return Err(CommerceError::InsufficientStock {
                        product: product.name.clone(),
                        requested: *quantity,
                        available: product.stock,
                    });
                }
            }
            for (product_id, quantity) in lines {
                if let Some(product) = map.get_mut(product_id.as_str()) {
                    product.stock -= quantity;
                }
            }
            Ok(())
        })?
    }

    /// Return stock to the shelf (e.g. admin cancellation workflows).
    pub fn restock(&self, id: &ProductId, quantity: i64) -> Result<(), CommerceError> {
        self.products
            .update(id.as_str(), |p| {
                p.stock += quantity;
            })
            .map_err(|e| e.map_not_found(CommerceError::ProductNotFound(id.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smartcart_commerce::money::{Currency, Money};

    fn product(name: &str, stock: i64) -> Product {
        Product::new(name, Category::Electronics, Money::new(1000, Currency::USD), stock)
    }

    #[test]
    fn test_get_active_hides_inactive() {
        let store = CatalogStore::new();
        let mut p = product("Hidden", 5);
        p.is_active = false;
        let id = p.id.clone();
        store.insert(p).unwrap();

        assert!(matches!(
            store.get_active(&id),
            Err(CommerceError::ProductNotFound(_))
        ));
        // Raw get still sees it
        assert!(store.get(&id).unwrap().is_some());
    }

    #[test]
    fn test_list_filters_by_search_and_category() {
        let store = CatalogStore::new();
        store.insert(product("Wireless Mouse", 5)).unwrap();
        store.insert(product("Wired Keyboard", 5)).unwrap();
        let mut book = Product::new(
            "Rust Book",
            Category::Books,
            Money::new(3000, Currency::USD),
            3,
        );
        book.is_active = true;
        store.insert(book).unwrap();

        let page = store
            .list(&ProductFilter {
                search: Some("wire".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.total, 2);

        let page = store
            .list(&ProductFilter {
                category: Some(Category::Books),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.products[0].name, "Rust Book");
    }

    #[test]
    fn test_list_pagination() {
        let store = CatalogStore::new();
        for i in 0..5 {
            store.insert(product(&format!("Gadget {i}"), 1)).unwrap();
        }

        let page = store
            .list(&ProductFilter {
                page: 2,
                limit: 2,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.products.len(), 2);
    }

    #[test]
    fn test_reserve_stock_all_or_nothing() {
        let store = CatalogStore::new();
        let a = product("A", 10);
        let b = product("B", 1);
        let (id_a, id_b) = (a.id.clone(), b.id.clone());
        store.insert(a).unwrap();
        store.insert(b).unwrap();

        let result = store.reserve_stock(&[(id_a.clone(), 5), (id_b.clone(), 2)]);
        match result {
            Err(CommerceError::InsufficientStock {
                requested,
                available,
                ..
            }) => {
                assert_eq!(requested, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected insufficient stock, got {other:?}"),
        }

        // Nothing was decremented, including the fulfillable line.
        assert_eq!(store.get(&id_a).unwrap().unwrap().stock, 10);
        assert_eq!(store.get(&id_b).unwrap().unwrap().stock, 1);

        store
            .reserve_stock(&[(id_a.clone(), 5), (id_b.clone(), 1)])
            .unwrap();
        assert_eq!(store.get(&id_a).unwrap().unwrap().stock, 5);
        assert_eq!(store.get(&id_b).unwrap().unwrap().stock, 0);
    }

    #[test]
    fn test_reserve_stock_never_goes_negative_under_contention() {
        use std::sync::Arc;

        let store = Arc::new(CatalogStore::new());
        let p = product("Scarce", 3);
        let id = p.id.clone();
        store.insert(p).unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            let id = id.clone();
            handles.push(std::thread::spawn(move || {
                store.reserve_stock(&[(id, 2)]).is_ok()
            }));
        }
        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        // Only one reservation of 2 can succeed from stock 3.
        assert_eq!(wins, 1);
        assert_eq!(store.get(&id).unwrap().unwrap().stock, 1);
    }

    #[test]
    fn test_soft_delete_and_restock() {
        let store = CatalogStore::new();
        let p = product("Gone", 5);
        let id = p.id.clone();
        store.insert(p).unwrap();

        store.soft_delete(&id).unwrap();
        assert!(store.get_active(&id).is_err());

        store.restock(&id, 7).unwrap();
        assert_eq!(store.get(&id).unwrap().unwrap().stock, 12);
    }
}
