//! Product catalog types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Home,
    Sports,
    Beauty,
    Toys,
    Automotive,
    #[default]
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Books => "books",
            Category::Home => "home",
            Category::Sports => "sports",
            Category::Beauty => "beauty",
            Category::Toys => "toys",
            Category::Automotive => "automotive",
            Category::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "electronics" => Some(Category::Electronics),
            "clothing" => Some(Category::Clothing),
            "books" => Some(Category::Books),
            "home" => Some(Category::Home),
            "sports" => Some(Category::Sports),
            "beauty" => Some(Category::Beauty),
            "toys" => Some(Category::Toys),
            "automotive" => Some(Category::Automotive),
            "other" => Some(Category::Other),
            _ => None,
        }
    }

    /// All categories, in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Electronics,
            Category::Clothing,
            Category::Books,
            Category::Home,
            Category::Sports,
            Category::Beauty,
            Category::Toys,
            Category::Automotive,
            Category::Other,
        ]
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Product name.
    pub name: String,
    /// Full description.
    pub description: String,
    /// Price (non-negative).
    pub price: Money,
    /// Product category.
    pub category: Category,
    /// Units in stock (non-negative).
    pub stock: i64,
    /// Image URLs.
    pub images: Vec<String>,
    /// Shown on the featured shelf.
    pub featured: bool,
    /// Visible and purchasable. Admin delete clears this instead of
    /// removing the document, so order history keeps valid references.
    pub is_active: bool,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Product {
    /// Create a new active product.
    pub fn new(name: impl Into<String>, category: Category, price: Money, stock: i64) -> Self {
        let now = current_timestamp();
        Self {
            id: ProductId::generate(),
            name: name.into(),
            description: String::new(),
            price,
            category,
            stock,
            images: Vec::new(),
            featured: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the product can be bought at all.
    pub fn is_purchasable(&self) -> bool {
        self.is_active
    }

    /// Check if a specific quantity can be fulfilled from stock.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.stock >= quantity
    }

    /// First image, used for order snapshots and listings.
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Apply a partial admin update. Only fields present in the update
    /// are touched.
    pub fn apply_update(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(images) = update.images {
            self.images = images;
        }
        if let Some(featured) = update.featured {
            self.featured = featured;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = current_timestamp();
    }
}

/// Partial update for a product (admin PUT).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub category: Option<Category>,
    pub stock: Option<i64>,
    pub images: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
