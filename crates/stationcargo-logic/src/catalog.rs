//! Supply catalog data model — what the cargo department can order.
//!
//! The catalog is loaded once from configuration and immutable at runtime.
//! Categories and orders keep their configured ordering so UI listings and
//! delivery manifests are deterministic.

use serde::{Deserialize, Serialize};

/// A single orderable supply crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoOrder {
    /// Display name, e.g. "Crate with beer and steak".
    pub order_name: String,
    /// Price in credits, debited at checkout.
    pub credits_cost: i64,
    /// Crate prefab identifier handed to the spawn service.
    pub crate_id: String,
    /// Item prefab identifiers packed inside the crate.
    pub items: Vec<String>,
}

/// A named group of orders shown together in the order console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CargoOrderCategory {
    pub category_name: String,
    pub supplies: Vec<CargoOrder>,
}

/// The full supply catalog — every category cargo can order from.
///
/// Serialized as a bare array of categories, which is how the catalog file
/// is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SupplyCatalog {
    pub categories: Vec<CargoOrderCategory>,
}

impl SupplyCatalog {
    /// Look up a category by name.
    pub fn category(&self, name: &str) -> Option<&CargoOrderCategory> {
        self.categories.iter().find(|c| c.category_name == name)
    }

    /// Look up an order by name across all categories (first match wins).
    pub fn find_order(&self, order_name: &str) -> Option<&CargoOrder> {
        self.categories
            .iter()
            .flat_map(|c| c.supplies.iter())
            .find(|o| o.order_name == order_name)
    }

    /// Total number of orderable entries across all categories.
    pub fn order_count(&self) -> usize {
        self.categories.iter().map(|c| c.supplies.len()).sum()
    }
}

/// Sum of credit costs over a list of orders (a cart, a delivery manifest).
pub fn total_price(orders: &[CargoOrder]) -> i64 {
    orders.iter().map(|o| o.credits_cost).sum()
}

/// Validate a loaded catalog. Returns human-readable problems; an empty
/// vec means the catalog is usable.
pub fn validate_catalog(catalog: &SupplyCatalog) -> Vec<String> {
    let mut errors = Vec::new();

    if catalog.categories.is_empty() {
        errors.push("catalog has no categories".to_string());
    }

    let mut seen = Vec::new();
    for category in &catalog.categories {
        if category.category_name.is_empty() {
            errors.push("category with empty name".to_string());
        } else if seen.contains(&category.category_name.as_str()) {
            errors.push(format!(
                "duplicate category name: {}",
                category.category_name
            ));
        } else {
            seen.push(category.category_name.as_str());
        }

        for order in &category.supplies {
            if order.order_name.is_empty() {
                errors.push(format!(
                    "order with empty name in category {}",
                    category.category_name
                ));
            }
            if order.credits_cost < 0 {
                errors.push(format!(
                    "order {} has negative cost {}",
                    order.order_name, order.credits_cost
                ));
            }
        }
    }

    errors
}
