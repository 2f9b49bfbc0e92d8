//! Catalog product record.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A purchasable product from the catalog document.
///
/// Products are read-only: the storefront fetches them, renders them, and
/// copies `name`, `price` and `image` into cart lines at add time. Those
/// copies are intentionally not kept in sync with later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique, stable catalog identifier.
    pub id: ProductId,
    pub name: String,
    /// Unit price in pesos. Non-negative (enforced at catalog validation).
    pub price: Price,
    /// Image file name, relative to the configured image base.
    pub image: String,
    pub description: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_catalog_entry() {
        let product: Product = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Malbec Reserva",
                "price": 5000,
                "image": "malbec-reserva.jpg",
                "description": "Aged twelve months in oak."
            }"#,
        )
        .unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.name, "Malbec Reserva");
        assert_eq!(product.price, Price::from_pesos(5000));
        assert_eq!(product.image, "malbec-reserva.jpg");
    }
}
