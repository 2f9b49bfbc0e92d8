//! Catalog route handlers.
//!
//! The grid is a pure projection of the catalog client's product list;
//! re-rendering rebuilds every card. Description panels are HTMX fragments
//! toggled per card, independent of cart state.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use gondola_core::{Product, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::routes::cart::image_url;
use crate::routes::{PageChrome, page_chrome};
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub price: String,
    pub image_url: String,
}

impl ProductCardView {
    /// Project a catalog product into card display data.
    #[must_use]
    pub fn from_product(product: &Product, image_base: &str) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image_url: image_url(image_base, &product.image),
        }
    }
}

/// Catalog grid page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub chrome: PageChrome,
    pub products: Vec<ProductCardView>,
    pub load_failed: bool,
}

/// Expanded description panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_description.html")]
pub struct DescriptionTemplate {
    pub id: i32,
    pub description: String,
}

/// Collapsed description control fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_description_closed.html")]
pub struct DescriptionClosedTemplate {
    pub id: i32,
}

/// Display the product grid.
///
/// A catalog that cannot load renders the error block with an empty grid;
/// the next request retries the load.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let chrome = page_chrome(&session).await;

    let (products, load_failed) = match state.catalog().products().await {
        Ok(products) => {
            let cards = products
                .iter()
                .map(|product| ProductCardView::from_product(product, &state.config().image_base))
                .collect();
            (cards, false)
        }
        Err(e) => {
            tracing::error!("Failed to load catalog: {e}");
            (Vec::new(), true)
        }
    };

    CatalogIndexTemplate {
        chrome,
        products,
        load_failed,
    }
}

/// Display the expanded description panel for one product (HTMX).
#[instrument(skip(state))]
pub async fn description(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<DescriptionTemplate> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .find(id)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(DescriptionTemplate {
        id: id.as_i32(),
        description: product.description,
    })
}

/// Collapse the description panel back to its control (HTMX).
#[instrument]
pub async fn description_hide(Path(id): Path<i32>) -> DescriptionClosedTemplate {
    DescriptionClosedTemplate { id }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gondola_core::Price;

    use super::*;

    #[test]
    fn test_product_card_projection() {
        let product = Product {
            id: ProductId::new(7),
            name: "Cabernet Franc".to_string(),
            price: Price::from_pesos(7200),
            image: "cabernet-franc.jpg".to_string(),
            description: "Peppery and bright.".to_string(),
        };

        let card = ProductCardView::from_product(&product, "/static/img");

        assert_eq!(card.id, 7);
        assert_eq!(card.name, "Cabernet Franc");
        assert_eq!(card.price, "$7.200");
        assert_eq!(card.image_url, "/static/img/cabernet-franc.jpg");
    }
}
