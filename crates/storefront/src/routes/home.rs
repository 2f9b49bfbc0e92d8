//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::routes::catalog::ProductCardView;
use crate::routes::{PageChrome, page_chrome};
use crate::state::AppState;

/// Number of products featured on the home page.
const FEATURED_COUNT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home/index.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    /// Featured strip: the first catalog entries.
    pub featured: Vec<ProductCardView>,
    pub load_failed: bool,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let chrome = page_chrome(&session).await;

    let (featured, load_failed) = match state.catalog().products().await {
        Ok(products) => {
            let cards = products
                .iter()
                .take(FEATURED_COUNT)
                .map(|product| ProductCardView::from_product(product, &state.config().image_base))
                .collect();
            (cards, false)
        }
        Err(e) => {
            tracing::error!("Failed to load catalog for featured strip: {e}");
            (Vec::new(), true)
        }
    };

    HomeTemplate {
        chrome,
        featured,
        load_failed,
    }
}
