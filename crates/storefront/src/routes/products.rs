//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use devopshub_core::{Cart, Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::services::cart::get_cart;
use crate::state::AppState;

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "product.html")]
pub struct ProductShowTemplate {
    pub product: Product,
    pub cart: Cart,
}

/// Display a single product.
///
/// Ids must be integral (`2` or `2.0`); anything else is treated the same as
/// an unknown id.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<ProductShowTemplate> {
    let product = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
        .cloned()
        .ok_or(AppError::NotFound)?;

    let cart = get_cart(&session, state.catalog()).await?;

    Ok(ProductShowTemplate { product, cart })
}
