//! Checkout route handler.
//!
//! Checkout is a stub: it empties the cart and shows a confirmation. No
//! payment is taken and no order is recorded.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use devopshub_core::Cart;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::services::cart::{cart_total, clear_cart, get_cart};
use crate::state::AppState;

/// Checkout confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    /// Cart contents at the moment of checkout.
    pub purchased: Cart,
}

/// Empty the cart and confirm.
#[instrument(skip_all)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
) -> Result<CheckoutTemplate> {
    let purchased = get_cart(&session, state.catalog()).await?;
    clear_cart(&session).await?;

    tracing::info!(
        items = purchased.len(),
        total = cart_total(&purchased).amount(),
        "Checkout completed"
    );

    Ok(CheckoutTemplate { purchased })
}
