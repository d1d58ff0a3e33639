//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use devopshub_core::{Cart, Product};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::services::cart::get_cart;
use crate::state::AppState;

/// Home page template: the full catalog plus the visitor's cart.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub products: Vec<Product>,
    pub cart: Cart,
}

/// Display the catalog.
#[instrument(skip_all)]
pub async fn index(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let cart = get_cart(&session, state.catalog()).await?;

    Ok(HomeTemplate {
        products: state.catalog().products().to_vec(),
        cart,
    })
}
