//! Session-backed cart operations.
//!
//! The cart lives in the visitor's session as an ordered list of product ids
//! (see [`StoredCart`]). Reads never write to the session, so browsing without
//! adding anything does not create server-side state.

use devopshub_core::{Cart, Price, ProductId};
use thiserror::Error;
use tower_sessions::Session;
use tracing::instrument;

use crate::catalog::Catalog;
use crate::models::{StoredCart, session_keys};

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product id is not in the catalog.
    #[error("invalid product: {0}")]
    InvalidProduct(ProductId),

    /// The session store failed to load or save the cart.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

/// Load the stored ids, treating a missing entry as an empty cart.
async fn load_ids(session: &Session) -> Result<StoredCart, CartError> {
    Ok(session
        .get::<StoredCart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Return the session's cart, resolved against the catalog.
///
/// Returns an empty cart if nothing has been added yet. Ids that are not in
/// the catalog are skipped.
///
/// # Errors
///
/// Returns `CartError::Session` if the session cannot be read.
#[instrument(skip_all)]
pub async fn get_cart(session: &Session, catalog: &Catalog) -> Result<Cart, CartError> {
    let StoredCart(ids) = load_ids(session).await?;
    Ok(ids
        .into_iter()
        .filter_map(|id| catalog.get(id).cloned())
        .collect())
}

/// Append a product to the session's cart.
///
/// # Errors
///
/// Returns `CartError::InvalidProduct` without touching the cart if the id is
/// unknown, or `CartError::Session` if the session cannot be read or written.
#[instrument(skip(session, catalog))]
pub async fn add_to_cart(
    session: &Session,
    catalog: &Catalog,
    product_id: ProductId,
) -> Result<(), CartError> {
    if catalog.get(product_id).is_none() {
        return Err(CartError::InvalidProduct(product_id));
    }

    let StoredCart(mut ids) = load_ids(session).await?;
    ids.push(product_id);
    session.insert(session_keys::CART, StoredCart(ids)).await?;

    Ok(())
}

/// Reset the session's cart to empty.
///
/// # Errors
///
/// Returns `CartError::Session` if the session cannot be written.
#[instrument(skip_all)]
pub async fn clear_cart(session: &Session) -> Result<(), CartError> {
    session
        .insert(session_keys::CART, StoredCart::default())
        .await?;
    Ok(())
}

/// Sum of the prices of every entry in the cart; zero when empty.
#[must_use]
pub fn cart_total(cart: &Cart) -> Price {
    cart.total()
}
