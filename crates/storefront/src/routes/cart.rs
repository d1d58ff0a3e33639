//! Cart route handlers.
//!
//! The cart itself lives in the session (see `services::cart`); these
//! handlers only translate between HTTP and those operations.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::{
        HeaderMap,
        header::{CONTENT_TYPE, REFERER},
    },
    response::Redirect,
};
use devopshub_core::{Cart, Price, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use url::Url;

use crate::error::{AppError, Result};
use crate::filters;
use crate::services::cart::{add_to_cart, cart_total, get_cart};
use crate::state::AppState;

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartShowTemplate {
    pub cart: Cart,
    pub total: Price,
}

/// Display the cart and its total.
#[instrument(skip_all)]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let cart = get_cart(&session, state.catalog()).await?;
    let total = cart_total(&cart);

    Ok(CartShowTemplate { cart, total })
}

/// Add an item to the cart, then send the visitor back where they came from.
#[instrument(skip(state, session, headers))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
    form: AddToCartForm,
) -> Result<Redirect> {
    let product_id = form.product_id().ok_or(AppError::InvalidProduct)?;
    add_to_cart(&session, state.catalog(), product_id).await?;

    Ok(Redirect::to(&back_target(&headers)))
}

// =============================================================================
// Request Body
// =============================================================================

/// Add to cart body, accepted as a urlencoded form or as JSON.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    #[serde(rename = "productId")]
    product_id: Option<ProductIdInput>,
}

/// Product id as submitted: JSON numbers or (form and JSON) strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProductIdInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AddToCartForm {
    /// The submitted id, if present and a valid integer.
    #[must_use]
    pub fn product_id(&self) -> Option<ProductId> {
        match self.product_id.as_ref()? {
            ProductIdInput::Integer(n) => i32::try_from(*n).ok().map(ProductId::new),
            ProductIdInput::Float(n) => ProductId::from_f64(*n),
            ProductIdInput::Text(s) => s.parse().ok(),
        }
    }
}

impl<S> FromRequest<S> for AddToCartForm
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            Json::<Self>::from_request(req, state)
                .await
                .map(|Json(form)| form)
                .map_err(|rejection| {
                    tracing::debug!(%rejection, "Rejected add to cart JSON body");
                    AppError::InvalidProduct
                })
        } else {
            Form::<Self>::from_request(req, state)
                .await
                .map(|Form(form)| form)
                .map_err(|rejection| {
                    tracing::debug!(%rejection, "Rejected add to cart form body");
                    AppError::InvalidProduct
                })
        }
    }
}

// =============================================================================
// Redirect Helpers
// =============================================================================

/// Where to send the visitor after adding to the cart.
///
/// Uses only the path and query of the `Referer` header so the redirect never
/// leaves this site. Falls back to `/`.
fn back_target(headers: &HeaderMap) -> String {
    let Some(referer) = headers.get(REFERER).and_then(|value| value.to_str().ok()) else {
        return "/".to_string();
    };

    let Some(url) = Url::parse("http://localhost/")
        .ok()
        .and_then(|base| base.join(referer).ok())
    else {
        return "/".to_string();
    };

    let path = url.path();
    // A leading `//` would be read by browsers as another host.
    if path.starts_with("//") {
        return "/".to_string();
    }

    match url.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn referer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn form(json: &str) -> AddToCartForm {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_back_target_without_referer() {
        assert_eq!(back_target(&HeaderMap::new()), "/");
    }

    #[test]
    fn test_back_target_keeps_path_and_query() {
        assert_eq!(
            back_target(&referer("http://shop.local:4000/product/2?ref=home")),
            "/product/2?ref=home"
        );
        assert_eq!(back_target(&referer("/cart")), "/cart");
    }

    #[test]
    fn test_back_target_drops_foreign_host() {
        assert_eq!(back_target(&referer("https://evil.example/phish")), "/phish");
        assert_eq!(back_target(&referer("http://shop.local//evil.example")), "/");
    }

    #[test]
    fn test_product_id_from_json_number_and_string() {
        assert_eq!(form(r#"{"productId": 2}"#).product_id(), Some(ProductId::new(2)));
        assert_eq!(form(r#"{"productId": "4"}"#).product_id(), Some(ProductId::new(4)));
    }

    #[test]
    fn test_product_id_from_integral_float() {
        assert_eq!(form(r#"{"productId": 2.0}"#).product_id(), Some(ProductId::new(2)));
        assert_eq!(form(r#"{"productId": "3.0"}"#).product_id(), Some(ProductId::new(3)));
        assert_eq!(form(r#"{"productId": 2.5}"#).product_id(), None);
    }

    #[test]
    fn test_product_id_missing_or_malformed() {
        assert_eq!(form("{}").product_id(), None);
        assert_eq!(form(r#"{"productId": "two"}"#).product_id(), None);
        assert_eq!(form(r#"{"productId": 99999999999}"#).product_id(), None);
    }
}
