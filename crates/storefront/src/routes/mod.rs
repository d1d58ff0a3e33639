//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Catalog + cart summary
//! GET  /product/{id}     - Product detail + cart summary (404 if unknown)
//! GET  /cart             - Cart contents and total
//! POST /cart/add         - Add to cart (form or JSON `productId`), redirects back
//! POST /checkout         - Empty the cart, show confirmation
//! POST /deploy           - Trigger the Jenkins job (requires x-deploy-secret)
//! GET  /health           - Liveness probe
//! GET  /static/*         - Static assets (mounted in `crate::app`)
//! ```

pub mod cart;
pub mod checkout;
pub mod deploy;
pub mod health;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(home::index))
        .route("/product/{id}", get(products::show))
        // Cart
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::checkout))
        // Admin
        .route("/deploy", post(deploy::trigger))
        // Liveness
        .route("/health", get(health::health))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{HeaderMap, Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use crate::catalog::Catalog;
    use crate::config::StorefrontConfig;
    use crate::state::AppState;

    const SECRET: &str = "test-deploy-secret";

    /// App whose Jenkins URL points at a closed loopback port.
    fn test_app() -> Router {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let jenkins_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let env = HashMap::from([
            ("JENKINS_URL", jenkins_url),
            ("JENKINS_JOB", "deploy".to_string()),
            ("JENKINS_USER", "ci".to_string()),
            ("JENKINS_TOKEN", "token".to_string()),
            ("DEPLOY_SECRET", SECRET.to_string()),
            ("JENKINS_TIMEOUT_SECS", "2".to_string()),
        ]);
        let config = StorefrontConfig::from_lookup(|key| env.get(key).cloned()).unwrap();
        crate::app(AppState::new(config, Catalog::demo()).unwrap())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
    }

    /// The `name=value` pair of the session cookie set by a response.
    fn session_cookie(headers: &HeaderMap) -> String {
        headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(String::from)
            .unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn add_form(product_id: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/cart/add")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
            .body(Body::from(format!("productId={product_id}")))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app();
        let (status, _, body) = send(&app, get("/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn test_home_lists_catalog() {
        let app = test_app();
        let (status, _, body) = send(&app, get("/", None)).await;
        assert_eq!(status, StatusCode::OK);
        for product in Catalog::demo().products() {
            assert!(body.contains(&product.name), "missing {}", product.name);
        }
        assert!(body.contains("Your cart is empty"));
    }

    #[tokio::test]
    async fn test_product_detail_for_every_product() {
        let app = test_app();
        for product in Catalog::demo().products() {
            let uri = format!("/product/{}", product.id);
            let (status, _, body) = send(&app, get(&uri, None)).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.contains(&product.name));
            assert!(body.contains(&product.price.display()));
            assert!(body.contains(&product.description));
        }
    }

    #[tokio::test]
    async fn test_product_detail_accepts_integral_decimal_id() {
        let app = test_app();
        let (status, _, body) = send(&app, get("/product/2.0", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Full Stack Developer"));
    }

    #[tokio::test]
    async fn test_add_accepts_integral_float_json() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/cart/add")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"productId": 4.0}"#))
            .unwrap();
        let (status, headers, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let cookie = session_cookie(&headers);
        let (_, _, body) = send(&app, get("/cart", Some(&cookie))).await;
        assert!(body.contains(r#"data-total="35000""#), "{body}");
    }

    #[tokio::test]
    async fn test_unknown_product_is_404() {
        let app = test_app();
        for id in ["0", "5", "-1", "abc", "2.5"] {
            let (status, _, body) = send(&app, get(&format!("/product/{id}"), None)).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "id {id}");
            assert_eq!(body, "Product not found");
        }
    }

    #[tokio::test]
    async fn test_add_invalid_product_is_400() {
        let app = test_app();
        let (status, _, body) = send(&app, add_form("42", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Invalid product");
    }

    #[tokio::test]
    async fn test_add_then_view_cart_total() {
        let app = test_app();

        let (status, headers, _) = send(&app, add_form("2", None)).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers.get(header::LOCATION).unwrap(), "/");
        let cookie = session_cookie(&headers);

        let (status, _, _) = send(&app, add_form("4", Some(&cookie))).await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        let (status, _, body) = send(&app, get("/cart", Some(&cookie))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"data-total="80000""#), "{body}");
    }

    #[tokio::test]
    async fn test_add_redirects_to_referer_path() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/cart/add")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::REFERER, "http://localhost:4000/product/3")
            .body(Body::from(r#"{"productId": 3}"#))
            .unwrap();

        let (status, headers, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers.get(header::LOCATION).unwrap(), "/product/3");
    }

    #[tokio::test]
    async fn test_checkout_without_cart() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/checkout")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("nothing to check out"));
    }

    #[tokio::test]
    async fn test_deploy_without_secret_is_401() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/deploy")
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Unauthorized deployment request");
    }

    #[tokio::test]
    async fn test_deploy_with_wrong_secret_is_401() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/deploy")
            .header("x-deploy-secret", "nope")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_deploy_with_unreachable_jenkins_is_500() {
        let app = test_app();
        let request = Request::builder()
            .method("POST")
            .uri("/deploy")
            .header("x-deploy-secret", SECRET)
            .body(Body::empty())
            .unwrap();
        let (status, _, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Failed to trigger Jenkins build");
    }
}
