//! HTTP routes.
//!
//! ```text
//! GET  /warehouse/v1/health          ─► Ping
//! GET  /warehouse/v1/inventory       ─► GetInventory
//! POST /warehouse/v1/inventory       ─► UploadInventory
//! GET  /warehouse/v1/product         ─► GetProductStock
//! POST /warehouse/v1/product         ─► UploadProducts
//! POST /warehouse/v1/product/:name   ─► SellProduct
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::middleware;
use crate::state::AppState;

pub mod inventory;
pub mod system;

/// Build the full HTTP router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/warehouse/v1/health", get(system::health))
        .route(
            "/warehouse/v1/inventory",
            get(inventory::get_inventory).post(inventory::upload_inventory),
        )
        .route(
            "/warehouse/v1/product",
            get(inventory::get_product_stock).post(inventory::upload_products),
        )
        .route("/warehouse/v1/product/:name", post(inventory::sell_product))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_context,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use warehouse_db::{Database, DbConfig, SqliteInventory};

    async fn app() -> (Router, Database) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let engine = Arc::new(SqliteInventory::new(db.clone()));
        (router(AppState::new(engine, Duration::from_secs(10))), db)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, body) = send_raw(app, method, uri, body.map(|b| b.to_string()), None).await;
        (status, body)
    }

    async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<String>,
        request_id: Option<&str>,
    ) -> (StatusCode, Option<String>, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        if let Some(rid) = request_id {
            builder = builder.header(middleware::REQUEST_ID_HEADER, rid);
        }
        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let rid = response
            .headers()
            .get(middleware::REQUEST_ID_HEADER)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, rid, value)
    }

    async fn load_chair(app: &Router) {
        let (status, body) = send(
            app,
            "POST",
            "/warehouse/v1/inventory",
            Some(json!({"inventory": [
                {"art_id": "1", "name": "leg", "stock": "12"},
                {"art_id": "2", "name": "screw", "stock": "17"},
                {"art_id": "3", "name": "seat", "stock": "2"},
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "3 item inserted"}));

        let (status, body) = send(
            app,
            "POST",
            "/warehouse/v1/product",
            Some(json!({"products": [{
                "name": "Dining Chair",
                "contain_articles": [
                    {"art_id": "1", "amount_of": "4"},
                    {"art_id": "2", "amount_of": "8"},
                    {"art_id": "3", "amount_of": "1"},
                ],
            }]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "1 product inserted"}));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, db) = app().await;

        let (status, body) = send(&app, "GET", "/warehouse/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "healthy endpoint");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["timestamp"].is_string());

        db.close().await;
        let (status, body) = send(&app, "GET", "/warehouse/v1/health", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "unhealthy endpoint");
    }

    #[tokio::test]
    async fn test_empty_store() {
        let (app, _db) = app().await;

        let (status, body) = send(&app, "GET", "/warehouse/v1/inventory", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"inventory": []}));

        let (status, body) = send(&app, "GET", "/warehouse/v1/product", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "No product in stock"}));
    }

    #[tokio::test]
    async fn test_sell_flow() {
        let (app, _db) = app().await;
        load_chair(&app).await;

        let (_, body) = send(&app, "GET", "/warehouse/v1/product", None).await;
        assert_eq!(
            body,
            json!({"product_stocks": [{"name": "Dining Chair", "available_product_no": "2"}]})
        );

        let (status, body) = send(&app, "POST", "/warehouse/v1/product/Dining%20Chair", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Product Dining Chair is sold and inventory is updated accordingly"})
        );

        let (_, body) = send(&app, "GET", "/warehouse/v1/inventory", None).await;
        assert_eq!(
            body,
            json!({"inventory": [
                {"art_id": "1", "name": "leg", "stock": "8"},
                {"art_id": "2", "name": "screw", "stock": "9"},
                {"art_id": "3", "name": "seat", "stock": "1"},
            ]})
        );

        send(&app, "POST", "/warehouse/v1/product/Dining%20Chair", None).await;
        let (status, body) = send(&app, "POST", "/warehouse/v1/product/Dining%20Chair", None).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "OUT_OF_STOCK");
        assert_eq!(body["message"], "this product is not in stock, cannot be sold");
    }

    #[tokio::test]
    async fn test_sell_ignores_surrounding_whitespace() {
        let (app, _db) = app().await;
        load_chair(&app).await;

        let (status, _) = send(&app, "POST", "/warehouse/v1/product/Dining%20Chair%20", None).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", "/warehouse/v1/inventory", None).await;
        assert_eq!(body["inventory"][2]["stock"], "1");
    }

    #[tokio::test]
    async fn test_sell_unknown_product() {
        let (app, _db) = app().await;

        let (status, body) = send(&app, "POST", "/warehouse/v1/product/Sofa", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"code": "NOT_FOUND", "message": "this product is not in system, cannot be sold"})
        );
    }

    #[tokio::test]
    async fn test_invalid_upload_rejected() {
        let (app, _db) = app().await;

        let (status, body) = send(
            &app,
            "POST",
            "/warehouse/v1/inventory",
            Some(json!({"inventory": [
                {"art_id": "1", "name": "leg", "stock": "12"},
                {"art_id": "2", "name": "screw", "stock": "-1"},
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (_, body) = send(&app, "GET", "/warehouse/v1/inventory", None).await;
        assert_eq!(body, json!({"inventory": []}));
    }

    #[tokio::test]
    async fn test_duplicate_product_rejected() {
        let (app, _db) = app().await;
        load_chair(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/warehouse/v1/product",
            Some(json!({"products": [{
                "name": "Dining Chair",
                "contain_articles": [{"art_id": "1", "amount_of": "4"}],
            }]})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let (app, _db) = app().await;

        let (status, _, body) = send_raw(
            &app,
            "POST",
            "/warehouse/v1/product",
            Some("{\"products\": [".to_string()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "MALFORMED_REQUEST");
    }

    #[tokio::test]
    async fn test_request_id_echoed() {
        let (app, _db) = app().await;

        let (_, rid, _) =
            send_raw(&app, "GET", "/warehouse/v1/inventory", None, Some("req-7")).await;
        assert_eq!(rid.as_deref(), Some("req-7"));

        let (_, rid, _) = send_raw(&app, "GET", "/warehouse/v1/inventory", None, None).await;
        assert!(rid.is_some());
    }

    #[tokio::test]
    async fn test_expired_deadline_is_gateway_timeout() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let engine = Arc::new(SqliteInventory::new(db));
        let app = router(AppState::new(engine, Duration::ZERO));

        let (status, body) = send(&app, "GET", "/warehouse/v1/inventory", None).await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["code"], "TIMEOUT");
    }
}
