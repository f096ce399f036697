//! # アイテム CRUD の結合テスト
//!
//! `StoreService` でインメモリストアを起動し、`build_app` で組み立てた
//! ルーター全体（レイヤー込み）に対してリクエストを送る。
//!
//! 実行方法:
//! ```bash
//! cargo test -p itembase-items-api --test item_crud_test
//! ```

use std::sync::Arc;

use axum::{Router, body::Body};
use http::{Request, StatusCode};
use itembase_domain::clock::SystemClock;
use itembase_infra::{InMemoryRecordStore, RecordStore, StoreService};
use itembase_items_api::{app_builder::build_app, handler::ItemRecordDto};
use itembase_shared::ErrorResponse;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

// =============================================================================
// ヘルパー
// =============================================================================

async fn start_app() -> (StoreService, Router) {
    let service = StoreService::start(|| async {
        Ok(Arc::new(InMemoryRecordStore::with_items_collection()) as Arc<dyn RecordStore>)
    });
    let store = service.ready().await.unwrap();
    (service, build_app(store, Arc::new(SystemClock)))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> http::Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: http::Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn test_作成から削除までの一連の流れ() {
    let (service, app) = start_app().await;

    // 作成
    let response = send(
        &app,
        "POST",
        "/items",
        Some(serde_json::json!({"title": "Pen", "description": "Blue ink", "price": 1.5})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: ItemRecordDto = body_json(response).await;
    let uri = format!("/items/{}", created.id);

    // 取得
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let found: ItemRecordDto = body_json(response).await;
    assert_eq!(found.title, "Pen");
    assert_eq!(found.description, "Blue ink");
    assert_eq!(found.price, 1.5);

    // 更新
    let response = send(
        &app,
        "PUT",
        &uri,
        Some(serde_json::json!({"title": "Pencil", "description": "HB", "price": 0.8})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: ItemRecordDto = body_json(response).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Pencil");
    assert_eq!(updated.created, created.created);
    assert!(updated.updated >= created.updated);

    // 削除
    let response = send(&app, "DELETE", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // 削除後の取得
    let response = send(&app, "GET", &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = body_json(response).await;
    assert_eq!(body, ErrorResponse::new("Item not found"));

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_put後の取得は上書き後の値を返す() {
    let (service, app) = start_app().await;
    let response = send(
        &app,
        "POST",
        "/items",
        Some(serde_json::json!({"title": "Pen", "description": "Blue ink", "price": 1.5})),
    )
    .await;
    let created: ItemRecordDto = body_json(response).await;
    let uri = format!("/items/{}", created.id);

    send(&app, "PUT", &uri, Some(serde_json::json!({"price": 3.0}))).await;

    let found: ItemRecordDto = body_json(send(&app, "GET", &uri, None).await).await;
    assert_eq!(found.title, "");
    assert_eq!(found.description, "");
    assert_eq!(found.price, 3.0);

    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_同じアイテムの2回目の削除は404になる() {
    let (service, app) = start_app().await;
    let response = send(&app, "POST", "/items", Some(serde_json::json!({"title": "Pen"}))).await;
    let created: ItemRecordDto = body_json(response).await;
    let uri = format!("/items/{}", created.id);

    let first = send(&app, "DELETE", &uri, None).await;
    let second = send(&app, "DELETE", &uri, None).await;

    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_一覧にはn件作成したアイテムがすべて含まれる() {
    let (service, app) = start_app().await;
    let mut ids = Vec::new();
    for i in 0..5 {
        let response = send(
            &app,
            "POST",
            "/items",
            Some(serde_json::json!({"title": format!("item-{i}"), "price": f64::from(i)})),
        )
        .await;
        let created: ItemRecordDto = body_json(response).await;
        ids.push(created.id);
    }

    let response = send(&app, "GET", "/items", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let items: Vec<ItemRecordDto> = body_json(response).await;
    assert!(items.len() >= ids.len());
    for id in &ids {
        assert!(items.iter().any(|item| &item.id == id), "missing {id}");
    }
    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_不正なjsonは4xxとmessageを返す() {
    let (service, app) = start_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/items")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();

    assert!(response.status().is_client_error());
    let body: ErrorResponse = body_json(response).await;
    assert!(!body.message.is_empty());

    let items: Vec<ItemRecordDto> = body_json(send(&app, "GET", "/items", None).await).await;
    assert!(items.is_empty());
    service.shutdown().await.unwrap();
}

// =============================================================================
// Request ID
// =============================================================================

#[tokio::test]
async fn test_すべてのレスポンスにuuid_v7のx_request_idが付く() {
    let (service, app) = start_app().await;

    for (method, uri) in [
        ("GET", "/items"),
        ("GET", "/items/nonexistent"),
        ("GET", "/health"),
        ("GET", "/no-such-route"),
    ] {
        let response = send(&app, method, uri, None).await;

        let value = response
            .headers()
            .get("x-request-id")
            .unwrap_or_else(|| panic!("{method} {uri} に x-request-id がない"))
            .to_str()
            .unwrap();
        let parsed = uuid::Uuid::parse_str(value).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }
    service.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_クライアント提供のx_request_idがそのまま返される() {
    let (service, app) = start_app().await;
    let custom_id = "client-provided-request-id-123";

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/items")
                .header("x-request-id", custom_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .unwrap()
            .to_str()
            .unwrap(),
        custom_id
    );
    service.shutdown().await.unwrap();
}

// =============================================================================
// ライフサイクル
// =============================================================================

#[tokio::test]
async fn test_ストア停止後のreadinessは503になる() {
    let (service, app) = start_app().await;

    let ready = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(ready.status(), StatusCode::OK);

    service.shutdown().await.unwrap();

    let response = send(&app, "GET", "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: serde_json::Value = body_json(response).await;
    assert_eq!(body["status"], "not_ready");
}
