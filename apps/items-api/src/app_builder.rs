//! # ルーター構築
//!
//! ルート定義と共通レイヤーをまとめて `Router` を組み立てる。
//!
//! ## レイヤー構成（下に書いたものが外側）
//!
//! 1. `SetRequestIdLayer`（最外）: UUID v7 を生成（またはクライアント提供値を使用）
//! 2. `TraceLayer`: request_id を含むスパンで全ログに Request ID を付ける
//! 3. `PropagateRequestIdLayer`: レスポンスヘッダーに `X-Request-Id` をコピー
//! 4. `CatchPanicLayer`: ハンドラのパニックを 500 の JSON レスポンスに変換

use std::{any::Any, sync::Arc};

use axum::{
    Json,
    Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use itembase_domain::clock::Clock;
use itembase_infra::RecordStore;
use itembase_shared::{
    ErrorResponse,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        ItemState,
        ReadinessState,
        create_item,
        delete_item,
        get_item,
        health_check,
        list_items,
        readiness_check,
        update_item,
    },
    usecase::ItemUseCaseImpl,
};

/// アプリケーション全体のルーターを構築する
pub fn build_app(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Router {
    let item_state = Arc::new(ItemState {
        usecase: ItemUseCaseImpl::new(store.clone(), clock),
    });
    let readiness_state = Arc::new(ReadinessState { store });

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .with_state(readiness_state)
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(item_state)
        .fallback(route_not_found);

    with_common_layers(router)
}

/// Request ID・トレース・パニック回復のレイヤーを付与する
pub fn with_common_layers(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}

/// 未定義ルートへのフォールバック
async fn route_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::route_not_found()))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %detail, "ハンドラでパニックが発生しました");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::internal_error()),
    )
        .into_response()
}
