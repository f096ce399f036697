//! # ヘルスチェックハンドラ
//!
//! - `/health`: Liveness Check（常に `"healthy"` を返す）
//! - `/health/ready`: Readiness Check（レコードストアの応答を確認）

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use itembase_infra::RecordStore;
use itembase_shared::{CheckStatus, HealthResponse, ReadinessResponse};

/// Readiness Check 用の State
pub struct ReadinessState {
    pub store: Arc<dyn RecordStore>,
}

/// ヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check エンドポイント
///
/// ストアが応答すれば 200、失敗またはタイムアウトなら 503。
#[tracing::instrument(skip_all)]
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();
    checks.insert(
        "record_store".to_string(),
        check_store(state.store.as_ref()).await,
    );

    let response = ReadinessResponse::from_checks(checks);
    let http_status = if response.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (http_status, Json(response))
}

/// ストアへの ping で接続を確認する（タイムアウト: 5 秒）
async fn check_store(store: &dyn RecordStore) -> CheckStatus {
    match tokio::time::timeout(Duration::from_secs(5), store.ping()).await {
        Ok(Ok(())) => CheckStatus::Ok,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "readiness check: record store ping failed");
            CheckStatus::Error
        }
        Err(_) => {
            tracing::warn!("readiness check: record store ping timed out");
            CheckStatus::Error
        }
    }
}
