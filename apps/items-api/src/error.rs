//! # Items API エラー定義
//!
//! ハンドラが返すエラーと、`{"message": string}` 形式のレスポンスへの変換。
//!
//! | バリアント | ステータス | message |
//! |-----------|-----------|---------|
//! | `InvalidBody` | 400（Content-Type 不正は 415） | リジェクションの本文 |
//! | `ItemNotFound` | 404 | `Item not found` |
//! | `CollectionNotFound` | 500 | `Collection not found` |
//! | `Store` | 500 | ストアエラーの表示文字列 |

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use itembase_infra::InfraError;
use itembase_shared::ErrorResponse;
use thiserror::Error;

/// Items API で発生するエラー
#[derive(Debug, Error)]
pub enum ApiError {
    /// リクエストボディの JSON を束縛できない
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),

    /// 指定 ID のアイテムが存在しない
    #[error("Item not found")]
    ItemNotFound,

    /// `items` コレクションがストアに登録されていない
    #[error("Collection not found")]
    CollectionNotFound(#[source] InfraError),

    /// ストア操作の失敗
    #[error(transparent)]
    Store(#[from] InfraError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidBody(JsonRejection::JsonDataError(_)) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::ItemNotFound => StatusCode::NOT_FOUND,
            ApiError::CollectionNotFound(e) | ApiError::Store(e) => {
                tracing::error!(
                    error = %e,
                    span_trace = %e.span_trace(),
                    "レコードストアの操作に失敗しました: {}",
                    self
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match self {
            ApiError::InvalidBody(rejection) => rejection.body_text(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
