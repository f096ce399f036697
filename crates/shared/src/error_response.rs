//! # エラーレスポンス
//!
//! すべてのエラーレスポンスで共通の JSON 形式 `{"message": string}` を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - HTTP ステータスとの対応付けは各サービスのエラー型が持つ
//! - フレームワーク側で発生するエラー（ルート未定義、パニック）用の
//!   固定メッセージは便利コンストラクタで提供する

use serde::{Deserialize, Serialize};

/// エラーレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// 404 Not Found（ルートが存在しない）
    pub fn route_not_found() -> Self {
        Self::new("Not Found")
    }

    /// 500 Internal Server Error（ハンドラ内のパニックなど）
    pub fn internal_error() -> Self {
        Self::new("Internal Server Error")
    }
}
