//! # インフラ層エラー定義
//!
//! レコードストアの操作で発生するエラーを表現する。
//!
//! ## 構造
//!
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Database, NotFound 等）
//!
//! `From` 実装や convenience constructor でエラーを生成した時点の
//! スパン情報が自動的に記録される。API 層は `kind()` で分岐して
//! HTTP レスポンスを決める。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// ```ignore
/// match error.kind() {
///     InfraErrorKind::NotFound { .. } => { /* 404 */ }
///     _ => { /* 500 */ }
/// }
/// ```
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
    kind:       InfraErrorKind,
    span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
    /// SQL の実行失敗、接続エラー、制約違反など
    #[error("データベースエラー: {0}")]
    Database(#[source] sqlx::Error),

    /// ブートストラップ時のマイグレーション失敗
    #[error("マイグレーションエラー: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),

    /// コレクションまたはレコードが存在しない
    #[error("{entity} が見つかりません(id={id})")]
    NotFound {
        /// エンティティ名（例: "Collection", "Record"）
        entity: String,
        /// 検索に使った名前または ID
        id:     String,
    },

    /// ストアが停止済み、または起動に失敗している
    #[error("レコードストアが利用できません: {0}")]
    Unavailable(String),

    /// 上記に分類できない予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl InfraError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &InfraErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// NotFound 種別か
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, InfraErrorKind::NotFound { .. })
    }

    // ===== Convenience constructors =====

    /// 対象が存在しないエラーを生成する
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::NotFound {
                entity: entity.into(),
                id:     id.into(),
            },
            span_trace: SpanTrace::capture(),
        }
    }

    /// ストア利用不可エラーを生成する
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unavailable(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }

    /// 予期しないエラーを生成する
    pub fn unexpected(msg: impl Into<String>) -> Self {
        Self {
            kind:       InfraErrorKind::Unexpected(msg.into()),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl fmt::Debug for InfraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfraError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for InfraError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<sqlx::Error> for InfraError {
    fn from(source: sqlx::Error) -> Self {
        Self {
            kind:       InfraErrorKind::Database(source),
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for InfraError {
    fn from(source: sqlx::migrate::MigrateError) -> Self {
        Self {
            kind:       InfraErrorKind::Migration(source),
            span_trace: SpanTrace::capture(),
        }
    }
}
