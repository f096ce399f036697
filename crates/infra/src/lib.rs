//! # Itembase インフラ層
//!
//! レコードストア（アイテムの永続化ゲートウェイ）とその周辺を提供する。
//!
//! ## 設計方針
//!
//! - **トレイトで抽象化**: API 層は [`RecordStore`] だけに依存し、
//!   PostgreSQL 実装とインメモリ実装を差し替えられる
//! - **スキーマはストアの責務**: コレクションの登録とテーブル作成は
//!   ストア起動時（[`StoreService`] のブートストラップ）に済ませる
//! - **エラーの統一**: すべての操作は [`InfraError`] を返す
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL 接続プールとマイグレーション
//! - [`error`] - インフラ層エラー
//! - [`service`] - ストアのライフサイクル管理（起動・準備完了・停止）
//! - [`store`] - `RecordStore` トレイトと実装
//! - `mock` - テスト用ストア（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod service;
pub mod store;

pub use error::{InfraError, InfraErrorKind};
pub use service::StoreService;
pub use store::{InMemoryRecordStore, PostgresRecordStore, RecordFilter, RecordStore};
