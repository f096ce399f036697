//! # PostgreSQL 接続管理
//!
//! 接続プールの作成と、レコードストアのブートストラップマイグレーションを行う。
//!
//! マイグレーションは `_collections` テーブルと `items` テーブルを作成し、
//! `items` コレクションを登録する。API 層はこれらに触れない。
//!
//! ```rust,ignore
//! use itembase_infra::db;
//!
//! let pool = db::create_pool("postgres://localhost/itembase").await?;
//! db::run_migrations(&pool).await?;
//! ```

use std::time::Duration;

use sqlx::{PgPool, postgres::PgPoolOptions};

/// データベースマイグレーションを実行する
///
/// 適用済みのマイグレーションはスキップされる。
/// sqlx が advisory lock を取るため、複数プロセスから同時に呼んでも安全。
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// PostgreSQL 接続プールを作成する
///
/// - `max_connections(10)`: 最大接続数
/// - `acquire_timeout(5秒)`: 接続取得のタイムアウト。超過時はエラー
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}
