//! # Items API サーバー
//!
//! アイテム CRUD API のエントリーポイント。
//!
//! ## 起動順序
//!
//! 1. `.env` の読み込みとトレーシング初期化
//! 2. 設定読み込み（`ITEMS_HOST` / `ITEMS_PORT` / `STORE_BACKEND` / `DATABASE_URL`）
//! 3. レコードストアの起動と準備完了待ち
//! 4. ルーター構築と HTTP サーバー起動
//! 5. シグナル受信で graceful shutdown し、ストアを停止
//!
//! ## 起動方法
//!
//! ```bash
//! STORE_BACKEND=memory cargo run -p itembase-items-api
//! ```

use std::{net::SocketAddr, sync::Arc};

use itembase_domain::clock::SystemClock;
use itembase_infra::{InMemoryRecordStore, PostgresRecordStore, RecordStore, StoreService};
use itembase_items_api::{
    app_builder::build_app,
    config::{ItemsConfig, StoreBackend},
};
use itembase_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("items-api"));
    let _tracing_guard = tracing::info_span!("app", service = "items-api").entered();

    let config = ItemsConfig::from_env()?;
    tracing::info!(
        "Items API サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let service = match config.backend.clone() {
        StoreBackend::Postgres { database_url } => StoreService::start(move || async move {
            let store = PostgresRecordStore::bootstrap(&database_url).await?;
            Ok(Arc::new(store) as Arc<dyn RecordStore>)
        }),
        StoreBackend::Memory => {
            tracing::warn!("インメモリストアを使用します（再起動でデータは消えます）");
            StoreService::start(|| async {
                Ok(Arc::new(InMemoryRecordStore::with_items_collection()) as Arc<dyn RecordStore>)
            })
        }
    };
    let store = service.ready().await?;

    let app = build_app(store, Arc::new(SystemClock));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Items API サーバーが起動しました: {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    service.shutdown().await?;
    tracing::info!("Items API サーバーを停止しました");
    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("シャットダウンシグナルを受信しました");
}
