//! # StoreService
//!
//! レコードストアをバックグラウンドタスクとして起動・停止する。
//!
//! ## ライフサイクル
//!
//! ```text
//! start(bootstrap) ──▶ Starting ──bootstrap 成功──▶ Ready ──shutdown()──▶ close() ──▶ Stopped
//!                                └─bootstrap 失敗──▶ Failed
//! ```
//!
//! HTTP サーバーは [`StoreService::ready`] が成功してからリスナーを開き、
//! graceful shutdown の後に [`StoreService::shutdown`] を呼ぶ。

use std::{future::Future, sync::Arc};

use tokio::{
    sync::{oneshot, watch},
    task::JoinHandle,
};

use crate::{error::InfraError, store::RecordStore};

/// 起動タスクの状態
#[derive(Clone)]
enum ServiceState {
    Starting,
    Ready(Arc<dyn RecordStore>),
    Failed(String),
    Stopped,
}

/// レコードストアのライフサイクル管理
pub struct StoreService {
    state_rx:    watch::Receiver<ServiceState>,
    shutdown_tx: oneshot::Sender<()>,
    handle:      JoinHandle<()>,
}

impl StoreService {
    /// ブートストラップ処理をバックグラウンドタスクで開始する
    ///
    /// タスクはブートストラップ完了後、停止シグナルを受けるまで待機し、
    /// 受信したらストアを閉じて終了する。
    pub fn start<F, Fut>(bootstrap: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Arc<dyn RecordStore>, InfraError>> + Send + 'static,
    {
        let (state_tx, state_rx) = watch::channel(ServiceState::Starting);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let store = match bootstrap().await {
                Ok(store) => store,
                Err(e) => {
                    tracing::error!(error = %e, span_trace = %e.span_trace(), "レコードストアの起動に失敗しました");
                    state_tx.send_replace(ServiceState::Failed(e.to_string()));
                    return;
                }
            };
            tracing::info!("レコードストアの準備が完了しました");
            state_tx.send_replace(ServiceState::Ready(store.clone()));

            // Sender が drop された場合も停止として扱う
            let _ = shutdown_rx.await;

            store.close().await;
            state_tx.send_replace(ServiceState::Stopped);
            tracing::info!("レコードストアを停止しました");
        });

        Self {
            state_rx,
            shutdown_tx,
            handle,
        }
    }

    /// ブートストラップの完了を待ち、ストアのハンドルを返す
    ///
    /// ブートストラップが失敗していた場合は `Unavailable` エラーを返す。
    pub async fn ready(&self) -> Result<Arc<dyn RecordStore>, InfraError> {
        let mut rx = self.state_rx.clone();
        let state = rx
            .wait_for(|s| !matches!(s, ServiceState::Starting))
            .await
            .map(|s| s.clone())
            .map_err(|_| InfraError::unavailable("起動タスクが終了しました"))?;

        match state {
            ServiceState::Ready(store) => Ok(store),
            ServiceState::Failed(msg) => Err(InfraError::unavailable(msg)),
            ServiceState::Starting | ServiceState::Stopped => {
                Err(InfraError::unavailable("レコードストアは停止しています"))
            }
        }
    }

    /// ストアを停止し、バックグラウンドタスクの終了を待つ
    pub async fn shutdown(self) -> Result<(), InfraError> {
        // ブートストラップ失敗でタスクが終了済みなら受信側はない
        let _ = self.shutdown_tx.send(());
        self.handle
            .await
            .map_err(|e| InfraError::unexpected(format!("ストアタスクの終了待ちに失敗しました: {e}")))
    }
}
