//! アイテム CRUD ユースケース

use std::sync::Arc;

use itembase_domain::{
    clock::Clock,
    item::{ITEMS_COLLECTION, Item, ItemRecord},
};
use itembase_infra::RecordStore;

use crate::error::ApiError;

/// アイテム CRUD ユースケース
pub struct ItemUseCaseImpl {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
}

impl ItemUseCaseImpl {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// アイテムを作成する
    ///
    /// 1. `items` コレクションを名前で取得（失敗はすべて `CollectionNotFound`）
    /// 2. 空のレコードを作り 3 フィールドを設定
    /// 3. 保存
    pub async fn create_item(&self, item: Item) -> Result<ItemRecord, ApiError> {
        let collection = self
            .store
            .find_collection_by_name_or_id(ITEMS_COLLECTION)
            .await
            .map_err(ApiError::CollectionNotFound)?;

        let now = self.clock.now();
        let record = ItemRecord::new(&collection, now).apply(item, now);
        let saved = self.store.save_record(&record).await?;

        tracing::info!(id = %saved.id(), "アイテムを作成しました");
        Ok(saved)
    }

    /// アイテムを ID で取得する
    ///
    /// 取得の失敗はすべて `ItemNotFound` になる。NotFound 以外の失敗はログにだけ残す。
    pub async fn get_item(&self, id: &str) -> Result<ItemRecord, ApiError> {
        self.store
            .find_record_by_id(ITEMS_COLLECTION, id)
            .await
            .map_err(|e| {
                if !e.is_not_found() {
                    tracing::warn!(
                        error = %e,
                        span_trace = %e.span_trace(),
                        "アイテムの取得に失敗しました: id={}",
                        id
                    );
                }
                ApiError::ItemNotFound
            })
    }

    /// すべてのアイテムを取得する（順序・件数の保証なし）
    pub async fn list_items(&self) -> Result<Vec<ItemRecord>, ApiError> {
        let records = self
            .store
            .find_records_by_filter(ITEMS_COLLECTION, None)
            .await?;
        Ok(records)
    }

    /// アイテムの 3 フィールドを上書きする
    ///
    /// 入力で省略されたフィールドもゼロ値で上書きする。
    pub async fn update_item(&self, id: &str, item: Item) -> Result<ItemRecord, ApiError> {
        let record = self.get_item(id).await?;

        let updated = record.apply(item, self.clock.now());
        let saved = self.store.save_record(&updated).await?;

        tracing::info!(id = %saved.id(), "アイテムを更新しました");
        Ok(saved)
    }

    /// アイテムを削除する
    pub async fn delete_item(&self, id: &str) -> Result<(), ApiError> {
        let record = self.get_item(id).await?;

        self.store.delete_record(&record).await?;

        tracing::info!(id = %record.id(), "アイテムを削除しました");
        Ok(())
    }
}
