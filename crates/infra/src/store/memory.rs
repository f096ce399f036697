//! # InMemoryRecordStore
//!
//! プロセス内メモリにレコードを保持するストア。`STORE_BACKEND=memory` で使う。
//!
//! 状態はすべて `std::sync::Mutex` の内側にあり、ロックは `.await` をまたがない。
//! レコードは挿入順に保持し、一覧もその順で返す。

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use itembase_domain::{
    collection::{Collection, CollectionId},
    item::{ITEMS_COLLECTION, ItemRecord},
};

use super::{RecordFilter, RecordStore};
use crate::error::InfraError;

#[derive(Default)]
struct MemoryState {
    collections: Vec<Collection>,
    records:     Vec<ItemRecord>,
    closed:      bool,
}

/// インメモリ実装の RecordStore
///
/// `Clone` したインスタンスは同じ状態を共有する。
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRecordStore {
    /// 登録済みコレクションを指定して作成する
    pub fn with_collections(collections: Vec<Collection>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                collections,
                ..MemoryState::default()
            })),
        }
    }

    /// `items` コレクションだけを登録した状態で作成する
    pub fn with_items_collection() -> Self {
        Self::with_collections(vec![Collection::new(
            CollectionId::new(),
            ITEMS_COLLECTION,
        )])
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryState>, InfraError> {
        let state = self
            .state
            .lock()
            .map_err(|e| InfraError::unexpected(format!("ストアのロックに失敗しました: {e}")))?;
        if state.closed {
            return Err(InfraError::unavailable("ストアは閉じられています"));
        }
        Ok(state)
    }
}

impl MemoryState {
    fn collection(&self, name_or_id: &str) -> Result<&Collection, InfraError> {
        self.collections
            .iter()
            .find(|c| c.matches(name_or_id))
            .ok_or_else(|| InfraError::not_found("Collection", name_or_id))
    }

    fn position(&self, record: &ItemRecord) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.id() == record.id() && r.collection_id() == record.collection_id())
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    #[tracing::instrument(skip_all, level = "debug", fields(%name_or_id))]
    async fn find_collection_by_name_or_id(
        &self,
        name_or_id: &str,
    ) -> Result<Collection, InfraError> {
        let state = self.lock()?;
        state.collection(name_or_id).cloned()
    }

    #[tracing::instrument(skip_all, level = "debug", fields(collection = %collection_name_or_id, %id))]
    async fn find_record_by_id(
        &self,
        collection_name_or_id: &str,
        id: &str,
    ) -> Result<ItemRecord, InfraError> {
        let state = self.lock()?;
        let collection = state.collection(collection_name_or_id)?;
        state
            .records
            .iter()
            .find(|r| r.collection_id() == collection.id() && r.id().as_str() == id)
            .cloned()
            .ok_or_else(|| InfraError::not_found("Record", id))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(collection = %collection_name_or_id))]
    async fn find_records_by_filter(
        &self,
        collection_name_or_id: &str,
        filter: Option<&RecordFilter>,
    ) -> Result<Vec<ItemRecord>, InfraError> {
        let state = self.lock()?;
        let collection = state.collection(collection_name_or_id)?;
        Ok(state
            .records
            .iter()
            .filter(|r| r.collection_id() == collection.id())
            .filter(|r| filter.is_none_or(|f| f.matches(r)))
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %record.id()))]
    async fn save_record(&self, record: &ItemRecord) -> Result<ItemRecord, InfraError> {
        let mut state = self.lock()?;
        state.collection(record.collection_id().as_str())?;

        let saved = record.clone().persisted();
        match (record.is_new(), state.position(record)) {
            (true, None) => state.records.push(saved.clone()),
            (true, Some(_)) => {
                return Err(InfraError::unexpected(format!(
                    "レコード ID が重複しています(id={})",
                    record.id()
                )));
            }
            (false, Some(pos)) => state.records[pos] = saved.clone(),
            (false, None) => return Err(InfraError::not_found("Record", record.id().as_str())),
        }
        Ok(saved)
    }

    #[tracing::instrument(skip_all, level = "debug", fields(id = %record.id()))]
    async fn delete_record(&self, record: &ItemRecord) -> Result<(), InfraError> {
        let mut state = self.lock()?;
        let pos = state
            .position(record)
            .ok_or_else(|| InfraError::not_found("Record", record.id().as_str()))?;
        state.records.remove(pos);
        Ok(())
    }

    async fn ping(&self) -> Result<(), InfraError> {
        self.lock().map(|_| ())
    }

    async fn close(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.closed = true;
        }
    }
}
