//! # テスト用レコードストア
//!
//! ハンドラ・ユースケースのテストで使うストア。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! itembase-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::{
   collections::HashSet,
   sync::{
      Arc,
      Mutex,
      atomic::{AtomicUsize, Ordering},
   },
};

use async_trait::async_trait;
use itembase_domain::{collection::Collection, item::ItemRecord};

use crate::{
   error::InfraError,
   store::{InMemoryRecordStore, RecordFilter, RecordStore},
};

/// 失敗を注入できる操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
   FindCollection,
   FindRecord,
   FindRecords,
   Save,
   Delete,
   Ping,
}

/// 失敗注入と呼び出し回数の記録ができる RecordStore
///
/// 正常系は [`InMemoryRecordStore`] に委譲する。
/// 失敗を指定した操作は `Unexpected` エラー（`"<op> failed"`）を返す。
#[derive(Clone)]
pub struct MockRecordStore {
   inner:   InMemoryRecordStore,
   fail_on: Arc<Mutex<HashSet<StoreOp>>>,
   calls:   Arc<AtomicUsize>,
}

impl MockRecordStore {
   /// `items` コレクションを登録済みのストアを作成する
   pub fn new() -> Self {
      Self::from_inner(InMemoryRecordStore::with_items_collection())
   }

   /// コレクションが 1 つも登録されていないストアを作成する
   pub fn without_collections() -> Self {
      Self::from_inner(InMemoryRecordStore::default())
   }

   fn from_inner(inner: InMemoryRecordStore) -> Self {
      Self {
         inner,
         fail_on: Arc::new(Mutex::new(HashSet::new())),
         calls: Arc::new(AtomicUsize::new(0)),
      }
   }

   /// 指定した操作を失敗させる
   pub fn fail_on(self, op: StoreOp) -> Self {
      self.fail_on.lock().unwrap().insert(op);
      self
   }

   /// これまでに呼ばれた操作の回数
   pub fn call_count(&self) -> usize {
      self.calls.load(Ordering::SeqCst)
   }

   fn enter(&self, op: StoreOp) -> Result<(), InfraError> {
      self.calls.fetch_add(1, Ordering::SeqCst);
      if self.fail_on.lock().unwrap().contains(&op) {
         return Err(InfraError::unexpected(format!("{op:?} failed")));
      }
      Ok(())
   }
}

impl Default for MockRecordStore {
   fn default() -> Self {
      Self::new()
   }
}

#[async_trait]
impl RecordStore for MockRecordStore {
   async fn find_collection_by_name_or_id(
      &self,
      name_or_id: &str,
   ) -> Result<Collection, InfraError> {
      self.enter(StoreOp::FindCollection)?;
      self.inner.find_collection_by_name_or_id(name_or_id).await
   }

   async fn find_record_by_id(
      &self,
      collection_name_or_id: &str,
      id: &str,
   ) -> Result<ItemRecord, InfraError> {
      self.enter(StoreOp::FindRecord)?;
      self.inner.find_record_by_id(collection_name_or_id, id).await
   }

   async fn find_records_by_filter(
      &self,
      collection_name_or_id: &str,
      filter: Option<&RecordFilter>,
   ) -> Result<Vec<ItemRecord>, InfraError> {
      self.enter(StoreOp::FindRecords)?;
      self
         .inner
         .find_records_by_filter(collection_name_or_id, filter)
         .await
   }

   async fn save_record(&self, record: &ItemRecord) -> Result<ItemRecord, InfraError> {
      self.enter(StoreOp::Save)?;
      self.inner.save_record(record).await
   }

   async fn delete_record(&self, record: &ItemRecord) -> Result<(), InfraError> {
      self.enter(StoreOp::Delete)?;
      self.inner.delete_record(record).await
   }

   async fn ping(&self) -> Result<(), InfraError> {
      self.enter(StoreOp::Ping)?;
      self.inner.ping().await
   }

   async fn close(&self) {
      self.inner.close().await;
   }
}
