//! # レコードストア
//!
//! コレクションとレコードの永続化ゲートウェイ。
//!
//! ## 設計方針
//!
//! - **名前または ID で解決**: コレクションを受け取る操作はすべて
//!   名前と ID のどちらでも指定できる
//! - **見つからない場合はエラー**: 存在しないコレクションやレコードは
//!   `Option` ではなく [`InfraErrorKind::NotFound`](crate::InfraErrorKind::NotFound) で返す
//! - **保存は新規か既存かで分岐**: [`ItemRecord::is_new`] で INSERT / UPDATE を選ぶ
//!
//! ## 実装
//!
//! - [`PostgresRecordStore`] - PostgreSQL（本番）
//! - [`InMemoryRecordStore`] - プロセス内メモリ（開発・テスト）

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use itembase_domain::{collection::Collection, item::ItemRecord};
pub use memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;

use crate::error::InfraError;

/// レコードストアトレイト
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 名前または ID でコレクションを取得する
    async fn find_collection_by_name_or_id(
        &self,
        name_or_id: &str,
    ) -> Result<Collection, InfraError>;

    /// コレクション内のレコードを ID で取得する
    async fn find_record_by_id(
        &self,
        collection_name_or_id: &str,
        id: &str,
    ) -> Result<ItemRecord, InfraError>;

    /// コレクション内のレコードを条件で取得する
    ///
    /// `filter` が `None` の場合は全件を返す。件数の上限や順序の保証はない。
    async fn find_records_by_filter(
        &self,
        collection_name_or_id: &str,
        filter: Option<&RecordFilter>,
    ) -> Result<Vec<ItemRecord>, InfraError>;

    /// レコードを保存し、保存後の状態を返す
    ///
    /// 新規レコードは挿入、既存レコードは 3 フィールドと `updated` を更新する。
    async fn save_record(&self, record: &ItemRecord) -> Result<ItemRecord, InfraError>;

    /// レコードを削除する
    async fn delete_record(&self, record: &ItemRecord) -> Result<(), InfraError>;

    /// ストアが応答可能か確認する（Readiness Check 用）
    async fn ping(&self) -> Result<(), InfraError>;

    /// ストアを閉じる。以降の操作はエラーになる
    async fn close(&self);
}

/// レコードの絞り込み条件
///
/// 指定したフィールドがすべて等しいレコードに一致する。
/// 何も指定しない場合はすべてのレコードに一致する。
///
/// ```
/// use itembase_infra::RecordFilter;
///
/// let filter = RecordFilter::new().title("Pen").price(1.5);
/// assert_eq!(filter.title_eq(), Some("Pen"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    title:       Option<String>,
    description: Option<String>,
    price:       Option<f64>,
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn title_eq(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description_eq(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price_eq(&self) -> Option<f64> {
        self.price
    }

    /// レコードが条件に一致するか
    pub fn matches(&self, record: &ItemRecord) -> bool {
        self.title.as_deref().is_none_or(|t| record.title() == t)
            && self
                .description
                .as_deref()
                .is_none_or(|d| record.description() == d)
            && self.price.is_none_or(|p| record.price() == p)
    }
}
