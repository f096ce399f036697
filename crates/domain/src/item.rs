//! # アイテム
//!
//! `items` コレクションに属するレコードと、その入力値を定義する。
//!
//! ## 設計判断
//!
//! レコードストアの汎用レコードに名前でフィールドを代入する代わりに、
//! 3 つの固定フィールドを持つ [`ItemRecord`] を使う。動的スキーマの柔軟性は
//! 失うが、API 層が触るのは `title` / `description` / `price` だけなので問題ない。
//!
//! ## ライフサイクル
//!
//! ```text
//! ItemRecord::new ──apply──▶ (save: INSERT) ──▶ from_db ──apply──▶ (save: UPDATE)
//!   is_new = true                                 is_new = false
//! ```

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::collection::{Collection, CollectionId};

/// アイテムを格納するコレクション名
pub const ITEMS_COLLECTION: &str = "items";

/// 生成される ID の長さ
pub const ID_LENGTH: usize = 15;

const ID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// 英小文字・数字からなるランダムな ID 文字列を生成する
pub(crate) fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..ID_ALPHABET.len());
            ID_ALPHABET[idx] as char
        })
        .collect()
}

define_record_id! {
    /// レコードの一意識別子
    pub struct RecordId;
}

/// アイテムの入力値
///
/// リクエストボディから束縛される 3 フィールド。
/// 識別子を持たず、レコードへフィールド単位で写される。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Item {
    pub title:       String,
    pub description: String,
    pub price:       f64,
}

/// `items` コレクションの永続化レコード
///
/// ID と `created` / `updated` はレコードストアの管理下にある値で、
/// API 層はフィールドの設定と読み取りだけを行う。
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    id:              RecordId,
    collection_id:   CollectionId,
    collection_name: String,
    title:           String,
    description:     String,
    price:           f64,
    created:         DateTime<Utc>,
    updated:         DateTime<Utc>,
    is_new:          bool,
}

impl ItemRecord {
    /// コレクションに属する空のレコードを作成する
    ///
    /// フィールドはすべてゼロ値。保存されるまでは `is_new()` が `true` を返す。
    pub fn new(collection: &Collection, now: DateTime<Utc>) -> Self {
        Self {
            id:              RecordId::new(),
            collection_id:   collection.id().clone(),
            collection_name: collection.name().to_string(),
            title:           String::new(),
            description:     String::new(),
            price:           0.0,
            created:         now,
            updated:         now,
            is_new:          true,
        }
    }

    /// 保存済みの値からレコードを復元する
    pub fn from_db(
        id: RecordId,
        collection: &Collection,
        item: Item,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            collection_id: collection.id().clone(),
            collection_name: collection.name().to_string(),
            title: item.title,
            description: item.description,
            price: item.price,
            created,
            updated,
            is_new: false,
        }
    }

    /// 3 フィールドをすべて上書きした新しい状態を返す
    ///
    /// 部分更新は行わない。入力で省略されたフィールドはゼロ値で上書きされる。
    pub fn apply(self, item: Item, now: DateTime<Utc>) -> Self {
        Self {
            title: item.title,
            description: item.description,
            price: item.price,
            updated: now,
            ..self
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn collection_id(&self) -> &CollectionId {
        &self.collection_id
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// まだ一度も保存されていないか（保存時に INSERT / UPDATE を選ぶ）
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// 保存済みとしてマークした状態を返す
    pub fn persisted(self) -> Self {
        Self {
            is_new: false,
            ..self
        }
    }

    /// レコードの 3 フィールドを入力値の形で取り出す
    pub fn to_item(&self) -> Item {
        Item {
            title:       self.title.clone(),
            description: self.description.clone(),
            price:       self.price,
        }
    }
}
