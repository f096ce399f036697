//! # コレクション
//!
//! 同じ形のレコードをまとめる名前付きのスキーマ単位。
//!
//! コレクションの登録はレコードストア自身の責務であり、API 層は
//! 登録済みのコレクションを名前または ID で引くだけ。

define_record_id! {
    /// コレクションの一意識別子
    pub struct CollectionId;
}

/// 名前付きコレクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    id:   CollectionId,
    name: String,
}

impl Collection {
    pub fn new(id: CollectionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> &CollectionId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 名前または ID が一致するか
    ///
    /// レコードストアの「名前または ID による検索」と同じ判定に使う。
    pub fn matches(&self, name_or_id: &str) -> bool {
        self.name == name_or_id || self.id.as_str() == name_or_id
    }
}
