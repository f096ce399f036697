//! # Itembase ドメイン層
//!
//! アイテム API が扱うレコードとコレクションのモデルを定義する。
//!
//! ## 設計方針
//!
//! - **型付きレコード**: レコードのフィールドは名前による動的代入ではなく、
//!   コレクションごとの構造体（[`item::ItemRecord`]）で表現する
//! - **I/O を持たない**: 永続化はインフラ層のレコードストアが担当し、
//!   ドメイン層はストアに依存しない
//!
//! ## 依存関係の方向
//!
//! ```text
//! items-api → infra → domain
//!     ↓
//!   shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`clock`] - 現在時刻の抽象化
//! - [`collection`] - コレクション（レコードのスキーマ単位）
//! - [`item`] - アイテムの入力値とレコード
//!
//! ## 使用例
//!
//! ```rust
//! use chrono::Utc;
//! use itembase_domain::{
//!     collection::{Collection, CollectionId},
//!     item::{Item, ItemRecord},
//! };
//!
//! let collection = Collection::new(CollectionId::new(), "items");
//! let record = ItemRecord::new(&collection, Utc::now()).apply(
//!     Item {
//!         title:       "Pen".to_string(),
//!         description: "Blue ink".to_string(),
//!         price:       1.5,
//!     },
//!     Utc::now(),
//! );
//! assert_eq!(record.title(), "Pen");
//! ```

#[macro_use]
mod macros;

pub mod clock;
pub mod collection;
pub mod item;
